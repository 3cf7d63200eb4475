// Error types for roots_hunt

use snafu::Snafu;
use std::io;

#[derive(Debug, Snafu)]
pub enum HuntError {
    // Persistence adapter errors
    #[snafu(display("Could not find application data directory for the hunt store"))]
    NoDataDir,
    #[snafu(display("Error accessing the hunt store"))]
    StorageIOError { source: io::Error },
    #[snafu(display("Error serializing hunt state"))]
    StorageSerializeError { source: serde_json::Error },
    #[snafu(display("Persistence unavailable for key {key}: {reason}"))]
    PersistenceUnavailable { key: String, reason: String },
    #[snafu(display("Malformed persisted state under key {key}: {reason}"))]
    MalformedPersistedState { key: String, reason: String },

    // Catalog errors
    #[snafu(display("Unknown station: {id}"))]
    UnknownStation { id: String },
    #[snafu(display("Invalid station catalog: {reason}"))]
    InvalidCatalog { reason: String },
    #[snafu(display("Error reading station catalog"))]
    CatalogIOError { source: io::Error },
    #[snafu(display("Error parsing station catalog"))]
    CatalogParseError { source: serde_json::Error },

    // Config management errors
    #[snafu(display("Could not find configuration directory to save config file"))]
    NoConfigDir,
    #[snafu(display("Error writing config file"))]
    ConfigIOError { source: io::Error },
    #[snafu(display("Error serializing config file"))]
    ConfigSerializeError { source: serde_json::Error },

    // Terminal errors
    #[snafu(display("Error reading from the console"))]
    ConsoleIOError { source: io::Error },
    #[snafu(display("Could not install the Ctrl-C handler"))]
    SignalHandlerError { source: ctrlc::Error },

    // User input validation errors
    #[snafu(display("Invalid user input: {field} - {reason}"))]
    InvalidUserInput { field: String, reason: String },
}

// Library interface for roots_hunt
// This allows integration tests to access internal modules

pub mod catalog;
pub mod config;
pub mod errors;
pub mod hunt;
pub mod ledger;
pub mod position;
pub mod proximity;
pub mod session;
pub mod storage;
pub mod visit;

// Re-export commonly used types
pub use catalog::{Catalog, Point, Station};
pub use config::AppConfig;
pub use errors::HuntError;
pub use hunt::{HuntState, SharedHunt};
pub use ledger::{CollectedItem, CollectionResult, Ledger, Progress};
pub use position::{Direction, Motion, Orientation, Position};
pub use storage::{FileBasedStore, KeyValueStore, MemoryStore};
pub use visit::VisitKind;

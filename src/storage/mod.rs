// Persistence adapter for hunt state
// A string-keyed, string-valued store that the ledger and the visit flag
// read and write against

pub mod file;
pub mod memory;

use crate::errors::HuntError;

pub use file::FileBasedStore;
pub use memory::MemoryStore;

/// Key holding the JSON-serialized collection ledger
pub const COLLECTED_ITEMS_KEY: &str = "collectedItems";
/// Key holding the first-visit flag
pub const HAS_VISITED_KEY: &str = "hasVisited";

/// Trait defining the interface for durable key-value storage
pub trait KeyValueStore: Send {
    /// Read the value stored under `key`, `None` when the key was never written
    fn get(&self, key: &str) -> Result<Option<String>, HuntError>;

    /// Replace the value stored under `key` as a single atomic write
    fn set(&mut self, key: &str, value: &str) -> Result<(), HuntError>;

    /// Remove `key` from the store, a no-op when absent
    fn remove(&mut self, key: &str) -> Result<(), HuntError>;

    /// Check if a value exists for `key`
    fn contains(&self, key: &str) -> Result<bool, HuntError> {
        Ok(self.get(key)?.is_some())
    }
}

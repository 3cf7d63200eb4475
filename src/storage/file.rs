// File-based key-value store, one JSON file per key

use crate::errors::HuntError;
use crate::storage::KeyValueStore;
use log::{debug, info, warn};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// File-based implementation of the persistence adapter
#[derive(Debug)]
pub struct FileBasedStore {
    /// Base directory holding one file per key
    storage_path: PathBuf,
}

impl FileBasedStore {
    /// Create a new file-based store, creating the directory if needed
    pub fn new(storage_path: PathBuf) -> Result<Self, HuntError> {
        if !storage_path.exists() {
            fs::create_dir_all(&storage_path)
                .map_err(|e| HuntError::StorageIOError { source: e })?;
            info!("Created hunt store at {:?}", storage_path);
        }

        Ok(Self { storage_path })
    }

    /// Create a store in the default application data directory
    pub fn new_default() -> Result<Self, HuntError> {
        let storage_path = Self::default_storage_path()?;
        Self::new(storage_path)
    }

    /// Get the default storage path for the hunt store
    pub fn default_storage_path() -> Result<PathBuf, HuntError> {
        let app_data_dir = dirs::data_dir().ok_or(HuntError::NoDataDir)?;
        Ok(app_data_dir.join("roots_hunt").join("store"))
    }

    /// Get the storage directory path
    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    /// Generate the file path for a given key
    fn file_path_for_key(&self, key: &str) -> PathBuf {
        let filename = format!("{}.json", Self::normalize_key(key));
        self.storage_path.join(filename)
    }

    /// Normalize a key into a filesystem-safe file stem
    fn normalize_key(key: &str) -> String {
        key.chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect()
    }

    /// Write to a temporary file first and move it into place
    fn write_atomically(&self, file_path: &Path, value: &str) -> Result<(), HuntError> {
        let temp_path = file_path.with_extension("json.tmp");

        {
            let mut temp_file =
                fs::File::create(&temp_path).map_err(|e| HuntError::PersistenceUnavailable {
                    key: file_path.display().to_string(),
                    reason: format!("Failed to create temporary file: {}", e),
                })?;

            temp_file
                .write_all(value.as_bytes())
                .map_err(|e| HuntError::PersistenceUnavailable {
                    key: file_path.display().to_string(),
                    reason: format!("Failed to write to temporary file: {}", e),
                })?;

            temp_file
                .sync_all()
                .map_err(|e| HuntError::PersistenceUnavailable {
                    key: file_path.display().to_string(),
                    reason: format!("Failed to sync temporary file: {}", e),
                })?;
        }

        fs::rename(&temp_path, file_path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            HuntError::PersistenceUnavailable {
                key: file_path.display().to_string(),
                reason: format!("Failed to move temporary file to final location: {}", e),
            }
        })
    }
}

impl KeyValueStore for FileBasedStore {
    fn get(&self, key: &str) -> Result<Option<String>, HuntError> {
        let file_path = self.file_path_for_key(key);

        if !file_path.exists() {
            debug!("No stored value for key {} at {:?}", key, file_path);
            return Ok(None);
        }

        let content =
            fs::read_to_string(&file_path).map_err(|e| HuntError::PersistenceUnavailable {
                key: key.to_string(),
                reason: format!("Failed to read {:?}: {}", file_path, e),
            })?;

        Ok(Some(content))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), HuntError> {
        let file_path = self.file_path_for_key(key);
        debug!("Writing {} bytes for key {}", value.len(), key);

        if let Err(e) = self.write_atomically(&file_path, value) {
            warn!("Failed to persist key {}: {}", key, e);
            return Err(e);
        }

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), HuntError> {
        let file_path = self.file_path_for_key(key);

        if file_path.exists() {
            fs::remove_file(&file_path).map_err(|e| HuntError::StorageIOError { source: e })?;
            info!("Removed stored key {}", key);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_based_store_creation() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("roots_hunt").join("store");
        let store = FileBasedStore::new(nested.clone()).unwrap();

        assert_eq!(store.storage_path(), nested.as_path());
        assert!(nested.exists());
    }

    #[test]
    fn test_key_normalization() {
        assert_eq!(FileBasedStore::normalize_key("collectedItems"), "collectedItems");
        assert_eq!(FileBasedStore::normalize_key("../etc/passwd"), "___etc_passwd");
        assert_eq!(FileBasedStore::normalize_key("has visited"), "has_visited");
    }

    #[test]
    fn test_set_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileBasedStore::new(temp_dir.path().to_path_buf()).unwrap();

        assert_eq!(store.get("hasVisited").unwrap(), None);
        store.set("hasVisited", "true").unwrap();
        assert_eq!(store.get("hasVisited").unwrap().as_deref(), Some("true"));

        // Overwrite replaces the whole value and leaves no temp file behind
        store.set("hasVisited", "false").unwrap();
        assert_eq!(store.get("hasVisited").unwrap().as_deref(), Some("false"));
        assert!(!temp_dir.path().join("hasVisited.json.tmp").exists());
    }

    #[test]
    fn test_values_survive_reopening() {
        let temp_dir = TempDir::new().unwrap();
        {
            let mut store = FileBasedStore::new(temp_dir.path().to_path_buf()).unwrap();
            store.set("collectedItems", "[]").unwrap();
        }

        let store = FileBasedStore::new(temp_dir.path().to_path_buf()).unwrap();
        assert!(store.contains("collectedItems").unwrap());
        assert_eq!(store.get("collectedItems").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_remove() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileBasedStore::new(temp_dir.path().to_path_buf()).unwrap();

        store.set("collectedItems", "[]").unwrap();
        store.remove("collectedItems").unwrap();
        assert!(!store.contains("collectedItems").unwrap());

        // Removing a missing key is fine
        store.remove("collectedItems").unwrap();
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileBasedStore::new(temp_dir.path().join("gone")).unwrap();
        fs::remove_dir_all(store.storage_path()).unwrap();

        assert!(matches!(
            store.set("collectedItems", "[]"),
            Err(HuntError::PersistenceUnavailable { .. })
        ));
    }
}

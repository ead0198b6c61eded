//! Desktop platform implementations
//!
//! The long-lived medium is a JSON file in the platform config directory;
//! the short-lived medium is process memory.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::application::BookingDraftStore;
use crate::config::DraftStoreConfig;
use crate::infrastructure::clock::SystemClock;
use crate::infrastructure::memory_storage::MemoryStorage;
use crate::ports::outbound::{DraftStorage, StorageError};

/// Desktop storage medium with file-based persistence
///
/// Stores key-value pairs in a JSON object file, by default at:
/// - Linux: ~/.config/magnetiq/booking/storage.json
/// - macOS: ~/Library/Application Support/io.magnetiq.booking/storage.json
/// - Windows: C:\Users\<User>\AppData\Roaming\magnetiq\booking\config\storage.json
#[derive(Clone)]
pub struct FileStorage {
    /// Path to the storage file
    storage_path: PathBuf,
    /// In-memory cache of stored values
    cache: Arc<RwLock<HashMap<String, String>>>,
}

impl FileStorage {
    /// Open the storage file, loading existing data if present.
    ///
    /// An unreadable or malformed file starts out empty; it is replaced on
    /// the next successful write.
    pub fn open(storage_path: impl Into<PathBuf>) -> Self {
        let storage_path = storage_path.into();

        let cache = if storage_path.exists() {
            match fs::read_to_string(&storage_path) {
                Ok(data) => match serde_json::from_str::<HashMap<String, String>>(&data) {
                    Ok(map) => map,
                    Err(e) => {
                        tracing::warn!(path = ?storage_path, "Failed to parse storage file: {}", e);
                        HashMap::new()
                    }
                },
                Err(e) => {
                    tracing::warn!(path = ?storage_path, "Failed to read storage file: {}", e);
                    HashMap::new()
                }
            }
        } else {
            HashMap::new()
        };

        tracing::debug!("Desktop storage initialized at: {:?}", storage_path);

        Self {
            storage_path,
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.storage_path
    }

    /// Write the cache to disk via a temp file and rename.
    fn persist(&self, cache: &HashMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.storage_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(StorageError::io)?;
            }
        }

        let data = serde_json::to_string_pretty(cache).map_err(StorageError::io)?;
        let tmp_path = self.storage_path.with_extension("json.tmp");
        fs::write(&tmp_path, data).map_err(StorageError::io)?;
        fs::rename(&tmp_path, &self.storage_path).map_err(StorageError::io)
    }

    /// Apply `change` to the cache and persist it, reverting the cache if
    /// the disk write fails so memory never runs ahead of the file.
    fn mutate<F>(&self, key: &str, change: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut HashMap<String, String>),
    {
        let mut guard = self.cache.write().map_err(|_| StorageError::Poisoned)?;
        let previous = guard.get(key).cloned();
        change(&mut *guard);

        if let Err(e) = self.persist(&*guard) {
            tracing::error!(path = ?self.storage_path, key, "Failed to write storage file: {}", e);
            match previous {
                Some(value) => guard.insert(key.to_string(), value),
                None => guard.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }
}

impl DraftStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self.cache.read().map_err(|_| StorageError::Poisoned)?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.mutate(key, |cache| {
            cache.insert(key.to_string(), value.to_string());
        })
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        {
            let guard = self.cache.read().map_err(|_| StorageError::Poisoned)?;
            if !guard.contains_key(key) {
                return Ok(());
            }
        }
        self.mutate(key, |cache| {
            cache.remove(key);
        })
    }
}

/// Build the draft store for desktop
pub fn create_draft_store(config: &DraftStoreConfig) -> BookingDraftStore {
    let session = match config.session_quota_bytes {
        Some(quota) => MemoryStorage::with_quota(quota),
        None => MemoryStorage::new(),
    };
    let local = FileStorage::open(config.storage_file());

    BookingDraftStore::new(
        Arc::new(session),
        Arc::new(local),
        Arc::new(SystemClock::new()),
    )
    .with_keys(config.keys.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let storage = FileStorage::open(&path);
        storage.set("booking_draft", "{\"a\":1}").unwrap();
        storage.set("other", "x").unwrap();
        storage.delete("other").unwrap();

        let reopened = FileStorage::open(&path);
        assert_eq!(
            reopened.get("booking_draft").unwrap().as_deref(),
            Some("{\"a\":1}")
        );
        assert_eq!(reopened.get("other").unwrap(), None);
    }

    #[test]
    fn malformed_file_starts_empty_and_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json").unwrap();

        let storage = FileStorage::open(&path);
        assert_eq!(storage.get("booking_draft").unwrap(), None);

        storage.set("booking_draft", "v").unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("booking_draft"));
    }

    #[test]
    fn delete_missing_key_does_not_touch_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let storage = FileStorage::open(&path);
        storage.delete("booking_draft").unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn failed_write_leaves_cache_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes the rename fail.
        let path = dir.path().join("storage.json");
        fs::create_dir_all(path.join("occupied")).unwrap();

        let storage = FileStorage::open(&path);
        assert!(storage.set("booking_draft", "v").is_err());
        assert_eq!(storage.get("booking_draft").unwrap(), None);
    }

    #[test]
    fn create_draft_store_uses_configured_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = DraftStoreConfig {
            storage_dir: Some(dir.path().to_path_buf()),
            ..DraftStoreConfig::default()
        };

        let store = create_draft_store(&config);
        assert!(!store.has_saved_data());
        assert!(store.clear().is_ok());
    }
}

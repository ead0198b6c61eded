//! In-memory storage medium.
//!
//! Stands in for browser `sessionStorage` on desktop: it lives exactly as
//! long as the process. An optional quota mirrors the browser's per-origin
//! limit so quota failures can be exercised off the web.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::ports::outbound::{DraftStorage, StorageError};

/// Process-scoped key-value store.
///
/// Clones share the same underlying map.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<RwLock<HashMap<String, String>>>,
    quota_bytes: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit total stored size (keys plus values, in bytes).
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: Arc::default(),
            quota_bytes: Some(quota_bytes),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DraftStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self.entries.read().map_err(|_| StorageError::Poisoned)?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self.entries.write().map_err(|_| StorageError::Poisoned)?;

        if let Some(limit_bytes) = self.quota_bytes {
            let used: usize = guard
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            if used + key.len() + value.len() > limit_bytes {
                tracing::debug!(key, limit_bytes, "memory storage quota exceeded");
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    limit_bytes: Some(limit_bytes),
                });
            }
        }

        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        guard.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_delete() {
        let storage = MemoryStorage::new();
        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));

        storage.delete("k").unwrap();
        assert_eq!(storage.get("k").unwrap(), None);
        assert!(storage.is_empty());
    }

    #[test]
    fn delete_missing_key_succeeds() {
        assert!(MemoryStorage::new().delete("nothing").is_ok());
    }

    #[test]
    fn clones_share_entries() {
        let storage = MemoryStorage::new();
        let handle = storage.clone();
        storage.set("k", "v").unwrap();
        assert_eq!(handle.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn quota_rejects_oversized_write_and_keeps_previous_value() {
        let storage = MemoryStorage::with_quota(10);
        storage.set("k", "small").unwrap();

        let err = storage.set("k", "far too large a value").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { limit_bytes: Some(10), .. }));
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("small"));
    }

    #[test]
    fn quota_does_not_double_count_replaced_key() {
        let storage = MemoryStorage::with_quota(8);
        storage.set("k", "1234567").unwrap();
        assert!(storage.set("k", "7654321").is_ok());
    }
}

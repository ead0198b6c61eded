//! Key-value persistence port for booking drafts.
//!
//! Both storage media (the short-lived session store and the long-lived
//! backup) implement the same trait; the draft store decides which is which.

use std::fmt;

/// Which of the two redundant media a storage handle represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageMedium {
    /// Scoped to the current browser tab / process session.
    Session,
    /// Survives restarts; used as backup and fallback.
    Local,
}

impl StorageMedium {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Session => "session",
            Self::Local => "local",
        }
    }
}

impl fmt::Display for StorageMedium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised by a storage medium.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The medium does not exist in this environment (no window, storage
    /// disabled by privacy settings, ...).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// `limit_bytes` is `None` when the host does not report its quota.
    #[error("Storage quota exceeded writing {key}{}", quota_limit(.limit_bytes))]
    QuotaExceeded {
        key: String,
        limit_bytes: Option<usize>,
    },

    #[error("Storage I/O error: {0}")]
    Io(String),

    #[error("Storage lock poisoned")]
    Poisoned,
}

impl StorageError {
    pub fn io(message: impl ToString) -> Self {
        Self::Io(message.to_string())
    }

    pub fn unavailable(message: impl ToString) -> Self {
        Self::Unavailable(message.to_string())
    }
}

fn quota_limit(limit_bytes: &Option<usize>) -> String {
    match limit_bytes {
        Some(limit) => format!(" (limit {limit} bytes)"),
        None => String::new(),
    }
}

/// A single key-value storage medium.
///
/// Calls are synchronous; implementations must not block on the network.
#[cfg_attr(test, mockall::automock)]
pub trait DraftStorage: Send + Sync {
    /// Load a string value by key, `None` if not present
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store a string value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a value; removing a missing key succeeds
    fn delete(&self, key: &str) -> Result<(), StorageError>;
}

/// Storage key constants
///
/// Shared with the web frontend, so changing them orphans existing drafts.
pub mod storage_keys {
    pub const BOOKING_DRAFT: &str = "booking_draft";
    pub const BOOKING_DRAFT_STEP: &str = "booking_draft_step";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_message_includes_known_limit() {
        let err = StorageError::QuotaExceeded {
            key: "booking_draft".into(),
            limit_bytes: Some(160),
        };
        assert_eq!(
            err.to_string(),
            "Storage quota exceeded writing booking_draft (limit 160 bytes)"
        );
    }

    #[test]
    fn quota_message_omits_unknown_limit() {
        let err = StorageError::QuotaExceeded {
            key: "booking_draft".into(),
            limit_bytes: None,
        };
        assert_eq!(err.to_string(), "Storage quota exceeded writing booking_draft");
    }
}

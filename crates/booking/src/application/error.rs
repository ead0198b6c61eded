//! Draft store errors.

use crate::ports::outbound::{StorageError, StorageMedium};

/// Failures reported by [`BookingDraftStore`](super::BookingDraftStore).
///
/// The store never panics or retries; callers that only need the old
/// boolean contract can use `result.is_ok()`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    /// Form state could not be encoded; nothing was written.
    #[error("Failed to serialize booking draft: {0}")]
    Serialization(String),

    /// A medium rejected an operation.
    #[error("{medium} storage {operation} failed: {source}")]
    Storage {
        medium: StorageMedium,
        operation: &'static str,
        #[source]
        source: StorageError,
    },

    /// `clear` attempted every medium but at least one still holds data.
    #[error("Booking draft not fully cleared: {}", describe_failures(.failures))]
    PartialClear {
        failures: Vec<(StorageMedium, StorageError)>,
    },
}

impl DraftError {
    pub fn storage(medium: StorageMedium, operation: &'static str, source: StorageError) -> Self {
        Self::Storage {
            medium,
            operation,
            source,
        }
    }

    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }

    /// Media that failed, for `PartialClear` and `Storage`.
    pub fn failed_media(&self) -> Vec<StorageMedium> {
        match self {
            Self::Serialization(_) => Vec::new(),
            Self::Storage { medium, .. } => vec![*medium],
            Self::PartialClear { failures } => {
                let mut media: Vec<StorageMedium> = failures.iter().map(|(m, _)| *m).collect();
                media.dedup();
                media
            }
        }
    }
}

fn describe_failures(failures: &[(StorageMedium, StorageError)]) -> String {
    failures
        .iter()
        .map(|(medium, err)| format!("{}: {}", medium, err))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_error_names_medium_and_operation() {
        let err = DraftError::storage(
            StorageMedium::Local,
            "write",
            StorageError::io("disk full"),
        );
        assert_eq!(
            err.to_string(),
            "local storage write failed: Storage I/O error: disk full"
        );
        assert_eq!(err.failed_media(), vec![StorageMedium::Local]);
    }

    #[test]
    fn partial_clear_lists_each_failure() {
        let err = DraftError::PartialClear {
            failures: vec![
                (StorageMedium::Session, StorageError::Poisoned),
                (StorageMedium::Session, StorageError::Poisoned),
            ],
        };
        assert!(err.to_string().contains("session: Storage lock poisoned"));
        assert_eq!(err.failed_media(), vec![StorageMedium::Session]);
    }
}

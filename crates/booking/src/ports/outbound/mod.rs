//! Outbound ports - Interfaces for external services
//!
//! These ports define the contracts that infrastructure adapters must implement,
//! so the draft store never touches browser storage, files, or the system
//! clock directly.

pub mod clock;
pub mod storage;

pub use clock::ClockPort;
pub use storage::{storage_keys, DraftStorage, StorageError, StorageMedium};

#[cfg(test)]
pub use clock::MockClockPort;
#[cfg(test)]
pub use storage::MockDraftStorage;

//! Infrastructure adapters for the booking ports.

pub mod clock;
pub mod memory_storage;
pub mod platform;

pub use clock::SystemClock;
pub use memory_storage::MemoryStorage;
pub use platform::create_draft_store;

#[cfg(any(test, feature = "testing"))]
pub use clock::ManualClock;

//! Booking draft persistence for the Magnetiq consultation-booking wizard.
//!
//! Ports, platform adapters, configuration, and the `BookingDraftStore`
//! service. Native builds persist to a JSON file; wasm builds use the
//! browser's Web Storage areas.

pub mod application;
pub mod config;
pub mod infrastructure;
pub mod ports;

pub use application::{BookingDraftStore, DraftError, LoadedDraft, ResumedDraft, SavedDraftInfo};
pub use config::{ConfigError, DraftKeys, DraftStoreConfig};
pub use infrastructure::create_draft_store;
pub use ports::outbound::{ClockPort, DraftStorage, StorageError, StorageMedium};

//! Application services.

mod draft_store;
mod error;

pub use draft_store::{BookingDraftStore, LoadedDraft, ResumedDraft, SavedDraftInfo};
pub use error::DraftError;

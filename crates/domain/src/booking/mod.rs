//! Consultation-booking wizard types.
//!
//! - `BookingFormState`: the partially filled wizard state and its redaction
//! - `BookingStep`: wizard navigation
//! - `DraftProgress` / `DraftMilestones`: how far a saved draft got
//! - `DraftEnvelope`: the persisted record and its 24h TTL

mod draft;
mod form_state;
mod progress;
mod step;

pub use draft::{draft_ttl, DraftEnvelope, DRAFT_TTL_MILLIS};
pub use form_state::{
    BillingInfo, BookingFormState, ConsultantRef, ContactInfo, PaymentDetails, PaymentMethod,
    TimeSlot,
};
pub use progress::{DraftMilestones, DraftProgress};
pub use step::BookingStep;

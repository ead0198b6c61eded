//! Magnetiq domain types.
//!
//! Pure types and invariants for the consultation-booking flow. No I/O;
//! storage and time are supplied by callers.

pub mod booking;
pub mod common;
pub mod error;

pub use booking::{
    draft_ttl, BillingInfo, BookingFormState, BookingStep, ConsultantRef, ContactInfo,
    DraftEnvelope, DraftMilestones, DraftProgress, PaymentDetails, PaymentMethod, TimeSlot,
    DRAFT_TTL_MILLIS,
};
pub use error::DomainError;

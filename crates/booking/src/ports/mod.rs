//! Booking port definitions.

pub mod outbound;

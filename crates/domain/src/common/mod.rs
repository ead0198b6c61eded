//! Common utility functions shared across the Magnetiq crates.
//!
//! # Design Principles
//!
//! - **Pure functions only** - no side effects, no I/O
//! - **WASM compatible** - all code must work in both native and WASM targets

pub mod datetime;
pub mod string;

pub use datetime::{from_epoch_millis, to_epoch_millis};
pub use string::none_if_blank;

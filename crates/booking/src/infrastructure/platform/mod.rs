//! Platform-specific implementations
//!
//! The correct platform is selected at compile time based on the target
//! architecture. Each platform exposes a `create_draft_store` factory that
//! wires its storage media to a system clock.

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(not(target_arch = "wasm32"))]
mod desktop;

#[cfg(target_arch = "wasm32")]
pub use wasm::{create_draft_store, BrowserStorage};

#[cfg(not(target_arch = "wasm32"))]
pub use desktop::{create_draft_store, FileStorage};

//! WASM platform implementations
//!
//! Both media map directly onto the browser's Web Storage areas:
//! `sessionStorage` for the short-lived copy and `localStorage` for the
//! backup.

use std::sync::Arc;

use wasm_bindgen::JsCast;

use crate::application::BookingDraftStore;
use crate::config::DraftStoreConfig;
use crate::infrastructure::clock::SystemClock;
use crate::ports::outbound::{DraftStorage, StorageError, StorageMedium};

/// Web Storage backed medium.
///
/// Holds no JS handles, so it stays `Send + Sync`; the storage area is
/// looked up on each call.
#[derive(Clone, Copy)]
pub struct BrowserStorage {
    medium: StorageMedium,
}

impl BrowserStorage {
    pub fn session() -> Self {
        Self {
            medium: StorageMedium::Session,
        }
    }

    pub fn local() -> Self {
        Self {
            medium: StorageMedium::Local,
        }
    }

    fn area(&self) -> Result<web_sys::Storage, StorageError> {
        let window =
            web_sys::window().ok_or_else(|| StorageError::unavailable("no window object"))?;
        let area = match self.medium {
            StorageMedium::Session => window.session_storage(),
            StorageMedium::Local => window.local_storage(),
        };
        area.map_err(|e| StorageError::unavailable(format!("{:?}", e)))?
            .ok_or_else(|| StorageError::unavailable(format!("{} storage disabled", self.medium)))
    }
}

/// Quota failures surface as a `QuotaExceededError` DOMException, which
/// does not say how large the quota is.
fn write_error(key: &str, err: wasm_bindgen::JsValue) -> StorageError {
    match err.dyn_ref::<web_sys::DomException>() {
        Some(ex) if ex.name() == "QuotaExceededError" => StorageError::QuotaExceeded {
            key: key.to_string(),
            limit_bytes: None,
        },
        _ => StorageError::io(format!("{:?}", err)),
    }
}

impl DraftStorage for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.area()?
            .get_item(key)
            .map_err(|e| StorageError::io(format!("{:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.area()?
            .set_item(key, value)
            .map_err(|e| write_error(key, e))
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.area()?
            .remove_item(key)
            .map_err(|e| StorageError::io(format!("{:?}", e)))
    }
}

/// Build the draft store for the browser
pub fn create_draft_store(config: &DraftStoreConfig) -> BookingDraftStore {
    BookingDraftStore::new(
        Arc::new(BrowserStorage::session()),
        Arc::new(BrowserStorage::local()),
        Arc::new(SystemClock::new()),
    )
    .with_keys(config.keys.clone())
}

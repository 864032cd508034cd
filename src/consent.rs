use web_sys::Storage;

use crate::error::BindError;

pub const CONSENT_VALUE: &str = "true";

/// Where the visitor's cookie decision is remembered.
pub trait ConsentStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), BindError>;
}

pub struct BrowserStorage {
    storage: Storage,
}

impl BrowserStorage {
    pub fn local() -> Result<Self, BindError> {
        let storage = crate::dom::window()?
            .local_storage()
            .ok()
            .flatten()
            .ok_or(BindError::NoStorage)?;
        Ok(Self { storage })
    }
}

impl ConsentStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), BindError> {
        self.storage.set_item(key, value)?;
        Ok(())
    }
}

/// Any non-empty stored value counts as a past decision.
pub fn has_decided(store: &dyn ConsentStore, key: &str) -> bool {
    matches!(store.get(key), Some(value) if !value.is_empty())
}

pub fn accept(store: &dyn ConsentStore, key: &str) -> Result<(), BindError> {
    store.set(key, CONSENT_VALUE)
}

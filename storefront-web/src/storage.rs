//! `localStorage` backend for the cart and wishlist lists
use gloo_storage::{LocalStorage, Storage};
use storefront_core::KeyValueStore;
use wasm_bindgen::JsValue;

use crate::dom;

/// Slots are kept as raw JSON text; the core owns the record format.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

#[derive(Debug, thiserror::Error)]
#[error("localStorage error: {0}")]
pub struct LocalStoreError(String);

impl From<JsValue> for LocalStoreError {
    fn from(value: JsValue) -> Self {
        Self(dom::js_error_message(&value))
    }
}

impl KeyValueStore for LocalStore {
    type Error = LocalStoreError;

    fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(LocalStorage::raw().get_item(key)?)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        Ok(LocalStorage::raw().set_item(key, value)?)
    }

    fn remove_item(&self, key: &str) -> Result<(), Self::Error> {
        LocalStorage::delete(key);
        Ok(())
    }
}

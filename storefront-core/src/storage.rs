//! Persisted cart and wishlist lists
//!
//! Each list lives in one named slot of a string key-value store (browser
//! `localStorage` on the web, [`MemoryStore`] in tests) as a JSON array. Every
//! mutation rewrites the whole array before returning, so the in-memory list and
//! the slot never diverge.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::convert::Infallible;
use std::rc::Rc;
use thiserror::Error;

use crate::config::StorefrontConfig;

/// A product added to the cart. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub name: String,
    /// Decimal price kept as text, e.g. `"12.00"`
    pub price: String,
}

/// A product marked on the wishlist. The name is the only key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistItem {
    pub name: String,
}

/// Trait for abstracting the string key-value layer lists persist into.
/// Platform-specific implementations should provide this
pub trait KeyValueStore {
    type Error: std::error::Error + 'static;

    /// Read a slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Overwrite a slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write (quota, privacy mode).
    fn set_item(&self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Delete a slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the removal.
    fn remove_item(&self, key: &str) -> Result<(), Self::Error>;
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage error: {0}")]
    Backend(String),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// In-memory store. Clones share the same slots.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw slot contents, for assertions.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.slots.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    type Error = Infallible;

    fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), Self::Error> {
        self.slots.borrow_mut().remove(key);
        Ok(())
    }
}

/// Ordered list mirrored to one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistentList<T> {
    key: String,
    items: Vec<T>,
}

impl<T> PersistentList<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Load the list stored under `key`.
    ///
    /// A missing slot, an unreadable backend, or contents that do not parse all
    /// yield an empty list; only the last two are logged.
    pub fn load<S: KeyValueStore>(store: &S, key: &str) -> Self {
        let raw = match store.get_item(key) {
            Ok(raw) => raw,
            Err(err) => {
                log::warn!("Could not read persisted list {key:?}: {err}");
                None
            }
        };
        let items = raw.map_or_else(Vec::new, |text| {
            serde_json::from_str(&text).unwrap_or_else(|err| {
                log::warn!("Discarding malformed persisted list {key:?}: {err}");
                Vec::new()
            })
        });
        Self {
            key: key.to_string(),
            items,
        }
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains_where(&self, pred: impl Fn(&T) -> bool) -> bool {
        self.items.iter().any(pred)
    }

    /// Append an item and write the list through.
    ///
    /// The list only changes once the slot accepts the write.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be serialized or written.
    pub fn append<S: KeyValueStore>(&mut self, store: &S, item: T) -> Result<(), StoreError> {
        let candidate: Vec<&T> = self.items.iter().chain(std::iter::once(&item)).collect();
        self.write(store, &candidate)?;
        self.items.push(item);
        Ok(())
    }

    /// Remove every item matching `pred`, write the list through, and return how many went.
    ///
    /// The list only changes once the slot accepts the write.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be serialized or written.
    pub fn remove_where<S: KeyValueStore>(
        &mut self,
        store: &S,
        pred: impl Fn(&T) -> bool,
    ) -> Result<usize, StoreError> {
        let kept: Vec<&T> = self.items.iter().filter(|item| !pred(*item)).collect();
        let removed = self.items.len() - kept.len();
        self.write(store, &kept)?;
        self.items.retain(|item| !pred(item));
        Ok(removed)
    }

    fn write<S: KeyValueStore>(&self, store: &S, items: &[&T]) -> Result<(), StoreError> {
        let text = serde_json::to_string(items)?;
        store
            .set_item(&self.key, &text)
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}

/// Cart and wishlist slots over one backend.
///
/// Reads always reload from the backend, so another tab's writes are picked up
/// on the next operation.
#[derive(Debug, Clone)]
pub struct ListStore<S> {
    store: S,
    cart_key: String,
    wishlist_key: String,
}

impl<S: KeyValueStore> ListStore<S> {
    pub fn new(store: S, config: &StorefrontConfig) -> Self {
        Self {
            store,
            cart_key: config.cart_key.clone(),
            wishlist_key: config.wishlist_key.clone(),
        }
    }

    pub const fn backend(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn cart(&self) -> PersistentList<CartItem> {
        PersistentList::load(&self.store, &self.cart_key)
    }

    #[must_use]
    pub fn wishlist(&self) -> PersistentList<WishlistItem> {
        PersistentList::load(&self.store, &self.wishlist_key)
    }

    /// # Errors
    ///
    /// Returns an error if the cart cannot be written.
    pub fn add_to_cart(&self, item: CartItem) -> Result<(), StoreError> {
        self.cart().append(&self.store, item)
    }

    /// # Errors
    ///
    /// Returns an error if the wishlist cannot be written.
    pub fn add_to_wishlist(&self, name: &str) -> Result<(), StoreError> {
        self.wishlist().append(
            &self.store,
            WishlistItem {
                name: name.to_string(),
            },
        )
    }

    /// Remove every wishlist entry named `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the wishlist cannot be written.
    pub fn remove_from_wishlist(&self, name: &str) -> Result<usize, StoreError> {
        self.wishlist()
            .remove_where(&self.store, |item| item.name == name)
    }

    #[must_use]
    pub fn is_wishlisted(&self, name: &str) -> bool {
        self.wishlist().contains_where(|item| item.name == name)
    }

    /// Drop a slot entirely.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the removal.
    pub fn clear(&self, key: &str) -> Result<(), StoreError> {
        self.store
            .remove_item(key)
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}

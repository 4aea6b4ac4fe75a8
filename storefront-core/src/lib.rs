//! Storefront Core
//!
//! Platform-agnostic behavior behind the storefront pages: the persisted cart and
//! wishlist lists, the modal stack shared by overlays, lightbox navigation, focus
//! trapping, category filtering, contact-form validation and submission, and the
//! messaging handoff. This crate has no DOM dependency; `storefront-web` binds it
//! to page markup.

pub mod catalog;
pub mod config;
pub mod debounce;
pub mod filter;
pub mod focus;
pub mod form;
pub mod gallery;
pub mod handoff;
pub mod nav;
pub mod overlay;
pub mod storage;
pub mod toast;

// Re-export commonly used types
pub use catalog::{
    ProductCard, StorefrontEvent, WishIcon, add_to_cart, cart_toast_text, initial_icon, normalize_price,
    toggle_wishlist,
};
pub use config::{ConfigError, Labels, MessagingConfig, StorefrontConfig, Timings};
pub use debounce::{Debouncer, Ticket};
pub use filter::{ALL_CATEGORIES, CategoryFilter};
pub use focus::{FOCUSABLE_QUERY, FocusMove, trap_tab};
pub use form::{
    Field, FieldError, FormFields, FormTransport, SubmitControl, SubmitOutcome, SubmitReply,
    TransportError, error_id, is_valid_email, submit_contact, validate,
};
pub use gallery::{Gallery, GalleryError, Lightbox, LightboxAction, LightboxKey};
pub use handoff::{MessagingLink, encode_uri_component, summary_message};
pub use nav::{anchor_target, click_outside};
pub use overlay::{ModalStack, Overlay};
pub use storage::{CartItem, KeyValueStore, ListStore, MemoryStore, PersistentList, StoreError, WishlistItem};
pub use toast::{ToastPhase, ToastPlan};

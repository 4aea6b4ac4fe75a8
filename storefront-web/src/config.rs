//! Page configuration
//!
//! Defaults ship inside the module; a page can override any field with an inline
//! `<script type="application/json" id="storefront-config">` block.

use storefront_core::{ConfigError, StorefrontConfig};

use crate::dom;

pub const CONFIG_ELEMENT_ID: &str = "storefront-config";

const EMBEDDED: &str = include_str!("../static/storefront.json");

/// Built-in configuration.
#[must_use]
pub fn embedded() -> StorefrontConfig {
    StorefrontConfig::from_json(EMBEDDED).unwrap_or_default()
}

/// Resolve configuration: the page override if present and valid, else the built-in one.
///
/// The second value carries an override error so it can be logged once logging is up.
#[must_use]
pub fn load() -> (StorefrontConfig, Option<ConfigError>) {
    let override_json = dom::by_id::<web_sys::Element>(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
        .filter(|text| !text.trim().is_empty());
    match override_json {
        None => (embedded(), None),
        Some(json) => match StorefrontConfig::from_json(&json) {
            Ok(config) => (config, None),
            Err(err) => (embedded(), Some(err)),
        },
    }
}

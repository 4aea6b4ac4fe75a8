//! Storefront configuration
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level configuration shared by every storefront feature.
/// All fields default when missing from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Path the contact form posts to
    pub submit_endpoint: String,
    /// Persisted slot holding the cart list
    pub cart_key: String,
    /// Persisted slot holding the wishlist
    pub wishlist_key: String,
    /// Image shown when a lightbox image fails to load
    pub fallback_image: String,
    pub messaging: MessagingConfig,
    pub labels: Labels,
    pub timings: Timings,
    /// Maximum log level (`error`, `warn`, `info`, `debug`, `trace`)
    pub log_level: String,
}

/// Target of the "contact us" messaging handoff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagingConfig {
    pub base_url: String,
    pub recipient: String,
}

/// User-facing control labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub submit: String,
    pub submitting: String,
    pub close_menu: String,
}

/// Timer delays, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    pub debounce_ms: u32,
    pub toast_enter_ms: u32,
    pub toast_hold_ms: u32,
    pub toast_exit_ms: u32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JSON parsing error: {0}")]
    Json(String),
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("cart and wishlist must use different storage keys (both are {0:?})")]
    SharedKey(String),
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            submit_endpoint: "/submit-form".to_string(),
            cart_key: "cart".to_string(),
            wishlist_key: "wishlist".to_string(),
            fallback_image: "/images/fallback.jpg".to_string(),
            messaging: MessagingConfig::default(),
            labels: Labels::default(),
            timings: Timings::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            base_url: "https://wa.me".to_string(),
            recipient: "15555550123".to_string(),
        }
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            submit: "Submit".to_string(),
            submitting: "Submitting...".to_string(),
            close_menu: "Close menu".to_string(),
        }
    }
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            debounce_ms: 100,
            toast_enter_ms: 10,
            toast_hold_ms: 3000,
            toast_exit_ms: 300,
        }
    }
}

impl StorefrontConfig {
    /// Parse configuration from JSON, filling missing fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the resulting configuration is invalid.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants the features rely on.
    ///
    /// # Errors
    ///
    /// Returns an error when a storage key or the endpoint is empty, or when both lists
    /// would share one slot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.submit_endpoint.trim().is_empty() {
            return Err(ConfigError::Empty {
                field: "submit_endpoint",
            });
        }
        if self.cart_key.is_empty() {
            return Err(ConfigError::Empty { field: "cart_key" });
        }
        if self.wishlist_key.is_empty() {
            return Err(ConfigError::Empty {
                field: "wishlist_key",
            });
        }
        if self.cart_key == self.wishlist_key {
            return Err(ConfigError::SharedKey(self.cart_key.clone()));
        }
        Ok(())
    }

    /// Resolve `log_level` to a filter, falling back to `Info` for unknown names.
    #[must_use]
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level
            .parse()
            .unwrap_or(log::LevelFilter::Info)
    }
}

//! "Contact us" messaging handoff
//!
//! Builds a readable summary of the cart and wishlist and packs it into a
//! prefilled-message link: `<base_url>/<recipient>?text=<encoded message>`.

use std::fmt::Write as _;

use crate::config::MessagingConfig;
use crate::storage::{CartItem, WishlistItem};

pub const GENERIC_INQUIRY: &str = "Hello! I'd like to know more about your products.";

/// Human-readable summary of the current lists.
#[must_use]
pub fn summary_message(cart: &[CartItem], wishlist: &[WishlistItem]) -> String {
    if cart.is_empty() && wishlist.is_empty() {
        return GENERIC_INQUIRY.to_string();
    }

    let mut message = String::from("Hello! I'm interested in the following items:\n");
    if !cart.is_empty() {
        message.push_str("\nCart:\n");
        for (i, item) in cart.iter().enumerate() {
            let _ = writeln!(message, "{}. {} - ${}", i + 1, item.name, item.price);
        }
    }
    if !wishlist.is_empty() {
        message.push_str("\nWishlist:\n");
        for (i, item) in wishlist.iter().enumerate() {
            let _ = writeln!(message, "{}. {}", i + 1, item.name);
        }
    }
    message
}

const fn is_unreserved(b: u8) -> bool {
    matches!(b,
        b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9'
        | b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')')
}

/// Percent-encode with the same unreserved set as `encodeURIComponent`.
#[must_use]
pub fn encode_uri_component(src: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let mut out = String::with_capacity(src.len());
    for &b in src.as_bytes() {
        if is_unreserved(b) {
            out.push(char::from(b));
        } else {
            out.push('%');
            out.push(char::from(HEX[usize::from(b >> 4)]));
            out.push(char::from(HEX[usize::from(b & 0x0F)]));
        }
    }
    out
}

/// Where the handoff opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagingLink {
    base_url: String,
    recipient: String,
}

impl MessagingLink {
    #[must_use]
    pub fn from_config(config: &MessagingConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            recipient: config.recipient.trim_matches('/').to_string(),
        }
    }

    /// Full link carrying `message` as the prefilled text.
    #[must_use]
    pub fn url(&self, message: &str) -> String {
        format!(
            "{}/{}?text={}",
            self.base_url,
            self.recipient,
            encode_uri_component(message)
        )
    }
}

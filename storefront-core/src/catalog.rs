//! Cart and wishlist actions behind product-card buttons
use serde::{Deserialize, Serialize};

use crate::storage::{CartItem, KeyValueStore, ListStore, StoreError};

/// What a product card exposes: its title and displayed price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub name: String,
    pub price_text: String,
}

impl ProductCard {
    pub fn new(name: impl Into<String>, price_text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price_text: price_text.into(),
        }
    }
}

/// Strip currency symbols, whitespace and grouping from a displayed price:
/// `"$12.00"` -> `"12.00"`.
///
/// A final comma followed by one or two digits is the decimal separator
/// (`"1.299,50 €"` -> `"1299.50"`); any other comma groups thousands.
#[must_use]
pub fn normalize_price(text: &str) -> String {
    let kept: Vec<char> = text
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ','))
        .collect();
    let decimal_comma = kept
        .iter()
        .rposition(|c| matches!(c, '.' | ','))
        .filter(|&at| kept[at] == ',' && matches!(kept.len() - at - 1, 1 | 2));
    kept.iter()
        .enumerate()
        .filter_map(|(at, &c)| match (c, decimal_comma) {
            (',', Some(decimal)) if at == decimal => Some('.'),
            (',', _) => None,
            ('.', Some(_)) => None,
            _ => Some(c),
        })
        .collect()
}

/// Notifications dispatched on `document` for other scripts to observe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StorefrontEvent {
    #[serde(rename_all = "camelCase")]
    AddToCart { product_name: String, price: String },
    #[serde(rename_all = "camelCase")]
    ToggleWishlist { product_name: String, added: bool },
}

impl StorefrontEvent {
    /// DOM event type.
    #[must_use]
    pub const fn event_name(&self) -> &'static str {
        match self {
            Self::AddToCart { .. } => "addToCart",
            Self::ToggleWishlist { .. } => "toggleWishlist",
        }
    }
}

/// Visual state of a wishlist icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WishIcon {
    /// Outline heart
    Inactive,
    /// Filled heart
    Active,
}

impl WishIcon {
    /// Icon font class for this state.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Inactive => "far",
            Self::Active => "fas",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Inactive => Self::Active,
            Self::Active => Self::Inactive,
        }
    }

    /// Read the state back from an icon's classes.
    #[must_use]
    pub fn from_classes(has_active_class: bool) -> Self {
        if has_active_class {
            Self::Active
        } else {
            Self::Inactive
        }
    }
}

/// Toast text shown after adding `name` to the cart.
#[must_use]
pub fn cart_toast_text(name: &str) -> String {
    format!("Added {name} to cart!")
}

/// Persist a cart entry for `card` and describe the resulting notification.
///
/// # Errors
///
/// Returns an error if the cart cannot be written.
pub fn add_to_cart<S: KeyValueStore>(
    store: &ListStore<S>,
    card: &ProductCard,
) -> Result<(CartItem, StorefrontEvent), StoreError> {
    let item = CartItem {
        name: card.name.trim().to_string(),
        price: normalize_price(&card.price_text),
    };
    store.add_to_cart(item.clone())?;
    log::info!("added {:?} to cart", item.name);
    let event = StorefrontEvent::AddToCart {
        product_name: item.name.clone(),
        price: item.price.clone(),
    };
    Ok((item, event))
}

/// Flip the wishlist state of `name` from `current` and persist the change.
///
/// # Errors
///
/// Returns an error if the wishlist cannot be written.
pub fn toggle_wishlist<S: KeyValueStore>(
    store: &ListStore<S>,
    name: &str,
    current: WishIcon,
) -> Result<(WishIcon, StorefrontEvent), StoreError> {
    let name = name.trim();
    let next = current.toggled();
    match next {
        WishIcon::Active => store.add_to_wishlist(name)?,
        WishIcon::Inactive => {
            store.remove_from_wishlist(name)?;
        }
    }
    let event = StorefrontEvent::ToggleWishlist {
        product_name: name.to_string(),
        added: next == WishIcon::Active,
    };
    Ok((next, event))
}

/// Icon state a card starts with on page load.
#[must_use]
pub fn initial_icon<S: KeyValueStore>(store: &ListStore<S>, name: &str) -> WishIcon {
    WishIcon::from_classes(store.is_wishlisted(name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorefrontConfig;
    use crate::storage::MemoryStore;

    fn store() -> ListStore<MemoryStore> {
        ListStore::new(MemoryStore::new(), &StorefrontConfig::default())
    }

    #[test]
    fn price_text_is_normalized() {
        assert_eq!(normalize_price("$12.00"), "12.00");
        assert_eq!(normalize_price(" € 1,299.50 "), "1299.50");
        assert_eq!(normalize_price("free"), "");
    }

    #[test]
    fn trailing_comma_decimals_are_kept() {
        assert_eq!(normalize_price("12,50 €"), "12.50");
        assert_eq!(normalize_price("1.299,50 €"), "1299.50");
        assert_eq!(normalize_price("9,5"), "9.5");
        assert_eq!(normalize_price("1,299"), "1299");
    }

    #[test]
    fn add_to_cart_persists_and_reports() {
        let store = store();
        let (item, event) = add_to_cart(&store, &ProductCard::new("Blue Mug", "$12.00")).unwrap();
        assert_eq!(item.price, "12.00");
        assert_eq!(store.cart().items(), &[item]);
        assert_eq!(event.event_name(), "addToCart");
        assert_eq!(cart_toast_text("Blue Mug"), "Added Blue Mug to cart!");
    }

    #[test]
    fn toggle_on_then_off_restores_wishlist() {
        let store = store();
        store.add_to_wishlist("Plate").unwrap();
        let before = store.wishlist();

        let (icon, event) = toggle_wishlist(&store, "Mug", WishIcon::Inactive).unwrap();
        assert_eq!(icon, WishIcon::Active);
        assert_eq!(
            event,
            StorefrontEvent::ToggleWishlist {
                product_name: "Mug".to_string(),
                added: true
            }
        );
        assert_eq!(initial_icon(&store, "Mug"), WishIcon::Active);

        let (icon, _) = toggle_wishlist(&store, "Mug", icon).unwrap();
        assert_eq!(icon, WishIcon::Inactive);
        assert_eq!(store.wishlist(), before);
        assert_eq!(initial_icon(&store, "Mug"), WishIcon::Inactive);
    }

    #[test]
    fn event_details_serialize_in_camel_case() {
        let event = StorefrontEvent::AddToCart {
            product_name: "Blue Mug".to_string(),
            price: "12.00".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&event).unwrap(),
            r#"{"productName":"Blue Mug","price":"12.00"}"#
        );
    }

    #[test]
    fn icon_classes() {
        assert_eq!(WishIcon::Inactive.class(), "far");
        assert_eq!(WishIcon::Active.class(), "fas");
        assert_eq!(WishIcon::Active.toggled(), WishIcon::Inactive);
    }
}

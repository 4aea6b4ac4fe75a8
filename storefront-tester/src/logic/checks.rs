//! Storefront behavior checks run without a browser
use std::cell::Cell;

use anyhow::{Result, ensure};
use async_trait::async_trait;
use futures::executor::block_on;
use storefront_core::{
    CartItem, CategoryFilter, Field, FocusMove, FormFields, FormTransport, Gallery, KeyValueStore,
    Lightbox, LightboxAction, LightboxKey, ListStore, MemoryStore, MessagingLink, ProductCard,
    StorefrontConfig, SubmitControl, SubmitOutcome, SubmitReply, TransportError, WishIcon,
    add_to_cart, summary_message, submit_contact, toggle_wishlist, trap_tab, validate,
};

fn store() -> ListStore<MemoryStore> {
    ListStore::new(MemoryStore::new(), &StorefrontConfig::default())
}

pub fn cart_roundtrip() -> Result<()> {
    let lists = store();
    add_to_cart(&lists, &ProductCard::new("Blue Mug", "$12.00"))?;
    add_to_cart(&lists, &ProductCard::new(" Green Bowl ", "$8.50"))?;

    let raw = lists.backend().raw("cart").unwrap_or_default();
    ensure!(
        raw == r#"[{"name":"Blue Mug","price":"12.00"},{"name":"Green Bowl","price":"8.50"}]"#,
        "unexpected cart slot: {raw}"
    );

    // A reload sees exactly what was written.
    let reloaded = ListStore::new(lists.backend().clone(), &StorefrontConfig::default());
    ensure!(reloaded.cart().len() == 2, "cart did not survive a reload");

    let _ = lists.backend().set_item("cart", "{not json");
    ensure!(lists.cart().is_empty(), "malformed cart should load empty");

    add_to_cart(&lists, &ProductCard::new("Blue Mug", "$12.00"))?;
    lists.clear("cart")?;
    ensure!(lists.backend().raw("cart").is_none(), "cleared slot should be gone");
    Ok(())
}

pub fn wishlist_toggle() -> Result<()> {
    let lists = store();
    let (icon, _) = toggle_wishlist(&lists, "Blue Mug", WishIcon::Inactive)?;
    ensure!(icon == WishIcon::Active, "first toggle should activate");
    lists.add_to_wishlist("Blue Mug")?;
    ensure!(lists.wishlist().len() == 2, "duplicate names are kept");

    let (icon, _) = toggle_wishlist(&lists, "Blue Mug", icon)?;
    ensure!(icon == WishIcon::Inactive, "second toggle should deactivate");
    ensure!(
        lists.wishlist().is_empty(),
        "toggling off removes every entry with that name"
    );
    Ok(())
}

pub fn gallery_wrap() -> Result<()> {
    let gallery = Gallery::from_sources([
        Some("/a.jpg".to_string()),
        None,
        Some("/b.jpg".to_string()),
        Some("/c.jpg".to_string()),
    ]);
    ensure!(gallery.len() == 3, "image-less containers are skipped");

    let mut lightbox = Lightbox::new(gallery);
    ensure!(
        lightbox.handle_key(LightboxKey::ArrowRight) == LightboxAction::Ignore,
        "keys are inert while closed"
    );
    let index = lightbox
        .gallery()
        .index_for_container(3)
        .unwrap_or_default();
    lightbox.open(index)?;
    ensure!(lightbox.next() == Some("/a.jpg"), "next wraps to the first image");
    ensure!(lightbox.prev() == Some("/c.jpg"), "prev wraps to the last image");
    ensure!(
        lightbox.handle_key(LightboxKey::from_key("Escape")) == LightboxAction::Close,
        "Escape closes"
    );
    Ok(())
}

pub fn focus_trap() -> Result<()> {
    ensure!(trap_tab(3, Some(2), false) == FocusMove::MoveTo(0), "Tab on last wraps");
    ensure!(trap_tab(3, Some(0), true) == FocusMove::MoveTo(2), "Shift+Tab on first wraps");
    ensure!(trap_tab(3, Some(1), false) == FocusMove::Stay, "middle elements move normally");
    ensure!(trap_tab(3, None, false) == FocusMove::MoveTo(0), "outside focus is pulled in");
    ensure!(trap_tab(0, None, true) == FocusMove::Stay, "empty containers do nothing");
    Ok(())
}

pub fn category_filter() -> Result<()> {
    let cards = [Some("mugs"), Some("bowls"), None];
    ensure!(
        CategoryFilter::new("mugs").visibility(cards) == vec![true, false, false],
        "only matching cards stay visible"
    );
    ensure!(
        CategoryFilter::new("all").visibility(cards) == vec![true, true, true],
        "the all tag shows every card"
    );
    Ok(())
}

pub fn form_validation() -> Result<()> {
    let errors = validate(
        &FormFields::new()
            .with("name", " ")
            .with("email", "user@com")
            .with("message", "Hi"),
    );
    let fields: Vec<Field> = errors.iter().map(|e| e.field).collect();
    ensure!(
        fields == vec![Field::Name, Field::Email],
        "expected name and email errors, got {fields:?}"
    );
    ensure!(
        errors[1].message == "Please enter a valid email",
        "wrong email message: {}",
        errors[1].message
    );
    Ok(())
}

struct CountingTransport {
    calls: Cell<usize>,
    success: bool,
}

#[async_trait(?Send)]
impl FormTransport for CountingTransport {
    async fn post(&self, _: &str, _: &FormFields) -> Result<SubmitReply, TransportError> {
        self.calls.set(self.calls.get() + 1);
        Ok(SubmitReply {
            success: self.success,
        })
    }
}

#[derive(Default)]
struct Button {
    busy: Cell<bool>,
    changes: Cell<usize>,
}

impl SubmitControl for Button {
    fn set_busy(&self, busy: bool, _: &str) {
        self.busy.set(busy);
        self.changes.set(self.changes.get() + 1);
    }
}

pub fn form_submit() -> Result<()> {
    let config = StorefrontConfig::default();
    let fields = FormFields::new()
        .with("name", "Ada")
        .with("email", "user@example.com")
        .with("message", "Hello");

    for (success, expected) in [(true, SubmitOutcome::Accepted), (false, SubmitOutcome::Rejected)] {
        let transport = CountingTransport {
            calls: Cell::new(0),
            success,
        };
        let button = Button::default();
        let outcome = block_on(submit_contact(&config, &fields, &transport, &button));
        ensure!(outcome == expected, "expected {expected:?}, got {outcome:?}");
        ensure!(transport.calls.get() == 1, "exactly one request per submit");
        ensure!(!button.busy.get(), "button must be released");
        ensure!(button.changes.get() == 2, "busy then released");
    }

    let transport = CountingTransport {
        calls: Cell::new(0),
        success: true,
    };
    let button = Button::default();
    let outcome = block_on(submit_contact(&config, &FormFields::new(), &transport, &button));
    ensure!(matches!(outcome, SubmitOutcome::Invalid(_)), "empty form is invalid");
    ensure!(transport.calls.get() == 0, "invalid forms never reach the network");
    ensure!(button.changes.get() == 0, "invalid forms leave the button alone");
    Ok(())
}

pub fn handoff_message() -> Result<()> {
    let cart = [CartItem {
        name: "Blue Mug".to_string(),
        price: "12.00".to_string(),
    }];
    let message = summary_message(&cart, &[]);
    ensure!(message.contains("1. Blue Mug - $12.00"), "cart line missing: {message}");

    let link = MessagingLink::from_config(&StorefrontConfig::default().messaging);
    let url = link.url(&summary_message(&[], &[]));
    ensure!(url.starts_with("https://wa.me/"), "unexpected base: {url}");
    ensure!(
        url.contains("?text=Hello!%20I'd%20like"),
        "generic inquiry not encoded as expected: {url}"
    );
    Ok(())
}

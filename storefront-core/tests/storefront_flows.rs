use std::cell::{Cell, RefCell};

use async_trait::async_trait;
use futures::executor::block_on;
use storefront_core::{
    CartItem, FormFields, FormTransport, Gallery, Lightbox, LightboxAction, LightboxKey,
    ListStore, MemoryStore, MessagingLink, ModalStack, Overlay, PersistentList, ProductCard,
    StorefrontConfig, SubmitControl, SubmitOutcome, SubmitReply, ToastPlan, TransportError,
    WishIcon, add_to_cart, cart_toast_text, summary_message, submit_contact, toggle_wishlist,
};

#[derive(Clone, Copy)]
enum Reply {
    Success,
    Failure,
    Reject,
}

struct ScriptedTransport<'a> {
    reply: Reply,
    calls: Cell<usize>,
    /// Control whose busy state is checked while the request is in flight
    control: Option<&'a RecordingControl>,
}

impl ScriptedTransport<'_> {
    const fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: Cell::new(0),
            control: None,
        }
    }
}

#[async_trait(?Send)]
impl FormTransport for ScriptedTransport<'_> {
    async fn post(
        &self,
        endpoint: &str,
        fields: &FormFields,
    ) -> Result<SubmitReply, TransportError> {
        assert_eq!(endpoint, "/submit-form");
        assert_eq!(fields.get("name"), Some("Ada"));
        self.calls.set(self.calls.get() + 1);
        if let Some(control) = self.control {
            assert!(control.busy.get(), "submit control must be disabled in flight");
        }
        match self.reply {
            Reply::Success => Ok(SubmitReply { success: true }),
            Reply::Failure => Ok(SubmitReply { success: false }),
            Reply::Reject => Err(TransportError::Network("connection reset".to_string())),
        }
    }
}

#[derive(Default)]
struct RecordingControl {
    busy: Cell<bool>,
    history: RefCell<Vec<(bool, String)>>,
}

impl SubmitControl for RecordingControl {
    fn set_busy(&self, busy: bool, label: &str) {
        self.busy.set(busy);
        self.history.borrow_mut().push((busy, label.to_string()));
    }
}

fn valid_fields() -> FormFields {
    FormFields::new()
        .with("name", "Ada")
        .with("email", "user@example.com")
        .with("message", "Do you ship abroad?")
        .with("phone", "555-0100")
}

#[test]
fn valid_submission_posts_once_and_always_restores_control() {
    let config = StorefrontConfig::default();
    for (reply, expected) in [
        (Reply::Success, SubmitOutcome::Accepted),
        (Reply::Failure, SubmitOutcome::Rejected),
        (
            Reply::Reject,
            SubmitOutcome::Failed("network error: connection reset".to_string()),
        ),
    ] {
        let control = RecordingControl::default();
        let mut transport = ScriptedTransport::new(reply);
        transport.control = Some(&control);

        let outcome = block_on(submit_contact(&config, &valid_fields(), &transport, &control));

        assert_eq!(outcome, expected);
        assert_eq!(transport.calls.get(), 1);
        assert!(!control.busy.get());
        assert_eq!(
            *control.history.borrow(),
            vec![
                (true, "Submitting...".to_string()),
                (false, "Submit".to_string())
            ]
        );
        assert!(outcome.user_message().is_some());
    }
}

#[test]
fn invalid_submission_never_reaches_network() {
    let config = StorefrontConfig::default();
    let control = RecordingControl::default();
    let transport = ScriptedTransport::new(Reply::Success);
    let fields = FormFields::new().with("name", "").with("email", "user@").with("message", "");

    let outcome = block_on(submit_contact(&config, &fields, &transport, &control));

    let SubmitOutcome::Invalid(errors) = outcome else {
        panic!("expected validation failure");
    };
    assert_eq!(errors.len(), 3);
    assert_eq!(transport.calls.get(), 0);
    assert!(control.history.borrow().is_empty());
}

#[test]
fn blue_mug_lands_in_cart_with_toast() {
    let config = StorefrontConfig::default();
    let backend = MemoryStore::new();
    let store = ListStore::new(backend.clone(), &config);

    let (item, _) = add_to_cart(&store, &ProductCard::new("Blue Mug", "$12.00")).unwrap();
    let toast = ToastPlan::new(cart_toast_text(&item.name), &config.timings);

    let persisted = PersistentList::<CartItem>::load(&backend, "cart");
    assert_eq!(
        persisted.items(),
        &[CartItem {
            name: "Blue Mug".to_string(),
            price: "12.00".to_string()
        }]
    );
    assert_eq!(toast.text, "Added Blue Mug to cart!");
}

#[test]
fn wishlist_and_cart_feed_the_handoff_link() {
    let config = StorefrontConfig::default();
    let store = ListStore::new(MemoryStore::new(), &config);
    add_to_cart(&store, &ProductCard::new("Blue Mug", "$12.00")).unwrap();
    toggle_wishlist(&store, "Teapot", WishIcon::Inactive).unwrap();

    let message = summary_message(store.cart().items(), store.wishlist().items());
    let url = MessagingLink::from_config(&config.messaging).url(&message);

    assert!(url.starts_with("https://wa.me/15555550123?text=Hello!%20I'm%20interested"));
    assert!(url.contains("Blue%20Mug%20-%20%2412.00"));
    assert!(url.contains("1.%20Teapot"));
}

#[test]
fn lightbox_session_shares_scroll_lock_with_menu() {
    let mut stack = ModalStack::new();
    let mut menu = Overlay::new("menu");
    let mut lightbox_overlay = Overlay::new("lightbox");
    let mut lightbox = Lightbox::new(Gallery::from_sources(
        ["/a.jpg", "/b.jpg", "/c.jpg"].map(|s| Some(s.to_string())),
    ));

    menu.open(&mut stack);
    lightbox.open(2).unwrap();
    lightbox_overlay.open(&mut stack);
    assert_eq!(lightbox.handle_key(LightboxKey::ArrowRight), LightboxAction::Next);
    assert_eq!(lightbox.next(), Some("/a.jpg"));

    assert_eq!(lightbox.handle_key(LightboxKey::Escape), LightboxAction::Close);
    lightbox.close();
    lightbox_overlay.close(&mut stack);
    assert!(stack.scroll_locked(), "menu is still open");
    menu.close(&mut stack);
    assert!(!stack.scroll_locked());
}

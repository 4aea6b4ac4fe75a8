//! State shared by every feature on one page
use std::cell::RefCell;
use std::rc::Rc;

use storefront_core::{ListStore, ModalStack, Overlay, StorefrontConfig};
use web_sys::Element;

use crate::dom;
use crate::storage::LocalStore;

pub const ACTIVE_CLASS: &str = "active";

#[derive(Clone)]
pub struct Page {
    pub config: Rc<StorefrontConfig>,
    pub lists: Rc<ListStore<LocalStore>>,
    modals: Rc<RefCell<ModalStack>>,
}

impl Page {
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let lists = ListStore::new(LocalStore, &config);
        Self {
            config: Rc::new(config),
            lists: Rc::new(lists),
            modals: Rc::new(RefCell::new(ModalStack::new())),
        }
    }

    /// Open `overlay`, marking `panel` active and `toggle` expanded.
    pub fn open_overlay(&self, overlay: &mut Overlay, panel: &Element, toggle: Option<&Element>) {
        if !overlay.open(&mut self.modals.borrow_mut()) {
            return;
        }
        dom::set_class(panel, ACTIVE_CLASS, true);
        if let Some(toggle) = toggle {
            let _ = toggle.set_attribute("aria-expanded", "true");
        }
        self.sync_scroll_lock();
    }

    /// Close `overlay`, undoing [`Page::open_overlay`].
    pub fn close_overlay(&self, overlay: &mut Overlay, panel: &Element, toggle: Option<&Element>) {
        if !overlay.close(&mut self.modals.borrow_mut()) {
            return;
        }
        dom::set_class(panel, ACTIVE_CLASS, false);
        if let Some(toggle) = toggle {
            let _ = toggle.set_attribute("aria-expanded", "false");
        }
        self.sync_scroll_lock();
    }

    #[must_use]
    pub fn scroll_locked(&self) -> bool {
        self.modals.borrow().scroll_locked()
    }

    fn sync_scroll_lock(&self) {
        let Some(body) = dom::document().and_then(|doc| doc.body()) else {
            return;
        };
        let style = body.style();
        let _ = if self.scroll_locked() {
            style.set_property("overflow", "hidden")
        } else {
            style.remove_property("overflow").map(|_| ())
        };
    }
}

//! Mobile navigation panel
use std::cell::RefCell;
use std::rc::Rc;

use storefront_core::{Debouncer, Overlay, click_outside};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event, HtmlElement, KeyboardEvent, Node};

use crate::dom;
use crate::error::SetupError;
use crate::events::{Listener, listen};
use crate::focus::trap_keydown;
use crate::page::Page;

pub const TOGGLE_ID: &str = "menuToggle";
pub const NAV_ID: &str = "mainNav";
pub const CLOSE_BUTTON_CLASS: &str = "mobile-close-btn";

struct Menu {
    page: Page,
    overlay: RefCell<Overlay>,
    /// Present only while open
    trap: RefCell<Option<Listener>>,
    toggle: Element,
    nav: Element,
    close_button: HtmlElement,
}

impl Menu {
    fn open(self: &Rc<Self>) {
        self.page
            .open_overlay(&mut self.overlay.borrow_mut(), &self.nav, Some(&self.toggle));
        self.close_button.set_hidden(false);
        let mut trap = self.trap.borrow_mut();
        if trap.is_none() {
            let menu = Rc::clone(self);
            *trap = dom::document().and_then(|doc| {
                Listener::new(&doc.into(), "keydown", move |event: Event| {
                    if let Some(e) = event.dyn_ref::<KeyboardEvent>() {
                        trap_keydown(&menu.nav, e);
                    }
                })
                .map_err(|err| log::warn!("menu focus trap unavailable: {err}"))
                .ok()
            });
        }
    }

    fn close(&self) {
        self.page
            .close_overlay(&mut self.overlay.borrow_mut(), &self.nav, Some(&self.toggle));
        self.close_button.set_hidden(true);
        let listener = self.trap.borrow_mut().take();
        drop(listener);
    }

    fn is_open(&self) -> bool {
        self.overlay.borrow().is_open()
    }

    fn contains(&self, target: Option<&Node>) -> (bool, bool) {
        let toggle: &Node = self.toggle.as_ref();
        let nav: &Node = self.nav.as_ref();
        (toggle.contains(target), nav.contains(target))
    }
}

fn icon_font_loaded() -> bool {
    dom::window().is_some_and(|win| {
        js_sys::Reflect::get(&win, &"FontAwesome".into()).is_ok_and(|v| !v.is_undefined())
    })
}

fn create_close_button(nav: &Element, label: &str) -> Result<HtmlElement, SetupError> {
    let doc = dom::require_document()?;
    let button: HtmlElement = doc.create_element("button")?.unchecked_into();
    button.set_class_name(CLOSE_BUTTON_CLASS);
    button.set_attribute("type", "button")?;
    button.set_attribute("aria-label", label)?;
    if icon_font_loaded() {
        button.set_inner_html(r#"<i class="fas fa-times" aria-hidden="true"></i>"#);
    } else {
        button.set_text_content(Some("Close"));
    }
    button.set_hidden(true);
    nav.append_child(&button)?;
    Ok(button)
}

/// Wire the menu toggle, the injected close button, nav links, Escape, and outside clicks.
///
/// # Errors
/// Returns an error if the toggle or nav panel is missing, or a listener cannot be attached.
pub fn install(page: &Page) -> Result<(), SetupError> {
    let (Some(toggle), Some(nav)) = (dom::by_id::<Element>(TOGGLE_ID), dom::by_id::<Element>(NAV_ID))
    else {
        return Err(SetupError::MissingElement("mobile menu"));
    };

    let close_button = create_close_button(&nav, &page.config.labels.close_menu)?;
    toggle.set_attribute("aria-expanded", "false")?;
    toggle.set_attribute("aria-controls", &nav.id())?;

    let menu = Rc::new(Menu {
        page: page.clone(),
        overlay: RefCell::new(Overlay::new("menu")),
        trap: RefCell::new(None),
        toggle,
        nav,
        close_button,
    });

    {
        let menu = Rc::clone(&menu);
        listen(&menu.toggle.clone().into(), "click", move |_| menu.open())?;
    }
    {
        let menu = Rc::clone(&menu);
        listen(&menu.close_button.clone().into(), "click", move |_| menu.close())?;
    }
    for link in dom::query_all::<Element>(&menu.nav, "a") {
        let menu = Rc::clone(&menu);
        listen(&link.into(), "click", move |_| menu.close())?;
    }

    let doc = dom::require_document()?;
    {
        let menu = Rc::clone(&menu);
        listen(&doc.clone().into(), "keydown", move |event| {
            let escape = event
                .dyn_ref::<KeyboardEvent>()
                .is_some_and(|e| e.key() == "Escape");
            if escape && menu.is_open() {
                menu.close();
                if let Some(toggle) = menu.toggle.dyn_ref::<HtmlElement>() {
                    dom::focus(toggle);
                }
            }
        })?;
    }

    let debouncer = Rc::new(Debouncer::new());
    let delay = page.config.timings.debounce_ms;
    listen(&doc.into(), "click", move |event| {
        let ticket = debouncer.trigger();
        let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
        let debouncer = Rc::clone(&debouncer);
        let menu = Rc::clone(&menu);
        spawn_local(async move {
            dom::sleep_ms(delay).await;
            if !debouncer.is_latest(ticket) {
                return;
            }
            let (in_toggle, in_nav) = menu.contains(target.as_ref());
            if click_outside(in_toggle, in_nav, menu.is_open()) {
                menu.close();
            }
        });
    })?;

    log::debug!("mobile menu ready");
    Ok(())
}

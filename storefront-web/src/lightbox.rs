//! Product image lightbox
use std::cell::RefCell;
use std::rc::Rc;

use storefront_core::{Gallery, Lightbox, LightboxAction, LightboxKey, Overlay};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, HtmlImageElement, KeyboardEvent};

use crate::dom;
use crate::error::SetupError;
use crate::events::{Listener, listen};
use crate::focus::trap_keydown;
use crate::page::Page;

pub const LIGHTBOX_SELECTOR: &str = ".lightbox";
pub const CLOSE_SELECTOR: &str = ".lightbox-close";
pub const PREV_SELECTOR: &str = ".lightbox-prev";
pub const NEXT_SELECTOR: &str = ".lightbox-next";
pub const PRODUCT_IMAGE_SELECTOR: &str = ".product-img";
/// Document event asking the lightbox to rescan product images.
pub const REFRESH_EVENT: &str = "storefront:refresh-gallery";

struct Elements {
    root: Element,
    image: HtmlImageElement,
    close: HtmlElement,
    prev: Element,
    next: Element,
}

impl Elements {
    fn find() -> Option<Self> {
        let root = dom::query_doc::<Element>(LIGHTBOX_SELECTOR)?;
        Some(Self {
            image: dom::query::<HtmlImageElement>(&root, "img")?,
            close: dom::query_doc::<HtmlElement>(CLOSE_SELECTOR)?,
            prev: dom::query_doc::<Element>(PREV_SELECTOR)?,
            next: dom::query_doc::<Element>(NEXT_SELECTOR)?,
            root,
        })
    }
}

struct State {
    lightbox: Lightbox,
    overlay: Overlay,
    /// Present only while open
    trap: Option<Listener>,
}

struct LightboxView {
    page: Page,
    els: Elements,
    state: RefCell<State>,
}

impl LightboxView {
    fn open(self: &Rc<Self>, index: usize) {
        let mut state = self.state.borrow_mut();
        let src = match state.lightbox.open(index) {
            Ok(src) => src.to_string(),
            Err(err) => {
                log::warn!("cannot open lightbox: {err}");
                return;
            }
        };
        self.els.image.set_src(&src);
        let State { overlay, trap, .. } = &mut *state;
        self.page.open_overlay(overlay, &self.els.root, None);
        if trap.is_none() {
            let view = Rc::clone(self);
            let listener = dom::document().and_then(|doc| {
                Listener::new(&doc.into(), "keydown", move |event: Event| {
                    if let Some(e) = event.dyn_ref::<KeyboardEvent>() {
                        trap_keydown(&view.els.root, e);
                    }
                })
                .map_err(|err| log::warn!("focus trap unavailable: {err}"))
                .ok()
            });
            *trap = listener;
        }
        drop(state);
        dom::focus(&self.els.close);
    }

    fn close(&self) {
        let mut state = self.state.borrow_mut();
        state.lightbox.close();
        let State { overlay, trap, .. } = &mut *state;
        self.page.close_overlay(overlay, &self.els.root, None);
        // Dropping the handle detaches the focus trap.
        let listener = trap.take();
        drop(state);
        drop(listener);
    }

    /// Open at whichever gallery entry `container` maps to.
    fn open_container(self: &Rc<Self>, container: &Element) {
        let containers = dom::query_all_doc::<Element>(PRODUCT_IMAGE_SELECTOR);
        let index = containers
            .iter()
            .position(|c| c == container)
            .and_then(|position| self.state.borrow().lightbox.gallery().index_for_container(position));
        if let Some(index) = index {
            self.open(index);
        }
    }

    fn refresh(&self) {
        let gallery = scan_gallery(&dom::query_all_doc::<Element>(PRODUCT_IMAGE_SELECTOR));
        log::debug!("lightbox gallery rebuilt with {} image(s)", gallery.len());
        self.state.borrow_mut().lightbox.rebuild(gallery);
    }

    fn show(&self, src: Option<String>) {
        if let Some(src) = src {
            self.els.image.set_src(&src);
        }
    }

    fn next(&self) {
        let src = self.state.borrow_mut().lightbox.next().map(str::to_string);
        self.show(src);
    }

    fn prev(&self) {
        let src = self.state.borrow_mut().lightbox.prev().map(str::to_string);
        self.show(src);
    }

    fn on_key(&self, e: &KeyboardEvent) {
        let action = self
            .state
            .borrow()
            .lightbox
            .handle_key(LightboxKey::from_key(&e.key()));
        match action {
            LightboxAction::Close => self.close(),
            LightboxAction::Prev => self.prev(),
            LightboxAction::Next => self.next(),
            LightboxAction::Ignore => {}
        }
    }
}

/// Build the gallery from the product image containers currently on the page.
#[must_use]
pub fn scan_gallery(containers: &[Element]) -> Gallery {
    Gallery::from_sources(containers.iter().map(|container| {
        dom::query::<HtmlImageElement>(container, "img").map(|img| img.src())
    }))
}

/// Rescan the page's product images, e.g. after cards were added or removed.
pub fn refresh() {
    let Some(doc) = dom::document() else {
        return;
    };
    if let Ok(event) = Event::new(REFRESH_EVENT) {
        let _ = doc.dispatch_event(&event);
    }
}

/// Wire the lightbox: product image clicks, controls, backdrop, keyboard, and
/// the fallback image.
///
/// # Errors
/// Returns an error if any lightbox element is missing or a listener cannot be attached.
pub fn install(page: &Page) -> Result<(), SetupError> {
    let els = Elements::find().ok_or(SetupError::MissingElement("lightbox"))?;
    els.root.set_attribute("role", "dialog")?;
    els.root.set_attribute("aria-modal", "true")?;
    els.root.set_attribute("aria-labelledby", "lightbox-title")?;

    let containers = dom::query_all_doc::<Element>(PRODUCT_IMAGE_SELECTOR);
    let gallery = scan_gallery(&containers);
    log::debug!("lightbox gallery has {} image(s)", gallery.len());

    let view = Rc::new(LightboxView {
        page: page.clone(),
        state: RefCell::new(State {
            lightbox: Lightbox::new(gallery),
            overlay: Overlay::new("lightbox"),
            trap: None,
        }),
        els,
    });

    let doc = dom::require_document()?;
    {
        let v = Rc::clone(&view);
        listen(&doc.clone().into(), "click", move |event| {
            if !v.els.root.is_connected() {
                return;
            }
            let container = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .and_then(|el| dom::closest(&el, PRODUCT_IMAGE_SELECTOR));
            if let Some(container) = container {
                v.open_container(&container);
            }
        })?;
    }
    {
        let v = Rc::clone(&view);
        listen(&doc.clone().into(), REFRESH_EVENT, move |_| {
            if v.els.root.is_connected() {
                v.refresh();
            }
        })?;
    }

    {
        let fallback = page.config.fallback_image.clone();
        let image = view.els.image.clone();
        listen(&view.els.image.clone().into(), "error", move |_| {
            if image.src().ends_with(&fallback) {
                return;
            }
            log::warn!("Failed to load lightbox image");
            image.set_src(&fallback);
        })?;
    }
    {
        let v = Rc::clone(&view);
        listen(&view.els.close.clone().into(), "click", move |_| v.close())?;
    }
    {
        let v = Rc::clone(&view);
        listen(&view.els.prev.clone().into(), "click", move |_| v.prev())?;
    }
    {
        let v = Rc::clone(&view);
        listen(&view.els.next.clone().into(), "click", move |_| v.next())?;
    }
    {
        let v = Rc::clone(&view);
        let root = view.els.root.clone();
        listen(&view.els.root.clone().into(), "click", move |event| {
            let on_backdrop = event
                .target()
                .is_some_and(|target| target.unchecked_ref::<Element>() == &root);
            if on_backdrop {
                v.close();
            }
        })?;
    }

    listen(&doc.into(), "keydown", move |event| {
        if let Some(e) = event.dyn_ref::<KeyboardEvent>() {
            view.on_key(e);
        }
    })?;

    log::debug!("lightbox ready");
    Ok(())
}

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, Window};

use crate::error::SetupError;

/// Retrieve the global `window` object, if running in a browser.
#[must_use]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Retrieve the document object for DOM interactions.
#[must_use]
pub fn document() -> Option<Document> {
    window().and_then(|win| win.document())
}

/// Document or a setup error naming what was missing.
///
/// # Errors
/// Returns an error outside a browser context.
pub fn require_document() -> Result<Document, SetupError> {
    document().ok_or(SetupError::MissingElement("document"))
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// First element matching `selector` under `root`, cast to `T`.
#[must_use]
pub fn query<T: JsCast>(root: &Element, selector: &str) -> Option<T> {
    root.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<T>().ok())
}

/// First element matching `selector` in the document, cast to `T`.
#[must_use]
pub fn query_doc<T: JsCast>(selector: &str) -> Option<T> {
    document()
        .and_then(|doc| doc.query_selector(selector).ok().flatten())
        .and_then(|el| el.dyn_into::<T>().ok())
}

/// Element by id, cast to `T`.
#[must_use]
pub fn by_id<T: JsCast>(id: &str) -> Option<T> {
    document()
        .and_then(|doc| doc.get_element_by_id(id))
        .and_then(|el| el.dyn_into::<T>().ok())
}

fn collect<T: JsCast>(list: Option<web_sys::NodeList>) -> Vec<T> {
    let Some(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

/// Every element matching `selector` under `root`, in document order.
#[must_use]
pub fn query_all<T: JsCast>(root: &Element, selector: &str) -> Vec<T> {
    collect(root.query_selector_all(selector).ok())
}

/// Every element matching `selector` in the document, in document order.
#[must_use]
pub fn query_all_doc<T: JsCast>(selector: &str) -> Vec<T> {
    collect(document().and_then(|doc| doc.query_selector_all(selector).ok()))
}

/// Nearest ancestor (or self) matching `selector`.
#[must_use]
pub fn closest(el: &Element, selector: &str) -> Option<Element> {
    el.closest(selector).ok().flatten()
}

/// Trimmed text of the first `selector` match under `root`.
#[must_use]
pub fn text_of(root: &Element, selector: &str) -> Option<String> {
    query::<Element>(root, selector)
        .and_then(|el| el.text_content())
        .map(|text| text.trim().to_string())
}

/// Add or remove a class.
pub fn set_class(el: &Element, class: &str, on: bool) {
    let _ = el.class_list().toggle_with_force(class, on);
}

/// Focus an element, ignoring elements that cannot take focus.
pub fn focus(el: &HtmlElement) {
    let _ = el.focus();
}

/// Currently focused element.
#[must_use]
pub fn active_element() -> Option<Element> {
    document().and_then(|doc| doc.active_element())
}

/// Wait `duration_ms` on the browser timer queue.
pub async fn sleep_ms(duration_ms: u32) {
    TimeoutFuture::new(duration_ms).await;
}

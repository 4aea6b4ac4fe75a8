use storefront_core::{FOCUSABLE_QUERY, FocusMove, trap_tab};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, KeyboardEvent, Node};

use crate::dom;

/// Focusable descendants of `container`, in tab order of the markup.
#[must_use]
pub fn focusables(container: &Element) -> Vec<HtmlElement> {
    dom::query_all::<HtmlElement>(container, FOCUSABLE_QUERY)
}

/// Keep Tab / Shift+Tab cycling inside `container`.
pub fn trap_keydown(container: &Element, e: &KeyboardEvent) {
    if e.key() != "Tab" {
        return;
    }
    let nodes = focusables(container);
    let active = dom::active_element();
    let inside = active
        .as_ref()
        .is_some_and(|el| container.contains(Some(el.unchecked_ref::<Node>())));
    let position = match (&active, inside) {
        (Some(active), true) => {
            let Some(index) = nodes
                .iter()
                .position(|node| node.unchecked_ref::<Element>() == active)
            else {
                // Focused element inside the container but not in the focus order.
                return;
            };
            Some(index)
        }
        _ => None,
    };
    if let FocusMove::MoveTo(index) = trap_tab(nodes.len(), position, e.shift_key()) {
        e.prevent_default();
        if let Some(target) = nodes.get(index) {
            dom::focus(target);
        }
    }
}

use storefront_core::anchor_target;
use wasm_bindgen::JsCast;
use web_sys::{Element, ScrollBehavior, ScrollIntoViewOptions};

use crate::dom;
use crate::error::SetupError;
use crate::events::listen;

/// Smooth-scroll in-page `#id` links to their target.
///
/// # Errors
/// Returns an error if a listener cannot be attached.
pub fn install() -> Result<(), SetupError> {
    let anchors = dom::query_all_doc::<Element>(r##"a[href^="#"]"##);
    for anchor in &anchors {
        listen(&anchor.clone().into(), "click", |event| {
            event.prevent_default();
            let href = event
                .current_target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|a| a.get_attribute("href"))
                .unwrap_or_default();
            let Some(target) = anchor_target(&href).and_then(dom::by_id::<Element>) else {
                return;
            };
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            target.scroll_into_view_with_scroll_into_view_options(&options);
        })?;
    }
    log::debug!("{} in-page link(s) ready", anchors.len());
    Ok(())
}

use storefront_core::{MessagingLink, summary_message};
use web_sys::Element;

use crate::dom;
use crate::error::SetupError;
use crate::events::listen;
use crate::page::Page;

/// Controls carrying this attribute open the messaging handoff.
pub const HANDOFF_SELECTOR: &str = "[data-handoff]";

/// Link for the current cart and wishlist contents.
#[must_use]
pub fn current_url(page: &Page) -> String {
    let message = summary_message(page.lists.cart().items(), page.lists.wishlist().items());
    MessagingLink::from_config(&page.config.messaging).url(&message)
}

/// Open the messaging link from every handoff control.
///
/// # Errors
/// Returns an error if a listener cannot be attached.
pub fn install(page: &Page) -> Result<(), SetupError> {
    let controls = dom::query_all_doc::<Element>(HANDOFF_SELECTOR);
    for control in &controls {
        let page = page.clone();
        listen(&control.clone().into(), "click", move |event| {
            event.prevent_default();
            let url = current_url(&page);
            log::info!("opening messaging handoff");
            let opened = dom::window().map(|win| win.open_with_url_and_target(&url, "_blank"));
            if !matches!(opened, Some(Ok(Some(_)))) {
                log::warn!("messaging link could not be opened");
            }
        })?;
    }
    log::debug!("{} handoff control(s) ready", controls.len());
    Ok(())
}

//! Category tabs
use storefront_core::CategoryFilter;
use web_sys::{Element, HtmlElement};

use crate::dom;
use crate::error::SetupError;
use crate::events::listen;
use crate::page::ACTIVE_CLASS;

pub const TAB_SELECTOR: &str = ".tab-btn";
pub const CONTAINER_SELECTOR: &str = ".tab-container";
pub const GRID_SELECTOR: &str = ".categories-grid";
pub const CARD_SELECTOR: &str = ".category-card";

/// Activate `tab` and filter the cards of its own tab group, or of the page's
/// first grid when the tab sits outside any group.
pub fn select(tab: &Element) {
    let group = dom::closest(tab, CONTAINER_SELECTOR);
    let siblings = group.as_ref().map_or_else(
        || dom::query_all_doc::<Element>(TAB_SELECTOR),
        |group| dom::query_all::<Element>(group, TAB_SELECTOR),
    );
    for other in &siblings {
        let selected = other == tab;
        dom::set_class(other, ACTIVE_CLASS, selected);
        let _ = other.set_attribute("aria-selected", if selected { "true" } else { "false" });
    }

    let filter = CategoryFilter::new(tab.get_attribute("data-category").unwrap_or_default());
    let grid = match &group {
        Some(group) => dom::query::<Element>(group, GRID_SELECTOR),
        None => dom::query_doc::<Element>(GRID_SELECTOR),
    };
    let Some(grid) = grid else {
        return;
    };
    for card in dom::query_all::<HtmlElement>(&grid, CARD_SELECTOR) {
        let category = card.get_attribute("data-category");
        let style = card.style();
        let _ = if filter.shows(category.as_deref()) {
            style.remove_property("display").map(|_| ())
        } else {
            style.set_property("display", "none")
        };
    }
}

/// Wire every category tab on the page. A page without tabs is not an error.
///
/// # Errors
/// Returns an error if a listener cannot be attached.
pub fn install() -> Result<(), SetupError> {
    let tabs = dom::query_all_doc::<Element>(TAB_SELECTOR);
    for tab in &tabs {
        let target = tab.clone();
        listen(&tab.clone().into(), "click", move |_| select(&target))?;
    }
    log::debug!("{} category tab(s) ready", tabs.len());
    Ok(())
}

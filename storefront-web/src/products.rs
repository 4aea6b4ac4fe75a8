//! Product grid: add-to-cart buttons, wishlist hearts, and the cart toast
use storefront_core::{
    ProductCard, ToastPhase, ToastPlan, WishIcon, add_to_cart, cart_toast_text, initial_icon,
    toggle_wishlist,
};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom;
use crate::error::SetupError;
use crate::events::{dispatch, listen};
use crate::page::Page;

pub const GRID_SELECTOR: &str = ".products-grid";
pub const CARD_SELECTOR: &str = ".product-card";
pub const TITLE_SELECTOR: &str = ".product-title";
pub const PRICE_SELECTOR: &str = ".product-price";
pub const ADD_BUTTON_SELECTOR: &str = ".btn-primary";
pub const WISHLIST_BUTTON_SELECTOR: &str = ".btn-icon";

fn card_of(button: &Element) -> Option<ProductCard> {
    let card = dom::closest(button, CARD_SELECTOR)?;
    let name = dom::text_of(&card, TITLE_SELECTOR)?;
    let price = dom::text_of(&card, PRICE_SELECTOR).unwrap_or_default();
    Some(ProductCard::new(name, price))
}

fn apply_phase(toast: &Element, phase: ToastPhase) {
    if phase == ToastPhase::Removed {
        toast.remove();
    } else {
        toast.set_class_name(&phase.classes().join(" "));
    }
}

/// Attach a toast to the page and walk it through its phases.
pub fn show_toast(plan: ToastPlan) {
    let Some(body) = dom::document().and_then(|doc| doc.body()) else {
        return;
    };
    let Some(toast) = dom::document().and_then(|doc| doc.create_element("div").ok()) else {
        return;
    };
    toast.set_text_content(Some(&plan.text));
    let _ = toast.set_attribute("role", "status");
    apply_phase(&toast, ToastPhase::Hidden);
    if body.append_child(&toast).is_err() {
        return;
    }
    spawn_local(async move {
        for (delay, phase) in plan.steps() {
            dom::sleep_ms(delay).await;
            apply_phase(&toast, phase);
        }
    });
}

fn on_add(page: &Page, button: &Element) {
    let Some(card) = card_of(button) else {
        log::warn!("add-to-cart button outside a product card");
        return;
    };
    match add_to_cart(&page.lists, &card) {
        Ok((item, event)) => {
            dispatch(&event);
            show_toast(ToastPlan::new(cart_toast_text(&item.name), &page.config.timings));
        }
        Err(err) => log::warn!("could not add {:?} to cart: {err}", card.name),
    }
}

fn icon_state(icon: &Element) -> WishIcon {
    WishIcon::from_classes(icon.class_list().contains(WishIcon::Active.class()))
}

fn show_icon(button: &Element, icon: &Element, state: WishIcon) {
    dom::set_class(icon, state.toggled().class(), false);
    dom::set_class(icon, state.class(), true);
    let _ = button.set_attribute(
        "aria-pressed",
        if state == WishIcon::Active { "true" } else { "false" },
    );
}

fn on_wishlist(page: &Page, button: &Element) {
    let (Some(icon), Some(card)) = (dom::query::<Element>(button, "i"), card_of(button)) else {
        log::warn!("wishlist button without an icon or product card");
        return;
    };
    match toggle_wishlist(&page.lists, &card.name, icon_state(&icon)) {
        Ok((state, event)) => {
            show_icon(button, &icon, state);
            dispatch(&event);
        }
        Err(err) => log::warn!("could not update wishlist for {:?}: {err}", card.name),
    }
}

/// Wire the product grid and restore wishlist hearts from storage.
///
/// # Errors
/// Returns an error if a listener cannot be attached. A page without a product grid is not an error.
pub fn install(page: &Page) -> Result<(), SetupError> {
    let Some(grid) = dom::query_doc::<Element>(GRID_SELECTOR) else {
        log::debug!("no product grid on this page");
        return Ok(());
    };

    for button in dom::query_all::<Element>(&grid, ADD_BUTTON_SELECTOR) {
        let page = page.clone();
        listen(&button.clone().into(), "click", move |event| {
            if let Some(el) = event.current_target().and_then(|t| t.dyn_into::<Element>().ok()) {
                on_add(&page, &el);
            }
        })?;
    }

    let hearts = dom::query_all::<Element>(&grid, WISHLIST_BUTTON_SELECTOR);
    for button in &hearts {
        if let (Some(icon), Some(card)) = (dom::query::<Element>(button, "i"), card_of(button)) {
            show_icon(button, &icon, initial_icon(&page.lists, &card.name));
        }
        let page = page.clone();
        listen(&button.clone().into(), "click", move |event| {
            if let Some(el) = event.current_target().and_then(|t| t.dyn_into::<Element>().ok()) {
                on_wishlist(&page, &el);
            }
        })?;
    }

    log::debug!("product grid ready ({} wishlist button(s))", hearts.len());
    Ok(())
}

#![forbid(unsafe_code)]
//! Storefront page interactivity for the browser.
//!
//! Each feature binds to markup already on the page and is installed on its own;
//! a feature whose elements are missing logs a warning and the rest keep working.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod config;
pub mod contact_form;
pub mod dom;
pub mod error;
pub mod events;
pub mod focus;
pub mod footer;
pub mod handoff;
pub mod lightbox;
pub mod menu;
pub mod page;
pub mod products;
pub mod smooth_scroll;
pub mod storage;
pub mod tabs;

use std::rc::Rc;
use std::sync::Once;

use error::SetupError;
use page::Page;

fn guarded(warning: &str, result: Result<(), SetupError>) {
    if let Err(err) = result {
        log::warn!("{warning}");
        log::debug!("{err}");
    }
}

static LOGGER: Once = Once::new();

/// Route `log` records to the console. Later calls only adjust the level.
fn init_logging(level: log::LevelFilter) {
    LOGGER.call_once(|| {
        wasm_logger::init(wasm_logger::Config::new(
            level.to_level().unwrap_or(log::Level::Info),
        ));
    });
    log::set_max_level(level);
}

/// Load configuration, start logging, and install every feature.
pub fn boot() -> Page {
    let (config, config_error) = config::load();
    init_logging(config.level_filter());
    if let Some(err) = config_error {
        log::warn!("page configuration ignored: {err}");
    }
    let page = Page::new(config);
    install_all(&page);
    page
}

/// Install every feature against the current document.
pub fn install_all(page: &Page) {
    guarded("Mobile menu elements are missing.", menu::install(page));
    guarded("Lightbox elements are missing.", lightbox::install(page));
    guarded("Category tabs could not be wired.", tabs::install());
    guarded("In-page links could not be wired.", smooth_scroll::install());
    guarded(
        "Contact form or submit button is missing.",
        contact_form::install(Rc::clone(&page.config)),
    );
    guarded("Product grid could not be wired.", products::install(page));
    guarded("Handoff controls could not be wired.", handoff::install(page));
    guarded("Current year span is missing.", footer::install());
    log::info!("storefront ready");
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    boot();
}

/// Page scripts call this after adding or removing product cards.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = refreshGallery)]
pub fn refresh_gallery() {
    lightbox::refresh();
}

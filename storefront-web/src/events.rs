//! Event listener handles and storefront notifications
use storefront_core::StorefrontEvent;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CustomEvent, CustomEventInit, Event, EventTarget};

use crate::dom;
use crate::error::SetupError;

/// A registered listener. Dropping it detaches the listener.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    /// Attach `handler` for `event` on `target`.
    ///
    /// # Errors
    /// Returns an error if the browser refuses the registration.
    pub fn new<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Self, SetupError>
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// Attach a listener that lives as long as the page.
///
/// # Errors
/// Returns an error if the browser refuses the registration.
pub fn listen<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<(), SetupError>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Dispatch a storefront notification on `document`.
pub fn dispatch(event: &StorefrontEvent) {
    let Some(doc) = dom::document() else {
        return;
    };
    let detail = match serde_wasm_bindgen::to_value(event) {
        Ok(detail) => detail,
        Err(err) => {
            log::warn!("could not encode {} detail: {err}", event.event_name());
            JsValue::NULL
        }
    };
    let init = CustomEventInit::new();
    init.set_detail(&detail);
    match CustomEvent::new_with_event_init_dict(event.event_name(), &init) {
        Ok(custom) => {
            let _ = doc.dispatch_event(&custom);
        }
        Err(err) => log::warn!(
            "could not create {} event: {}",
            event.event_name(),
            dom::js_error_message(&err)
        ),
    }
}

use wasm_bindgen::JsValue;

use crate::dom::js_error_message;

/// Why a feature could not be wired to the page.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("missing page element: {0}")]
    MissingElement(&'static str),
    #[error("JavaScript error: {0}")]
    Js(String),
}

impl From<JsValue> for SetupError {
    fn from(value: JsValue) -> Self {
        Self::Js(js_error_message(&value))
    }
}

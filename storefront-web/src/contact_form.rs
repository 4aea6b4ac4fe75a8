//! Contact form validation and submission
use std::rc::Rc;

use async_trait::async_trait;
use storefront_core::{
    Field, FieldError, FormFields, FormTransport, StorefrontConfig, SubmitControl, SubmitOutcome,
    SubmitReply, TransportError, error_id, submit_contact,
};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{
    Element, FormData, HtmlButtonElement, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement,
    Request, RequestInit, Response,
};

use crate::dom;
use crate::error::SetupError;
use crate::events::listen;

pub const FORM_ID: &str = "contactForm";
pub const SUBMIT_SELECTOR: &str = r#"button[type="submit"]"#;
pub const ERROR_CLASS: &str = "error";

const VALIDATED: [Field; 3] = [Field::Name, Field::Email, Field::Message];

/// Posts the fields as `multipart/form-data` with `fetch`.
pub struct FetchTransport;

#[async_trait(?Send)]
impl FormTransport for FetchTransport {
    async fn post(
        &self,
        endpoint: &str,
        fields: &FormFields,
    ) -> Result<SubmitReply, TransportError> {
        let network = |err: wasm_bindgen::JsValue| TransportError::Network(dom::js_error_message(&err));

        let body = FormData::new().map_err(network)?;
        for (name, value) in fields.iter() {
            body.append_with_str(name, value).map_err(network)?;
        }
        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_body(&body);
        let request = Request::new_with_str_and_init(endpoint, &opts).map_err(network)?;

        let win = dom::window().ok_or_else(|| TransportError::Network("window unavailable".into()))?;
        let resp: Response = JsFuture::from(win.fetch_with_request(&request))
            .await
            .map_err(network)?
            .dyn_into()
            .map_err(|_| TransportError::InvalidResponse("not a Response".into()))?;
        let text = JsFuture::from(resp.text().map_err(network)?)
            .await
            .map_err(network)?
            .as_string()
            .unwrap_or_default();
        serde_json::from_str(&text).map_err(|err| TransportError::InvalidResponse(err.to_string()))
    }
}

/// The form's submit button.
pub struct ButtonControl(pub HtmlButtonElement);

impl SubmitControl for ButtonControl {
    fn set_busy(&self, busy: bool, label: &str) {
        self.0.set_disabled(busy);
        self.0.set_text_content(Some(label));
    }
}

fn field_value(id: &str) -> Option<String> {
    let el = dom::by_id::<Element>(id)?;
    el.dyn_ref::<HtmlInputElement>()
        .map(HtmlInputElement::value)
        .or_else(|| el.dyn_ref::<HtmlTextAreaElement>().map(HtmlTextAreaElement::value))
}

/// Every named control of `form`, plus the validated inputs looked up by id when
/// the markup leaves them unnamed.
#[must_use]
pub fn read_fields(form: &HtmlFormElement) -> FormFields {
    let mut fields: FormFields = FormData::new_with_form(form)
        .ok()
        .and_then(|data| js_sys::try_iter(&data).ok().flatten())
        .into_iter()
        .flatten()
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let pair = js_sys::Array::from(&entry);
            Some((pair.get(0).as_string()?, pair.get(1).as_string()?))
        })
        .collect();
    for field in VALIDATED {
        let id = field.element_id();
        if fields.get(id).is_none()
            && let Some(value) = field_value(id)
        {
            fields.push(id, value);
        }
    }
    fields
}

/// Remove every rendered error node on the page and the references to it.
pub fn clear_errors() {
    for node in dom::query_all_doc::<Element>(&format!(".{ERROR_CLASS}")) {
        let id = node.id();
        if !id.is_empty() {
            for field in dom::query_all_doc::<Element>(&format!("[aria-describedby=\"{id}\"]")) {
                let _ = field.remove_attribute("aria-describedby");
            }
        }
        node.remove();
    }
}

/// Render `message` under the element with id `element_id` and reference it from
/// `aria-describedby`.
pub fn show_error(element_id: &str, message: &str) {
    let (Some(doc), Some(target)) = (dom::document(), dom::by_id::<Element>(element_id)) else {
        log::debug!("no element #{element_id} to attach an error to");
        return;
    };
    let Some(parent) = target.parent_node() else {
        return;
    };
    let Ok(node) = doc.create_element("div") else {
        return;
    };
    let id = error_id(element_id);
    node.set_class_name(ERROR_CLASS);
    node.set_id(&id);
    let _ = node.set_attribute("role", "alert");
    node.set_text_content(Some(message));
    let _ = target.set_attribute("aria-describedby", &id);
    let _ = parent.append_child(&node);
}

fn render_invalid(errors: &[FieldError]) {
    for error in errors {
        show_error(error.field.element_id(), &error.message);
    }
}

fn finish(form: &HtmlFormElement, outcome: &SubmitOutcome) {
    match outcome {
        SubmitOutcome::Invalid(errors) => render_invalid(errors),
        SubmitOutcome::Accepted => {
            if let Some(win) = dom::window() {
                let _ = win.alert_with_message(outcome.user_message().unwrap_or_default());
            }
            form.reset();
        }
        SubmitOutcome::Rejected | SubmitOutcome::Failed(_) => {
            show_error(Field::Form.element_id(), outcome.user_message().unwrap_or_default());
        }
    }
}

/// Validate on submit and post valid forms to the configured endpoint.
///
/// # Errors
/// Returns an error if the form or its submit button is missing, or a listener cannot be attached.
pub fn install(config: Rc<StorefrontConfig>) -> Result<(), SetupError> {
    let form = dom::by_id::<HtmlFormElement>(FORM_ID)
        .ok_or(SetupError::MissingElement("contact form"))?;
    let button = dom::query::<HtmlButtonElement>(&form, SUBMIT_SELECTOR)
        .ok_or(SetupError::MissingElement("contact form submit button"))?;
    let control = Rc::new(ButtonControl(button));

    let target = form.clone();
    listen(&form.into(), "submit", move |event| {
        event.prevent_default();
        clear_errors();
        let fields = read_fields(&target);
        let config = Rc::clone(&config);
        let control = Rc::clone(&control);
        let form = target.clone();
        spawn_local(async move {
            let outcome = submit_contact(&config, &fields, &FetchTransport, &*control).await;
            finish(&form, &outcome);
        });
    })?;

    log::debug!("contact form ready");
    Ok(())
}

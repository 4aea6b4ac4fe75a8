//! Contact form validation and submission
//!
//! Validation collects every failing field instead of stopping at the first.
//! Submission goes through a [`FormTransport`] and reports busy state to a
//! [`SubmitControl`]; the control is always released, whatever the outcome.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::StorefrontConfig;

static EMAIL_RE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

pub const SUCCESS_MESSAGE: &str = "Form submitted successfully! We will contact you soon.";
pub const REJECTED_MESSAGE: &str = "Submission failed. Please try again.";
pub const FAILED_MESSAGE: &str = "An error occurred. Please try again.";

/// Submitted form fields in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields {
    entries: Vec<(String, String)>,
}

impl FormFields {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    #[must_use]
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.push(name, value);
        self
    }

    /// First value submitted under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Which part of the form an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Message,
    /// Form-level error, not tied to an input
    Form,
}

impl Field {
    /// Element id of the input (or the form itself).
    #[must_use]
    pub const fn element_id(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
            Self::Form => "contactForm",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    fn new(field: Field, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

/// Id of the error node attached to element `element_id`.
#[must_use]
pub fn error_id(element_id: &str) -> String {
    format!("{element_id}-error")
}

#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.as_ref().is_some_and(|re| re.is_match(email))
}

/// Check the name, email and message fields. Every failing field yields exactly one error.
#[must_use]
pub fn validate(fields: &FormFields) -> Vec<FieldError> {
    let mut errors = Vec::new();
    let value = |field: Field| fields.get(field.element_id()).unwrap_or_default();

    if value(Field::Name).trim().is_empty() {
        errors.push(FieldError::new(Field::Name, "Name is required"));
    }

    let email = value(Field::Email);
    if email.trim().is_empty() {
        errors.push(FieldError::new(Field::Email, "Email is required"));
    } else if !is_valid_email(email) {
        errors.push(FieldError::new(Field::Email, "Please enter a valid email"));
    }

    if value(Field::Message).trim().is_empty() {
        errors.push(FieldError::new(Field::Message, "Message is required"));
    }
    errors
}

/// Body returned by the submission endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitReply {
    #[serde(default)]
    pub success: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Sends form fields to the endpoint.
#[async_trait(?Send)]
pub trait FormTransport {
    /// POST `fields` to `endpoint` and decode the JSON reply.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not the expected JSON.
    async fn post(&self, endpoint: &str, fields: &FormFields)
    -> Result<SubmitReply, TransportError>;
}

/// The submit button, as far as submission is concerned.
pub trait SubmitControl {
    fn set_busy(&self, busy: bool, label: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent
    Invalid(Vec<FieldError>),
    /// Endpoint answered `success: true`
    Accepted,
    /// Endpoint answered `success: false`
    Rejected,
    /// Request failed or the reply could not be decoded
    Failed(String),
}

impl SubmitOutcome {
    /// Message shown to the user, if any. Validation errors are rendered per field.
    #[must_use]
    pub const fn user_message(&self) -> Option<&'static str> {
        match self {
            Self::Invalid(_) => None,
            Self::Accepted => Some(SUCCESS_MESSAGE),
            Self::Rejected => Some(REJECTED_MESSAGE),
            Self::Failed(_) => Some(FAILED_MESSAGE),
        }
    }
}

/// Validate and, when valid, submit the contact form once.
pub async fn submit_contact<T, C>(
    config: &StorefrontConfig,
    fields: &FormFields,
    transport: &T,
    control: &C,
) -> SubmitOutcome
where
    T: FormTransport + ?Sized,
    C: SubmitControl + ?Sized,
{
    let errors = validate(fields);
    if !errors.is_empty() {
        log::debug!("contact form rejected with {} error(s)", errors.len());
        return SubmitOutcome::Invalid(errors);
    }

    control.set_busy(true, &config.labels.submitting);
    let outcome = match transport.post(&config.submit_endpoint, fields).await {
        Ok(SubmitReply { success: true }) => SubmitOutcome::Accepted,
        Ok(SubmitReply { success: false }) => SubmitOutcome::Rejected,
        Err(err) => {
            log::warn!("contact form submission failed: {err}");
            SubmitOutcome::Failed(err.to_string())
        }
    };
    control.set_busy(false, &config.labels.submit);
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> FormFields {
        FormFields::new()
            .with("name", "Ada")
            .with("email", "user@example.com")
            .with("message", "Hello")
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("user@example.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user@com"));
        assert!(!is_valid_email("us er@example.com"));
        assert!(!is_valid_email("a@b@c.d"));
    }

    #[test]
    fn each_empty_field_reports_once() {
        let errors = validate(&FormFields::new().with("name", "  ").with("email", "").with("message", "\n"));
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec![Field::Name, Field::Email, Field::Message]);
        assert_eq!(errors[1].message, "Email is required");
    }

    #[test]
    fn malformed_email_is_its_own_error() {
        let fields = valid();
        let mut bad = FormFields::new();
        for (k, v) in fields.iter() {
            bad.push(k, if k == "email" { "user@com" } else { v });
        }
        let errors = validate(&bad);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, Field::Email);
        assert_eq!(errors[0].message, "Please enter a valid email");
    }

    #[test]
    fn valid_form_has_no_errors() {
        assert!(validate(&valid()).is_empty());
    }

    #[test]
    fn reply_without_success_field_is_rejection() {
        let reply: SubmitReply = serde_json::from_str(r#"{"message":"nope"}"#).unwrap();
        assert!(!reply.success);
    }

    #[test]
    fn error_ids_follow_element_ids() {
        assert_eq!(error_id(Field::Email.element_id()), "email-error");
        assert_eq!(error_id(Field::Form.element_id()), "contactForm-error");
    }
}

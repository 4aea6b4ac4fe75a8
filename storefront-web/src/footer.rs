use web_sys::Element;

use crate::dom;
use crate::error::SetupError;

pub const YEAR_ID: &str = "currentYear";

/// Fill the footer's year span.
///
/// # Errors
/// Returns an error if the span is missing.
pub fn install() -> Result<(), SetupError> {
    let span = dom::by_id::<Element>(YEAR_ID).ok_or(SetupError::MissingElement("current year span"))?;
    let year = js_sys::Date::new_0().get_full_year();
    span.set_text_content(Some(&year.to_string()));
    Ok(())
}

use anyhow::Result;
use thirtyfour::prelude::*;

use crate::browser::PageProbe;
use crate::logic::checks;

pub mod add_to_cart;
pub mod lightbox_keys;

/// A storefront behavior checked without a browser.
pub type LogicCheck = fn() -> Result<()>;

#[derive(Debug, Clone)]
pub struct ScenarioCtx<'a> {
    pub base_url: String,
    pub probe: PageProbe<'a>,
    pub verbose: bool,
}

// Browser test scenario
#[async_trait::async_trait]
pub trait BrowserScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()>;
}

// Scenario that may run against the core, a live page, or both
pub trait CombinedScenario: BrowserScenario + Send + Sync {
    fn logic_check(&self) -> Option<LogicCheck>;

    fn runs_in_browser(&self) -> bool;
}

pub struct LogicScenario {
    check: LogicCheck,
}

#[async_trait::async_trait]
impl BrowserScenario for LogicScenario {
    async fn run_browser(&self, _driver: &WebDriver, _ctx: &ScenarioCtx<'_>) -> Result<()> {
        anyhow::bail!("Browser testing not implemented for this logic scenario")
    }
}

impl CombinedScenario for LogicScenario {
    fn logic_check(&self) -> Option<LogicCheck> {
        Some(self.check)
    }

    fn runs_in_browser(&self) -> bool {
        false
    }
}

const SCENARIOS: &[(&str, &str)] = &[
    ("cart-roundtrip", "Cart entries persist, reload, and fail soft on bad data"),
    ("wishlist-toggle", "Wishlist hearts add and remove every entry by name"),
    ("gallery-wrap", "Lightbox navigation wraps in both directions"),
    ("focus-trap", "Tab and Shift+Tab stay inside an open overlay"),
    ("category-filter", "Category tags show matching cards only"),
    ("form-validation", "Contact form reports every invalid field"),
    ("form-submit", "Valid forms post once and always release the button"),
    ("handoff-message", "Cart and wishlist summary packs into a messaging link"),
    ("add-to-cart", "Add the first product and read localStorage back"),
    ("lightbox-keys", "Open the lightbox, arrow through, and escape"),
];

pub fn list_scenarios() -> &'static [(&'static str, &'static str)] {
    SCENARIOS
}

pub fn scenario_names() -> Vec<String> {
    SCENARIOS.iter().map(|(name, _)| (*name).to_string()).collect()
}

fn logic(check: LogicCheck) -> Option<Box<dyn CombinedScenario>> {
    Some(Box::new(LogicScenario { check }))
}

pub fn get_scenario(name: &str) -> Option<Box<dyn CombinedScenario>> {
    match name.to_lowercase().as_str() {
        "cart-roundtrip" => logic(checks::cart_roundtrip),
        "wishlist-toggle" => logic(checks::wishlist_toggle),
        "gallery-wrap" => logic(checks::gallery_wrap),
        "focus-trap" => logic(checks::focus_trap),
        "category-filter" => logic(checks::category_filter),
        "form-validation" => logic(checks::form_validation),
        "form-submit" => logic(checks::form_submit),
        "handoff-message" => logic(checks::handoff_message),
        "add-to-cart" => Some(Box::new(add_to_cart::AddToCartScenario)),
        "lightbox-keys" => Some(Box::new(lightbox_keys::LightboxKeysScenario)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_scenario_resolves() {
        for (name, _) in list_scenarios() {
            assert!(get_scenario(name).is_some(), "{name} should resolve");
        }
        assert!(get_scenario("smoke").is_none());
    }

    #[test]
    fn every_logic_check_passes() {
        for name in scenario_names() {
            let Some(scenario) = get_scenario(&name) else {
                continue;
            };
            if let Some(check) = scenario.logic_check() {
                check().unwrap_or_else(|err| panic!("{name}: {err:#}"));
            }
        }
    }

    #[test]
    fn browser_scenarios_have_no_logic_half() {
        let scenario = get_scenario("add-to-cart").unwrap();
        assert!(scenario.runs_in_browser());
        assert!(scenario.logic_check().is_none());
    }
}

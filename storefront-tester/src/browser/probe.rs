use anyhow::{Context, Result};
use serde_json::Value;
use storefront_core::CartItem;
use thirtyfour::prelude::*;

/// Reads page state through injected scripts.
#[derive(Debug, Clone)]
pub struct PageProbe<'a> {
    driver: &'a WebDriver,
}

impl<'a> PageProbe<'a> {
    pub const fn new(driver: &'a WebDriver) -> Self {
        Self { driver }
    }

    async fn eval(&self, script: &str, args: Vec<Value>) -> Result<Value> {
        let ret = self.driver.execute(script, args).await?;
        Ok(ret.json().clone())
    }

    pub async fn clear_storage(&self) -> Result<()> {
        self.eval("window.localStorage.clear()", vec![]).await?;
        Ok(())
    }

    /// Raw text of one `localStorage` slot.
    pub async fn slot(&self, key: &str) -> Result<Option<String>> {
        let raw = self
            .eval("return window.localStorage.getItem(arguments[0])", vec![key.into()])
            .await?;
        Ok(raw.as_str().map(str::to_string))
    }

    pub async fn cart(&self, key: &str) -> Result<Vec<CartItem>> {
        let text = self.slot(key).await?.unwrap_or_else(|| "[]".to_string());
        serde_json::from_str(&text).with_context(|| format!("parsing cart slot {key:?}"))
    }

    pub async fn has_class(&self, selector: &str, class: &str) -> Result<bool> {
        let v = self
            .eval(
                "const el = document.querySelector(arguments[0]); return !!el && el.classList.contains(arguments[1])",
                vec![selector.into(), class.into()],
            )
            .await?;
        Ok(v.as_bool().unwrap_or(false))
    }

    pub async fn image_src(&self, selector: &str) -> Result<String> {
        let v = self
            .eval(
                "const el = document.querySelector(arguments[0]); return el ? el.src : null",
                vec![selector.into()],
            )
            .await?;
        v.as_str()
            .map(str::to_string)
            .with_context(|| format!("no image at {selector}"))
    }

    pub async fn text_of(&self, selector: &str) -> Result<Option<String>> {
        let v = self
            .eval(
                "const el = document.querySelector(arguments[0]); return el ? el.textContent : null",
                vec![selector.into()],
            )
            .await?;
        Ok(v.as_str().map(|s| s.trim().to_string()))
    }

    /// Dispatch a `keydown` for `key` on the document.
    pub async fn press(&self, key: &str) -> Result<()> {
        self.eval(
            "document.dispatchEvent(new KeyboardEvent('keydown', { key: arguments[0], bubbles: true, cancelable: true }))",
            vec![key.into()],
        )
        .await?;
        Ok(())
    }

    pub async fn scroll_locked(&self) -> Result<bool> {
        let v = self
            .eval("return document.body.style.overflow === 'hidden'", vec![])
            .await?;
        Ok(v.as_bool().unwrap_or(false))
    }
}

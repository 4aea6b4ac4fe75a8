use anyhow::{Context, Result, ensure};
use storefront_core::{StorefrontConfig, cart_toast_text};
use thirtyfour::prelude::*;

use super::{BrowserScenario, CombinedScenario, LogicCheck, ScenarioCtx};

pub struct AddToCartScenario;

#[async_trait::async_trait]
impl BrowserScenario for AddToCartScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        driver.goto(&ctx.base_url).await?;
        ctx.probe.clear_storage().await?;
        driver.refresh().await?;

        let card = driver
            .find(By::Css(".products-grid .product-card"))
            .await
            .context("page has no product card")?;
        let title = card.find(By::Css(".product-title")).await?.text().await?;
        let title = title.trim().to_string();
        card.find(By::Css(".btn-primary")).await?.click().await?;
        if ctx.verbose {
            println!("  🖱️  Added {title} to cart");
        }

        let cart = ctx.probe.cart(&StorefrontConfig::default().cart_key).await?;
        ensure!(cart.len() == 1, "expected one cart entry, found {}", cart.len());
        ensure!(cart[0].name == title, "cart holds {:?}, expected {title:?}", cart[0].name);
        ensure!(
            cart[0].price.chars().all(|c| c.is_ascii_digit() || c == '.'),
            "price should be plain decimal text, got {:?}",
            cart[0].price
        );

        let toast = ctx.probe.text_of(".toast").await?;
        ensure!(
            toast.as_deref() == Some(cart_toast_text(&title).as_str()),
            "unexpected toast {toast:?}"
        );
        Ok(())
    }
}

impl CombinedScenario for AddToCartScenario {
    fn logic_check(&self) -> Option<LogicCheck> {
        None
    }

    fn runs_in_browser(&self) -> bool {
        true
    }
}

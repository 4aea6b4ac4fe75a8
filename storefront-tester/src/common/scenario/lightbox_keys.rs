use anyhow::{Result, ensure};
use thirtyfour::prelude::*;

use super::{BrowserScenario, CombinedScenario, LogicCheck, ScenarioCtx};

const LIGHTBOX: &str = ".lightbox";
const LIGHTBOX_IMAGE: &str = ".lightbox img";

pub struct LightboxKeysScenario;

#[async_trait::async_trait]
impl BrowserScenario for LightboxKeysScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        driver.goto(&ctx.base_url).await?;

        let images = driver.find_all(By::Css(".product-img img")).await?;
        ensure!(
            images.len() >= 2,
            "need two product images to navigate, found {}",
            images.len()
        );

        driver.find(By::Css(".product-img")).await?.click().await?;
        ensure!(ctx.probe.has_class(LIGHTBOX, "active").await?, "lightbox did not open");
        ensure!(ctx.probe.scroll_locked().await?, "page should not scroll behind the lightbox");
        let first = ctx.probe.image_src(LIGHTBOX_IMAGE).await?;

        ctx.probe.press("ArrowRight").await?;
        let second = ctx.probe.image_src(LIGHTBOX_IMAGE).await?;
        ensure!(second != first, "ArrowRight should show the next image");
        if ctx.verbose {
            println!("  ⌨️  ArrowRight: {first} -> {second}");
        }

        ctx.probe.press("ArrowLeft").await?;
        ensure!(
            ctx.probe.image_src(LIGHTBOX_IMAGE).await? == first,
            "ArrowLeft should return to the first image"
        );

        ctx.probe.press("Escape").await?;
        ensure!(!ctx.probe.has_class(LIGHTBOX, "active").await?, "Escape should close");
        ensure!(!ctx.probe.scroll_locked().await?, "scrolling should be restored");

        // Closed lightbox ignores arrows.
        ctx.probe.press("ArrowRight").await?;
        ensure!(
            ctx.probe.image_src(LIGHTBOX_IMAGE).await? == first,
            "arrows must be inert while closed"
        );
        Ok(())
    }
}

impl CombinedScenario for LightboxKeysScenario {
    fn logic_check(&self) -> Option<LogicCheck> {
        None
    }

    fn runs_in_browser(&self) -> bool {
        true
    }
}

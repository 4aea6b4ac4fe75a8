use anyhow::{Context, Result};
use chrono::Utc;
use serde_json::Value;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use thirtyfour::prelude::*;

use crate::browser::PageProbe;

/// `<base>/<browser>/<scenario>/<UTC timestamp>`
pub fn artifacts_dir(base: &str, browser: &str, scenario: &str) -> PathBuf {
    let ts = Utc::now().format("%Y%m%dT%H%M%S");
    Path::new(base).join(browser).join(scenario).join(ts.to_string())
}

/// One persisted list slot as the page left it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotDump {
    pub key: String,
    pub raw: Option<String>,
}

impl SlotDump {
    /// `cart: 2 item(s)`, `cart: empty`, or `cart: unreadable`.
    fn describe(&self) -> String {
        let state = match self.raw.as_deref().map(serde_json::from_str::<Vec<Value>>) {
            None => "empty".to_string(),
            Some(Ok(items)) if items.is_empty() => "empty".to_string(),
            Some(Ok(items)) => format!("{} item(s)", items.len()),
            Some(Err(_)) => "unreadable".to_string(),
        };
        format!("{}: {state}", self.key)
    }

    /// Pretty JSON when the slot parses, the raw text otherwise.
    fn contents(&self) -> Option<String> {
        let raw = self.raw.as_deref()?;
        Some(
            serde_json::from_str::<Value>(raw)
                .and_then(|v| serde_json::to_string_pretty(&v))
                .unwrap_or_else(|_| raw.to_string()),
        )
    }
}

/// Everything saved when a browser scenario fails.
#[derive(Debug, Default)]
pub struct FailureArtifacts {
    pub screenshot: Option<Vec<u8>>,
    pub page_html: Option<String>,
    pub slots: Vec<SlotDump>,
    pub scroll_locked: Option<bool>,
    pub error_chain: String,
}

impl FailureArtifacts {
    /// Gather what the page can still tell us. Each piece is best effort.
    pub async fn collect(driver: &WebDriver, slot_keys: &[&str], err: &anyhow::Error) -> Self {
        let probe = PageProbe::new(driver);
        let mut slots = Vec::with_capacity(slot_keys.len());
        for key in slot_keys {
            slots.push(SlotDump {
                key: (*key).to_string(),
                raw: probe.slot(key).await.ok().flatten(),
            });
        }
        Self {
            screenshot: driver.screenshot_as_png().await.ok(),
            page_html: driver.source().await.ok(),
            slots,
            scroll_locked: probe.scroll_locked().await.ok(),
            error_chain: format!("{err:#}"),
        }
    }

    pub fn summary(&self) -> String {
        let mut out = format!("error: {}\n", self.error_chain);
        let lock = match self.scroll_locked {
            Some(true) => "yes",
            Some(false) => "no",
            None => "unknown",
        };
        let _ = writeln!(out, "scroll locked: {lock}");
        for slot in &self.slots {
            let _ = writeln!(out, "{}", slot.describe());
        }
        out
    }

    /// Write the bundle under `dir` and return the files created.
    pub fn write_to(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating artifacts dir {}", dir.display()))?;
        let mut written = Vec::new();
        let mut put = |name: &str, bytes: &[u8]| -> Result<()> {
            let path = dir.join(name);
            fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
            written.push(path);
            Ok(())
        };

        if let Some(png) = &self.screenshot {
            put("screenshot.png", png)?;
        }
        if let Some(html) = &self.page_html {
            put("page.html", html.as_bytes())?;
        }
        for slot in &self.slots {
            if let Some(contents) = slot.contents() {
                put(&format!("{}.json", slot.key), contents.as_bytes())?;
            }
        }
        put("summary.txt", self.summary().as_bytes())?;
        Ok(written)
    }
}

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(key: &str, raw: Option<&str>) -> SlotDump {
        SlotDump {
            key: key.to_string(),
            raw: raw.map(str::to_string),
        }
    }

    #[test]
    fn split_csv_trims_and_filters() {
        let parts = split_csv(" cart-roundtrip, ,gallery-wrap,  focus-trap ");
        assert_eq!(parts, vec!["cart-roundtrip", "gallery-wrap", "focus-trap"]);
    }

    #[test]
    fn artifacts_dir_nests_browser_and_scenario() {
        let dir = artifacts_dir("target/out", "chrome", "add-to-cart");
        assert!(dir.starts_with("target/out/chrome/add-to-cart"));
        assert_eq!(dir.components().count(), 5);
    }

    #[test]
    fn summary_counts_slot_entries() {
        let artifacts = FailureArtifacts {
            slots: vec![
                slot("cart", Some(r#"[{"name":"Blue Mug","price":"12.00"},{"name":"Teapot","price":"30.50"}]"#)),
                slot("wishlist", None),
                slot("legacy", Some("{not json")),
            ],
            scroll_locked: Some(true),
            error_chain: "toast missing".to_string(),
            ..FailureArtifacts::default()
        };
        let summary = artifacts.summary();
        assert!(summary.starts_with("error: toast missing\n"));
        assert!(summary.contains("scroll locked: yes"));
        assert!(summary.contains("cart: 2 item(s)"));
        assert!(summary.contains("wishlist: empty"));
        assert!(summary.contains("legacy: unreadable"));
    }

    #[test]
    fn write_to_saves_one_file_per_present_slot() {
        let base = std::env::temp_dir().join(format!(
            "storefront-artifacts-{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ));
        let artifacts = FailureArtifacts {
            screenshot: Some(vec![1, 2, 3]),
            page_html: Some("<html />".to_string()),
            slots: vec![
                slot("cart", Some(r#"[{"name":"Blue Mug","price":"12.00"}]"#)),
                slot("wishlist", None),
            ],
            scroll_locked: None,
            error_chain: "boom".to_string(),
        };
        let written = artifacts.write_to(&base).expect("write artifacts");

        let names: Vec<_> = written
            .iter()
            .filter_map(|p| p.file_name()?.to_str().map(str::to_string))
            .collect();
        assert_eq!(names, vec!["screenshot.png", "page.html", "cart.json", "summary.txt"]);
        let cart = fs::read_to_string(base.join("cart.json")).unwrap();
        assert!(cart.contains("\n"), "slot contents are pretty-printed");
        assert!(cart.contains("\"Blue Mug\""));
        let summary = fs::read_to_string(base.join("summary.txt")).unwrap();
        assert!(summary.contains("scroll locked: unknown"));
    }
}

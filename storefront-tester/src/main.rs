mod browser;
mod common;
mod logic;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};
use std::time::Instant;
use storefront_core::StorefrontConfig;

use browser::{BrowserConfig, BrowserKind, PageProbe, new_session};
use common::scenario::{ScenarioCtx, get_scenario, list_scenarios, scenario_names};
use common::{FailureArtifacts, artifacts_dir, split_csv};
use logic::{LogicTester, ScenarioResult};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TestMode {
    /// Storefront logic checks (fast, no browser)
    Logic,
    /// Browser automation against a served page
    Browser,
    /// Run both logic and browser tests
    Both,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum HeadlessMode {
    /// Run browsers in headless mode
    Headless,
    /// Run browsers with visible windows
    Windowed,
}

impl HeadlessMode {
    const fn is_headless(self) -> bool {
        matches!(self, Self::Headless)
    }
}

#[derive(Debug, Parser)]
#[command(name = "storefront-tester", version)]
#[command(about = "Automated QA for the storefront - logic checks and browser automation")]
struct Args {
    /// Test mode: logic (fast), browser (live page), or both
    #[arg(long, value_enum, default_value_t = TestMode::Logic)]
    mode: TestMode,

    /// Scenarios to run (comma-separated, or `all`)
    #[arg(long, default_value = "all")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "console"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    // Browser-specific options
    /// Browsers to run (chrome,edge,firefox,safari) - browser mode only
    #[arg(long, default_value = "chrome")]
    browsers: String,

    /// URL of a page carrying the storefront markup and module
    #[arg(long, default_value = "http://localhost:8080/")]
    base_url: String,

    /// Artifacts directory for screenshots and page dumps
    #[arg(long, default_value = "target/test-artifacts")]
    artifacts_dir: String,

    /// Connect to a Selenium Grid/Appium hub instead of local drivers
    #[arg(long)]
    hub: Option<String>,

    /// Run headless where supported
    #[arg(long, value_enum, default_value_t = HeadlessMode::Headless)]
    headless: HeadlessMode,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.list_scenarios {
        let mut out = open_output(args.output.as_deref())?;
        print_scenarios(&mut *out)?;
        out.flush()?;
        return Ok(());
    }

    announce_banner();

    let start_time = Instant::now();
    let scenarios = expand_scenarios(&args.scenarios);
    log::debug!("running scenarios: {scenarios:?}");

    let mut all_results = run_logic_scenarios(&args, &scenarios);
    all_results.extend(run_browser_scenarios(&args, &scenarios).await);

    write_reports(&args, &all_results, start_time)?;

    if all_results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

/// Report destination: the `--output` file, or stdout.
fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(stdout())),
    })
}

/// Scenario catalogue, grouped by where each one runs.
fn print_scenarios(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Available scenarios:")?;
    let (browser, logic): (Vec<_>, Vec<_>) = list_scenarios()
        .iter()
        .partition(|(name, _)| get_scenario(name).is_some_and(|s| s.runs_in_browser()));
    for (heading, group) in [("logic checks", logic), ("browser scenarios (--mode browser)", browser)] {
        writeln!(out, "  {heading}:")?;
        for (name, description) in group {
            writeln!(out, "    {name:18} {description}")?;
        }
    }
    Ok(())
}

fn announce_banner() {
    println!("{}", "🛒 Storefront Automated Tester".bright_cyan().bold());
    println!("{}", "==============================".cyan());
}

fn expand_scenarios(scenarios_arg: &str) -> Vec<String> {
    let mut scenarios = split_csv(scenarios_arg);
    if scenarios.iter().any(|s| s == "all") {
        scenarios.retain(|s| s != "all");
        for name in scenario_names() {
            if !scenarios.contains(&name) {
                scenarios.push(name);
            }
        }
    }
    scenarios
}

fn build_browser_config(args: &Args) -> BrowserConfig {
    BrowserConfig {
        headless: args.headless.is_headless(),
        implicit_wait_secs: 3,
        remote_hub: args.hub.clone(),
    }
}

fn run_logic_scenarios(args: &Args, scenarios: &[String]) -> Vec<ScenarioResult> {
    let mut results = Vec::new();
    if !matches!(args.mode, TestMode::Logic | TestMode::Both) {
        return results;
    }

    println!("{}", "🧠 Running Logic Tests".bright_yellow().bold());
    println!("{}", "-".repeat(30).yellow());

    let tester = LogicTester::new(args.verbose);
    for name in scenarios {
        match get_scenario(name) {
            Some(scenario) => {
                if let Some(check) = scenario.logic_check() {
                    results.push(tester.run_check(name, check));
                } else if args.verbose {
                    println!("   {} has no logic check", name.dimmed());
                }
            }
            None => eprintln!("⚠️  Unknown scenario: {}", name.yellow()),
        }
    }
    results
}

async fn run_browser_scenarios(args: &Args, scenarios: &[String]) -> Vec<ScenarioResult> {
    let mut results = Vec::new();
    if !matches!(args.mode, TestMode::Browser | TestMode::Both) {
        return results;
    }

    println!("{}", "🌐 Running Browser Tests".bright_blue().bold());
    println!("{}", "-".repeat(30).blue());

    for browser_name in split_csv(&args.browsers) {
        let Some(kind) = BrowserKind::parse(&browser_name) else {
            eprintln!("⚠️  Unknown browser: {}", browser_name.yellow());
            continue;
        };

        let driver = match new_session(kind, &build_browser_config(args)).await {
            Ok(d) => d,
            Err(e) => {
                eprintln!("❌ Could not start {kind:?}: {e}");
                continue;
            }
        };

        results.extend(run_browser_scenarios_for_driver(args, scenarios, kind, &driver).await);
        let _ = driver.quit().await;
    }
    results
}

async fn run_browser_scenarios_for_driver(
    args: &Args,
    scenarios: &[String],
    kind: BrowserKind,
    driver: &thirtyfour::WebDriver,
) -> Vec<ScenarioResult> {
    let label = kind.label();
    let mut results = Vec::new();
    for name in scenarios {
        let Some(scenario) = get_scenario(name) else {
            continue;
        };
        if !scenario.runs_in_browser() {
            continue;
        }
        let ctx = ScenarioCtx {
            base_url: args.base_url.clone(),
            probe: PageProbe::new(driver),
            verbose: args.verbose,
        };

        let scenario_start = Instant::now();
        let outcome = scenario.run_browser(driver, &ctx).await;
        let duration = scenario_start.elapsed();
        match &outcome {
            Ok(()) => println!("✅ [{}] {} - {:?}", label.green(), name, duration),
            Err(e) => {
                eprintln!("❌ [{}] {} - {:?}: {:#}", label.red(), name, duration, e);
                let dir = artifacts_dir(&args.artifacts_dir, &label, name);
                let defaults = StorefrontConfig::default();
                let slots = [defaults.cart_key.as_str(), defaults.wishlist_key.as_str()];
                let artifacts = FailureArtifacts::collect(driver, &slots, e).await;
                match artifacts.write_to(&dir) {
                    Ok(files) => println!("   📁 {} file(s) in {}", files.len(), dir.display()),
                    Err(capture) => log::warn!("could not save artifacts: {capture:#}"),
                }
            }
        }
        results.push(ScenarioResult::from_outcome(
            format!("{name} [{label}]"),
            outcome,
            duration,
        ));
    }
    results
}

fn write_reports(args: &Args, results: &[ScenarioResult], start_time: Instant) -> Result<()> {
    let mut out = open_output(args.output.as_deref())?;

    if args.report.as_str() == "json" {
        logic::reports::generate_json_report(&mut *out, results)?;
    } else {
        if results.is_empty() {
            writeln!(out, "No scenarios executed.")?;
        } else {
            logic::reports::generate_console_report(&mut *out, results, start_time.elapsed())?;
        }
        writeln!(out)?;
        writeln!(out, "🏁 Total time: {:?}", start_time.elapsed())?;
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args {
            mode: TestMode::Logic,
            scenarios: "all".to_string(),
            list_scenarios: false,
            report: "json".to_string(),
            verbose: false,
            output: None,
            browsers: "chrome".to_string(),
            base_url: "http://localhost:8080/".to_string(),
            artifacts_dir: "target/test-artifacts".to_string(),
            hub: None,
            headless: HeadlessMode::Headless,
        }
    }

    fn temp(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!("storefront-tester-{label}-{}", std::process::id()))
    }

    #[test]
    fn expands_all_without_duplicates() {
        let expanded = expand_scenarios("gallery-wrap,all");
        assert_eq!(expanded[0], "gallery-wrap");
        assert_eq!(
            expanded.iter().filter(|s| *s == "gallery-wrap").count(),
            1
        );
        assert!(expanded.contains(&"lightbox-keys".to_string()));
    }

    #[test]
    fn expand_scenarios_without_all_preserves_order() {
        let expanded = expand_scenarios("focus-trap,cart-roundtrip");
        assert_eq!(expanded, vec!["focus-trap", "cart-roundtrip"]);
    }

    #[test]
    fn logic_mode_runs_every_logic_check_and_passes() {
        let args = base_args();
        let results = run_logic_scenarios(&args, &expand_scenarios("all"));
        assert_eq!(results.len(), 8);
        assert!(results.iter().all(|r| r.passed), "{results:?}");
    }

    #[test]
    fn run_logic_scenarios_skips_when_not_enabled() {
        let args = Args {
            mode: TestMode::Browser,
            ..base_args()
        };
        assert!(run_logic_scenarios(&args, &["cart-roundtrip".to_string()]).is_empty());
    }

    #[test]
    fn unknown_browser_is_skipped() {
        let args = Args {
            mode: TestMode::Browser,
            browsers: "netscape".to_string(),
            ..base_args()
        };
        let results = futures::executor::block_on(run_browser_scenarios(
            &args,
            &["add-to-cart".to_string()],
        ));
        assert!(results.is_empty());
    }

    #[test]
    fn write_reports_emits_json_array() {
        let path = temp("report.json");
        let args = Args {
            output: Some(path.clone()),
            ..base_args()
        };
        let result = ScenarioResult::from_outcome("focus-trap", Ok(()), std::time::Duration::ZERO);
        write_reports(&args, &[result], Instant::now()).unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.trim_start().starts_with('['));
        assert!(content.contains("focus-trap"));
    }

    #[test]
    fn write_reports_console_without_results() {
        let path = temp("report.txt");
        let args = Args {
            report: "console".to_string(),
            output: Some(path.clone()),
            ..base_args()
        };
        write_reports(&args, &[], Instant::now()).unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("No scenarios executed."));
    }

    #[test]
    fn scenario_list_groups_by_runner() {
        let mut out = Vec::new();
        print_scenarios(&mut out).unwrap();
        let content = String::from_utf8(out).unwrap();
        let browser_heading = content.find("browser scenarios").unwrap();
        let handoff = content.find("handoff-message").unwrap();
        let lightbox = content.find("lightbox-keys").unwrap();
        assert!(content.starts_with("Available scenarios:"));
        assert!(handoff < browser_heading);
        assert!(lightbox > browser_heading);
    }

    #[test]
    fn build_browser_config_respects_headless_and_hub() {
        let args = Args {
            headless: HeadlessMode::Windowed,
            hub: Some("http://grid.example".to_string()),
            ..base_args()
        };
        let cfg = build_browser_config(&args);
        assert!(!cfg.headless);
        assert_eq!(cfg.remote_hub.as_deref(), Some("http://grid.example"));
    }
}

use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "storefront-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_list_scenarios_writes_output() {
    let exe = env!("CARGO_BIN_EXE_storefront-tester");
    let output_path = temp_path("list");
    let status = Command::new(exe)
        .args(["--list-scenarios", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Available scenarios"));
    assert!(content.contains("cart-roundtrip"));
    assert!(content.contains("lightbox-keys"));
}

#[test]
fn cli_logic_run_reports_json() {
    let exe = env!("CARGO_BIN_EXE_storefront-tester");
    let output_path = temp_path("logic");
    let output = Command::new(exe)
        .args([
            "--mode",
            "logic",
            "--scenarios",
            "cart-roundtrip,form-submit",
            "--report",
            "json",
            "--output",
        ])
        .arg(&output_path)
        .output()
        .expect("run cli");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let content = std::fs::read_to_string(output_path).expect("read output");
    let results: serde_json::Value = serde_json::from_str(&content).expect("json report");
    let names: Vec<&str> = results
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|r| r["scenario_name"].as_str())
        .collect();
    assert_eq!(names, vec!["cart-roundtrip", "form-submit"]);
    assert!(results.as_array().unwrap().iter().all(|r| r["passed"] == true));
}

#[test]
fn cli_runs_with_unknown_browser() {
    let exe = env!("CARGO_BIN_EXE_storefront-tester");
    let output = Command::new(exe)
        .args([
            "--mode",
            "browser",
            "--browsers",
            "unknown",
            "--scenarios",
            "add-to-cart",
        ])
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown browser"));
}

use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::common::scenario::LogicCheck;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub passed: bool,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub duration: Duration,
}

impl ScenarioResult {
    #[must_use]
    pub fn from_outcome(name: impl Into<String>, outcome: anyhow::Result<()>, duration: Duration) -> Self {
        let failures = match outcome {
            Ok(()) => Vec::new(),
            Err(err) => vec![format!("{err:#}")],
        };
        Self {
            scenario_name: name.into(),
            passed: failures.is_empty(),
            failures,
            duration,
        }
    }
}

pub struct LogicTester {
    verbose: bool,
}

impl LogicTester {
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn run_check(&self, name: &str, check: LogicCheck) -> ScenarioResult {
        if self.verbose {
            println!("🧪 Testing scenario: {}", name.bright_white());
        }
        let started = Instant::now();
        let outcome = check();
        let result = ScenarioResult::from_outcome(name, outcome, started.elapsed());
        if self.verbose && !result.passed {
            for failure in &result.failures {
                println!("   {}", failure.red());
            }
        }
        result
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(u64::try_from(duration.as_micros()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Duration::from_micros(u64::deserialize(deserializer)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failing_check_records_its_message() {
        let tester = LogicTester::new(false);
        let result = tester.run_check("broken", || anyhow::bail!("cart slot empty"));
        assert!(!result.passed);
        assert_eq!(result.failures, vec!["cart slot empty".to_string()]);
    }

    #[test]
    fn duration_serializes_as_micros() {
        let result = ScenarioResult::from_outcome("ok", Ok(()), Duration::from_millis(2));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["duration"], 2000);
        let back: ScenarioResult = serde_json::from_value(json).unwrap();
        assert_eq!(back.duration, Duration::from_millis(2));
    }
}

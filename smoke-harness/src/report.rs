//! Run reporting
//!
//! Human-readable lines for the terminal and a JSON document for tooling.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::coverage::Hits;
use crate::runner::ScenarioResult;

/// Aggregate result of one harness run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub passed: usize,
    pub failed: usize,
    pub total: usize,
    pub results: Vec<ScenarioResult>,
}

impl RunReport {
    pub fn new(started_at: DateTime<Utc>, results: Vec<ScenarioResult>) -> Self {
        let passed = results.iter().filter(|r| r.passed()).count();
        Self {
            started_at,
            passed,
            failed: results.len() - passed,
            total: results.len(),
            results,
        }
    }

    pub fn success(&self) -> bool {
        self.failed == 0
    }

    /// Process exit status: 0 when every scenario passed, 1 otherwise
    pub fn exit_code(&self) -> i32 {
        if self.success() {
            0
        } else {
            1
        }
    }

    pub fn failures(&self) -> impl Iterator<Item = &ScenarioResult> {
        self.results.iter().filter(|r| !r.passed())
    }

    /// Probe hits summed over every scenario
    pub fn hits(&self) -> Hits {
        let mut hits = Hits::new();
        for result in &self.results {
            hits.merge(&result.hits);
        }
        hits
    }

    /// One line per scenario, failures repeated together, then the summary
    pub fn render(&self) -> String {
        let mut out = String::new();

        for result in &self.results {
            match result.failure() {
                None => {
                    let _ = writeln!(out, "PASS: {}", result.label());
                }
                Some(failure) => {
                    let _ = writeln!(out, "FAIL: {}", result.label());
                    let _ = writeln!(out, "    - {}", failure);
                }
            }
        }

        if !self.success() {
            let _ = writeln!(out, "\nFailures:");
            for result in self.failures() {
                let _ = writeln!(out, "  {} ({})", result.label(), result.file);
            }
        }

        let _ = writeln!(
            out,
            "\nScenarios: {} passed, {} failed, {} total",
            self.passed, self.failed, self.total
        );
        out
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write run report at {}", path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::Probe;
    use crate::failure::AssertionMismatch;
    use crate::runner::Outcome;
    use tempfile::TempDir;

    const P: Probe = Probe::new("p", "src/p.rs", 1);

    fn result(index: usize, name: &str, outcome: Outcome) -> ScenarioResult {
        let mut hits = Hits::new();
        hits.record(&P);
        ScenarioResult {
            index,
            project: "server".to_string(),
            name: name.to_string(),
            file: "src/suites/server_smoke.rs".to_string(),
            outcome,
            duration_ms: 0,
            hits,
        }
    }

    fn failed() -> Outcome {
        Outcome::Failed {
            failure: AssertionMismatch::not_equal(5, 6),
        }
    }

    #[test]
    fn test_all_passed() {
        let report = RunReport::new(
            Utc::now(),
            vec![result(0, "smoke > a", Outcome::Passed), result(1, "smoke > b", Outcome::Passed)],
        );
        assert!(report.success());
        assert_eq!(report.exit_code(), 0);
        assert_eq!(report.hits().count(&P), 2);

        let text = report.render();
        assert!(text.contains("PASS: [server] smoke > a"));
        assert!(!text.contains("Failures:"));
        assert!(text.contains("Scenarios: 2 passed, 0 failed, 2 total"));
    }

    #[test]
    fn test_one_failure() {
        let report = RunReport::new(
            Utc::now(),
            vec![result(0, "smoke > a", Outcome::Passed), result(1, "smoke > b", failed())],
        );
        assert_eq!(report.exit_code(), 1);

        let failures: Vec<_> = report.failures().map(|r| r.name.as_str()).collect();
        assert_eq!(failures, vec!["smoke > b"]);

        let text = report.render();
        assert!(text.contains("FAIL: [server] smoke > b"));
        assert!(text.contains("    - Values are not equal - Expected: 5, Actual: 6"));
        assert!(text.contains("Scenarios: 1 passed, 1 failed, 2 total"));
    }

    #[test]
    fn test_write_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("reports").join("run.json");
        let report = RunReport::new(Utc::now(), vec![result(0, "smoke > b", failed())]);

        report.write_json(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["failed"], 1);
        assert_eq!(value["results"][0]["status"], "failed");
        assert!(value["started_at"].is_string());
    }
}

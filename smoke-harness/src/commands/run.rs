//! Run command implementation
//!
//! Discovers scenarios for the selected projects, executes them, and
//! produces the run report plus any coverage output.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info;

use crate::config::HarnessConfig;
use crate::coverage::{self, CoverageOutput, CoverageReport, CoverageScope};
use crate::report::RunReport;
use crate::runner;
use crate::scenario::{discover, DiscoveryOptions, Environment, Suite};
use crate::subject;

/// Options for the run command, layered over the config file
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Only run this project
    pub project: Option<String>,
    /// Case-insensitive substring of scenario names
    pub filter: Option<String>,
    /// Force every project onto this environment
    pub environment: Option<Environment>,
    /// Replace every project's include globs
    pub include: Vec<String>,
    /// Collect coverage even if the config leaves it off
    pub coverage: bool,
    /// Scenarios in flight at once; 1 runs sequentially
    pub jobs: usize,
    /// Write a JSON run report here
    pub json: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            project: None,
            filter: None,
            environment: None,
            include: vec![],
            coverage: false,
            jobs: 1,
            json: None,
        }
    }
}

/// Everything a run produced
#[derive(Debug)]
pub struct RunOutcome {
    pub report: RunReport,
    /// Present when coverage was collected
    pub coverage: Option<CoverageOutput>,
}

/// Run the command with the given config
pub fn run(suite: &Suite, config: &HarnessConfig, options: &RunOptions) -> Result<RunOutcome> {
    let mut config = config.clone();
    config.apply_overrides(options.environment, &options.include);

    let projects = config.select_projects(options.project.as_deref())?;
    let plan = discover(
        suite,
        &projects,
        &DiscoveryOptions {
            filter: options.filter.clone(),
        },
    )?;
    info!(scenarios = plan.len(), jobs = options.jobs, "running scenarios");

    let started_at = Utc::now();
    let results = if options.jobs > 1 {
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(runner::run_concurrent(plan, options.jobs))?
    } else {
        runner::run_sequential(&plan)
    };
    let report = RunReport::new(started_at, results);

    let coverage = if options.coverage || config.coverage.enabled {
        let scope = CoverageScope::from_config(&config.coverage)?;
        let coverage_report = CoverageReport::collect(subject::probes(), &report.hits(), &scope);
        Some(coverage::emit(
            &coverage_report,
            &config.coverage.reporters,
            &config.coverage.reports_directory,
        )?)
    } else {
        None
    };

    if let Some(ref path) = options.json {
        report
            .write_json(path)
            .with_context(|| format!("Failed to write JSON report: {}", path.display()))?;
    }

    Ok(RunOutcome { report, coverage })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::failure::AssertionMismatch;
    use crate::scenario::{Context as ScenarioContext, Scenario};
    use crate::suites;
    use tempfile::TempDir;

    fn fails(_ctx: &mut ScenarioContext) -> std::result::Result<(), AssertionMismatch> {
        crate::expect::expect(2 + 2).to_be(5)
    }

    #[test]
    fn test_builtin_suite_passes() {
        let outcome = run(&suites::builtin(), &HarnessConfig::default(), &RunOptions::default()).unwrap();
        assert!(outcome.report.success());
        assert_eq!(outcome.report.total, 5);
        assert_eq!(outcome.report.exit_code(), 0);
        assert!(outcome.coverage.is_none());
    }

    #[test]
    fn test_one_failing_scenario_is_reported_alone() {
        let mut suite = suites::builtin();
        suite.push(Scenario::new("smoke", "fails on purpose", file!(), fails));
        let options = RunOptions {
            include: vec!["**/suites/*.rs".to_string(), "**/commands/run.rs".to_string()],
            environment: Some(crate::scenario::Environment::Dom),
            project: Some("client".to_string()),
            ..RunOptions::default()
        };

        let outcome = run(&suite, &HarnessConfig::default(), &options).unwrap();
        assert_eq!(outcome.report.exit_code(), 1);
        let failed: Vec<_> = outcome.report.failures().map(|r| r.name.clone()).collect();
        assert_eq!(failed, vec!["smoke > fails on purpose"]);
    }

    #[test]
    fn test_node_environment_fails_only_rendering() {
        let options = RunOptions {
            environment: Some(crate::scenario::Environment::Node),
            ..RunOptions::default()
        };

        let outcome = run(&suites::builtin(), &HarnessConfig::default(), &options).unwrap();
        let failed: Vec<_> = outcome.report.failures().map(|r| r.name.clone()).collect();
        assert_eq!(failed, vec!["client smoke > renders a simple component"]);
    }

    #[test]
    fn test_unknown_project() {
        let options = RunOptions {
            project: Some("mobile".to_string()),
            ..RunOptions::default()
        };
        let err = run(&suites::builtin(), &HarnessConfig::default(), &options).unwrap_err();
        assert!(err.to_string().contains("mobile"));
    }

    #[test]
    fn test_coverage_and_json() {
        let temp = TempDir::new().unwrap();
        let mut config = HarnessConfig::default();
        config.coverage.reports_directory = temp.path().join("coverage");
        let options = RunOptions {
            coverage: true,
            jobs: 2,
            json: Some(temp.path().join("run.json")),
            ..RunOptions::default()
        };

        let outcome = run(&suites::builtin(), &config, &options).unwrap();
        let coverage = outcome.coverage.unwrap();
        assert!(coverage.text.unwrap().contains("Functions: 2/2 (100.00%)"));
        assert_eq!(coverage.written, vec![temp.path().join("coverage").join("lcov.info")]);
        assert!(temp.path().join("run.json").exists());
    }
}

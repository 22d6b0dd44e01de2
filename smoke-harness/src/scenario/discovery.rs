//! Scenario discovery

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::debug;

use super::types::{Environment, Scenario, Suite};
use crate::config::ProjectConfig;
use crate::error::{HarnessError, Result};

/// A scenario selected to run, bound to the project that selected it
#[derive(Debug, Clone)]
pub struct PlannedScenario {
    /// Position in the plan; results are reported in this order
    pub index: usize,
    pub project: String,
    pub environment: Environment,
    pub scenario: Scenario,
}

impl PlannedScenario {
    /// "[project] group > description"
    pub fn label(&self) -> String {
        format!("[{}] {}", self.project, self.scenario.full_name())
    }
}

/// Narrowing applied after glob matching
#[derive(Debug, Clone, Default)]
pub struct DiscoveryOptions {
    /// Case-insensitive substring of the scenario's full name
    pub filter: Option<String>,
}

/// Compile path globs. `*` does not cross `/`; `**` does.
pub fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| HarnessError::InvalidGlob {
                pattern: pattern.clone(),
                reason: e.kind().to_string(),
            })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| HarnessError::InvalidGlob {
        pattern: patterns.join(", "),
        reason: e.to_string(),
    })
}

/// Plan every scenario selected by `projects`, in project order then suite
/// order. A scenario selected by two projects runs once per project.
pub fn discover(
    suite: &Suite,
    projects: &[&ProjectConfig],
    options: &DiscoveryOptions,
) -> Result<Vec<PlannedScenario>> {
    let filter = options.filter.as_ref().map(|f| f.to_lowercase());
    let mut plan = Vec::new();

    for project in projects {
        let include = build_globset(&project.include)?;
        let exclude = build_globset(&project.exclude)?;

        for scenario in suite.scenarios() {
            let file = normalize_path(scenario.file);
            if !include.is_match(&file) || exclude.is_match(&file) {
                continue;
            }
            if let Some(ref filter) = filter {
                if !scenario.full_name().to_lowercase().contains(filter) {
                    continue;
                }
            }

            debug!(
                project = %project.name,
                scenario = %scenario.full_name(),
                "discovered scenario"
            );
            plan.push(PlannedScenario {
                index: plan.len(),
                project: project.name.clone(),
                environment: project.environment,
                scenario: scenario.clone(),
            });
        }
    }

    if plan.is_empty() {
        return Err(HarnessError::NoScenarios);
    }

    Ok(plan)
}

/// Source path with `/` separators, as globs expect
pub fn normalize_path(file: &str) -> String {
    file.replace('\\', "/")
}

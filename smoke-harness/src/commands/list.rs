//! List command implementation

use anyhow::Result;

use crate::config::HarnessConfig;
use crate::scenario::{discover, DiscoveryOptions, Suite};

/// Describe every scenario the run command would execute
pub fn list(suite: &Suite, config: &HarnessConfig, project: Option<&str>) -> Result<Vec<String>> {
    let projects = config.select_projects(project)?;
    let plan = discover(suite, &projects, &DiscoveryOptions::default())?;

    Ok(plan
        .iter()
        .map(|p| format!("{} ({}, {})", p.label(), p.environment, p.scenario.file))
        .collect())
}

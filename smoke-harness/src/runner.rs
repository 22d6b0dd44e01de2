//! Scenario execution
//!
//! Each planned scenario runs with its own [`Context`]. A returned mismatch
//! or a panic ends that scenario only; the rest of the plan still runs.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::debug;

use crate::coverage::Hits;
use crate::failure::AssertionMismatch;
use crate::scenario::{Context, PlannedScenario};

/// How a scenario ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    Passed,
    Failed { failure: AssertionMismatch },
}

/// Result of running one planned scenario
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    #[serde(skip)]
    pub index: usize,
    pub project: String,
    pub name: String,
    pub file: String,
    #[serde(flatten)]
    pub outcome: Outcome,
    pub duration_ms: u64,
    #[serde(skip)]
    pub hits: Hits,
}

impl ScenarioResult {
    pub fn passed(&self) -> bool {
        matches!(self.outcome, Outcome::Passed)
    }

    pub fn failure(&self) -> Option<&AssertionMismatch> {
        match self.outcome {
            Outcome::Passed => None,
            Outcome::Failed { ref failure } => Some(failure),
        }
    }

    /// "[project] group > description"
    pub fn label(&self) -> String {
        format!("[{}] {}", self.project, self.name)
    }
}

/// Run a single scenario to completion
pub fn run_scenario(planned: &PlannedScenario) -> ScenarioResult {
    let started = Instant::now();
    let mut ctx = Context::new(planned.environment);
    let action = planned.scenario.action;

    let outcome = match panic::catch_unwind(AssertUnwindSafe(|| action(&mut ctx))) {
        Ok(Ok(())) => Outcome::Passed,
        Ok(Err(failure)) => Outcome::Failed { failure },
        Err(payload) => Outcome::Failed {
            failure: AssertionMismatch::panicked(panic_message(payload.as_ref())),
        },
    };

    debug!(scenario = %planned.label(), ?outcome, "scenario finished");

    ScenarioResult {
        index: planned.index,
        project: planned.project.clone(),
        name: planned.scenario.full_name(),
        file: planned.scenario.file.to_string(),
        outcome,
        duration_ms: started.elapsed().as_millis() as u64,
        hits: ctx.into_hits(),
    }
}

/// Run the plan one scenario at a time
pub fn run_sequential(plan: &[PlannedScenario]) -> Vec<ScenarioResult> {
    plan.iter().map(run_scenario).collect()
}

/// Run the plan on tokio's blocking pool with at most `jobs` scenarios in
/// flight. Results come back in plan order.
pub async fn run_concurrent(plan: Vec<PlannedScenario>, jobs: usize) -> Result<Vec<ScenarioResult>> {
    let semaphore = Arc::new(Semaphore::new(jobs.max(1)));
    let mut set = JoinSet::new();

    for planned in plan {
        let permit = Arc::clone(&semaphore).acquire_owned().await?;
        set.spawn_blocking(move || {
            let _permit = permit;
            run_scenario(&planned)
        });
    }

    let mut results = Vec::new();
    while let Some(joined) = set.join_next().await {
        results.push(joined?);
    }
    results.sort_by_key(|r| r.index);

    Ok(results)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

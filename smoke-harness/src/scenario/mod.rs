//! Scenario types and discovery
//!
//! This module turns a [`Suite`] plus project configuration into the ordered
//! plan of scenarios the runner executes.

mod context;
mod discovery;
mod types;

pub use context::Context;
pub use discovery::{build_globset, discover, normalize_path, DiscoveryOptions, PlannedScenario};
pub use types::{Environment, Scenario, ScenarioFn, Suite};

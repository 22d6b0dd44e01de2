//! Scenario types

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Context;
use crate::failure::AssertionMismatch;

/// Scenario body. Returning `Err` fails the scenario.
pub type ScenarioFn = fn(&mut Context) -> Result<(), AssertionMismatch>;

/// Where a scenario runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// No display; rendering fails
    #[default]
    Node,
    /// Simulated display
    Dom,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Node => write!(f, "node"),
            Environment::Dom => write!(f, "dom"),
        }
    }
}

/// One independent verification case
#[derive(Clone)]
pub struct Scenario {
    /// Group the scenario belongs to (e.g. "smoke")
    pub group: &'static str,
    /// What the scenario checks
    pub description: &'static str,
    /// Source file declaring the scenario, matched by include globs
    pub file: &'static str,
    pub action: ScenarioFn,
}

impl Scenario {
    pub fn new(
        group: &'static str,
        description: &'static str,
        file: &'static str,
        action: ScenarioFn,
    ) -> Self {
        Self {
            group,
            description,
            file,
            action,
        }
    }

    /// "group > description"
    pub fn full_name(&self) -> String {
        format!("{} > {}", self.group, self.description)
    }
}

impl fmt::Debug for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scenario")
            .field("group", &self.group)
            .field("description", &self.description)
            .field("file", &self.file)
            .finish_non_exhaustive()
    }
}

/// Ordered collection of scenarios
#[derive(Debug, Clone, Default)]
pub struct Suite {
    scenarios: Vec<Scenario>,
}

impl Suite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, scenarios: impl IntoIterator<Item = Scenario>) -> Self {
        self.scenarios.extend(scenarios);
        self
    }

    pub fn push(&mut self, scenario: Scenario) {
        self.scenarios.push(scenario);
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_ctx: &mut Context) -> Result<(), AssertionMismatch> {
        Ok(())
    }

    #[test]
    fn test_full_name() {
        let scenario = Scenario::new("smoke", "does a thing", "src/a.rs", noop);
        assert_eq!(scenario.full_name(), "smoke > does a thing");
    }

    #[test]
    fn test_suite_keeps_order() {
        let suite = Suite::new()
            .with([Scenario::new("g", "first", "a.rs", noop)])
            .with([Scenario::new("g", "second", "b.rs", noop)]);
        let names: Vec<_> = suite.scenarios().iter().map(|s| s.description).collect();
        assert_eq!(names, vec!["first", "second"]);
        assert_eq!(suite.len(), 2);
    }

    #[test]
    fn test_environment_serde() {
        #[derive(Deserialize)]
        struct Wrapper {
            environment: Environment,
        }

        let w: Wrapper = toml::from_str(r#"environment = "dom""#).unwrap();
        assert_eq!(w.environment, Environment::Dom);
        assert!(toml::from_str::<Wrapper>(r#"environment = "jsdom""#).is_err());
        assert_eq!(Environment::default().to_string(), "node");
    }
}

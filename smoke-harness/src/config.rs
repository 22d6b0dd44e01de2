//! Configuration file support for smoke-harness

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::coverage::Reporter;
use crate::error::HarnessError;
use crate::scenario::Environment;

/// Default config file name, looked up in the current directory
pub const CONFIG_FILE_NAME: &str = "smoke.toml";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    #[serde(rename = "project")]
    pub projects: Vec<ProjectConfig>,
    pub coverage: CoverageConfig,
}

/// A named environment plus the scenario files it runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    #[serde(default)]
    pub environment: Environment,
    /// Globs over scenario source files
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Coverage collection and reporting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverageConfig {
    pub enabled: bool,
    pub reporters: Vec<Reporter>,
    /// Where file reporters (lcov) write
    pub reports_directory: PathBuf,
    /// Globs over subject source files counted toward coverage
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            projects: vec![
                ProjectConfig {
                    name: "server".to_string(),
                    environment: Environment::Node,
                    include: vec!["**/suites/server_*.rs".to_string()],
                    exclude: vec![],
                },
                ProjectConfig {
                    name: "client".to_string(),
                    environment: Environment::Dom,
                    include: vec!["**/suites/client_*.rs".to_string()],
                    exclude: vec![],
                },
            ],
            coverage: CoverageConfig::default(),
        }
    }
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            reporters: vec![Reporter::Text, Reporter::Lcov],
            reports_directory: PathBuf::from("coverage"),
            include: vec!["**/src/subject/**/*.rs".to_string()],
            exclude: vec!["**/suites/**".to_string()],
        }
    }
}

impl HarnessConfig {
    /// Default config path in the current directory
    pub fn default_path() -> anyhow::Result<PathBuf> {
        Ok(std::env::current_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from file, falling back to defaults if not found
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config = Self::from_toml(&contents).map_err(|e| HarnessError::ConfigParse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Projects to run: the named one, or all of them
    pub fn select_projects(&self, name: Option<&str>) -> Result<Vec<&ProjectConfig>, HarnessError> {
        match name {
            None => Ok(self.projects.iter().collect()),
            Some(name) => self
                .projects
                .iter()
                .find(|p| p.name == name)
                .map(|p| vec![p])
                .ok_or_else(|| HarnessError::ProjectNotFound(name.to_string())),
        }
    }

    /// Override environment and include globs on every project
    pub fn apply_overrides(&mut self, environment: Option<Environment>, include: &[String]) {
        for project in &mut self.projects {
            if let Some(environment) = environment {
                project.environment = environment;
            }
            if !include.is_empty() {
                project.include = include.to_vec();
            }
        }
    }
}

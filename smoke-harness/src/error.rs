use thiserror::Error;

/// Errors raised by the harness itself, as opposed to failing scenarios.
#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Invalid glob pattern '{pattern}': {reason}")]
    InvalidGlob { pattern: String, reason: String },

    #[error("Project '{0}' not found in configuration")]
    ProjectNotFound(String),

    #[error("No scenarios matched the configured include patterns")]
    NoScenarios,

    #[error("Failed to parse config at {path}: {reason}")]
    ConfigParse { path: String, reason: String },

    #[error("Config file already exists at {0}. Use --force to overwrite.")]
    ConfigExists(String),
}

pub type Result<T> = std::result::Result<T, HarnessError>;

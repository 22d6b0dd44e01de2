//! smoke-harness library
//!
//! Scenario runner for example verification smoke tests.

pub mod commands;
pub mod config;
pub mod coverage;
pub mod dom;
pub mod error;
pub mod expect;
pub mod failure;
pub mod report;
pub mod runner;
pub mod scenario;
pub mod subject;
pub mod suites;

pub use config::HarnessConfig;
pub use error::HarnessError;
pub use failure::AssertionMismatch;
pub use report::RunReport;
pub use scenario::{Context, Environment, Scenario, Suite};

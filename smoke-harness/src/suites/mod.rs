//! Built-in smoke scenarios
//!
//! Scenario files are matched by path, so the file names here line up with
//! the default project globs: `server_*.rs` runs headless, `client_*.rs`
//! runs on the simulated display.

pub mod client_smoke;
pub mod server_smoke;

use crate::scenario::Suite;

/// Every built-in scenario
pub fn builtin() -> Suite {
    Suite::new()
        .with(server_smoke::scenarios())
        .with(client_smoke::scenarios())
}

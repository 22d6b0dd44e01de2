//! Init command implementation
//!
//! Writes a config file holding the defaults so they can be edited.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::HarnessConfig;
use crate::error::HarnessError;

const HEADER: &str = "\
# smoke-harness configuration
#
# Each [[project]] runs the scenarios whose source files match `include`
# (and not `exclude`) in its environment: \"node\" has no display, \"dom\"
# renders onto a simulated screen.
";

/// Write the default config to `output`
pub fn init(output: &Path, force: bool) -> Result<()> {
    if output.exists() && !force {
        return Err(HarnessError::ConfigExists(output.display().to_string()).into());
    }

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create directory: {}", parent.display())
            })?;
        }
    }

    let body = HarnessConfig::default().to_toml()?;
    fs::write(output, format!("{}\n{}", HEADER, body))
        .with_context(|| format!("Failed to write config at {}", output.display()))?;

    Ok(())
}

//! Assertion failures reported by scenarios
//!
//! A scenario either completes or stops at its first mismatch between an
//! observed and an expected value. There is no other failure kind at the
//! scenario level; harness problems (bad config, bad globs) are
//! [`crate::error::HarnessError`].

use std::fmt;

use serde::Serialize;

/// Observed value differed from the expected value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssertionMismatch {
    /// Short description of what was checked
    pub message: String,
    /// Expected value, rendered for display
    pub expected: String,
    /// Observed value, rendered for display
    pub actual: String,
}

impl AssertionMismatch {
    /// Create a new mismatch
    pub fn new(
        message: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    // Convenience constructors for common mismatches

    /// Values compared with `to_be` were not equal
    pub fn not_equal(expected: impl fmt::Debug, actual: impl fmt::Debug) -> Self {
        Self::new(
            "Values are not equal",
            format!("{:?}", expected),
            format!("{:?}", actual),
        )
    }

    /// A rendering call ran without a display environment
    pub fn no_display(environment: impl fmt::Display) -> Self {
        Self::new("Cannot render without a display", "dom", environment.to_string())
    }

    /// The scenario queried the screen before rendering anything
    pub fn nothing_rendered() -> Self {
        Self::new("Screen is empty", "a rendered component", "nothing rendered")
    }

    /// The scenario action panicked instead of returning
    pub fn panicked(payload: impl Into<String>) -> Self {
        Self::new(
            "Scenario panicked",
            "scenario completes",
            format!("panicked: {}", payload.into()),
        )
    }
}

impl fmt::Display for AssertionMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - Expected: {}, Actual: {}",
            self.message, self.expected, self.actual
        )
    }
}

impl std::error::Error for AssertionMismatch {}

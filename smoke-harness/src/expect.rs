//! Assertion API used by scenarios
//!
//! ```
//! use smoke_harness::expect::expect;
//!
//! # fn check() -> Result<(), smoke_harness::AssertionMismatch> {
//! expect(2 + 3).to_be(5)?;
//! expect("Olá, Mundo").to_contain("Mundo")?;
//! # Ok(())
//! # }
//! # check().unwrap();
//! ```

use std::fmt::Debug;

use regex::Regex;

use crate::dom::Element;
use crate::failure::AssertionMismatch;

/// Result of a single check
pub type Check = Result<(), AssertionMismatch>;

/// Wrap an observed value for checking
pub fn expect<T>(actual: T) -> Expectation<T> {
    Expectation { actual }
}

pub struct Expectation<T> {
    actual: T,
}

impl<T: PartialEq + Debug> Expectation<T> {
    pub fn to_be(self, expected: T) -> Check {
        if self.actual == expected {
            Ok(())
        } else {
            Err(AssertionMismatch::not_equal(expected, self.actual))
        }
    }
}

impl Expectation<bool> {
    pub fn to_be_true(self) -> Check {
        if self.actual {
            Ok(())
        } else {
            Err(AssertionMismatch::not_equal(true, false))
        }
    }
}

impl<S: AsRef<str>> Expectation<S> {
    pub fn to_contain(self, needle: &str) -> Check {
        let actual = self.actual.as_ref();
        if actual.contains(needle) {
            Ok(())
        } else {
            Err(AssertionMismatch::new(
                "String does not contain substring",
                format!("{:?}", needle),
                format!("{:?}", actual),
            ))
        }
    }

    pub fn to_start_with(self, prefix: &str) -> Check {
        let actual = self.actual.as_ref();
        if actual.starts_with(prefix) {
            Ok(())
        } else {
            Err(AssertionMismatch::new(
                "String does not start with prefix",
                format!("{:?}", prefix),
                format!("{:?}", actual),
            ))
        }
    }

    pub fn to_match(self, pattern: &Regex) -> Check {
        let actual = self.actual.as_ref();
        if pattern.is_match(actual) {
            Ok(())
        } else {
            Err(AssertionMismatch::new(
                "String does not match pattern",
                format!("/{}/", pattern.as_str()),
                format!("{:?}", actual),
            ))
        }
    }
}

impl Expectation<Option<&Element>> {
    pub fn to_be_in_document(self) -> Check {
        match self.actual {
            Some(_) => Ok(()),
            None => Err(AssertionMismatch::new(
                "Element is not in the document",
                "an element",
                "none",
            )),
        }
    }
}

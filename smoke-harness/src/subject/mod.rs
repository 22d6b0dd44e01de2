//! Operations under verification
//!
//! Two single-shot, side-effect free operations: a greeting rendered as a
//! button, and integer addition.

mod arith;
mod greeting;

pub use arith::{add, ADD};
pub use greeting::{render_greeting, Hello, GREETING_PREFIX, HELLO};

use crate::coverage::Probe;

/// Every coverage probe declared by this module
pub fn probes() -> &'static [Probe] {
    &[HELLO, ADD]
}

//! Simulated display
//!
//! A scenario running in the `dom` environment renders components into a
//! [`Screen`] and looks elements up by role and accessible name, the way a
//! user would find them.

use std::fmt;

use regex::Regex;

use crate::coverage::Probe;
use crate::failure::AssertionMismatch;

/// ARIA-like role of an element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Button,
    Heading,
    Text,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Button => write!(f, "button"),
            Role::Heading => write!(f, "heading"),
            Role::Text => write!(f, "text"),
        }
    }
}

/// A single rendered element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub role: Role,
    pub text: String,
}

impl Element {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }

    pub fn button(text: impl Into<String>) -> Self {
        Self::new(Role::Button, text)
    }

    /// Accessible name, which is the text content for every supported role
    pub fn accessible_name(&self) -> &str {
        &self.text
    }
}

/// Something that can be rendered onto a [`Screen`]
pub trait Component {
    fn render(&self) -> Element;

    /// Coverage probe hit each time the component renders
    fn probe(&self) -> &'static Probe;
}

/// Elements rendered during one scenario
#[derive(Debug, Clone, Default)]
pub struct Screen {
    elements: Vec<Element>,
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn query_all_by_role(&self, role: Role, name: &Regex) -> Vec<&Element> {
        self.elements
            .iter()
            .filter(|e| e.role == role && name.is_match(e.accessible_name()))
            .collect()
    }

    /// First element with `role` whose name matches, if any
    pub fn query_by_role(&self, role: Role, name: &Regex) -> Option<&Element> {
        self.query_all_by_role(role, name).into_iter().next()
    }

    /// The single element with `role` whose name matches.
    ///
    /// No match or more than one match is a mismatch.
    pub fn get_by_role(&self, role: Role, name: &Regex) -> Result<&Element, AssertionMismatch> {
        let matches = self.query_all_by_role(role, name);
        match matches.as_slice() {
            [element] => Ok(*element),
            [] => Err(AssertionMismatch::new(
                format!("Unable to find a {} named /{}/", role, name.as_str()),
                "1 element",
                self.describe_role(role),
            )),
            many => Err(AssertionMismatch::new(
                format!("Found multiple {} elements named /{}/", role, name.as_str()),
                "1 element",
                format!("{} elements", many.len()),
            )),
        }
    }

    pub fn text_content(&self) -> String {
        self.elements
            .iter()
            .map(|e| e.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn describe_role(&self, role: Role) -> String {
        let names: Vec<String> = self
            .elements
            .iter()
            .filter(|e| e.role == role)
            .map(|e| format!("{:?}", e.accessible_name()))
            .collect();
        if names.is_empty() {
            format!("no {} elements", role)
        } else {
            format!("{} elements named {}", role, names.join(", "))
        }
    }
}

/// Compile a name pattern, reporting a bad pattern as a mismatch so it fails
/// only the scenario that wrote it.
pub fn name_pattern(pattern: &str) -> Result<Regex, AssertionMismatch> {
    Regex::new(pattern).map_err(|e| {
        AssertionMismatch::new("Invalid name pattern", "a valid regex", e.to_string())
    })
}

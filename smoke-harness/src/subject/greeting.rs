use crate::coverage::Probe;
use crate::dom::{Component, Element};

/// Text shown before the name
pub const GREETING_PREFIX: &str = "Olá, ";

pub const HELLO: Probe = Probe::new("Hello::render", file!(), line!() + 15);

/// A button greeting `name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hello {
    pub name: String,
}

impl Hello {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Component for Hello {
    fn render(&self) -> Element {
        Element::button(format!("{}{}", GREETING_PREFIX, self.name))
    }

    fn probe(&self) -> &'static Probe {
        &HELLO
    }
}

/// Render [`Hello`] and return the text it displays
pub fn render_greeting(name: &str) -> String {
    Hello::new(name).render().text
}

use crate::coverage::{Hits, Probe};
use crate::dom::{Component, Screen};
use crate::failure::AssertionMismatch;

use super::Environment;

/// Per-scenario state: the environment, what was rendered, probe hits.
#[derive(Debug)]
pub struct Context {
    environment: Environment,
    screen: Option<Screen>,
    hits: Hits,
}

impl Context {
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            screen: None,
            hits: Hits::new(),
        }
    }

    /// Render `component` onto the screen. Requires the `dom` environment.
    pub fn render(&mut self, component: &dyn Component) -> Result<&Screen, AssertionMismatch> {
        if self.environment != Environment::Dom {
            return Err(AssertionMismatch::no_display(self.environment));
        }

        self.hits.record(component.probe());
        let element = component.render();
        let screen = self.screen.get_or_insert_with(Screen::new);
        screen.mount(element);
        Ok(screen)
    }

    pub fn screen(&self) -> Result<&Screen, AssertionMismatch> {
        self.screen
            .as_ref()
            .ok_or_else(AssertionMismatch::nothing_rendered)
    }

    /// Run `f`, counting a hit on `probe`
    pub fn call<T>(&mut self, probe: &Probe, f: impl FnOnce() -> T) -> T {
        self.hits.record(probe);
        f()
    }

    pub fn hits(&self) -> &Hits {
        &self.hits
    }

    pub fn into_hits(self) -> Hits {
        self.hits
    }
}

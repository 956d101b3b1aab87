//! Scenario world: carries the browser session the hooks acquire.

use cucumber::World;
use supportgowhere_e2e::ScenarioSession;

#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct CalculatorWorld {
    /// Set by the before-hook, taken back by the after-hook.
    pub session: Option<ScenarioSession>,
}

impl CalculatorWorld {
    fn new() -> Self {
        Self { session: None }
    }

    /// The live session; steps only run after the before-hook set it.
    pub fn session(&self) -> &ScenarioSession {
        self.session
            .as_ref()
            .expect("browser session not initialised")
    }
}

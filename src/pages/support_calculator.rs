//! Calculator landing screen (between the home page and the form).

use crate::error::HarnessError;
use crate::interact::Interactor;
use crate::locators::support_calculator;
use crate::session::ScenarioSession;

pub struct SupportCalculatorPage<'a> {
    session: &'a ScenarioSession,
}

impl<'a> SupportCalculatorPage<'a> {
    pub fn new(session: &'a ScenarioSession) -> Self {
        Self { session }
    }

    fn ua(&self) -> Interactor<'_> {
        self.session.interactor()
    }

    /// Start the calculator flow.
    pub async fn click_start(&self) -> Result<(), HarnessError> {
        self.session.log.step("Clicking Start on the calculator page...");
        self.ua()
            .click_with_delay(&support_calculator::start_button())
            .await
    }
}

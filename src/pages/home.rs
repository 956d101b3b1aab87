//! Landing page of the application.

use crate::error::HarnessError;
use crate::interact::Interactor;
use crate::locators::home;
use crate::session::ScenarioSession;

pub struct HomePage<'a> {
    session: &'a ScenarioSession,
}

impl<'a> HomePage<'a> {
    pub fn new(session: &'a ScenarioSession) -> Self {
        Self { session }
    }

    fn ua(&self) -> Interactor<'_> {
        self.session.interactor()
    }

    /// Navigate the scenario page to `url`.
    pub async fn navigate(&self, url: &str) -> Result<(), HarnessError> {
        self.session.log.step(&format!("Navigating to {url}"));
        self.session.page.goto(url).await?;
        Ok(())
    }

    /// Open the support calculator from the landing page.
    pub async fn click_calculator(&self) -> Result<(), HarnessError> {
        self.ua().click_with_delay(&home::calculator_button()).await
    }
}

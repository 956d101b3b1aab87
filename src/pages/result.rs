//! Calculated-result screen: payout tabs and amounts.

use std::time::Duration;

use crate::error::HarnessError;
use crate::interact::Interactor;
use crate::locators::result;
use crate::session::ScenarioSession;

/// Year suffix of a supported package name.
///
/// Only "Assurance Package <year>" packages are recognised; anything else
/// resolves to `None` without touching the DOM.
pub(crate) fn assurance_year(package: &str) -> Option<&str> {
    if !package.contains("Assurance Package") {
        return None;
    }
    package
        .rsplit(' ')
        .next()
        .filter(|year| year.len() == 4 && year.chars().all(|c| c.is_ascii_digit()))
}

pub struct CalculatedResultPage<'a> {
    session: &'a ScenarioSession,
}

impl<'a> CalculatedResultPage<'a> {
    pub fn new(session: &'a ScenarioSession) -> Self {
        Self { session }
    }

    fn ua(&self) -> Interactor<'_> {
        self.session.interactor()
    }

    /// Select the payout tab for `year`.
    pub async fn click_year_tab(&self, year: &str) -> Result<(), HarnessError> {
        let tab = result::year_tab(year);
        self.ua().wait_for_visible(&tab).await?;
        self.ua().click_with_delay(&tab).await
    }

    /// Payout amount shown for `package`, or `None` when the package is
    /// not a recognised Assurance Package or shows no amount.
    pub async fn amount_for_package(
        &self,
        package: &str,
    ) -> Result<Option<String>, HarnessError> {
        let Some(year) = assurance_year(package) else {
            self.session
                .log
                .warning(&format!("Unsupported package name '{package}'"));
            return Ok(None);
        };

        self.session
            .log
            .step(&format!("Reading payout for {package}"));
        self.click_year_tab(year).await?;
        self.ua()
            .get_text_content(
                &result::assurance_package_amount(year),
                Duration::from_secs(5),
            )
            .await
    }

    /// Full text of the result container, if rendered.
    pub async fn result_text(&self) -> Result<Option<String>, HarnessError> {
        self.ua()
            .get_text_content(&result::result_container(), Duration::from_secs(5))
            .await
    }
}

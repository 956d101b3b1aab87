//! Calculated-result screen locators.

use crate::selector::{xpath_literal, Selector};

/// Scrollable container holding the result cards.
pub fn result_container() -> Selector {
    Selector::css("div[data-testid='scroll-content']")
}

/// Tab selecting the payout year.
pub fn year_tab(year: &str) -> Selector {
    Selector::xpath(format!(
        "//div[@data-testid='scroll-content']//span[text()={}]",
        xpath_literal(year)
    ))
}

/// Assurance Package payout amount for a year.
pub fn assurance_package_amount(year: &str) -> Selector {
    Selector::xpath(format!(
        "//*[text()={}]/../../*[contains(@id,'You-payout')]",
        xpath_literal(&format!("Payout in December {year}"))
    ))
}

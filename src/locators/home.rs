//! Landing-page locators.

use crate::selector::Selector;

/// Entry link to the support calculator.
pub fn calculator_button() -> Selector {
    Selector::xpath("//a[contains(@href,'support-calculator')]")
}

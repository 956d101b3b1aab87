//! Support-calculator form locators.
//!
//! The form is a react-select heavy page; dropdowns are addressed by their
//! container ids and options by visible text.

use crate::selector::{xpath_literal, Selector};

pub fn year_of_birth_dropdown() -> Selector {
    Selector::css("div[id*='personalInfo.yearOfBirth-container']")
}

pub fn assessable_income_dropdown() -> Selector {
    Selector::css("div[id*='personalInfo.assessableIncome']")
}

pub fn housing_type_dropdown() -> Selector {
    Selector::css("div[id*='property.typeOfPropertyOfResidence-container']")
}

pub fn property_ownership_dropdown() -> Selector {
    Selector::css("div[id*='property.ownsPropertyOfResidence-container']")
}

/// Radio label for the "more than one property" question.
pub fn owns_more_than_one_property(answer_yes: bool) -> Selector {
    let value = if answer_yes { "Yes" } else { "No" };
    Selector::xpath(format!(
        "//*[@name='property.ownsMoreThanOneProperty' and @value = '{value}']/ancestor::label"
    ))
}

pub fn medisave_balance_label() -> Selector {
    Selector::xpath(
        "//fieldset[@id='personalInfo.medisaveBalance']//label[contains(@class,'Label')]",
    )
}

/// Dropdown option matched by its visible text.
pub fn dropdown_option(value: &str) -> Selector {
    Selector::xpath(format!(
        "//*[contains(@class,'react-select') and normalize-space()={}]",
        xpath_literal(value)
    ))
}

pub fn show_benefits_button() -> Selector {
    Selector::xpath("//button[normalize-space()='Show estimated benefits']")
}

fn required_error(container: &str) -> Selector {
    Selector::xpath(format!(
        "//*[@{container}]/ancestor::fieldset//*[text()='This is a required field.']"
    ))
}

pub fn year_of_birth_error() -> Selector {
    required_error("id='personalInfo.yearOfBirth-container'")
}

pub fn assessable_income_error() -> Selector {
    required_error("id='personalInfo.assessableIncome-container'")
}

pub fn housing_type_error() -> Selector {
    required_error("id='property.typeOfPropertyOfResidence-container'")
}

pub fn property_ownership_error() -> Selector {
    required_error("id='property.ownsPropertyOfResidence-container'")
}

pub fn multiple_property_error() -> Selector {
    required_error("name='property.ownsMoreThanOneProperty'")
}

//! Steps for the calculator happy path and required-field validation.

use cucumber::gherkin::Step;
use cucumber::{given, then, when};
use supportgowhere_e2e::{
    CalculatedResultPage, FormData, HomePage, SupportCalculatorFormPage, SupportCalculatorPage,
};

use crate::world::CalculatorWorld;

#[given(expr = "I navigate to {string}")]
async fn navigate(world: &mut CalculatorWorld, url: String) {
    HomePage::new(world.session())
        .navigate(&url)
        .await
        .expect("navigate to application");
}

#[when("I click on the calculator button on the home page")]
async fn click_calculator(world: &mut CalculatorWorld) {
    HomePage::new(world.session())
        .click_calculator()
        .await
        .expect("open the support calculator");
}

#[when("I click on the start button on the support calculator page")]
async fn click_start(world: &mut CalculatorWorld) {
    SupportCalculatorPage::new(world.session())
        .click_start()
        .await
        .expect("start the calculator flow");
}

#[when("I fill in the form with the following data:")]
async fn fill_form(world: &mut CalculatorWorld, step: &Step) {
    let table = step.table.as_ref().expect("form data table");
    let data = FormData::from_rows(
        table
            .rows
            .iter()
            .skip(1)
            .map(|row| (row[0].clone(), row[1].clone())),
    );
    SupportCalculatorFormPage::new(world.session())
        .fill_form(&data)
        .await
        .expect("fill the calculator form");
}

#[when("I click Show estimated benefits")]
async fn click_show_benefits(world: &mut CalculatorWorld) {
    SupportCalculatorFormPage::new(world.session())
        .click_show_benefits()
        .await
        .expect("submit the form");
}

#[when("I click Show estimated benefits without filling any fields")]
async fn click_show_benefits_empty(world: &mut CalculatorWorld) {
    SupportCalculatorFormPage::new(world.session())
        .click_show_benefits()
        .await
        .expect("submit the empty form");
}

#[then("the calculated results should be displayed")]
async fn verify_results_displayed(world: &mut CalculatorWorld) {
    let text = CalculatedResultPage::new(world.session())
        .result_text()
        .await
        .expect("read the results container");
    assert!(
        text.is_some(),
        "results container should be visible with content"
    );
}

#[then(expr = "I should see a result for {string} that includes {string}")]
async fn verify_package_amount(world: &mut CalculatorWorld, package: String, expected: String) {
    let page = CalculatedResultPage::new(world.session());
    let amount = page
        .amount_for_package(&package)
        .await
        .expect("read payout amount")
        .unwrap_or_else(|| panic!("no payout amount shown for '{package}'"));
    assert!(
        amount.contains(&expected),
        "payout '{amount}' for '{package}' should include '{expected}'"
    );
}

#[then("I should see required field error messages under all fields")]
async fn verify_required_errors(world: &mut CalculatorWorld) {
    let errors = SupportCalculatorFormPage::new(world.session())
        .required_field_errors()
        .await
        .expect("probe required-field errors");
    assert!(errors.year_of_birth, "year of birth error should be shown");
    assert!(
        errors.assessable_income,
        "assessable income error should be shown"
    );
    assert!(errors.housing_type, "housing type error should be shown");
    assert!(
        errors.property_ownership,
        "property ownership error should be shown"
    );
    assert!(
        errors.multiple_property,
        "multiple property error should be shown"
    );
}

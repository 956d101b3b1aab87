//! Steps for the field-progression feature (shared Background page).

use cucumber::gherkin::Step;
use cucumber::{then, when};
use supportgowhere_e2e::pages::FormField;
use supportgowhere_e2e::{FormData, SupportCalculatorFormPage};

use crate::world::CalculatorWorld;

#[when(expr = "I fill in the form with birth year {string}")]
async fn fill_birth_year(world: &mut CalculatorWorld, birth_year: String) {
    let data = FormData::single(FormField::YearOfBirth.label(), birth_year);
    SupportCalculatorFormPage::new(world.session())
        .fill_form(&data)
        .await
        .expect("fill year of birth");
}

#[then("I should see the following fields with correct labels:")]
async fn verify_field_visibility(world: &mut CalculatorWorld, step: &Step) {
    let table = step.table.as_ref().expect("field visibility table");
    let page = SupportCalculatorFormPage::new(world.session());
    for row in table.rows.iter().skip(1) {
        let field = &row[0];
        let expected = row[1].trim() == "true";
        let actual = page
            .field_visibility(field)
            .await
            .expect("probe field visibility")
            .unwrap_or_else(|| panic!("unknown field '{field}'"));
        assert_eq!(
            actual, expected,
            "visibility of '{field}' should be {expected}"
        );
    }
}

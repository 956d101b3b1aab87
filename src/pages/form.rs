//! The support-calculator form: dropdowns, radios, validation errors.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::error::HarnessError;
use crate::interact::{Interactor, RetryPolicy};
use crate::locators::form;
use crate::selector::Selector;
use crate::session::ScenarioSession;

/// The form fields the suite knows how to fill, in fill order.
///
/// The application reveals later fields as earlier ones are answered, so
/// the order here is load-bearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    YearOfBirth,
    AssessableIncome,
    HousingType,
    PropertyOwnership,
    MultipleProperty,
}

impl FormField {
    /// All fillable fields, in the order the form reveals them.
    pub const ALL: [Self; 5] = [
        Self::YearOfBirth,
        Self::AssessableIncome,
        Self::HousingType,
        Self::PropertyOwnership,
        Self::MultipleProperty,
    ];

    /// The human-readable label used in scenario tables.
    pub fn label(self) -> &'static str {
        match self {
            Self::YearOfBirth => "Year of birth",
            Self::AssessableIncome => "Recent Assessable Income (AI)",
            Self::HousingType => "Housing type",
            Self::PropertyOwnership => "Property ownership",
            Self::MultipleProperty => "Do you own more than 1 property?",
        }
    }

    /// Reverse lookup from a scenario-table label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.label() == label)
    }
}

/// Field-label to value mapping built from tabular scenario input.
///
/// Immutable once built; fields absent from the map are simply skipped
/// during the fill, so partial forms are legal input.
#[derive(Debug, Default, Clone)]
pub struct FormData(BTreeMap<String, String>);

impl FormData {
    /// Build form data from `(field, value)` rows.
    pub fn from_rows<I, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        Self(
            rows.into_iter()
                .map(|(field, value)| (field.into(), value.into()))
                .collect(),
        )
    }

    /// Single-field form data.
    pub fn single(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::from_rows([(field.into(), value.into())])
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.0.get(label).map(String::as_str)
    }

    /// Labels present in the data that no known field matches.
    pub fn unknown_labels(&self) -> Vec<&str> {
        self.0
            .keys()
            .map(String::as_str)
            .filter(|label| FormField::from_label(label).is_none())
            .collect()
    }
}

/// Which fields a fill will touch, in order. Unset fields never appear,
/// so they trigger zero locator resolutions.
pub(crate) fn fill_plan(data: &FormData) -> Vec<FormField> {
    FormField::ALL
        .into_iter()
        .filter(|field| data.get(field.label()).is_some())
        .collect()
}

/// Visibility of the required-field error messages after an empty submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredFieldErrors {
    pub year_of_birth: bool,
    pub assessable_income: bool,
    pub housing_type: bool,
    pub property_ownership: bool,
    pub multiple_property: bool,
}

impl RequiredFieldErrors {
    pub fn all_visible(&self) -> bool {
        self.year_of_birth
            && self.assessable_income
            && self.housing_type
            && self.property_ownership
            && self.multiple_property
    }
}

pub struct SupportCalculatorFormPage<'a> {
    session: &'a ScenarioSession,
}

impl<'a> SupportCalculatorFormPage<'a> {
    pub fn new(session: &'a ScenarioSession) -> Self {
        Self { session }
    }

    fn ua(&self) -> Interactor<'_> {
        self.session.interactor()
    }

    /// Fill every field present in `data`, in form order, skipping the rest.
    ///
    /// The first failing field aborts the remaining sequence.
    pub async fn fill_form(&self, data: &FormData) -> Result<(), HarnessError> {
        let log = &self.session.log;
        log.step("Starting form fill...");
        for label in data.unknown_labels() {
            log.warning(&format!("Ignoring unknown form field '{label}'"));
        }

        for field in fill_plan(data) {
            let value = data
                .get(field.label())
                .unwrap_or_default()
                .to_owned();
            self.fill_field(field, &value).await?;
        }

        log.success("Form filled successfully");
        Ok(())
    }

    async fn fill_field(&self, field: FormField, value: &str) -> Result<(), HarnessError> {
        self.session
            .log
            .step(&format!("Filling {}...", field.label()));
        match field {
            FormField::YearOfBirth => {
                self.select_option(&form::year_of_birth_dropdown(), value, field)
                    .await
            }
            FormField::AssessableIncome => {
                self.select_option(&form::assessable_income_dropdown(), value, field)
                    .await?;
                // The housing question only renders once income is answered.
                self.guarded(field, value, self.ua().wait_for_visible(&form::housing_type_dropdown()))
                    .await
            }
            FormField::HousingType => {
                self.select_option(&form::housing_type_dropdown(), value, field)
                    .await
            }
            FormField::PropertyOwnership => {
                self.select_option(&form::property_ownership_dropdown(), value, field)
                    .await?;
                self.guarded(
                    field,
                    value,
                    self.ua()
                        .wait_for_visible(&form::owns_more_than_one_property(true)),
                )
                .await
            }
            FormField::MultipleProperty => self.select_multiple_property(value).await,
        }
    }

    /// Open a react-select dropdown and pick the option with `value` text.
    ///
    /// The option click waits on the option actually rendering rather than
    /// stalling a fixed interval after opening the dropdown.
    async fn select_option(
        &self,
        dropdown: &Selector,
        value: &str,
        field: FormField,
    ) -> Result<(), HarnessError> {
        let ua = self.ua();
        let log = &self.session.log;
        log.step(&format!("Selecting '{value}' for {}", field.label()));

        let result: Result<(), HarnessError> = async {
            ua.wait_for_visible(dropdown).await?;
            ua.click(dropdown).await?;
            let option = form::dropdown_option(value);
            ua.wait_for_visible(&option).await?;
            ua.click_with_delay(&option).await?;
            Ok(())
        }
        .await;

        match result {
            Ok(()) => {
                log.success(&format!("Selected '{value}' for {}", field.label()));
                Ok(())
            }
            Err(err) => Err(self.form_error(field, value, err)),
        }
    }

    /// Answer the yes/no multiple-property radio.
    async fn select_multiple_property(&self, value: &str) -> Result<(), HarnessError> {
        let answer_yes = value.eq_ignore_ascii_case("yes");
        let selector = form::owns_more_than_one_property(answer_yes);
        self.guarded(
            FormField::MultipleProperty,
            value,
            async {
                self.ua().wait_for_visible(&selector).await?;
                self.ua().click_with_delay(&selector).await
            },
        )
        .await?;
        self.session
            .log
            .success(&format!("Multiple property option selected: {value}"));
        Ok(())
    }

    /// Submit the form.
    pub async fn click_show_benefits(&self) -> Result<(), HarnessError> {
        let log = &self.session.log;
        log.step("Clicking Show estimated benefits...");
        let button = form::show_benefits_button();
        self.ua().wait_for_visible(&button).await?;
        self.ua().click_with_delay(&button).await?;
        log.success("Show estimated benefits clicked");
        Ok(())
    }

    /// Which required-field error messages are currently visible.
    ///
    /// Probes with a short single-attempt wait per field; a missing error
    /// message is an answer, not a failure.
    pub async fn required_field_errors(&self) -> Result<RequiredFieldErrors, HarnessError> {
        let probe = RetryPolicy::single(Duration::from_secs(3));
        Ok(RequiredFieldErrors {
            year_of_birth: self.error_visible(&form::year_of_birth_error(), probe).await?,
            assessable_income: self
                .error_visible(&form::assessable_income_error(), probe)
                .await?,
            housing_type: self.error_visible(&form::housing_type_error(), probe).await?,
            property_ownership: self
                .error_visible(&form::property_ownership_error(), probe)
                .await?,
            multiple_property: self
                .error_visible(&form::multiple_property_error(), probe)
                .await?,
        })
    }

    /// Current visibility of the field identified by a scenario-table
    /// label, or `None` when the label is unknown.
    pub async fn field_visibility(&self, label: &str) -> Result<Option<bool>, HarnessError> {
        let selector = match FormField::from_label(label) {
            Some(FormField::YearOfBirth) => form::year_of_birth_dropdown(),
            Some(FormField::AssessableIncome) => form::assessable_income_dropdown(),
            Some(FormField::HousingType) => form::housing_type_dropdown(),
            Some(FormField::PropertyOwnership) => form::property_ownership_dropdown(),
            Some(FormField::MultipleProperty) => form::owns_more_than_one_property(true),
            None if label == "Medisave balance" => form::medisave_balance_label(),
            None => {
                self.session
                    .log
                    .warning(&format!("Unknown field label '{label}'"));
                return Ok(None);
            }
        };
        Ok(Some(self.ua().is_visible(&selector).await?))
    }

    async fn error_visible(
        &self,
        selector: &Selector,
        probe: RetryPolicy,
    ) -> Result<bool, HarnessError> {
        match self.ua().wait_for_visible_with(selector, probe).await {
            Ok(()) => Ok(true),
            Err(HarnessError::VisibilityTimeout { .. }) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Run `op`, wrapping any failure with the field/value context.
    async fn guarded(
        &self,
        field: FormField,
        value: &str,
        op: impl std::future::Future<Output = Result<(), HarnessError>>,
    ) -> Result<(), HarnessError> {
        op.await.map_err(|err| self.form_error(field, value, err))
    }

    fn form_error(&self, field: FormField, value: &str, err: HarnessError) -> HarnessError {
        self.session.log.error(&format!(
            "Error in {}: {err}",
            field.label()
        ));
        let screenshot = err.screenshot().cloned();
        HarnessError::Form {
            field: field.label().to_owned(),
            value: value.to_owned(),
            reason: err.to_string(),
            screenshot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fill_plan_respects_form_order() {
        let data = FormData::from_rows([
            ("Property ownership", "No"),
            ("Year of birth", "1990"),
            ("Housing type", "HDB 4-Room"),
        ]);
        assert_eq!(
            fill_plan(&data),
            vec![
                FormField::YearOfBirth,
                FormField::HousingType,
                FormField::PropertyOwnership,
            ]
        );
    }

    #[test]
    fn unset_fields_are_not_planned() {
        let data = FormData::single("Year of birth", "1990");
        assert_eq!(fill_plan(&data), vec![FormField::YearOfBirth]);
        assert!(fill_plan(&FormData::default()).is_empty());
    }

    #[test]
    fn unknown_labels_are_reported_not_planned() {
        let data = FormData::from_rows([("Year of birth", "1990"), ("Shoe size", "42")]);
        assert_eq!(data.unknown_labels(), vec!["Shoe size"]);
        assert_eq!(fill_plan(&data), vec![FormField::YearOfBirth]);
    }

    #[test]
    fn labels_round_trip() {
        for field in FormField::ALL {
            assert_eq!(FormField::from_label(field.label()), Some(field));
        }
        assert_eq!(FormField::from_label("Favourite colour"), None);
    }

    #[test]
    fn required_errors_aggregate() {
        let all = RequiredFieldErrors {
            year_of_birth: true,
            assessable_income: true,
            housing_type: true,
            property_ownership: true,
            multiple_property: true,
        };
        assert!(all.all_visible());
        let partial = RequiredFieldErrors {
            multiple_property: false,
            ..all
        };
        assert!(!partial.all_visible());
    }
}

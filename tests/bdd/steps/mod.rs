//! Step bindings: pure glue between Gherkin phrases and page objects.

mod form_fields;
mod support_calculator;

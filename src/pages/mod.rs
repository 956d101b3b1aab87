//! Page objects: domain-level actions for each application screen.
//!
//! Page objects borrow a [`ScenarioSession`](crate::session::ScenarioSession)
//! and compose locators with the interaction wrapper; they never own
//! browser state and never reach for CDP directly.

mod form;
mod home;
mod result;
mod support_calculator;

pub use form::{FormData, FormField, RequiredFieldErrors, SupportCalculatorFormPage};
pub use home::HomePage;
pub use result::CalculatedResultPage;
pub use support_calculator::SupportCalculatorPage;

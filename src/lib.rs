//! E2E browser tests for the SupportGoWhere support calculator.
//!
//! Scenarios are authored in Gherkin (`tests/features/`) and executed by
//! the `cucumber` runner; the browser is driven over CDP via
//! `chromiumoxide`.
//!
//! # Architecture
//!
//! - **Session lifecycle**: [`session::SessionManager`] launches one
//!   browser per run (auto-downloading Chromium unless overridden) and
//!   hands each scenario its own page; features with a Background share
//!   one page sequentially.
//! - **Interaction wrapper**: [`interact::Interactor`] wraps every DOM
//!   interaction in a bounded-retry visibility wait with screenshot and
//!   log capture on failure.
//! - **Page objects**: [`pages`] expose domain actions (fill the form,
//!   submit, read payout amounts, check validation errors) over the
//!   locator tables in [`locators`].
//! - **Artifacts**: a tagged per-run log file, failure screenshots,
//!   cucumber JSON results, and a run-metadata block for the external
//!   HTML reporter.

pub mod config;
pub mod error;
pub mod interact;
pub mod locators;
pub mod logging;
pub mod pages;
pub mod report;
pub mod selector;
pub mod session;

pub use config::TestConfig;
pub use error::HarnessError;
pub use interact::{capture_screenshot, Interactor, RetryPolicy};
pub use logging::{init_tracing, RunLog};
pub use pages::{
    CalculatedResultPage, FormData, HomePage, SupportCalculatorFormPage, SupportCalculatorPage,
};
pub use report::RunMetadata;
pub use selector::Selector;
pub use session::{ScenarioSession, SessionManager, SessionScope};

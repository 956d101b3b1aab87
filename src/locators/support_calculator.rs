//! Calculator landing-screen locators.

use crate::selector::Selector;

/// The "Start" button that opens the calculator form.
pub fn start_button() -> Selector {
    Selector::xpath("//button[normalize-space()='Start']")
}

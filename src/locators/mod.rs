//! Static locator tables, one module per application screen.
//!
//! Each entry is a function returning the same [`Selector`](crate::selector::Selector)
//! on every call; dynamic entries interpolate their argument through a
//! quote-safe XPath literal.

pub mod form;
pub mod home;
pub mod result;
pub mod support_calculator;

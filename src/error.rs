//! Error types for the test harness

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the interaction wrapper and page objects.
///
/// Lookup and validation misses are not errors: those resolve to `None`
/// at the call site. Everything here is an infrastructure failure that
/// aborts the current step.
#[derive(Error, Debug)]
pub enum HarnessError {
    /// An element never became visible within the retry budget
    #[error("element not visible after {attempts} attempts: {selector}")]
    VisibilityTimeout {
        /// The selector that was polled
        selector: String,
        /// How many attempts were made before giving up
        attempts: u32,
        /// Screenshot captured when the budget was exhausted, if any
        screenshot: Option<PathBuf>,
    },

    /// A form field could not be filled with the requested value
    #[error("failed to fill '{field}' with '{value}': {reason}")]
    Form {
        /// Human-readable label of the offending field
        field: String,
        /// The value that was being selected
        value: String,
        /// What went wrong underneath
        reason: String,
        /// Screenshot captured at the point of failure, if any
        screenshot: Option<PathBuf>,
    },

    /// An element was located but a scripted interaction on it failed
    #[error("interaction failed on {selector}: {reason}")]
    Interaction {
        /// The selector the interaction targeted
        selector: String,
        /// What the page script reported
        reason: String,
    },

    /// The underlying CDP transport reported an error
    #[error("browser error: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),

    /// A JS evaluation result could not be decoded
    #[error("could not decode evaluation result: {0}")]
    Evaluation(#[from] serde_json::Error),

    /// Filesystem error while writing a log or screenshot artifact
    #[error("artifact i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl HarnessError {
    /// Path of the screenshot attached to this error, if one was taken.
    pub fn screenshot(&self) -> Option<&PathBuf> {
        match self {
            Self::VisibilityTimeout { screenshot, .. } | Self::Form { screenshot, .. } => {
                screenshot.as_ref()
            }
            _ => None,
        }
    }
}

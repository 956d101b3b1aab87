//! Interaction wrapper: makes raw CDP calls resilient to timing flakiness.
//!
//! Every element interaction is a JS evaluation against the scenario page,
//! bounded by a [`RetryPolicy`]. Failures capture a screenshot and a tagged
//! log line before propagating.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::{Page, ScreenshotParams};

use crate::config::TestConfig;
use crate::error::HarnessError;
use crate::logging::RunLog;
use crate::selector::Selector;

/// How often the visibility predicate is polled within one attempt.
const PROBE_INTERVAL: Duration = Duration::from_millis(100);

/// Bounded-retry policy for a visibility wait.
///
/// The overall `timeout` is split evenly across `retries` attempts, with
/// `retry_interval` slept between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub timeout: Duration,
    pub retries: u32,
    pub retry_interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            retries: 3,
            retry_interval: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// A single-attempt policy with the given overall timeout.
    pub fn single(timeout: Duration) -> Self {
        Self {
            timeout,
            retries: 1,
            retry_interval: Duration::ZERO,
        }
    }

    /// Budget for one attempt.
    pub fn attempt_timeout(&self) -> Duration {
        self.timeout / self.retries.max(1)
    }
}

/// Drive `check` through at most `policy.retries` attempts, sleeping
/// `policy.retry_interval` between attempts.
///
/// Returns the 1-based attempt that first succeeded, or `None` once every
/// attempt has failed. Errors from `check` abort the loop immediately.
async fn run_attempts<F, Fut>(policy: RetryPolicy, mut check: F) -> Result<Option<u32>, HarnessError>
where
    F: FnMut(u32) -> Fut,
    Fut: std::future::Future<Output = Result<bool, HarnessError>>,
{
    let attempts = policy.retries.max(1);
    for attempt in 1..=attempts {
        if check(attempt).await? {
            return Ok(Some(attempt));
        }
        if attempt < attempts {
            tokio::time::sleep(policy.retry_interval).await;
        }
    }
    Ok(None)
}

/// Trim and drop empty text; the normal form for every text read.
fn normalize_text(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_owned()).filter(|t| !t.is_empty())
}

/// Wrapper over one scenario page, carrying the run log and config.
///
/// Page objects compose these primitives; nothing above this layer talks
/// to CDP directly.
#[derive(Clone, Copy)]
pub struct Interactor<'a> {
    page: &'a Page,
    log: &'a RunLog,
    config: &'a TestConfig,
}

impl<'a> Interactor<'a> {
    pub fn new(page: &'a Page, log: &'a RunLog, config: &'a TestConfig) -> Self {
        Self { page, log, config }
    }

    pub fn log(&self) -> &RunLog {
        self.log
    }

    /// Wait for `selector` to become visible under the default policy.
    pub async fn wait_for_visible(&self, selector: &Selector) -> Result<(), HarnessError> {
        self.wait_for_visible_with(selector, self.config.retry).await
    }

    /// Wait for `selector` to become visible under an explicit policy.
    ///
    /// Makes at most `policy.retries` attempts, each bounded by
    /// `policy.attempt_timeout()`, sleeping `policy.retry_interval`
    /// between attempts. Exhaustion captures a screenshot and fails.
    pub async fn wait_for_visible_with(
        &self,
        selector: &Selector,
        policy: RetryPolicy,
    ) -> Result<(), HarnessError> {
        let attempts = policy.retries.max(1);
        let found = run_attempts(policy, |attempt| async move {
            if self.poll_visible(selector, policy.attempt_timeout()).await? {
                return Ok(true);
            }
            if attempt < attempts {
                self.log.warning(&format!(
                    "Element not visible: {selector}, retrying... ({attempt}/{attempts})"
                ));
            }
            Ok(false)
        })
        .await?;

        if let Some(attempt) = found {
            self.log.success(&format!(
                "Element found and visible: {selector} (attempt {attempt}/{attempts})"
            ));
            return Ok(());
        }

        self.log.error(&format!(
            "Element not visible after {attempts} attempts: {selector}"
        ));
        let screenshot = self.capture_evidence("error-visibility").await;
        Err(HarnessError::VisibilityTimeout {
            selector: selector.to_string(),
            attempts,
            screenshot,
        })
    }

    /// One bounded visibility poll; `Ok(false)` means the budget elapsed.
    async fn poll_visible(
        &self,
        selector: &Selector,
        budget: Duration,
    ) -> Result<bool, HarnessError> {
        let deadline = Instant::now() + budget;
        loop {
            if self.is_visible(selector).await? {
                return Ok(true);
            }
            if Instant::now() >= deadline {
                return Ok(false);
            }
            tokio::time::sleep(PROBE_INTERVAL).await;
        }
    }

    /// Single visibility probe: present in the DOM with a non-empty box.
    pub async fn is_visible(&self, selector: &Selector) -> Result<bool, HarnessError> {
        let expr = format!(
            "(() => {{ const el = {query}; if (!el) return false; \
             const rect = el.getBoundingClientRect(); \
             return rect.width > 0 && rect.height > 0 \
                 && window.getComputedStyle(el).visibility !== 'hidden'; }})()",
            query = selector.js_query()
        );
        let visible: bool = self.page.evaluate(expr.as_str()).await?.into_value()?;
        Ok(visible)
    }

    /// Wait for `selector`, scroll it into view, and click it.
    pub async fn click(&self, selector: &Selector) -> Result<(), HarnessError> {
        self.wait_for_visible(selector).await?;
        let expr = format!(
            "(() => {{ const el = {query}; if (!el) return false; \
             el.scrollIntoView({{ block: 'center' }}); el.click(); return true; }})()",
            query = selector.js_query()
        );
        let clicked: bool = self.page.evaluate(expr.as_str()).await?.into_value()?;
        if clicked {
            Ok(())
        } else {
            // Visible a moment ago, gone by the time we clicked.
            Err(HarnessError::Interaction {
                selector: selector.to_string(),
                reason: "element detached before click".into(),
            })
        }
    }

    /// Click, then stall for the configured settle delay.
    ///
    /// The delay is the one deliberately retained fixed wait; prefer a
    /// condition-based wait on whatever the click reveals where one exists.
    pub async fn click_with_delay(&self, selector: &Selector) -> Result<(), HarnessError> {
        self.click(selector).await?;
        let settle = self.config.settle_delay;
        self.log.info(&format!(
            "Clicked on {selector}, waiting {}ms...",
            settle.as_millis()
        ));
        tokio::time::sleep(settle).await;
        Ok(())
    }

    /// Trimmed text content of `selector`, waiting up to `timeout`.
    ///
    /// An element that never appears, or appears with empty text, is an
    /// absent result (`Ok(None)`), logged with evidence; only CDP/JS
    /// failures propagate.
    pub async fn get_text_content(
        &self,
        selector: &Selector,
        timeout: Duration,
    ) -> Result<Option<String>, HarnessError> {
        if !self.poll_visible(selector, timeout).await? {
            self.log
                .warning(&format!("No visible text element for {selector}"));
            self.capture_evidence("error-get-text").await;
            return Ok(None);
        }
        let expr = format!(
            "(() => {{ const el = {query}; return el ? el.textContent : null; }})()",
            query = selector.js_query()
        );
        let text: Option<String> = self.page.evaluate(expr.as_str()).await?.into_value()?;
        Ok(normalize_text(text))
    }

    /// Best-effort failure screenshot; never fails the caller.
    async fn capture_evidence(&self, label: &str) -> Option<PathBuf> {
        match capture_screenshot(self.page, &self.config.screenshot_dir, label).await {
            Ok(path) => {
                self.log.screenshot(&path, label);
                Some(path)
            }
            Err(err) => {
                self.log
                    .warning(&format!("Could not capture screenshot: {err}"));
                None
            }
        }
    }
}

/// Write a timestamped full-page PNG of `page` into `dir`.
pub async fn capture_screenshot(
    page: &Page,
    dir: &Path,
    label: &str,
) -> Result<PathBuf, HarnessError> {
    tokio::fs::create_dir_all(dir).await?;
    let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%S%3f");
    let path = dir.join(format!("{}-{stamp}.png", sanitize_label(label)));
    page.save_screenshot(
        ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .full_page(true)
            .build(),
        &path,
    )
    .await?;
    Ok(path)
}

/// Reduce a free-form label to a safe file-name stem.
fn sanitize_label(label: &str) -> String {
    let stem: String = label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    stem.trim_matches('-').to_owned()
}

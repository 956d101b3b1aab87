//! Environment-driven test configuration.
//!
//! Everything the suite reads from the process environment is resolved
//! once at startup into a [`TestConfig`], which then travels with the
//! session rather than being re-read from globals.

use std::path::PathBuf;
use std::time::Duration;

use crate::interact::RetryPolicy;

/// Name of the browser-override variable.
pub const BROWSER_VAR: &str = "BROWSER";
/// Name of the environment-label variable.
pub const TEST_ENV_VAR: &str = "TEST_ENV";
/// Name of the headless-toggle variable.
pub const HEADLESS_VAR: &str = "HEADLESS";
/// Name of the app-version metadata variable.
pub const APP_VERSION_VAR: &str = "APP_VERSION";
/// Name of the post-click settle-delay variable (milliseconds).
pub const SETTLE_MS_VAR: &str = "E2E_SETTLE_MS";

/// Resolved configuration for one test run.
#[derive(Debug, Clone)]
pub struct TestConfig {
    /// Path to a Chromium-family executable; `None` means the fetcher
    /// downloads a cached Chromium build.
    pub browser_path: Option<PathBuf>,
    /// Label for the environment under test (report metadata).
    pub test_environment: String,
    /// Version tag embedded in the run metadata.
    pub app_version: String,
    /// Whether the browser runs headless.
    pub headless: bool,
    /// Browser window size.
    pub viewport: (u32, u32),
    /// Default retry policy for visibility waits.
    pub retry: RetryPolicy,
    /// The one retained fixed delay: how long to stall after a click so
    /// client-side UI can settle.
    pub settle_delay: Duration,
    /// Directory for per-run log files.
    pub log_dir: PathBuf,
    /// Directory for failure/evidence screenshots.
    pub screenshot_dir: PathBuf,
    /// Directory for the structured report artifacts.
    pub report_dir: PathBuf,
}

impl TestConfig {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// Kept separate from [`Self::from_env`] so defaults and parsing can
    /// be tested without mutating the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let browser_path = lookup(BROWSER_VAR)
            .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("chromium"))
            .map(PathBuf::from);
        let test_environment = lookup(TEST_ENV_VAR)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "Local".to_owned());
        let app_version = lookup(APP_VERSION_VAR)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "SupportGoWhere E2E Tests".to_owned());
        let headless = lookup(HEADLESS_VAR)
            .map(|v| !matches!(v.to_ascii_lowercase().as_str(), "false" | "0" | "no"))
            .unwrap_or(true);
        let settle_delay = lookup(SETTLE_MS_VAR)
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(1000));

        Self {
            browser_path,
            test_environment,
            app_version,
            headless,
            viewport: (1920, 1080),
            retry: RetryPolicy::default(),
            settle_delay,
            log_dir: PathBuf::from("test-results/logs"),
            screenshot_dir: PathBuf::from("test-results/screenshots"),
            report_dir: PathBuf::from("reports"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn env<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            vars.iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| (*v).to_owned())
        }
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let cfg = TestConfig::from_lookup(env(&[]));
        assert_eq!(cfg.browser_path, None);
        assert_eq!(cfg.test_environment, "Local");
        assert!(cfg.headless);
        assert_eq!(cfg.settle_delay, Duration::from_millis(1000));
        assert_eq!(cfg.viewport, (1920, 1080));
    }

    #[test]
    fn chromium_keyword_means_fetcher_download() {
        let cfg = TestConfig::from_lookup(env(&[("BROWSER", "Chromium")]));
        assert_eq!(cfg.browser_path, None);
    }

    #[test]
    fn browser_value_is_an_executable_override() {
        let cfg = TestConfig::from_lookup(env(&[("BROWSER", "/usr/bin/chromium-browser")]));
        assert_eq!(
            cfg.browser_path,
            Some(PathBuf::from("/usr/bin/chromium-browser"))
        );
    }

    #[test]
    fn headless_can_be_disabled() {
        for value in ["false", "0", "no", "False"] {
            let cfg = TestConfig::from_lookup(env(&[("HEADLESS", value)]));
            assert!(!cfg.headless, "HEADLESS={value} should run headful");
        }
        let cfg = TestConfig::from_lookup(env(&[("HEADLESS", "true")]));
        assert!(cfg.headless);
    }

    #[test]
    fn settle_delay_parses_and_falls_back() {
        let cfg = TestConfig::from_lookup(env(&[("E2E_SETTLE_MS", "250")]));
        assert_eq!(cfg.settle_delay, Duration::from_millis(250));
        let cfg = TestConfig::from_lookup(env(&[("E2E_SETTLE_MS", "soon")]));
        assert_eq!(cfg.settle_delay, Duration::from_millis(1000));
    }

    #[test]
    fn test_env_label_overrides() {
        let cfg = TestConfig::from_lookup(env(&[("TEST_ENV", "Staging")]));
        assert_eq!(cfg.test_environment, "Staging");
    }
}

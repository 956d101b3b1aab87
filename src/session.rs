//! Per-run browser lifecycle and per-scenario sessions.
//!
//! One browser is launched for the whole run; each scenario gets its own
//! page unless its feature declares a Background, in which case one page
//! is shared sequentially across that feature's scenarios. The manager is
//! created by the test main and handed to the cucumber hooks via `Arc`;
//! nothing here lives in module-level statics.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::fetcher::{BrowserFetcher, BrowserFetcherOptions};
use chromiumoxide::page::Page;
use cucumber::gherkin::Feature;
use futures::StreamExt;

use crate::config::TestConfig;
use crate::interact::Interactor;
use crate::logging::RunLog;

/// How a scenario's page is scoped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionScope {
    /// Fresh page, closed when the scenario ends.
    Scenario,
    /// Page shared across all scenarios of one feature (Background).
    FeatureShared,
}

/// Everything a scenario borrows to talk to the browser.
#[derive(Clone)]
pub struct ScenarioSession {
    pub page: Page,
    pub log: Arc<RunLog>,
    pub config: Arc<TestConfig>,
    scope: SessionScope,
}

impl ScenarioSession {
    /// Interaction wrapper bound to this scenario's page.
    pub fn interactor(&self) -> Interactor<'_> {
        Interactor::new(&self.page, &self.log, &self.config)
    }

    pub fn scope(&self) -> SessionScope {
        self.scope
    }
}

impl fmt::Debug for ScenarioSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScenarioSession")
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

struct RunBrowser {
    browser: Browser,
    handler: tokio::task::JoinHandle<()>,
}

struct SharedPage {
    feature: String,
    page: Page,
}

#[derive(Default)]
struct ManagerState {
    browser: Option<RunBrowser>,
    shared: Option<SharedPage>,
}

/// Owns the run-wide browser and the optional feature-shared page.
pub struct SessionManager {
    config: Arc<TestConfig>,
    log: Arc<RunLog>,
    state: tokio::sync::Mutex<ManagerState>,
    failures: AtomicUsize,
}

impl SessionManager {
    pub fn new(config: Arc<TestConfig>, log: Arc<RunLog>) -> Self {
        Self {
            config,
            log,
            state: tokio::sync::Mutex::new(ManagerState::default()),
            failures: AtomicUsize::new(0),
        }
    }

    /// Session for the next scenario of `feature`.
    ///
    /// Launches the browser on first use. Features with a Background get
    /// one page for all their scenarios; entering a different feature
    /// closes the previous feature's shared page.
    pub async fn acquire(&self, feature: &Feature) -> anyhow::Result<ScenarioSession> {
        let mut state = self.state.lock().await;
        if state.browser.is_none() {
            state.browser = Some(self.launch().await?);
        }
        let Some(run) = &state.browser else {
            anyhow::bail!("browser failed to launch");
        };
        let browser = &run.browser;

        let shares_background = feature.background.is_some();
        if let Some(shared) = &state.shared {
            if shares_background && shared.feature == feature.name {
                self.log.info(&format!(
                    "Reusing background page for feature '{}'",
                    feature.name
                ));
                return Ok(self.session(shared.page.clone(), SessionScope::FeatureShared));
            }
        }

        let page = browser.new_page("about:blank").await?;
        if shares_background {
            if let Some(previous) = state.shared.take() {
                let _ = previous.page.close().await;
            }
            state.shared = Some(SharedPage {
                feature: feature.name.clone(),
                page: page.clone(),
            });
            self.log.info(&format!(
                "Opened background page for feature '{}'",
                feature.name
            ));
            Ok(self.session(page, SessionScope::FeatureShared))
        } else {
            if let Some(previous) = state.shared.take() {
                let _ = previous.page.close().await;
            }
            Ok(self.session(page, SessionScope::Scenario))
        }
    }

    /// Return a session at scenario end; scenario-scoped pages close here.
    pub async fn release(&self, session: ScenarioSession) {
        if session.scope() == SessionScope::Scenario {
            if let Err(err) = session.page.close().await {
                self.log.warning(&format!("Failed to close page: {err}"));
            }
        }
    }

    /// Count one failed scenario.
    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    /// How many scenarios failed during the run.
    pub fn failures(&self) -> usize {
        self.failures.load(Ordering::Relaxed)
    }

    /// Close the shared page and the browser, then stop the handler task.
    pub async fn shutdown(&self) {
        let mut state = self.state.lock().await;
        if let Some(shared) = state.shared.take() {
            let _ = shared.page.close().await;
        }
        if let Some(mut run) = state.browser.take() {
            if let Err(err) = run.browser.close().await {
                self.log.warning(&format!("Failed to close browser: {err}"));
            }
            run.handler.abort();
        }
        self.log.info("Test run finished");
    }

    fn session(&self, page: Page, scope: SessionScope) -> ScenarioSession {
        ScenarioSession {
            page,
            log: Arc::clone(&self.log),
            config: Arc::clone(&self.config),
            scope,
        }
    }

    /// Launch the run browser, downloading Chromium when no executable
    /// override is configured. The fetcher caches its download on disk,
    /// so repeat runs skip the network round-trip.
    async fn launch(&self) -> anyhow::Result<RunBrowser> {
        let executable = match &self.config.browser_path {
            Some(path) => path.clone(),
            None => {
                let download_path = std::env::temp_dir().join("supportgowhere-e2e-chromium");
                tokio::fs::create_dir_all(&download_path).await?;
                let fetcher = BrowserFetcher::new(
                    BrowserFetcherOptions::builder()
                        .with_path(&download_path)
                        .build()?,
                );
                fetcher.fetch().await?.executable_path
            }
        };

        let (width, height) = self.config.viewport;
        let mut builder = BrowserConfig::builder()
            .chrome_executable(executable.clone())
            .window_size(width, height)
            .arg("--disable-gpu")
            .arg("--no-sandbox");
        if !self.config.headless {
            builder = builder.with_head();
        }
        let browser_config = builder.build().map_err(|e| anyhow::anyhow!("{e}"))?;

        let (browser, mut handler) = Browser::launch(browser_config).await?;
        let handler = tokio::spawn(async move { while handler.next().await.is_some() {} });

        self.log.info(&format!(
            "Launched browser {} ({})",
            executable.display(),
            if self.config.headless {
                "headless"
            } else {
                "headful"
            }
        ));
        Ok(RunBrowser { browser, handler })
    }
}

impl fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionManager")
            .field("failures", &self.failures())
            .finish_non_exhaustive()
    }
}

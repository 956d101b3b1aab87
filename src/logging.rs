//! Per-run log artifact.
//!
//! Every scenario action writes a tagged, timestamped line to one log file
//! per run (`test-run-<ts>.log`), and mirrors it as a `tracing` event so
//! the usual `RUST_LOG` filtering applies to console output.

use std::fs::{self, File, OpenOptions};
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::HarnessError;

/// Line-oriented run log, safe to share across hooks and page objects.
#[derive(Debug)]
pub struct RunLog {
    file: Mutex<File>,
    path: PathBuf,
}

impl RunLog {
    /// Create the log directory and open a fresh log file for this run.
    pub fn create(dir: &Path) -> Result<Self, HarnessError> {
        fs::create_dir_all(dir)?;
        let stamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S");
        let path = dir.join(format!("test-run-{stamp}.log"));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let log = Self {
            file: Mutex::new(file),
            path,
        };
        log.info("Test run started");
        Ok(log)
    }

    /// Path of the log file backing this run.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, tag: &str, message: &str) {
        let line = format!("{} [{tag}] {message}\n", chrono::Utc::now().to_rfc3339());
        if let Ok(mut file) = self.file.lock() {
            // A log write failing must never fail the scenario.
            let _ = file.write_all(line.as_bytes());
        }
    }

    pub fn info(&self, message: &str) {
        tracing::info!("{message}");
        self.write("INFO", message);
    }

    pub fn error(&self, message: &str) {
        tracing::error!("{message}");
        self.write("ERROR", message);
    }

    pub fn success(&self, message: &str) {
        tracing::info!("{message}");
        self.write("SUCCESS", message);
    }

    pub fn warning(&self, message: &str) {
        tracing::warn!("{message}");
        self.write("WARNING", message);
    }

    pub fn step(&self, message: &str) {
        tracing::info!("{message}");
        self.write("STEP", message);
    }

    /// Record that a screenshot was written and why.
    pub fn screenshot(&self, path: &Path, reason: &str) {
        self.info(&format!("Screenshot taken: {} ({reason})", path.display()));
    }
}

/// Install the console `tracing` subscriber for the test binary.
///
/// Honors `RUST_LOG`; defaults to `info` for this crate.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("supportgowhere_e2e=info"));
    // Ignored if a subscriber is already set (e.g. repeated init in tests).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

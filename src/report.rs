//! Structured inputs for the external HTML report generator.
//!
//! The runner writes cucumber JSON results; this module adds the run
//! metadata block the reporter embeds in its header.

use std::fs;
use std::path::PathBuf;

use serde::Serialize;

use crate::config::TestConfig;
use crate::error::HarnessError;

/// Environment metadata for one run.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RunMetadata {
    #[serde(rename = "App Version")]
    pub app_version: String,
    #[serde(rename = "Test Environment")]
    pub test_environment: String,
    #[serde(rename = "Browser")]
    pub browser: String,
    #[serde(rename = "Platform")]
    pub platform: &'static str,
    #[serde(rename = "Execution Date")]
    pub execution_date: String,
    #[serde(rename = "Project")]
    pub project: &'static str,
}

impl RunMetadata {
    pub fn collect(config: &TestConfig) -> Self {
        let browser = config
            .browser_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "chromium".to_owned());
        Self {
            app_version: config.app_version.clone(),
            test_environment: config.test_environment.clone(),
            browser,
            platform: std::env::consts::OS,
            execution_date: chrono::Utc::now().to_rfc3339(),
            project: "SupportGoWhere",
        }
    }
}

/// Where the runner's cucumber JSON results go.
pub fn json_report_path(config: &TestConfig) -> PathBuf {
    config.report_dir.join("cucumber-report.json")
}

/// Write the metadata block next to the cucumber JSON results.
pub fn write_run_metadata(
    config: &TestConfig,
    metadata: &RunMetadata,
) -> Result<PathBuf, HarnessError> {
    fs::create_dir_all(&config.report_dir)?;
    let path = config.report_dir.join("run-metadata.json");
    fs::write(&path, serde_json::to_vec_pretty(metadata)?)?;
    Ok(path)
}

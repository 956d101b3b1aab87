//! Cucumber runner for the support-calculator suite.
//!
//! Scenarios run sequentially against one browser per run; hooks acquire
//! and release per-scenario sessions and capture a full-page screenshot
//! for every failed scenario. Results land in `reports/` (cucumber JSON +
//! run metadata) for the external HTML reporter.

mod steps;
mod world;

use std::fs;
use std::sync::Arc;

use cucumber::{event, writer, World as _, WriterExt as _};
use futures::FutureExt as _;
use supportgowhere_e2e::{capture_screenshot, report, RunLog, RunMetadata, SessionManager, TestConfig};

use crate::world::CalculatorWorld;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    supportgowhere_e2e::init_tracing();

    let config = Arc::new(TestConfig::from_env());
    let log = Arc::new(RunLog::create(&config.log_dir)?);
    let manager = Arc::new(SessionManager::new(Arc::clone(&config), Arc::clone(&log)));

    fs::create_dir_all(&config.report_dir)?;
    let json_path = report::json_report_path(&config);
    let json_file = fs::File::create(&json_path)?;

    let before_manager = Arc::clone(&manager);
    let after_manager = Arc::clone(&manager);

    let _ = CalculatorWorld::cucumber()
        .max_concurrent_scenarios(1)
        .with_writer(
            writer::Basic::stdout()
                .summarized()
                .tee::<CalculatorWorld, _>(writer::Json::for_tee(json_file))
                .normalized(),
        )
        .before(move |feature, _rule, _scenario, world| {
            let manager = Arc::clone(&before_manager);
            async move {
                let session = manager
                    .acquire(feature)
                    .await
                    .expect("acquire browser session");
                world.session = Some(session);
            }
            .boxed_local()
        })
        .after(move |_feature, _rule, scenario, finished, world| {
            let manager = Arc::clone(&after_manager);
            async move {
                let failed = matches!(
                    finished,
                    event::ScenarioFinished::StepFailed(..)
                        | event::ScenarioFinished::BeforeHookFailed(_)
                );
                if failed {
                    manager.record_failure();
                }
                let Some(world) = world else { return };
                let Some(session) = world.session.take() else { return };
                if failed {
                    match capture_screenshot(
                        &session.page,
                        &session.config.screenshot_dir,
                        &scenario.name,
                    )
                    .await
                    {
                        Ok(path) => session.log.screenshot(&path, &scenario.name),
                        Err(err) => session
                            .log
                            .warning(&format!("Could not capture failure screenshot: {err}")),
                    }
                }
                manager.release(session).await;
            }
            .boxed_local()
        })
        .run("tests/features")
        .await;

    manager.shutdown().await;

    let metadata = RunMetadata::collect(&config);
    let metadata_path = report::write_run_metadata(&config, &metadata)?;
    log.info(&format!(
        "Results written to {} and {}",
        json_path.display(),
        metadata_path.display()
    ));

    if manager.failures() > 0 {
        log.error(&format!("{} scenario(s) failed", manager.failures()));
        std::process::exit(1);
    }
    Ok(())
}

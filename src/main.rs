//! Repository Activity Charts
//!
//! Renders weekly commit-activity charts for the configured repositories.

use anyhow::Context;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use repoactivity::analysis::GitHistoryProvider;
use repoactivity::plotting::PlottersRenderer;
use repoactivity::{run_with_deadline, Config, Pipeline};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        repositories = config.repositories.len(),
        cache = %config.cache_path.display(),
        output = %config.output_dir.display(),
        timeout = ?config.timeout,
        "starting run"
    );

    let rt = Runtime::new().context("Failed to start runtime")?;
    let pipeline = Pipeline::new(config, GitHistoryProvider::new(), PlottersRenderer::default());
    let result = rt.block_on(run_with_deadline(pipeline));
    // A timed-out run may still hold a blocking thread; do not wait for it
    rt.shutdown_background();

    let report = result.context("Run failed")?;
    tracing::info!(
        fetched = report.fetched.len(),
        cache_saved = report.cache_saved,
        charts = report.charts.len(),
        "run complete"
    );
    Ok(())
}

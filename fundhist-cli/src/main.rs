//! Fund history updater — refreshes `data/fund_history.json`.
//!
//! Takes no arguments. Fetches the trailing year of daily NAVs for every fund
//! in the default lineup and rewrites the snapshot. Exits non-zero if the run
//! fails outside the per-day skip boundary (e.g. the snapshot cannot be
//! written). Log verbosity follows `RUST_LOG` (default `info`).

use anyhow::{Context, Result};
use fundhist_core::data::{LogProgress, MufgProvider};
use fundhist_core::dates::today_in;
use fundhist_core::{run_job, JobConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = JobConfig::default();
    let provider = MufgProvider::from_config(&config).context("set up upstream client")?;
    let today = today_in(config.timezone);

    run_job(&config, &provider, today, &LogProgress)
        .with_context(|| format!("update {}", config.output_path.display()))?;

    Ok(())
}

//! Job entry point: load previous snapshot, assemble every fund, write the result.

use crate::config::{ConfigError, JobConfig};
use crate::data::{
    assemble_series, load_snapshot, write_snapshot, FundOutcome, JobProgress, NavSource,
    SnapshotError, SnapshotLoad,
};
use crate::dates::date_range;
use crate::domain::Snapshot;
use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum JobError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// Summary of a completed run.
#[derive(Debug)]
pub struct JobSummary {
    pub outcomes: Vec<FundOutcome>,
    pub output_path: PathBuf,
    /// Whether a usable previous snapshot was found.
    pub had_existing: bool,
}

impl JobSummary {
    pub fn kept_existing(&self) -> impl Iterator<Item = &FundOutcome> {
        self.outcomes.iter().filter(|o| o.kept_existing)
    }
}

/// Run the job for `today` (already resolved in `config.timezone`).
pub fn run_job(
    config: &JobConfig,
    source: &dyn NavSource,
    today: NaiveDate,
    progress: &dyn JobProgress,
) -> Result<JobSummary, JobError> {
    config.validate()?;

    let existing = load_snapshot(&config.output_path);
    match &existing {
        SnapshotLoad::Found(s) => info!(
            path = %config.output_path.display(),
            funds = s.len(),
            "loaded existing snapshot"
        ),
        SnapshotLoad::Absent => info!(
            path = %config.output_path.display(),
            "no existing snapshot"
        ),
        SnapshotLoad::Malformed(reason) => warn!(
            path = %config.output_path.display(),
            "ignoring unreadable existing snapshot: {reason}"
        ),
    }

    let dates = date_range(today, config.days_back);
    info!(
        source = source.name(),
        first = %dates[0],
        last = %today,
        "fetching {} funds over {} days",
        config.funds.len(),
        dates.len()
    );

    let total = config.funds.len();
    let mut result = Snapshot::new();
    let mut outcomes = Vec::with_capacity(total);

    for (i, fund) in config.funds.iter().enumerate() {
        progress.on_fund_start(fund, i, total);
        let outcome = assemble_series(source, fund, &dates, existing.snapshot(), config, progress);
        progress.on_fund_complete(&outcome);
        result.insert(fund.name.as_str(), outcome.series.clone());
        outcomes.push(outcome);
    }

    write_snapshot(&config.output_path, &result)?;
    info!("Wrote: {}", config.output_path.display());
    progress.on_job_complete(&outcomes);

    Ok(JobSummary {
        outcomes,
        output_path: config.output_path.clone(),
        had_existing: existing.snapshot().is_some(),
    })
}

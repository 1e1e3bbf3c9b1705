//! NAV source trait and structured error types.
//!
//! The `NavSource` trait abstracts over where daily NAVs come from, so the
//! assembler can run against the real upstream or a scripted source in tests.

use crate::domain::{FundDescriptor, PricePoint, Series};
use chrono::NaiveDate;
use thiserror::Error;
use tracing::{info, warn};

/// Outcome of asking the upstream for one fund on one day.
#[derive(Debug, Clone, PartialEq)]
pub enum DayFetch {
    Point(PricePoint),
    /// Nothing published for that day (weekend, holiday, non-success status).
    NoData,
}

/// Errors raised while fetching a single day.
///
/// The assembler treats every variant as a skipped day; only client
/// construction is surfaced to the caller of the job.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("response format changed: {0}")]
    ResponseFormat(String),
}

/// A source of daily NAV observations.
pub trait NavSource {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    /// Fetch the NAV for `fund_cd` published on `date`.
    fn fetch_day(&self, fund_cd: &str, date: NaiveDate) -> Result<DayFetch, FetchError>;
}

/// Per-fund summary produced by the assembler.
#[derive(Debug, Clone, PartialEq)]
pub struct FundOutcome {
    pub name: String,
    /// The series written for this fund.
    pub series: Series,
    /// Points collected during this run (before any fallback).
    pub fresh_points: usize,
    /// Days skipped because the fetch raised an error.
    pub skipped_errors: usize,
    /// True if too few fresh points arrived and the previous series was kept.
    pub kept_existing: bool,
}

/// Progress callbacks for a job run.
pub trait JobProgress {
    fn on_fund_start(&self, fund: &FundDescriptor, index: usize, total: usize);

    fn on_day_error(&self, fund: &FundDescriptor, date: NaiveDate, error: &FetchError);

    fn on_fund_complete(&self, outcome: &FundOutcome);

    fn on_job_complete(&self, outcomes: &[FundOutcome]);
}

/// Progress reporter that logs through `tracing`.
pub struct LogProgress;

impl JobProgress for LogProgress {
    fn on_fund_start(&self, fund: &FundDescriptor, index: usize, total: usize) {
        info!(
            "==== [{}/{}] {} (fundCd={}) ====",
            index + 1,
            total,
            fund.name,
            fund.fund_cd
        );
    }

    fn on_day_error(&self, fund: &FundDescriptor, date: NaiveDate, error: &FetchError) {
        warn!("{} {date}: {error}", fund.name);
    }

    fn on_fund_complete(&self, outcome: &FundOutcome) {
        if outcome.kept_existing {
            warn!(
                "too few points ({}). Keep existing for {}.",
                outcome.fresh_points, outcome.name
            );
        } else {
            info!(
                fund = %outcome.name,
                skipped = outcome.skipped_errors,
                "OK points={}",
                outcome.fresh_points
            );
        }
    }

    fn on_job_complete(&self, outcomes: &[FundOutcome]) {
        let kept = outcomes.iter().filter(|o| o.kept_existing).count();
        info!(
            "job complete: {} funds, {} fresh, {} kept existing",
            outcomes.len(),
            outcomes.len() - kept,
            kept
        );
    }
}

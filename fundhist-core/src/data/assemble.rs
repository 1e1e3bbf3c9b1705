//! Series assembly — walk the date range for one fund and apply the
//! previous-snapshot fallback.

use super::provider::{DayFetch, FundOutcome, JobProgress, NavSource};
use crate::config::JobConfig;
use crate::domain::{FundDescriptor, Series, Snapshot};
use chrono::NaiveDate;
use std::thread;

/// Fetch every date in `dates` (oldest first) for `fund` and build its series.
///
/// A day that errors is reported and skipped; the loop never aborts. After
/// the loop, if fewer than `config.min_points` points arrived and `existing`
/// holds a non-empty series for this fund, that series is kept unchanged.
pub fn assemble_series(
    source: &dyn NavSource,
    fund: &FundDescriptor,
    dates: &[NaiveDate],
    existing: Option<&Snapshot>,
    config: &JobConfig,
    progress: &dyn JobProgress,
) -> FundOutcome {
    let delay = config.request_delay();
    let mut points: Series = Vec::with_capacity(dates.len());
    let mut skipped_errors = 0;

    for &date in dates {
        match source.fetch_day(&fund.fund_cd, date) {
            Ok(DayFetch::Point(point)) => points.push(point),
            Ok(DayFetch::NoData) => {}
            Err(e) => {
                progress.on_day_error(fund, date, &e);
                skipped_errors += 1;
            }
        }

        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }

    points.sort_by_key(|p| p.date);
    let fresh_points = points.len();

    let previous = existing
        .and_then(|s| s.get(&fund.name))
        .filter(|series| !series.is_empty());

    let (series, kept_existing) = match previous {
        Some(prev) if fresh_points < config.min_points => (prev.to_vec(), true),
        _ => (points, false),
    };

    FundOutcome {
        name: fund.name.clone(),
        series,
        fresh_points,
        skipped_errors,
        kept_existing,
    }
}

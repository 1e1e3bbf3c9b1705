//! Upstream fetching, series assembly and snapshot persistence

pub mod assemble;
pub mod mufg;
pub mod nav;
pub mod provider;
pub mod store;

pub use assemble::assemble_series;
pub use mufg::MufgProvider;
pub use nav::normalize_nav;
pub use provider::{DayFetch, FetchError, FundOutcome, JobProgress, LogProgress, NavSource};
pub use store::{load_snapshot, render_snapshot, write_snapshot, SnapshotError, SnapshotLoad};

//! Fund history core — keeps a trailing one-year NAV series per fund.
//!
//! This crate contains the whole job:
//! - Domain types (fund descriptors, price points, snapshots)
//! - Job configuration with production defaults
//! - Calendar date ranges in a fixed timezone
//! - The upstream NAV source and its per-day parsing
//! - Series assembly with the previous-snapshot fallback
//! - Snapshot load and write

pub mod config;
pub mod data;
pub mod dates;
pub mod domain;
pub mod job;

pub use config::{ConfigError, JobConfig};
pub use job::{run_job, JobError, JobSummary};

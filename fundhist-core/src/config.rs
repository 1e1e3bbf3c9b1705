//! Job configuration.
//!
//! Every tunable of a run lives in one immutable `JobConfig` that is handed to
//! [`crate::job::run_job`]. The defaults reproduce the production job; tests
//! build their own or parse one from TOML.

use crate::domain::{default_lineup, FundDescriptor};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_DAYS_BACK: u32 = 365;
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 60;
/// A year of calendar days usually yields ~200 business days; far fewer means
/// the upstream failed wholesale.
pub const DEFAULT_MIN_POINTS: usize = 120;
pub const DEFAULT_OUTPUT_PATH: &str = "data/fund_history.json";
pub const DEFAULT_BASE_URL: &str = "https://developer.am.mufg.jp";
pub const DEFAULT_USER_AGENT: &str = "kabuka-dashboard/1.0 (github-actions)";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration for one run of the history job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobConfig {
    /// Calendar days to look back from today (the range has `days_back + 1` dates).
    pub days_back: u32,
    /// Pause after every upstream request.
    pub request_delay_ms: u64,
    /// Below this many fresh points a fund keeps its previous series.
    pub min_points: usize,
    /// Snapshot file, read for fallback and overwritten with the result.
    pub output_path: PathBuf,
    /// Timezone that defines "today" and the calendar dates of the range.
    pub timezone: Tz,
    pub base_url: String,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    /// Funds in fetch and output order. Kept last so TOML emits it as a
    /// trailing array of tables.
    pub funds: Vec<FundDescriptor>,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            days_back: DEFAULT_DAYS_BACK,
            request_delay_ms: DEFAULT_REQUEST_DELAY_MS,
            min_points: DEFAULT_MIN_POINTS,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            timezone: chrono_tz::Asia::Tokyo,
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            funds: default_lineup(),
        }
    }
}

impl JobConfig {
    /// Load a config from a TOML file. Absent keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a config from a TOML string. Absent keys take their defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Number of candidate dates per fund.
    pub fn candidate_days(&self) -> usize {
        self.days_back as usize + 1
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.funds.is_empty() {
            return Err(ConfigError::Invalid("fund list is empty".into()));
        }

        let mut seen = HashSet::new();
        for fund in &self.funds {
            if fund.name.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "fund with code '{}' has an empty name",
                    fund.fund_cd
                )));
            }
            if fund.fund_cd.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "fund '{}' has an empty fund code",
                    fund.name
                )));
            }
            if !seen.insert(fund.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate fund name '{}'",
                    fund.name
                )));
            }
        }

        if self.min_points > self.candidate_days() {
            return Err(ConfigError::Invalid(format!(
                "min_points ({}) exceeds the {} candidate days",
                self.min_points,
                self.candidate_days()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_production_job() {
        let c = JobConfig::default();
        assert_eq!(c.days_back, 365);
        assert_eq!(c.candidate_days(), 366);
        assert_eq!(c.request_delay(), Duration::from_millis(60));
        assert_eq!(c.min_points, 120);
        assert_eq!(c.output_path, PathBuf::from("data/fund_history.json"));
        assert_eq!(c.timezone, chrono_tz::Asia::Tokyo);
        assert_eq!(c.funds.len(), 5);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let c = JobConfig::from_toml(
            r#"
            days_back = 30
            min_points = 10
            request_delay_ms = 0
            output_path = "out/history.json"

            [[funds]]
            name = "Test Fund"
            fund_cd = "000001"
            "#,
        )
        .unwrap();

        assert_eq!(c.days_back, 30);
        assert_eq!(c.min_points, 10);
        assert_eq!(c.request_delay(), Duration::ZERO);
        assert_eq!(c.output_path, PathBuf::from("out/history.json"));
        assert_eq!(c.funds, vec![FundDescriptor::new("Test Fund", "000001")]);
        assert_eq!(c.timezone, chrono_tz::Asia::Tokyo);
        assert_eq!(c.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn timezone_parses_from_name() {
        let c = JobConfig::from_toml(r#"timezone = "UTC""#).unwrap();
        assert_eq!(c.timezone, chrono_tz::UTC);
        assert!(JobConfig::from_toml(r#"timezone = "Mars/Olympus""#).is_err());
    }

    #[test]
    fn toml_roundtrip() {
        let c = JobConfig::default();
        let text = toml::to_string_pretty(&c).unwrap();
        assert_eq!(JobConfig::from_toml(&text).unwrap(), c);
    }

    #[test]
    fn rejects_duplicate_names() {
        let c = JobConfig {
            funds: vec![
                FundDescriptor::new("A", "1"),
                FundDescriptor::new("A", "2"),
            ],
            ..JobConfig::default()
        };
        assert!(matches!(c.validate(), Err(ConfigError::Invalid(msg)) if msg.contains("duplicate")));
    }

    #[test]
    fn rejects_empty_lineup_and_codes() {
        let empty = JobConfig {
            funds: vec![],
            ..JobConfig::default()
        };
        assert!(empty.validate().is_err());

        let no_code = JobConfig {
            funds: vec![FundDescriptor::new("A", " ")],
            ..JobConfig::default()
        };
        assert!(no_code.validate().is_err());
    }

    #[test]
    fn rejects_threshold_above_candidate_days() {
        let c = JobConfig {
            days_back: 9,
            min_points: 11,
            ..JobConfig::default()
        };
        assert!(c.validate().is_err());

        let ok = JobConfig { min_points: 10, ..c };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn from_file_reports_missing_path() {
        let err = JobConfig::from_file(Path::new("/nonexistent/fundhist.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}

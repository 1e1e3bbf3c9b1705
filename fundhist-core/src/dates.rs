//! Calendar date range for the lookback window.
//!
//! "Today" is resolved in a fixed timezone rather than the machine's local
//! zone, so a job running on a UTC host just after midnight JST still asks
//! for the JST date.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;

/// Today's calendar date in `tz`.
pub fn today_in(tz: Tz) -> NaiveDate {
    date_in(Utc::now(), tz)
}

/// The calendar date of `instant` as seen in `tz`.
pub fn date_in(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// `days_back + 1` consecutive dates, oldest first, ending at `today`.
pub fn date_range(today: NaiveDate, days_back: u32) -> Vec<NaiveDate> {
    (0..=i64::from(days_back))
        .rev()
        .map(|offset| today - Duration::days(offset))
        .collect()
}

/// `YYYYMMDD`, as the upstream API expects in its path.
pub fn compact_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Parse an 8-digit `YYYYMMDD` string into a date.
pub fn parse_compact_date(s: &str) -> Option<NaiveDate> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y%m%d").ok()
}

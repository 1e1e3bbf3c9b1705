//! MUFG Asset Management fund-information API.
//!
//! One request per fund per day against the date-keyed endpoint:
//! `GET {base}/fund_information_date/fund_cd/{fund_cd}/base_date/{YYYYMMDD}`.
//! The body carries a `datasets` array whose first element holds `base_date`
//! (`YYYYMMDD`) and `nav` (number or comma-grouped string).

use super::nav::normalize_nav;
use super::provider::{DayFetch, FetchError, NavSource};
use crate::config::JobConfig;
use crate::dates::{compact_date, parse_compact_date};
use crate::domain::PricePoint;
use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::debug;

/// Blocking client for the date-keyed NAV endpoint.
pub struct MufgProvider {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl MufgProvider {
    pub fn new(
        base_url: impl Into<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .default_headers(headers)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &JobConfig) -> Result<Self, FetchError> {
        Self::new(
            config.base_url.as_str(),
            &config.user_agent,
            config.request_timeout(),
        )
    }

    /// Build the request URL for a fund and a `YYYYMMDD` date.
    pub fn date_url(&self, fund_cd: &str, yyyymmdd: &str) -> String {
        format!(
            "{}/fund_information_date/fund_cd/{fund_cd}/base_date/{yyyymmdd}",
            self.base_url
        )
    }

    /// Turn a decoded response body into a day result.
    fn parse_body(body: &Value) -> Result<DayFetch, FetchError> {
        let Some(dataset) = pick_dataset(body) else {
            return Ok(DayFetch::NoData);
        };

        let base_date = match dataset.get("base_date") {
            None | Some(Value::Null) => return Ok(DayFetch::NoData),
            Some(Value::String(s)) if s.is_empty() => return Ok(DayFetch::NoData),
            Some(v) => v,
        };
        let Some(price) = normalize_nav(dataset.get("nav")) else {
            return Ok(DayFetch::NoData);
        };

        let date = base_date
            .as_str()
            .and_then(parse_compact_date)
            .ok_or_else(|| {
                FetchError::ResponseFormat(format!("base_date is not YYYYMMDD: {base_date}"))
            })?;

        Ok(DayFetch::Point(PricePoint::new(date, price)))
    }
}

/// First element of `datasets`, if it is an object.
fn pick_dataset(body: &Value) -> Option<&Map<String, Value>> {
    body.get("datasets")?.as_array()?.first()?.as_object()
}

impl NavSource for MufgProvider {
    fn name(&self) -> &str {
        "mufg_fund_information"
    }

    fn fetch_day(&self, fund_cd: &str, date: NaiveDate) -> Result<DayFetch, FetchError> {
        let url = self.date_url(fund_cd, &compact_date(date));

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            debug!(%url, %status, "no data");
            return Ok(DayFetch::NoData);
        }

        let text = resp
            .text()
            .map_err(|e| FetchError::Network(format!("read body: {e}")))?;
        let body: Value = serde_json::from_str(&text)
            .map_err(|e| FetchError::ResponseFormat(format!("invalid JSON: {e}")))?;

        Self::parse_body(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn url_embeds_fund_and_date() {
        let p = MufgProvider::new("https://example.test/", "ua", Duration::from_secs(1)).unwrap();
        assert_eq!(
            p.date_url("253425", "20240105"),
            "https://example.test/fund_information_date/fund_cd/253425/base_date/20240105"
        );
    }

    #[test]
    fn well_formed_dataset_yields_point() {
        let body = json!({"datasets": [{"base_date": "20240105", "nav": "1,000"}]});
        assert_eq!(
            MufgProvider::parse_body(&body).unwrap(),
            DayFetch::Point(PricePoint::new(date(2024, 1, 5), 1000.0))
        );
    }

    #[test]
    fn only_first_dataset_is_used() {
        let body = json!({"datasets": [
            {"base_date": "20240105", "nav": 25000},
            {"base_date": "20240104", "nav": 1}
        ]});
        assert_eq!(
            MufgProvider::parse_body(&body).unwrap(),
            DayFetch::Point(PricePoint::new(date(2024, 1, 5), 25000.0))
        );
    }

    #[test]
    fn missing_or_empty_datasets_is_no_data() {
        for body in [
            json!({}),
            json!({"datasets": []}),
            json!({"datasets": null}),
            json!({"datasets": "oops"}),
            json!({"datasets": [null]}),
            json!([]),
        ] {
            assert_eq!(MufgProvider::parse_body(&body).unwrap(), DayFetch::NoData, "{body}");
        }
    }

    #[test]
    fn missing_fields_are_no_data() {
        for body in [
            json!({"datasets": [{"nav": "1,000"}]}),
            json!({"datasets": [{"base_date": "", "nav": "1,000"}]}),
            json!({"datasets": [{"base_date": "20240105"}]}),
            json!({"datasets": [{"base_date": "20240105", "nav": null}]}),
            json!({"datasets": [{"base_date": "20240105", "nav": "-"}]}),
        ] {
            assert_eq!(MufgProvider::parse_body(&body).unwrap(), DayFetch::NoData, "{body}");
        }
    }

    #[test]
    fn malformed_base_date_is_format_error() {
        for body in [
            json!({"datasets": [{"base_date": "2024-01-05", "nav": "1"}]}),
            json!({"datasets": [{"base_date": 20240105, "nav": "1"}]}),
        ] {
            assert!(matches!(
                MufgProvider::parse_body(&body),
                Err(FetchError::ResponseFormat(_))
            ));
        }
    }
}

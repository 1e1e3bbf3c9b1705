//! Price point — one published NAV for one fund on one day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};

/// A single NAV observation.
///
/// Serialized as `{"date": "YYYY-MM-DD", "price": <number>}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    #[serde(serialize_with = "serialize_price")]
    pub price: f64,
}

/// Ordered NAV history for one fund, ascending by date.
pub type Series = Vec<PricePoint>;

impl PricePoint {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }
}

/// Largest magnitude at which every integer is exactly representable as f64.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Integral prices are written as JSON integers (`34030`, not `34030.0`).
fn serialize_price<S: Serializer>(price: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if price.fract() == 0.0 && price.abs() < MAX_EXACT_INTEGER {
        serializer.serialize_i64(*price as i64)
    } else {
        serializer.serialize_f64(*price)
    }
}

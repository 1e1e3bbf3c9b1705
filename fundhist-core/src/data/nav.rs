//! NAV normalization.
//!
//! The upstream reports NAV either as a JSON number or as a string with
//! thousands separators (`"34,030"`).

use serde_json::Value;

/// Normalize a raw `nav` field into a finite, non-negative price.
///
/// Returns `None` for null, missing, non-numeric or non-finite values.
pub fn normalize_nav(raw: Option<&Value>) -> Option<f64> {
    let n = match raw? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let cleaned: String = s.chars().filter(|&c| c != ',').collect();
            let cleaned = cleaned.trim();
            if cleaned.is_empty() {
                return None;
            }
            cleaned.parse::<f64>().ok()?
        }
        _ => return None,
    };

    (n.is_finite() && n >= 0.0).then_some(n)
}

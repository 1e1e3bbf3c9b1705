//! Fund descriptors — the fixed lineup tracked by the job.

use serde::{Deserialize, Serialize};

/// A fund tracked by the job.
///
/// `name` is the display name and the key under which the fund's series is
/// stored in the snapshot. `fund_cd` is the opaque code the upstream API uses
/// to select the fund.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundDescriptor {
    pub name: String,
    pub fund_cd: String,
}

impl FundDescriptor {
    pub fn new(name: impl Into<String>, fund_cd: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fund_cd: fund_cd.into(),
        }
    }
}

/// The default lineup, in the order funds are fetched and written.
pub fn default_lineup() -> Vec<FundDescriptor> {
    [
        ("オルカン", "253425"),
        ("S&P500", "253266"),
        ("宇宙開発", "253299"),
        ("NASDAQ100", "254062"),
        ("純金ファンド", "251065"),
    ]
    .into_iter()
    .map(|(name, code)| FundDescriptor::new(name, code))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn default_lineup_has_five_funds() {
        let funds = default_lineup();
        assert_eq!(funds.len(), 5);
        assert_eq!(funds[0].name, "オルカン");
        assert_eq!(funds[0].fund_cd, "253425");
        assert_eq!(funds[4].fund_cd, "251065");
    }

    #[test]
    fn default_lineup_names_and_codes_are_unique() {
        let funds = default_lineup();
        let names: HashSet<_> = funds.iter().map(|f| f.name.as_str()).collect();
        let codes: HashSet<_> = funds.iter().map(|f| f.fund_cd.as_str()).collect();
        assert_eq!(names.len(), funds.len());
        assert_eq!(codes.len(), funds.len());
    }
}

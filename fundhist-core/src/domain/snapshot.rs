//! Snapshot — every fund's series, keyed by display name.
//!
//! Keys keep insertion order on write and file order on read, so the
//! persisted JSON object lists funds in lineup order.

use super::point::{PricePoint, Series};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    entries: Vec<(String, Series)>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the series for `name`. A replaced entry keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, series: Series) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = series,
            None => self.entries.push((name, series)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&[PricePoint]> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, series)| series.as_slice())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PricePoint])> {
        self.entries.iter().map(|(n, s)| (n.as_str(), s.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, series) in &self.entries {
            map.serialize_entry(name, series)?;
        }
        map.end()
    }
}

struct SnapshotVisitor;

impl<'de> Visitor<'de> for SnapshotVisitor {
    type Value = Snapshot;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object mapping fund names to arrays of {date, price}")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Snapshot, A::Error> {
        let mut snapshot = Snapshot::new();
        // Duplicate keys: the last one wins.
        while let Some((name, series)) = access.next_entry::<String, Series>()? {
            snapshot.insert(name, series);
        }
        Ok(snapshot)
    }
}

impl<'de> Deserialize<'de> for Snapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SnapshotVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn point(day: u32, price: f64) -> PricePoint {
        PricePoint::new(NaiveDate::from_ymd_opt(2024, 1, day).unwrap(), price)
    }

    #[test]
    fn insert_preserves_order_and_replaces_in_place() {
        let mut s = Snapshot::new();
        s.insert("b", vec![point(1, 1.0)]);
        s.insert("a", vec![point(2, 2.0)]);
        s.insert("b", vec![point(3, 3.0)]);

        assert_eq!(s.names().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(s.get("b").unwrap(), &[point(3, 3.0)]);
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn serializes_keys_in_insertion_order() {
        let mut s = Snapshot::new();
        s.insert("zeta", vec![]);
        s.insert("alpha", vec![point(5, 1000.0)]);

        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(
            json,
            r#"{"zeta":[],"alpha":[{"date":"2024-01-05","price":1000}]}"#
        );
    }

    #[test]
    fn deserializes_keys_in_file_order() {
        let s: Snapshot =
            serde_json::from_str(r#"{"y":[{"date":"2024-01-02","price":1}],"x":[]}"#).unwrap();
        assert_eq!(s.names().collect::<Vec<_>>(), vec!["y", "x"]);
        assert_eq!(s.get("y").unwrap().len(), 1);
        assert!(s.get("x").unwrap().is_empty());
        assert!(s.get("missing").is_none());
    }

    #[test]
    fn rejects_non_object_documents() {
        assert!(serde_json::from_str::<Snapshot>("[]").is_err());
        assert!(serde_json::from_str::<Snapshot>(r#"{"x": 3}"#).is_err());
    }
}

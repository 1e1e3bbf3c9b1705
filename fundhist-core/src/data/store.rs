//! Snapshot file: read once for fallback, overwritten once with the result.
//!
//! The write is a single `fs::write` with no temp-file swap. A crash mid-write
//! can leave a truncated file; the next run then loads it as `Malformed` and
//! simply proceeds without fallback.

use crate::domain::{Series, Snapshot};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Result of reading the previous snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotLoad {
    Found(Snapshot),
    /// No file at the path.
    Absent,
    /// The file exists but could not be read or parsed.
    Malformed(String),
}

impl SnapshotLoad {
    /// The previous snapshot, if one was usable.
    pub fn snapshot(&self) -> Option<&Snapshot> {
        match self {
            SnapshotLoad::Found(s) => Some(s),
            SnapshotLoad::Absent | SnapshotLoad::Malformed(_) => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("write snapshot {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A previous snapshot read entry by entry.
///
/// Only the document itself must be a JSON object. An entry whose value is not
/// a `{date, price}` array is set aside, so one odd key cannot take the
/// fallback away from the funds that are readable.
struct LenientSnapshot {
    snapshot: Snapshot,
    /// `(name, reason)` for every entry that was set aside.
    skipped: Vec<(String, String)>,
}

struct LenientVisitor;

impl<'de> Visitor<'de> for LenientVisitor {
    type Value = LenientSnapshot;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a JSON object keyed by fund name")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<LenientSnapshot, A::Error> {
        let mut snapshot = Snapshot::new();
        let mut skipped = Vec::new();
        while let Some((name, value)) = access.next_entry::<String, Value>()? {
            match Series::deserialize(value) {
                Ok(series) => snapshot.insert(name, series),
                Err(e) => skipped.push((name, e.to_string())),
            }
        }
        Ok(LenientSnapshot { snapshot, skipped })
    }
}

impl<'de> Deserialize<'de> for LenientSnapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(LenientVisitor)
    }
}

/// Read and parse the snapshot at `path`. Never fails.
///
/// `Malformed` means the file is unreadable, not JSON, or not a JSON object.
/// Entries that are not a series are dropped with a warning and the rest of
/// the snapshot stays usable.
pub fn load_snapshot(path: &Path) -> SnapshotLoad {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return SnapshotLoad::Absent,
        Err(e) => return SnapshotLoad::Malformed(format!("read: {e}")),
    };

    match serde_json::from_str::<LenientSnapshot>(&content) {
        Ok(LenientSnapshot { snapshot, skipped }) => {
            for (name, reason) in &skipped {
                warn!(fund = %name, "ignoring unreadable series in existing snapshot: {reason}");
            }
            SnapshotLoad::Found(snapshot)
        }
        Err(e) => SnapshotLoad::Malformed(format!("parse: {e}")),
    }
}

/// Render the snapshot as written to disk: 2-space pretty JSON plus a trailing newline.
pub fn render_snapshot(snapshot: &Snapshot) -> Result<String, SnapshotError> {
    let mut json = serde_json::to_string_pretty(snapshot)?;
    json.push('\n');
    Ok(json)
}

/// Write the snapshot to `path`, creating parent directories as needed.
pub fn write_snapshot(path: &Path, snapshot: &Snapshot) -> Result<(), SnapshotError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| SnapshotError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let json = render_snapshot(snapshot)?;
    fs::write(path, json).map_err(|source| SnapshotError::Write {
        path: path.to_path_buf(),
        source,
    })
}

//! Per-environment HSV calibration ranges.
//!
//! The calibration file is a JSON object keyed by color symbol:
//!
//! ```json
//! {
//!   "W": { "h": [0, 179], "s": [0, 60],    "v": [160, 255] },
//!   "Y": { "h": [22, 38], "s": [90, 255],  "v": [140, 255] }
//! }
//! ```
//!
//! Ranges are tested in the order they appear in the file.

use std::fmt;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, info, instrument};

use super::{Color, HsvRange};
use crate::error::{CubeError, Result};

/// Ordered color -> range table loaded from a calibration file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CalibrationTable {
    entries: Vec<(Color, HsvRange)>,
}

impl CalibrationTable {
    #[must_use]
    pub const fn from_entries(entries: Vec<(Color, HsvRange)>) -> Self {
        Self { entries }
    }

    /// Entries in match order.
    #[must_use]
    pub fn entries(&self) -> &[(Color, HsvRange)] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a calibration table from JSON text.
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }
}

impl Serialize for CalibrationTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (color, range) in &self.entries {
            map.serialize_entry(color, range)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CalibrationTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = CalibrationTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of color symbols to {h, s, v} ranges")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut entries: Vec<(Color, HsvRange)> = Vec::new();
                while let Some((color, range)) = access.next_entry::<Color, HsvRange>()? {
                    // A repeated key keeps its first position but takes the later value.
                    if let Some(slot) = entries.iter_mut().find(|(c, _)| *c == color) {
                        slot.1 = range;
                    } else {
                        entries.push((color, range));
                    }
                }
                Ok(CalibrationTable { entries })
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

/// Load the calibration file if it exists.
///
/// Returns `Ok(None)` when the file is absent; that is the normal case and
/// the classifier falls back to its built-in ranges. A file that exists but
/// cannot be parsed is an error.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_calibration(path: &Path) -> Result<Option<CalibrationTable>> {
    if !path.exists() {
        debug!("No calibration file, using default thresholds");
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)?;
    let table = CalibrationTable::from_json(&content).map_err(|e| CubeError::CalibrationParse {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    if table.is_empty() {
        debug!(path = %path.display(), "Calibration file has no entries, using default thresholds");
        return Ok(None);
    }

    info!(colors = table.len(), "Loaded HSV calibration");
    Ok(Some(table))
}

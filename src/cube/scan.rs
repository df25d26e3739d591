//! Face scans and the persisted scan record.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::{CubeDescription, Face};
use crate::color::{Color, HsvSample};
use crate::error::{CubeError, Result};

/// One classified sticker and the sample it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sticker {
    pub color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample: Option<HsvSample>,
}

impl Sticker {
    #[must_use]
    pub const fn sampled(color: Color, sample: HsvSample) -> Self {
        Self {
            color,
            sample: Some(sample),
        }
    }

    #[must_use]
    pub const fn color_only(color: Color) -> Self {
        Self {
            color,
            sample: None,
        }
    }
}

/// Nine stickers of one face, row-major. Index 4 is the center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceScan {
    pub stickers: [Sticker; 9],
}

impl FaceScan {
    #[must_use]
    pub const fn new(stickers: [Sticker; 9]) -> Self {
        Self { stickers }
    }

    #[must_use]
    pub fn from_colors(colors: [Color; 9]) -> Self {
        Self {
            stickers: colors.map(Sticker::color_only),
        }
    }

    /// Parse nine color symbols such as `"WWWWWWWWW"`.
    pub fn parse(symbols: &str) -> Result<Self> {
        let colors: Vec<Color> = symbols
            .trim()
            .chars()
            .map(|c| {
                Color::from_symbol(c)
                    .ok_or_else(|| CubeError::Other(format!("Unknown color symbol '{c}' in face '{symbols}'")))
            })
            .collect::<Result<_>>()?;
        let colors: [Color; 9] = colors.try_into().map_err(|v: Vec<Color>| {
            CubeError::Other(format!("A face needs 9 stickers, got {}", v.len()))
        })?;
        Ok(Self::from_colors(colors))
    }

    #[must_use]
    pub fn colors(&self) -> [Color; 9] {
        self.stickers.map(|s| s.color)
    }

    #[must_use]
    pub const fn center(&self) -> Color {
        self.stickers[4].color
    }

    /// Symbols as a 9-character string.
    #[must_use]
    pub fn symbols(&self) -> String {
        self.stickers.iter().map(|s| s.color.symbol()).collect()
    }
}

/// Scans collected so far, one per face. Rescanning a face replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanSet {
    faces: BTreeMap<Face, FaceScan>,
}

impl ScanSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a face scan, returning the scan it replaced.
    pub fn insert(&mut self, face: Face, scan: FaceScan) -> Option<FaceScan> {
        let previous = self.faces.insert(face, scan);
        if previous.is_some() {
            debug!(%face, "Face rescanned, replacing previous scan");
        }
        previous
    }

    #[must_use]
    pub fn get(&self, face: Face) -> Option<&FaceScan> {
        self.faces.get(&face)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.faces.len() == Face::ORDER.len()
    }

    /// Faces not scanned yet, in description order.
    #[must_use]
    pub fn missing_faces(&self) -> Vec<Face> {
        Face::ORDER
            .iter()
            .copied()
            .filter(|f| !self.faces.contains_key(f))
            .collect()
    }

    /// Scanned faces in description order.
    pub fn iter(&self) -> impl Iterator<Item = (Face, &FaceScan)> {
        Face::ORDER
            .iter()
            .filter_map(|&f| self.faces.get(&f).map(|scan| (f, scan)))
    }

    /// Build the cube description.
    ///
    /// Each color maps to the face whose center shows it. If two faces share a
    /// center color the later face in description order wins, and colors with
    /// no center map to `?`; both show up as count warnings.
    pub fn describe(&self) -> Result<CubeDescription> {
        let missing = self.missing_faces();
        if !missing.is_empty() {
            return Err(CubeError::IncompleteScan {
                scanned: self.faces.len(),
                missing,
            });
        }

        let mut color_to_face: BTreeMap<Color, Face> = BTreeMap::new();
        for (face, scan) in self.iter() {
            if let Some(prev) = color_to_face.insert(scan.center(), face) {
                warn!(
                    color = %scan.center(),
                    first = %prev,
                    second = %face,
                    "Two faces share a center color"
                );
            }
        }

        let facelets: String = self
            .iter()
            .flat_map(|(_, scan)| scan.colors())
            .map(|color| color_to_face.get(&color).map_or('?', |f| f.symbol()))
            .collect();

        CubeDescription::from_facelets(facelets)
    }
}

/// Scan results persisted between the `scan` and `solve` steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRecord {
    pub captured_at: DateTime<Utc>,
    pub source: String,
    pub faces: ScanSet,
}

impl ScanRecord {
    #[must_use]
    pub fn new(source: impl Into<String>, faces: ScanSet) -> Self {
        Self {
            captured_at: Utc::now(),
            source: source.into(),
            faces,
        }
    }

    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        info!(faces = self.faces.len(), "Scan record saved");
        Ok(())
    }

    #[instrument(fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CubeError::ScanRecordNotFound {
                    path: path.display().to_string(),
                }
            } else {
                CubeError::Io(e)
            }
        })?;
        let record: Self = serde_json::from_str(&content)?;
        debug!(faces = record.faces.len(), "Scan record loaded");
        Ok(record)
    }
}

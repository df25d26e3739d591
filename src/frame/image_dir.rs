//! Frames stored as image files, one per face.
//!
//! Files are matched against a pattern with a `{face}` placeholder, e.g.
//! `{face}.png` matches `U.png`, `r.png` and so on.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use serde::Serialize;
use tracing::{debug, info, instrument, trace, warn};

use super::FrameSource;
use crate::cube::Face;
use crate::error::{CubeError, Result};

/// Default filename pattern for face frames.
pub const DEFAULT_FACE_PATTERN: &str = "{face}.png";

const PLACEHOLDER: &str = "{face}";

/// A face frame found in the directory.
#[derive(Debug, Clone, Serialize)]
pub struct FaceFile {
    pub face: Face,
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// Frame source reading face images from a directory.
#[derive(Debug, Clone)]
pub struct ImageDirSource {
    dir: PathBuf,
    files: BTreeMap<Face, FaceFile>,
    unmatched: Vec<PathBuf>,
}

impl ImageDirSource {
    /// Index the directory. Fails if it does not exist or cannot be read.
    #[instrument(skip_all, fields(dir = %dir.display(), pattern = %pattern))]
    pub fn open(dir: &Path, pattern: &str) -> Result<Self> {
        if !pattern.contains(PLACEHOLDER) {
            return Err(CubeError::ConfigInvalid(format!(
                "Face pattern '{pattern}' has no {PLACEHOLDER} placeholder"
            )));
        }
        if !dir.exists() {
            return Err(CubeError::FrameSourceUnavailable(format!(
                "directory not found: {}",
                dir.display()
            )));
        }
        if !dir.is_dir() {
            return Err(CubeError::FrameSourceUnavailable(format!(
                "not a directory: {}",
                dir.display()
            )));
        }

        let unavailable = |e: io::Error| {
            CubeError::FrameSourceUnavailable(format!("failed to read {}: {e}", dir.display()))
        };

        // Sorted for deterministic duplicate handling
        let mut entries: Vec<_> = std::fs::read_dir(dir)
            .map_err(unavailable)?
            .collect::<std::result::Result<Vec<_>, io::Error>>()
            .map_err(unavailable)?;
        entries.sort_by_key(std::fs::DirEntry::file_name);

        let mut files = BTreeMap::new();
        let mut unmatched = Vec::new();

        for entry in entries {
            let path = entry.path();
            if path.is_dir() {
                trace!(path = %path.display(), "Skipping directory");
                continue;
            }

            let Some(face) = extract_face(&path, pattern) else {
                trace!(path = %path.display(), "File doesn't match pattern");
                unmatched.push(path);
                continue;
            };

            let size_bytes = entry.metadata().map_err(unavailable)?.len();
            if let Some(prev) = files.insert(face, FaceFile { face, path: path.clone(), size_bytes }) {
                warn!(
                    %face,
                    prev_path = %prev.path.display(),
                    new_path = %path.display(),
                    "Duplicate face frame - using later file"
                );
            } else {
                debug!(%face, path = %path.display(), size = size_bytes, "Matched face frame");
            }
        }

        info!(
            matched = files.len(),
            unmatched = unmatched.len(),
            "Frame directory indexed"
        );

        Ok(Self {
            dir: dir.to_path_buf(),
            files,
            unmatched,
        })
    }

    /// Matched frames in face order.
    pub fn files(&self) -> impl Iterator<Item = &FaceFile> {
        self.files.values()
    }

    /// Files that did not match the pattern.
    #[must_use]
    pub fn unmatched(&self) -> &[PathBuf] {
        &self.unmatched
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl FrameSource for ImageDirSource {
    fn describe(&self) -> String {
        self.dir.display().to_string()
    }

    fn capture(&mut self, face: Face) -> Result<Option<DynamicImage>> {
        let Some(file) = self.files.get(&face) else {
            return Ok(None);
        };
        let frame = image::open(&file.path).map_err(|e| CubeError::FrameDecode {
            path: file.path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Some(frame))
    }
}

/// Extract the face letter from a filename matching `pattern`.
///
/// `{face}.png` matches `U.png` and `u.png`; `face-{face}.jpg` matches
/// `face-R.jpg`.
fn extract_face(path: &Path, pattern: &str) -> Option<Face> {
    let filename = path.file_name()?.to_str()?;
    let (prefix, suffix) = pattern.split_once(PLACEHOLDER)?;

    if filename.len() < prefix.len() + suffix.len() {
        return None;
    }
    let lower = filename.to_ascii_lowercase();
    if !lower.starts_with(&prefix.to_ascii_lowercase())
        || !lower.ends_with(&suffix.to_ascii_lowercase())
    {
        return None;
    }

    let middle = &filename[prefix.len()..filename.len() - suffix.len()];
    let mut chars = middle.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Face::from_symbol(c),
        _ => None,
    }
}

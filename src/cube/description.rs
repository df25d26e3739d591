//! The 54-facelet cube description handed to the solver.

use std::fmt;

use serde::Serialize;

use super::Face;
use crate::error::{CubeError, Result};

/// Number of facelets in a description.
pub const FACELET_COUNT: usize = 54;

/// A 54-symbol facelet string in U, R, F, D, L, B face order.
///
/// Symbols are normally face letters; a sticker whose color is not the
/// center of any face is written as `?`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CubeDescription(String);

/// A face symbol whose count differs from nine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountWarning {
    pub face: Face,
    pub count: usize,
}

impl fmt::Display for CountWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} count = {} (should be 9)", self.face, self.count)
    }
}

impl CubeDescription {
    /// Accept any 54-character string. Symbol validity is left to the solver.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let actual = s.chars().count();
        if actual != FACELET_COUNT {
            return Err(CubeError::InvalidDescriptionLength { actual });
        }
        Ok(Self(s.to_string()))
    }

    pub(crate) fn from_facelets(facelets: String) -> Result<Self> {
        Self::parse(&facelets)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Faces whose symbol does not appear exactly nine times.
    #[must_use]
    pub fn count_warnings(&self) -> Vec<CountWarning> {
        Face::ORDER
            .iter()
            .filter_map(|&face| {
                let count = self.0.chars().filter(|&c| c == face.symbol()).count();
                (count != 9).then_some(CountWarning { face, count })
            })
            .collect()
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        is_solved(&self.0)
    }
}

impl fmt::Display for CubeDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// True iff `facelets` has 54 symbols and each 9-symbol face block is uniform.
#[must_use]
pub fn is_solved(facelets: &str) -> bool {
    let chars: Vec<char> = facelets.chars().collect();
    if chars.len() != FACELET_COUNT {
        return false;
    }
    chars
        .chunks(9)
        .all(|block| block.iter().all(|&c| c == block[0]))
}

//! Cube model: faces, face scans and the 54-facelet description.

mod description;
pub mod moves;
mod scan;

pub use description::{CountWarning, CubeDescription, FACELET_COUNT, is_solved};
pub use moves::{Move, Turn};
pub use scan::{FaceScan, ScanRecord, ScanSet, Sticker};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CubeError;

/// Face identifier, in the order faces appear in a cube description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Face {
    U,
    R,
    F,
    D,
    L,
    B,
}

impl Face {
    /// Fixed description order: U, R, F, D, L, B.
    pub const ORDER: [Self; 6] = [Self::U, Self::R, Self::F, Self::D, Self::L, Self::B];

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::U => 'U',
            Self::R => 'R',
            Self::F => 'F',
            Self::D => 'D',
            Self::L => 'L',
            Self::B => 'B',
        }
    }

    #[must_use]
    pub const fn from_symbol(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'U' => Some(Self::U),
            'R' => Some(Self::R),
            'F' => Some(Self::F),
            'D' => Some(Self::D),
            'L' => Some(Self::L),
            'B' => Some(Self::B),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::U => "up",
            Self::R => "right",
            Self::F => "front",
            Self::D => "down",
            Self::L => "left",
            Self::B => "back",
        }
    }

    /// Position of this face in the description.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Face {
    type Err = CubeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_symbol(c),
            _ => None,
        }
        .ok_or_else(|| CubeError::Other(format!("Unknown face '{s}': expected U, R, F, D, L or B")))
    }
}

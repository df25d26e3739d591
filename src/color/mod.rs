//! Sticker color symbols and HSV classification.
//!
//! Samples use the 8-bit HSV convention common to camera pipelines: hue in
//! half-degrees (0-179), saturation and value in 0-255.

mod calibration;
mod classify;

pub use calibration::{CalibrationTable, load_calibration};
pub use classify::{Classifier, classify, default_ranges};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CubeError;

/// One of the six sticker colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    #[serde(rename = "W")]
    White,
    #[serde(rename = "Y")]
    Yellow,
    #[serde(rename = "O")]
    Orange,
    #[serde(rename = "R")]
    Red,
    #[serde(rename = "G")]
    Green,
    #[serde(rename = "B")]
    Blue,
}

impl Color {
    /// All colors in symbol order W, Y, O, R, G, B.
    pub const ALL: [Self; 6] = [
        Self::White,
        Self::Yellow,
        Self::Orange,
        Self::Red,
        Self::Green,
        Self::Blue,
    ];

    /// Single-letter symbol.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::White => 'W',
            Self::Yellow => 'Y',
            Self::Orange => 'O',
            Self::Red => 'R',
            Self::Green => 'G',
            Self::Blue => 'B',
        }
    }

    /// Parse a single-letter symbol (case-insensitive).
    #[must_use]
    pub const fn from_symbol(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'W' => Some(Self::White),
            'Y' => Some(Self::Yellow),
            'O' => Some(Self::Orange),
            'R' => Some(Self::Red),
            'G' => Some(Self::Green),
            'B' => Some(Self::Blue),
            _ => None,
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Yellow => "yellow",
            Self::Orange => "orange",
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Color {
    type Err = CubeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_symbol(c),
            _ => None,
        }
        .ok_or_else(|| CubeError::Other(format!("Unknown color symbol '{s}': expected W, Y, O, R, G or B")))
    }
}

/// A single (hue, saturation, value) sample from one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvSample {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

impl HsvSample {
    #[must_use]
    pub const fn new(h: u8, s: u8, v: u8) -> Self {
        Self { h, s, v }
    }
}

impl fmt::Display for HsvSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H:{} S:{} V:{}", self.h, self.s, self.v)
    }
}

/// Inclusive hue/saturation/value box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvRange {
    pub h: (u8, u8),
    pub s: (u8, u8),
    pub v: (u8, u8),
}

impl HsvRange {
    #[must_use]
    pub const fn new(h: (u8, u8), s: (u8, u8), v: (u8, u8)) -> Self {
        Self { h, s, v }
    }

    /// True if the sample lies inside the box, bounds included.
    #[must_use]
    pub const fn contains(&self, sample: HsvSample) -> bool {
        self.h.0 <= sample.h
            && sample.h <= self.h.1
            && self.s.0 <= sample.s
            && sample.s <= self.s.1
            && self.v.0 <= sample.v
            && sample.v <= self.v.1
    }
}

//! Standard move notation: a face letter optionally followed by `'` (or `′`)
//! for a counter-clockwise turn or `2` for a half turn.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::Face;
use crate::error::CubeError;

/// Direction and amount of a face turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Turn {
    Clockwise,
    CounterClockwise,
    Double,
}

impl Turn {
    /// Quarter turns a person performs for this move.
    #[must_use]
    pub const fn quarter_turns(self) -> usize {
        match self {
            Self::Clockwise | Self::CounterClockwise => 1,
            Self::Double => 2,
        }
    }
}

/// A parsed move token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Move {
    pub face: Face,
    pub turn: Turn,
}

impl Move {
    #[must_use]
    pub const fn new(face: Face, turn: Turn) -> Self {
        Self { face, turn }
    }

    #[must_use]
    pub const fn is_double(self) -> bool {
        matches!(self.turn, Turn::Double)
    }

    /// Short instruction for the person holding the cube.
    #[must_use]
    pub fn instruction(self) -> String {
        let direction = match self.turn {
            Turn::Clockwise => "clockwise",
            Turn::CounterClockwise => "counter-clockwise",
            Turn::Double => "twice",
        };
        format!("Turn the {} face {direction}", self.face.name())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.turn {
            Turn::Clockwise => write!(f, "{}", self.face),
            Turn::CounterClockwise => write!(f, "{}'", self.face),
            Turn::Double => write!(f, "{}2", self.face),
        }
    }
}

impl FromStr for Move {
    type Err = CubeError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let invalid = || CubeError::Other(format!("Invalid move '{token}'"));
        let mut chars = token.trim().chars();
        let face = chars.next().and_then(Face::from_symbol).ok_or_else(invalid)?;
        let turn = match (chars.next(), chars.next()) {
            (None, _) => Turn::Clockwise,
            (Some('\'' | '′' | '’'), None) => Turn::CounterClockwise,
            (Some('2'), None) => Turn::Double,
            _ => return Err(invalid()),
        };
        Ok(Self::new(face, turn))
    }
}

/// Split a solver move string into tokens.
#[must_use]
pub fn tokenize(solution: &str) -> Vec<String> {
    solution.split_whitespace().map(str::to_string).collect()
}

/// Physical turn count: a token ending in `2` counts twice, anything else once.
#[must_use]
pub fn turn_count<S: AsRef<str>>(tokens: &[S]) -> usize {
    tokens
        .iter()
        .map(|t| if t.as_ref().ends_with('2') { 2 } else { 1 })
        .sum()
}

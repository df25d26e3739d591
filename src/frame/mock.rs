//! In-memory frame source for testing without a camera.
//!
//! # Example
//!
//! ```rust,ignore
//! use cubeguide::frame::mock::MockFrameSource;
//! use cubeguide::cube::Face;
//!
//! let mut source = MockFrameSource::solved().without(Face::B);
//! ```

use std::collections::BTreeMap;

use image::{DynamicImage, Rgb, RgbImage};
use tracing::debug;

use super::FrameSource;
use super::grid::{FRAME_HEIGHT, FRAME_WIDTH, GRID_SPACING, grid_points};
use crate::color::Color;
use crate::cube::Face;
use crate::error::{CubeError, Result};

/// An RGB value each color classifies as under the default thresholds.
#[must_use]
pub const fn reference_rgb(color: Color) -> Rgb<u8> {
    match color {
        Color::White => Rgb([235, 235, 235]),
        Color::Yellow => Rgb([230, 220, 20]),
        Color::Orange => Rgb([240, 120, 10]),
        Color::Red => Rgb([200, 20, 20]),
        Color::Green => Rgb([20, 180, 20]),
        Color::Blue => Rgb([20, 40, 200]),
    }
}

/// Face colors of a solved cube with the usual color scheme.
pub const SOLVED_SCHEME: [(Face, Color); 6] = [
    (Face::U, Color::White),
    (Face::R, Color::Red),
    (Face::F, Color::Green),
    (Face::D, Color::Yellow),
    (Face::L, Color::Orange),
    (Face::B, Color::Blue),
];

/// Render a frame whose nine grid cells show `colors` (row-major).
#[must_use]
pub fn render_face(colors: [Color; 9]) -> DynamicImage {
    let mut img = RgbImage::from_pixel(FRAME_WIDTH, FRAME_HEIGHT, Rgb([0, 0, 0]));
    let half = GRID_SPACING / 2 - 10;
    for ((cx, cy), color) in grid_points().into_iter().zip(colors) {
        let rgb = reference_rgb(color);
        for y in cy - half..=cy + half {
            for x in cx - half..=cx + half {
                img.put_pixel(x, y, rgb);
            }
        }
    }
    DynamicImage::ImageRgb8(img)
}

/// Mock frame source serving pre-rendered frames.
#[derive(Debug, Clone, Default)]
pub struct MockFrameSource {
    frames: BTreeMap<Face, DynamicImage>,
    unavailable: bool,
    captures: Vec<Face>,
}

impl MockFrameSource {
    /// A source with no frames at all.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Frames of a solved cube.
    #[must_use]
    pub fn solved() -> Self {
        SOLVED_SCHEME
            .iter()
            .fold(Self::empty(), |src, &(face, color)| src.with_face(face, [color; 9]))
    }

    /// Set the frame for `face`.
    #[must_use]
    pub fn with_face(mut self, face: Face, colors: [Color; 9]) -> Self {
        self.frames.insert(face, render_face(colors));
        self
    }

    /// Set a raw frame for `face`.
    #[must_use]
    pub fn with_frame(mut self, face: Face, frame: DynamicImage) -> Self {
        self.frames.insert(face, frame);
        self
    }

    /// Drop the frame for `face`.
    #[must_use]
    pub fn without(mut self, face: Face) -> Self {
        self.frames.remove(&face);
        self
    }

    /// Make every capture fail like a missing camera.
    #[must_use]
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    /// Faces requested so far, in order.
    #[must_use]
    pub fn captures(&self) -> &[Face] {
        &self.captures
    }
}

impl FrameSource for MockFrameSource {
    fn describe(&self) -> String {
        format!("mock ({} frames)", self.frames.len())
    }

    fn capture(&mut self, face: Face) -> Result<Option<DynamicImage>> {
        self.captures.push(face);
        if self.unavailable {
            return Err(CubeError::FrameSourceUnavailable("mock camera offline".to_string()));
        }
        debug!(%face, present = self.frames.contains_key(&face), "Mock capture");
        Ok(self.frames.get(&face).cloned())
    }
}

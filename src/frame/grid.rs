//! Frame normalization and 3x3 grid sampling.

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, RgbImage};
use tracing::trace;

use super::hsv::rgb_to_hsv;
use crate::color::HsvSample;

/// Width frames are resized to before sampling.
pub const FRAME_WIDTH: u32 = 750;
/// Height frames are resized to before sampling.
pub const FRAME_HEIGHT: u32 = 640;
/// Distance in pixels between neighbouring grid points.
pub const GRID_SPACING: u32 = 160;

/// Resize a frame to the scan resolution, ignoring aspect ratio.
#[must_use]
pub fn normalize_frame(frame: &DynamicImage) -> RgbImage {
    let (w, h) = frame.dimensions();
    if (w, h) == (FRAME_WIDTH, FRAME_HEIGHT) {
        return frame.to_rgb8();
    }
    trace!(from_w = w, from_h = h, "Resizing frame");
    frame
        .resize_exact(FRAME_WIDTH, FRAME_HEIGHT, FilterType::Triangle)
        .to_rgb8()
}

/// Sample points, row-major, centered on the frame.
#[must_use]
pub fn grid_points() -> [(u32, u32); 9] {
    let (cx, cy) = (FRAME_WIDTH / 2, FRAME_HEIGHT / 2);
    std::array::from_fn(|i| {
        let (row, col) = (i / 3, i % 3);
        // col/row 0 sits one spacing left/above the center
        #[allow(clippy::cast_possible_truncation)]
        let (row, col) = (row as u32, col as u32);
        (cx + col * GRID_SPACING - GRID_SPACING, cy + row * GRID_SPACING - GRID_SPACING)
    })
}

/// Read the HSV sample at each grid point of a normalized frame.
#[must_use]
pub fn sample_grid(frame: &RgbImage) -> [HsvSample; 9] {
    grid_points().map(|(x, y)| {
        let [r, g, b] = frame.get_pixel(x, y).0;
        rgb_to_hsv(r, g, b)
    })
}

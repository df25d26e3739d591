//! RGB to 8-bit HSV conversion.

use crate::color::HsvSample;

/// Convert an RGB pixel to HSV with hue in half-degrees (0-179) and
/// saturation/value scaled to 0-255.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> HsvSample {
    let (rf, gf, bf) = (f32::from(r), f32::from(g), f32::from(b));
    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let s = if max == 0.0 { 0.0 } else { delta * 255.0 / max };

    let mut h = if delta == 0.0 {
        0.0
    } else if max == rf {
        60.0 * (gf - bf) / delta
    } else if max == gf {
        120.0 + 60.0 * (bf - rf) / delta
    } else {
        240.0 + 60.0 * (rf - gf) / delta
    };
    if h < 0.0 {
        h += 360.0;
    }

    let mut half = (h / 2.0).round() as u16;
    if half >= 180 {
        half -= 180;
    }

    HsvSample::new(half as u8, s.round() as u8, max as u8)
}

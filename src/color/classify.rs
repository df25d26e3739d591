//! Sample-to-color classification.

use tracing::trace;

use super::{CalibrationTable, Color, HsvRange, HsvSample};

/// Built-in ranges used when no calibration is loaded, in match order.
///
/// Red only covers the low end of the hue circle here; high hues fall
/// through to the final cascade, which maps them back to red.
#[must_use]
pub fn default_ranges() -> [(Color, HsvRange); 5] {
    [
        (Color::Yellow, HsvRange::new((20, 42), (80, 255), (150, 255))),
        (Color::Orange, HsvRange::new((8, 19), (150, 255), (120, 255))),
        (Color::Red, HsvRange::new((0, 7), (120, 255), (80, 210))),
        (Color::Green, HsvRange::new((45, 90), (80, 255), (100, 255))),
        (Color::Blue, HsvRange::new((95, 135), (80, 255), (70, 220))),
    ]
}

/// Classify one sample. Never fails: every input maps to a color.
///
/// Order of checks:
/// 1. white special cases (low saturation, high value), always first
/// 2. calibration boxes in file order, or the default table
/// 3. a hue/saturation cascade that always yields a color
#[must_use]
pub fn classify(sample: HsvSample, calibration: Option<&CalibrationTable>) -> Color {
    let HsvSample { h, s, v } = sample;
    let calibration = calibration.filter(|table| !table.is_empty());

    // White has no stable hue.
    if s < 75 && v > 150 {
        return Color::White;
    }
    if s < 90 && v > 180 {
        return Color::White;
    }

    let matched = match calibration {
        Some(table) => first_match(table.entries(), sample),
        None => first_match(&default_ranges(), sample),
    };
    if let Some(color) = matched {
        trace!(%sample, %color, calibrated = calibration.is_some(), "Range match");
        return color;
    }

    trace!(%sample, "No range matched, using fallback cascade");
    if v > 140 && s < 80 {
        Color::White
    } else if h < 20 && s > 100 {
        Color::Orange
    } else if h < 45 && s > 70 {
        Color::Yellow
    } else if h < 90 {
        Color::Green
    } else if h < 140 {
        Color::Blue
    } else {
        Color::Red
    }
}

fn first_match(ranges: &[(Color, HsvRange)], sample: HsvSample) -> Option<Color> {
    ranges
        .iter()
        .find(|(_, range)| range.contains(sample))
        .map(|(color, _)| *color)
}

/// Classifier bound to the calibration loaded at startup.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    calibration: Option<CalibrationTable>,
}

impl Classifier {
    #[must_use]
    pub const fn new(calibration: Option<CalibrationTable>) -> Self {
        Self { calibration }
    }

    #[must_use]
    pub fn classify(&self, sample: HsvSample) -> Color {
        classify(sample, self.calibration.as_ref())
    }

    #[must_use]
    pub const fn calibration(&self) -> Option<&CalibrationTable> {
        self.calibration.as_ref()
    }

    /// The ranges actually in effect, in match order.
    #[must_use]
    pub fn active_ranges(&self) -> Vec<(Color, HsvRange)> {
        match &self.calibration {
            Some(table) if !table.is_empty() => table.entries().to_vec(),
            _ => default_ranges().to_vec(),
        }
    }
}

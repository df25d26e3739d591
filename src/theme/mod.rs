//! Theme system for human-mode output.

use colored::{ColoredString, Colorize};

use crate::color::Color;

/// Visual theme for human-mode output.
///
/// Centralizes colors and styles for consistent rendering.
pub struct CubeTheme {
    // Brand colors
    pub accent: colored::Color,
    pub success: colored::Color,
    pub error: colored::Color,
    pub warning: colored::Color,
    pub muted: colored::Color,
}

impl Default for CubeTheme {
    fn default() -> Self {
        let hex = |r, g, b| colored::Color::TrueColor { r, g, b };
        Self {
            accent: hex(0x00, 0x80, 0xFF),
            success: hex(0x00, 0xD2, 0x6A),
            error: hex(0xFF, 0x47, 0x57),
            warning: hex(0xFF, 0xA5, 0x02),
            muted: hex(0x74, 0x7D, 0x8C),
        }
    }
}

impl CubeTheme {
    pub fn header(&self, text: &str) -> ColoredString {
        text.bold().color(self.accent)
    }

    pub fn label(&self, text: &str) -> ColoredString {
        text.dimmed()
    }

    pub fn value(&self, text: &str) -> ColoredString {
        text.bold()
    }

    /// Background color of a sticker swatch.
    #[must_use]
    pub const fn sticker_background(color: Color) -> colored::Color {
        let (r, g, b) = match color {
            Color::White => (0xF5, 0xF5, 0xF5),
            Color::Yellow => (0xFF, 0xD5, 0x00),
            Color::Orange => (0xFF, 0x58, 0x00),
            Color::Red => (0xC4, 0x1E, 0x3A),
            Color::Green => (0x00, 0x9E, 0x60),
            Color::Blue => (0x00, 0x51, 0xBA),
        };
        colored::Color::TrueColor { r, g, b }
    }

    /// A sticker rendered as its symbol on its own color.
    pub fn sticker(&self, color: Color) -> ColoredString {
        let fg = match color {
            Color::White | Color::Yellow => colored::Color::Black,
            _ => colored::Color::White,
        };
        format!(" {} ", color.symbol())
            .color(fg)
            .on_color(Self::sticker_background(color))
    }
}

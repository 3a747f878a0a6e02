use std::fmt;

use serde::{Deserialize, Serialize};

/// 8-bit RGB color; displays as an SVG `rgb(r,g,b)` paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    #[must_use]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const AXIS: Self = Self::rgb(0x33, 0x33, 0x33);
    pub const MUTED_TEXT: Self = Self::rgb(0x66, 0x66, 0x66);
    pub const GRID: Self = Self::rgb(0xdd, 0xdd, 0xdd);
    pub const SERIES: Self = Self::rgb(0x1f, 0x77, 0xb4);
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.red, self.green, self.blue)
    }
}

/// Hue at `t = 0` (red).
pub const GRADIENT_HUE_START: f64 = 0.0;
/// Hue at `t = 1` (purple).
pub const GRADIENT_HUE_END: f64 = 300.0;

/// Standard HSL to RGB conversion. `hue` is in degrees and wraps; saturation
/// and lightness are in `[0, 1]`.
#[must_use]
pub fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> Color {
    let hue = hue.rem_euclid(360.0);
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = chroma * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());
    let m = lightness - chroma / 2.0;

    let (r, g, b) = if hue < 60.0 {
        (chroma, x, 0.0)
    } else if hue < 120.0 {
        (x, chroma, 0.0)
    } else if hue < 180.0 {
        (0.0, chroma, x)
    } else if hue < 240.0 {
        (0.0, x, chroma)
    } else if hue < 300.0 {
        (x, 0.0, chroma)
    } else {
        (chroma, 0.0, x)
    };

    Color::rgb(to_channel(r + m), to_channel(g + m), to_channel(b + m))
}

fn to_channel(value: f64) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Hue for gradient position `t`, clamped to `[0, 1]`.
#[must_use]
pub fn gradient_hue(t: f64) -> f64 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    GRADIENT_HUE_START + (GRADIENT_HUE_END - GRADIENT_HUE_START) * t
}

/// Maps `t` in `[0, 1]` onto the red → purple start-time gradient.
#[must_use]
pub fn interpolate_color(t: f64) -> Color {
    hsl_to_rgb(gradient_hue(t), 1.0, 0.5)
}

const HIGHLIGHT_PALETTE: [Color; 10] = [
    Color::rgb(0xff, 0x44, 0x44),
    Color::rgb(0xff, 0x8c, 0x00),
    Color::rgb(0x2c, 0xa0, 0x2c),
    Color::rgb(0x94, 0x67, 0xbd),
    Color::rgb(0xe3, 0x77, 0xc2),
    Color::rgb(0x17, 0xbe, 0xcf),
    Color::rgb(0x8c, 0x56, 0x4b),
    Color::rgb(0xbc, 0xbd, 0x22),
    Color::rgb(0x00, 0x00, 0x75),
    Color::rgb(0x7f, 0x7f, 0x7f),
];

/// Distinct solid color for the highlight at `index`, cycling the palette.
#[must_use]
pub fn highlight_color(index: usize) -> Color {
    HIGHLIGHT_PALETTE[index % HIGHLIGHT_PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_ends_are_red_and_purple() {
        assert_eq!(interpolate_color(0.0), Color::rgb(255, 0, 0));
        assert_eq!(interpolate_color(1.0), Color::rgb(255, 0, 255));
        assert_eq!(interpolate_color(1.0).to_string(), "rgb(255,0,255)");
    }

    #[test]
    fn gradient_input_is_clamped() {
        assert_eq!(interpolate_color(-3.0), interpolate_color(0.0));
        assert_eq!(interpolate_color(7.5), interpolate_color(1.0));
    }

    #[test]
    fn hsl_primaries_convert_exactly() {
        assert_eq!(hsl_to_rgb(120.0, 1.0, 0.5), Color::rgb(0, 255, 0));
        assert_eq!(hsl_to_rgb(240.0, 1.0, 0.5), Color::rgb(0, 0, 255));
        assert_eq!(hsl_to_rgb(480.0, 1.0, 0.5), Color::rgb(0, 255, 0));
        assert_eq!(hsl_to_rgb(0.0, 0.0, 1.0), Color::WHITE);
    }

    #[test]
    fn palette_cycles() {
        assert_eq!(highlight_color(0), highlight_color(10));
        assert_ne!(highlight_color(0), highlight_color(1));
    }
}

//! Quantized display color for the simulated star

use serde::Serialize;
use std::fmt;

/// Convert a linear intensity in "255 units" to an 8-bit channel.
///
/// Values are rounded half away from zero then clamped to [0, 255]; bright
/// coatings can push the product well past 255 and must saturate rather than wrap.
pub fn quantize_channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}

/// 8-bit RGB tint applied to the star and its effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Tint {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Tint {
    pub const WHITE: Tint = Tint::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale every channel, re-quantizing with the same rounding and clamping
    pub fn scaled(&self, factor: f64) -> Tint {
        Tint::new(
            quantize_channel(self.r as f64 * factor),
            quantize_channel(self.g as f64 * factor),
            quantize_channel(self.b as f64 * factor),
        )
    }

    /// Hex form, e.g. `#ffcc00`
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Tint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

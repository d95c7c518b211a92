//! `SolidColor`, the color carried by handles and reported by the wheel.
//!
//! Stores RGB as f64 values in 0.0–1.0 range. Alpha is always 1.0 on the
//! wheel, so it is not stored. Serializes as an uppercase `RRGGBB` string.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseColorError;
use crate::kelvin;
use crate::math;

/// Opaque RGB color with components in the 0.0–1.0 range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SolidColor {
    r: f64,
    g: f64,
    b: f64,
}

impl SolidColor {
    pub const WHITE: SolidColor = SolidColor {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    pub const BLACK: SolidColor = SolidColor {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// Neutral fallback for malformed input.
    pub const GRAY: SolidColor = SolidColor {
        r: 0.5,
        g: 0.5,
        b: 0.5,
    };

    /// Red component (0.0–1.0).
    pub fn r(&self) -> f64 {
        self.r
    }
    /// Green component (0.0–1.0).
    pub fn g(&self) -> f64 {
        self.g
    }
    /// Blue component (0.0–1.0).
    pub fn b(&self) -> f64 {
        self.b
    }
}

impl Default for SolidColor {
    fn default() -> Self {
        Self::WHITE
    }
}

impl SolidColor {
    /// Create from f64 RGB, each clamped to 0.0–1.0.
    pub fn from_rgb_f64(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
        }
    }

    /// Create from 0–255 RGB values.
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }

    /// Convert to 0–255 RGB tuple.
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        (
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
        )
    }

    /// Create from HSB/HSV values (all 0.0–1.0, hue wraps).
    pub fn from_hsb(h: f64, s: f64, b: f64) -> Self {
        let (r, g, bl) = math::hsb_to_rgb(h, s.clamp(0.0, 1.0), b.clamp(0.0, 1.0));
        Self::from_rgb_f64(r, g, bl)
    }

    /// Convert to HSB. Returns (h, s, b) with h in [0, 1).
    pub fn to_hsb(&self) -> (f64, f64, f64) {
        math::rgb_to_hsb(self.r, self.g, self.b)
    }

    pub fn hue(&self) -> f64 {
        self.to_hsb().0
    }

    pub fn saturation(&self) -> f64 {
        self.to_hsb().1
    }

    pub fn brightness(&self) -> f64 {
        self.to_hsb().2
    }

    /// The same hue and saturation at a different brightness.
    pub fn with_brightness(&self, brightness: f64) -> Self {
        let (h, s, _) = self.to_hsb();
        Self::from_hsb(h, s, brightness)
    }

    /// Perceived lightness (YIQ weighting), 0.0–1.0.
    pub fn lightness(&self) -> f64 {
        math::yiq_lightness(self.r, self.g, self.b)
    }

    /// Whether the color reads as light for contrast purposes.
    pub fn is_light(&self) -> bool {
        self.lightness() >= 0.5
    }

    /// The color of a black body at `kelvin`. See [`kelvin::color_for_temperature`].
    pub fn from_temperature(kelvin: f64) -> Self {
        kelvin::color_for_temperature(kelvin)
    }

    /// Nearest scanned Kelvin temperature. See [`kelvin::temperature_for_color`].
    pub fn temperature(&self) -> f64 {
        kelvin::temperature_for_color(*self)
    }

    /// Parse a 6-digit hex string, with or without `#`, ignoring surrounding
    /// whitespace and case.
    pub fn from_hex(hex: &str) -> Option<Self> {
        hex.parse().ok()
    }

    /// Like [`SolidColor::from_hex`], but malformed input yields [`SolidColor::GRAY`].
    pub fn from_hex_or_gray(hex: &str) -> Self {
        Self::from_hex(hex).unwrap_or(Self::GRAY)
    }

    /// Format as uppercase hex (no `#` prefix), always 6 chars.
    pub fn to_hex(&self) -> String {
        let (r, g, b) = self.to_rgb();
        format!("{:02X}{:02X}{:02X}", r, g, b)
    }
}

impl FromStr for SolidColor {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let stripped = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if let Some(bad) = stripped.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ParseColorError::InvalidDigit(bad));
        }
        if stripped.len() != 6 {
            return Err(ParseColorError::InvalidLength(stripped.len()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&stripped[range], 16)
                .map_err(|_| ParseColorError::InvalidLength(stripped.len()))
        };
        Ok(Self::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for SolidColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

impl TryFrom<String> for SolidColor {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SolidColor> for String {
    fn from(color: SolidColor) -> Self {
        color.to_hex()
    }
}

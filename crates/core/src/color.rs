//! Colors and colored runs
//!
//! [`Color`] is a plain RGB triple. [`RunColor`] adds the reset sentinel that
//! the console resolves to its configured default foreground when rendering.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// An RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
}

/// Error returned when a color string cannot be decoded
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid color '{0}', expected #rrggbb")]
pub struct ColorParseError(pub String);

impl Color {
    /// Black
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// White
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    /// Pure green, the default console foreground
    pub const GREEN: Color = Color::rgb(0, 255, 0);

    /// Create a new color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert hue/saturation/brightness (each 0.0-1.0) to RGB.
    ///
    /// Channels are rounded half up, so the color table comes out as e.g.
    /// `(128, 0, 0)` for dim red.
    pub fn from_hsb(hue: f32, saturation: f32, brightness: f32) -> Self {
        let channel = |v: f32| (v * 255.0 + 0.5) as u8;

        if saturation == 0.0 {
            let v = channel(brightness);
            return Self::rgb(v, v, v);
        }

        let h = (hue - hue.floor()) * 6.0;
        let f = h - h.floor();
        let p = brightness * (1.0 - saturation);
        let q = brightness * (1.0 - saturation * f);
        let t = brightness * (1.0 - saturation * (1.0 - f));

        let (r, g, b) = match h as u32 {
            0 => (brightness, t, p),
            1 => (q, brightness, p),
            2 => (p, brightness, t),
            3 => (p, q, brightness),
            4 => (t, p, brightness),
            _ => (brightness, p, q),
        };
        Self::rgb(channel(r), channel(g), channel(b))
    }

    /// Parse `#rrggbb` (the leading `#` is optional)
    pub fn parse_hex(s: &str) -> Result<Self, ColorParseError> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        Self::from_hex_digits(digits).ok_or_else(|| ColorParseError(s.to_string()))
    }

    /// Decode a `0xRRGGBB` hex directive
    pub fn from_hex_directive(s: &str) -> Option<Self> {
        s.strip_prefix("0x").and_then(Self::from_hex_digits)
    }

    fn from_hex_digits(digits: &str) -> Option<Self> {
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Format as a `0xrrggbb` hex directive that the decoder understands
    pub fn to_hex_directive(&self) -> String {
        format!("0x{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Perceptual distance between two colors ("redmean" weighting)
    pub fn distance(&self, other: &Color) -> f64 {
        let (r1, g1, b1) = (self.r as i32, self.g as i32, self.b as i32);
        let (r2, g2, b2) = (other.r as i32, other.g as i32, other.b as i32);
        let rmean = (r1 + r2) / 2;
        let r = r1 - r2;
        let g = g1 - g2;
        let b = b1 - b2;
        let sum = (((512 + rmean) * r * r) >> 8) + 4 * g * g + (((767 - rmean) * b * b) >> 8);
        (sum as f64).sqrt()
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::parse_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Foreground of a run: either a concrete color or the reset sentinel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RunColor {
    /// The console's configured default foreground, resolved at render time
    #[default]
    Default,
    /// An explicit color
    Rgb(Color),
}

impl RunColor {
    /// Resolve the sentinel against the configured default foreground
    pub fn resolve(self, default_fg: Color) -> Color {
        match self {
            RunColor::Default => default_fg,
            RunColor::Rgb(color) => color,
        }
    }
}

impl From<Color> for RunColor {
    fn from(color: Color) -> Self {
        RunColor::Rgb(color)
    }
}

/// A piece of text sharing one foreground color
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    /// Foreground of every character in `text`
    pub color: RunColor,
    /// The characters
    pub text: String,
}

impl Run {
    /// Create a new run
    pub fn new(color: impl Into<RunColor>, text: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            text: text.into(),
        }
    }

    /// Number of characters in the run
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

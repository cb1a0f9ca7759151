// ABOUTME: Color representation and CSS-style color parsing.
// ABOUTME: Colors travel through config and layout files as strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ColorError {
    #[error("Invalid hex color: {0}")]
    InvalidHex(String),

    #[error("Invalid color function: {0}")]
    InvalidFunction(String),

    #[error("Unknown color format: {0}")]
    UnknownFormat(String),
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build from 8-bit channels and a 0..1 alpha
    pub fn from_rgb8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self::rgba(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a)
    }

    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    /// Default pane background (#4b5563)
    pub const SLATE: Self = Self::rgb(75.0 / 255.0, 85.0 / 255.0, 99.0 / 255.0);

    /// Default pane border (#909090)
    pub const GRAY: Self = Self::rgb(144.0 / 255.0, 144.0 / 255.0, 144.0 / 255.0);

    /// Default splitter highlight, 20% black
    pub const SPLITTER: Self = Self::rgba(0.0, 0.0, 0.0, 0.2);

    fn channel_u8(v: f32) -> u8 {
        (v.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    pub fn to_rgb8(&self) -> [u8; 3] {
        [
            Self::channel_u8(self.r),
            Self::channel_u8(self.g),
            Self::channel_u8(self.b),
        ]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::SLATE
    }
}

fn parse_hex(hex: &str, input: &str) -> Result<Color, ColorError> {
    let invalid = || ColorError::InvalidHex(input.to_string());
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
    let nibble = |i: usize| {
        u8::from_str_radix(&hex[i..i + 1], 16)
            .map(|v| v * 17)
            .map_err(|_| invalid())
    };

    match hex.len() {
        3 => Ok(Color::from_rgb8(nibble(0)?, nibble(1)?, nibble(2)?, 1.0)),
        6 => Ok(Color::from_rgb8(byte(0)?, byte(2)?, byte(4)?, 1.0)),
        8 => Ok(Color::from_rgb8(
            byte(0)?,
            byte(2)?,
            byte(4)?,
            byte(6)? as f32 / 255.0,
        )),
        _ => Err(invalid()),
    }
}

fn parse_function(args: &str, with_alpha: bool, input: &str) -> Result<Color, ColorError> {
    let invalid = || ColorError::InvalidFunction(input.to_string());
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    let expected = if with_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return Err(invalid());
    }

    let mut channels = [0u8; 3];
    for (slot, part) in channels.iter_mut().zip(&parts) {
        let value: f32 = part.parse().map_err(|_| invalid())?;
        *slot = value.clamp(0.0, 255.0).round() as u8;
    }
    let alpha = if with_alpha {
        let value: f32 = parts[3].parse().map_err(|_| invalid())?;
        value.clamp(0.0, 1.0)
    } else {
        1.0
    };

    Ok(Color::from_rgb8(channels[0], channels[1], channels[2], alpha))
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let lower = text.to_ascii_lowercase();

        if lower == "transparent" {
            return Ok(Self::TRANSPARENT);
        }
        if let Some(hex) = lower.strip_prefix('#') {
            return parse_hex(hex, text);
        }
        if let Some(args) = lower.strip_prefix("rgba(").and_then(|r| r.strip_suffix(')')) {
            return parse_function(args, true, text);
        }
        if let Some(args) = lower.strip_prefix("rgb(").and_then(|r| r.strip_suffix(')')) {
            return parse_function(args, false, text);
        }

        Err(ColorError::UnknownFormat(text.to_string()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.to_rgb8();
        if self.a >= 1.0 {
            write!(f, "#{r:02x}{g:02x}{b:02x}")
        } else {
            write!(f, "rgba({r}, {g}, {b}, {})", self.a)
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_six_digit_hex() {
        let color: Color = "#4b5563".parse().unwrap();
        assert_eq!(color.to_rgb8(), [0x4b, 0x55, 0x63]);
        assert_eq!(color.a, 1.0);
    }

    #[test]
    fn parses_short_hex() {
        let color: Color = "#fff".parse().unwrap();
        assert_eq!(color.to_rgb8(), [255, 255, 255]);
    }

    #[test]
    fn parses_rgba_function() {
        let color: Color = "rgba(0, 0, 0, 0.2)".parse().unwrap();
        assert_eq!(color.to_rgb8(), [0, 0, 0]);
        assert!((color.a - 0.2).abs() < 0.001);
    }

    #[test]
    fn display_round_trips() {
        for text in ["#00afb9", "rgba(0, 0, 0, 0.2)"] {
            let color: Color = text.parse().unwrap();
            assert_eq!(color.to_string(), text);
        }
    }

    #[test]
    fn rejects_garbage() {
        assert!("#12".parse::<Color>().is_err());
        assert!("rgb(1, 2)".parse::<Color>().is_err());
        assert!("blue-ish".parse::<Color>().is_err());
    }
}

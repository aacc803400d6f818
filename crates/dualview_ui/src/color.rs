//! RGBA colors with CSS hex conversion.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when parsing a CSS color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("color must start with '#': {0:?}")]
    MissingHash(String),

    #[error("expected 3, 6 or 8 hex digits, got {0:?}")]
    InvalidLength(String),

    #[error("invalid hex digit in {0:?}")]
    InvalidDigit(String),
}

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(value: &str) -> Result<Self, ColorError> {
        let digits = value
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| ColorError::MissingHash(value.to_string()))?;

        let nibble = |c: char| {
            c.to_digit(16)
                .map(|d| d as u8)
                .ok_or_else(|| ColorError::InvalidDigit(value.to_string()))
        };
        let byte = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|_| ColorError::InvalidDigit(value.to_string()))
        };

        if !digits.is_ascii() {
            return Err(ColorError::InvalidDigit(value.to_string()));
        }

        match digits.len() {
            3 => {
                let mut chars = digits.chars();
                let mut next = || -> Result<u8, ColorError> {
                    let n = nibble(chars.next().unwrap_or('g'))?;
                    Ok(n * 17)
                };
                Ok(Color::rgb(next()?, next()?, next()?))
            }
            6 => Ok(Color::rgb(
                byte(&digits[0..2])?,
                byte(&digits[2..4])?,
                byte(&digits[4..6])?,
            )),
            8 => Ok(Color::rgba(
                byte(&digits[0..2])?,
                byte(&digits[2..4])?,
                byte(&digits[4..6])?,
                byte(&digits[6..8])?,
            )),
            _ => Err(ColorError::InvalidLength(value.to_string())),
        }
    }

    /// Format as a CSS color string usable as a canvas stroke style.
    pub fn to_css(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::RED
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_css()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_css())
    }
}

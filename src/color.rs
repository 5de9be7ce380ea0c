//! Colours used by the compositor (background, pages, shadow).
//!
//! Colours serialize as CSS-style hex strings (`#rgb`, `#rgba`, `#rrggbb`,
//! `#rrggbbaa`) so config files stay readable.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error parsing a hex colour
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColorParseError {
  #[error("Invalid hex color: {0}")]
  InvalidHex(String),
}

/// An 8-bit straight-alpha RGBA colour
///
/// # Examples
///
/// ```
/// use bookmockup::Rgba;
///
/// let paper: Rgba = "#f5f0e1".parse().unwrap();
/// assert_eq!(paper, Rgba::rgb(0xf5, 0xf0, 0xe1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
  pub r: u8,
  pub g: u8,
  pub b: u8,
  pub a: u8,
}

impl Rgba {
  pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
  pub const BLACK: Self = Self::rgb(0, 0, 0);
  pub const WHITE: Self = Self::rgb(255, 255, 255);

  pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
    Self { r, g, b, a }
  }

  /// Opaque colour
  pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
    Self::new(r, g, b, 255)
  }

  pub fn to_skia(self) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
  }
}

impl FromStr for Rgba {
  type Err = ColorParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let invalid = || ColorParseError::InvalidHex(s.to_string());
    let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
    if !hex.is_ascii() {
      return Err(invalid());
    }
    let nibble = |i: usize| -> Result<u8, ColorParseError> {
      u8::from_str_radix(&hex[i..i + 1].repeat(2), 16).map_err(|_| invalid())
    };
    let byte = |i: usize| -> Result<u8, ColorParseError> {
      u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid())
    };

    match hex.len() {
      3 => Ok(Rgba::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
      4 => Ok(Rgba::new(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
      6 => Ok(Rgba::rgb(byte(0)?, byte(2)?, byte(4)?)),
      8 => Ok(Rgba::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
      _ => Err(invalid()),
    }
  }
}

impl fmt::Display for Rgba {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.a == 255 {
      write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    } else {
      write!(
        f,
        "#{:02x}{:02x}{:02x}{:02x}",
        self.r, self.g, self.b, self.a
      )
    }
  }
}

impl TryFrom<String> for Rgba {
  type Error = ColorParseError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value.parse()
  }
}

impl From<Rgba> for String {
  fn from(value: Rgba) -> Self {
    value.to_string()
  }
}

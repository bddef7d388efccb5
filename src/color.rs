//! Color parsing and table shading rules.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default accent color for titles and table key cells.
pub const DEFAULT_PRIMARY_HEX: &str = "#4F46E5";

/// Fill applied to the value cell of every odd table row.
pub const ZEBRA_FILL: Color = Color::rgb(0xF3, 0xF4, 0xF6);

/// Text color of table key cells.
pub const KEY_TEXT: Color = Color::rgb(255, 255, 255);

/// Text color of paragraphs and list items.
pub const BODY_TEXT: Color = Color::rgb(50, 50, 50);

/// Text color of the footer line.
pub const FOOTER_TEXT: Color = Color::rgb(150, 150, 150);

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Create a color from its channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or `RRGGBB`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let (r, g, b) = hex_to_rgb(hex)?;
        Ok(Self { r, g, b })
    }

    /// Normalized hex form: six uppercase digits, no leading `#`.
    ///
    /// This is the form WordprocessingML expects in `w:fill` and `w:color`.
    pub fn hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// The channels as a tuple.
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::rgb(0x4F, 0x46, 0xE5)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.hex())
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Color::from_hex(s)
    }
}

/// Parse a 6-digit hex color into its channels.
///
/// One leading `#` is optional. Anything other than exactly six ASCII hex
/// digits after it fails with [`Error::InvalidColorFormat`] carrying the
/// original input.
pub fn hex_to_rgb(hex: &str) -> Result<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    let invalid = || Error::InvalidColorFormat(hex.to_string());

    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
    Ok((channel(0)?, channel(2)?, channel(4)?))
}

/// Zebra rule for value cells: odd rows (0-based) get `fill`.
///
/// Indices are per table, so every flushed table starts unshaded.
pub fn zebra_shade(row_index: usize, fill: Color) -> Option<Color> {
    if row_index % 2 == 1 {
        Some(fill)
    } else {
        None
    }
}

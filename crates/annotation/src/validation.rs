use thiserror::Error;

use crate::constants::{MAX_STROKE_WIDTH, MIN_STROKE_WIDTH};
use crate::types::Color;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid color {0:?}: expected #RGB, #RRGGBB or #RRGGBBAA")]
    InvalidColor(String),
}

/// Clamp a requested stroke width into the accepted range.
///
/// Zero and negative widths become the minimum; the engine never holds a
/// non-positive width.
pub fn clamp_stroke_width(width: i64) -> u32 {
    width.clamp(MIN_STROKE_WIDTH as i64, MAX_STROKE_WIDTH as i64) as u32
}

/// Parse a CSS-style hex color (`#RGB`, `#RRGGBB`, `#RRGGBBAA`).
///
/// The leading `#` is optional and surrounding whitespace is ignored.
pub fn parse_hex_color(input: &str) -> Result<Color, ValidationError> {
    let invalid = || ValidationError::InvalidColor(input.to_string());
    let hex = input.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);

    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let byte = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());

    match hex.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (slot, c) in rgb.iter_mut().zip(hex.chars()) {
                let nibble = c.to_digit(16).ok_or_else(invalid)? as u8;
                *slot = nibble * 17;
            }
            Ok(Color::rgb(rgb[0], rgb[1], rgb[2]))
        }
        6 => Ok(Color::rgb(
            byte(&hex[0..2])?,
            byte(&hex[2..4])?,
            byte(&hex[4..6])?,
        )),
        8 => Ok(Color::rgba(
            byte(&hex[0..2])?,
            byte(&hex[2..4])?,
            byte(&hex[4..6])?,
            byte(&hex[6..8])?,
        )),
        _ => Err(invalid()),
    }
}

//! # ESC/POS Text Styling Commands
//!
//! This module implements the print-mode commands for ESC/POS printers.
//!
//! ## Text Styling Overview
//!
//! | Style | Command | Effect |
//! |-------|---------|--------|
//! | Alignment | ESC a n | Left / center / right justification |
//! | Bold | ESC E n | **Emphasized** text |
//! | Underline | ESC - n | Underlined text |
//! | Font | ESC M n | Font A (12×24) or Font B (9×17) |
//! | Upside Down | ESC { n | 180° rotation |
//! | Rotation | ESC V n | 90° clockwise rotation |
//! | Invert | GS B n | White on black |
//! | Size | GS ! n | 1–8× width and height |
//!
//! Each command sets one attribute explicitly (`n = 0` off, `n = 1` on), so
//! an attribute can be changed without touching the others. The only
//! exception is `GS !`, which carries width and height in a single byte.

use super::commands::{ESC, GS};

// ============================================================================
// TEXT ALIGNMENT
// ============================================================================

/// Text alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    #[default]
    Left = 0,
    Center = 1,
    Right = 2,
}

impl Alignment {
    /// Parse `left`, `center`/`centre` or `right` (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Some(Self::Left),
            "center" | "centre" => Some(Self::Center),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}

/// # Select Justification (ESC a n)
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC a n |
/// | Hex     | 1B 61 n |
/// | Decimal | 27 97 n |
///
/// Takes effect at the beginning of the next line.
///
/// ## Example
///
/// ```
/// use escpos_generator::protocol::text::{align, Alignment};
///
/// assert_eq!(align(Alignment::Center), vec![0x1B, 0x61, 0x01]);
/// ```
pub fn align(alignment: Alignment) -> Vec<u8> {
    vec![ESC, b'a', alignment as u8]
}

// ============================================================================
// FONT SELECTION
// ============================================================================

/// Available character fonts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Font {
    /// Font A: 12×24 dots, the power-on default
    #[default]
    A = 0,
    /// Font B: 9×17 dots, more columns per line
    B = 1,
}

impl Font {
    /// Parse `a` or `b` (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "a" => Some(Self::A),
            "b" => Some(Self::B),
            _ => None,
        }
    }
}

/// # Select Character Font (ESC M n)
///
/// ## Example
///
/// ```
/// use escpos_generator::protocol::text::{font, Font};
///
/// assert_eq!(font(Font::B), vec![0x1B, 0x4D, 0x01]);
/// ```
pub fn font(f: Font) -> Vec<u8> {
    vec![ESC, b'M', f as u8]
}

// ============================================================================
// ROTATION
// ============================================================================

/// 90° rotation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    R0 = 0,
    R90 = 1,
}

/// # Turn 90° Clockwise Rotation Mode On/Off (ESC V n)
#[inline]
pub fn rotation(r: Rotation) -> Vec<u8> {
    vec![ESC, b'V', r as u8]
}

// ============================================================================
// EMPHASIS, UNDERLINE, UPSIDE-DOWN, INVERT
// ============================================================================

/// # Turn Emphasized Mode On/Off (ESC E n)
///
/// ## Example
///
/// ```
/// use escpos_generator::protocol::text::bold;
///
/// let mut data = Vec::new();
/// data.extend(bold(true));
/// data.extend(b"IMPORTANT");
/// data.extend(bold(false));
/// ```
#[inline]
pub fn bold(enabled: bool) -> Vec<u8> {
    vec![ESC, b'E', u8::from(enabled)]
}

/// # Turn Underline Mode On/Off (ESC - n)
///
/// - `n = 0`: Underline OFF
/// - `n = 1`: Underline ON (1 dot thick)
///
/// Underline does not apply to 90° rotated characters.
#[inline]
pub fn underline(enabled: bool) -> Vec<u8> {
    vec![ESC, b'-', u8::from(enabled)]
}

/// # Turn Upside-Down Printing On/Off (ESC { n)
///
/// Only valid at the beginning of a line.
#[inline]
pub fn upside_down(enabled: bool) -> Vec<u8> {
    vec![ESC, b'{', u8::from(enabled)]
}

/// # Turn White/Black Reverse Printing On/Off (GS B n)
///
/// ```text
/// Normal:   TEXT
/// Inverted: ████████
///           ░TEXT░░░
///           ████████
/// ```
#[inline]
pub fn invert(enabled: bool) -> Vec<u8> {
    vec![GS, b'B', u8::from(enabled)]
}

// ============================================================================
// CHARACTER SIZE
// ============================================================================

/// # Select Character Size (GS ! n)
///
/// Sets horizontal and vertical magnification in one byte.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS ! n |
/// | Hex     | 1D 21 n |
/// | Decimal | 29 33 n |
///
/// ## Parameters
///
/// ```text
/// n = (width - 1) << 4 | (height - 1)
///
///   bits 4-6: width  multiplier - 1
///   bits 0-2: height multiplier - 1
/// ```
///
/// Both multipliers are clamped to 1..=8.
///
/// ## Example
///
/// ```
/// use escpos_generator::protocol::text::size;
///
/// assert_eq!(size(1, 1), vec![0x1D, 0x21, 0x00]);
/// assert_eq!(size(2, 3), vec![0x1D, 0x21, 0x12]);
/// ```
pub fn size(width: u8, height: u8) -> Vec<u8> {
    let w = width.clamp(1, 8) - 1;
    let h = height.clamp(1, 8) - 1;
    vec![GS, b'!', (w << 4) | h]
}

// ============================================================================
// TESTS
// ============================================================================

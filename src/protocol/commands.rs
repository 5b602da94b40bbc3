//! # ESC/POS Basic Commands
//!
//! Initialization, paper feed and cutter control for ESC/POS thermal
//! receipt printers (Epson TM series and the many compatible clones).
//!
//! ## Escape Sequence Structure
//!
//! Commands follow these patterns:
//! - Single byte: `LF`, `NUL`
//! - Two bytes: `ESC @`
//! - Multi-byte with parameters: `ESC E n`, `GS V m n`, `GS k m n data...`
//!
//! ## Byte Order
//!
//! Multi-byte integers use **little-endian** encoding:
//! - `u16` value 0x1234 is sent as bytes `[0x34, 0x12]`

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
///
/// Used for character size, barcodes, QR codes, raster images and the cutter.
pub const GS: u8 = 0x1D;

/// LF (Line Feed) - Print the line buffer and advance one line
pub const LF: u8 = 0x0A;

/// NUL - Ignored by ESC/POS printers outside of a command.
///
/// Sent on its own as a liveness probe: it exercises the write path without
/// changing anything on the device.
pub const NUL: u8 = 0x00;

// ============================================================================
// INITIALIZATION COMMANDS
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Clears the print buffer and resets the print mode to power-on defaults.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
/// | Decimal | 27 64 |
///
/// ## What Gets Reset
///
/// - Emphasis, underline, reverse, upside-down and rotation disabled
/// - Character size reset to 1x1, font A
/// - Alignment reset to left
///
/// ## Example
///
/// ```
/// use escpos_generator::protocol::commands;
///
/// assert_eq!(commands::init(), vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

/// # Select Character Code Table (ESC t 0)
///
/// Selects PC437, the table [`super::cp437::encode`] targets.
#[inline]
pub fn select_pc437() -> Vec<u8> {
    vec![ESC, b't', 0]
}

// ============================================================================
// PAPER FEED COMMANDS
// ============================================================================

/// Print the buffer and feed `lines` blank lines (`LF` repeated).
///
/// ## Example
///
/// ```
/// use escpos_generator::protocol::commands;
///
/// assert_eq!(commands::feed_lines(2), vec![0x0A, 0x0A]);
/// assert!(commands::feed_lines(0).is_empty());
/// ```
#[inline]
pub fn feed_lines(lines: u8) -> Vec<u8> {
    vec![LF; lines as usize]
}

// ============================================================================
// CUTTER CONTROL COMMANDS
// ============================================================================

/// # Feed and Full Cut (GS V A n)
///
/// Feeds paper to the cutting position plus `n` motion units, then performs
/// a full cut.
///
/// ## Protocol Details
///
/// | Format  | Bytes      |
/// |---------|------------|
/// | ASCII   | GS V A n   |
/// | Hex     | 1D 56 41 n |
/// | Decimal | 29 86 65 n |
///
/// ## Example
///
/// ```
/// use escpos_generator::protocol::commands;
///
/// assert_eq!(commands::cut_full_feed(), vec![0x1D, 0x56, 0x41, 0x03]);
/// ```
#[inline]
pub fn cut_full_feed() -> Vec<u8> {
    vec![GS, b'V', b'A', 3]
}

/// # Feed and Partial Cut (GS V B n)
///
/// Same as [`cut_full_feed`] but leaves a small hinge uncut.
#[inline]
pub fn cut_partial_feed() -> Vec<u8> {
    vec![GS, b'V', b'B', 3]
}

/// Liveness probe: a single `NUL`, which the printer discards.
#[inline]
pub fn probe() -> Vec<u8> {
    vec![NUL]
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Encode a u16 value as little-endian bytes [low, high]
///
/// ## Example
///
/// ```
/// use escpos_generator::protocol::commands::u16_le;
///
/// assert_eq!(u16_le(0x1234), [0x34, 0x12]);
/// assert_eq!(u16_le(372), [0x74, 0x01]);
/// ```
#[inline]
pub const fn u16_le(value: u16) -> [u8; 2] {
    [value as u8, (value >> 8) as u8]
}

// ============================================================================
// TESTS
// ============================================================================

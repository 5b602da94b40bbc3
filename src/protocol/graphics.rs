//! # ESC/POS Raster Graphics
//!
//! Raster bit image printing (`GS v 0`).
//!
//! ## Bit Packing
//!
//! Graphics data is packed as bytes where each bit represents one dot:
//! - Bit 7 (MSB) = leftmost dot
//! - Bit 0 (LSB) = rightmost dot
//! - 1 = black (print), 0 = white (no print)
//!
//! ```text
//! Byte value 0xF0 = 11110000 = ████░░░░
//! Byte value 0x0F = 00001111 = ░░░░████
//! ```
//!
//! Rows are sent top to bottom, each `ceil(width / 8)` bytes wide.

use super::commands::{GS, u16_le};

/// Largest band sent in one `GS v 0` command. Many printers have a small
/// receive buffer and drop data for taller images.
pub const MAX_BAND_ROWS: u16 = 256;

/// # Print Raster Bit Image (GS v 0 m xL xH yL yH d1...dk)
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS v 0 m xL xH yL yH d1...dk |
/// | Hex     | 1D 76 30 m xL xH yL yH d1...dk |
///
/// ## Parameters
///
/// - `m = 0`: normal density
/// - `xL xH`: width in **bytes**
/// - `yL yH`: height in dots
/// - `k = (xL + xH × 256) × (yL + yH × 256)`
///
/// ## Example
///
/// ```
/// use escpos_generator::protocol::graphics;
///
/// let data = vec![0xFF; 2 * 3];
/// let cmd = graphics::raster(16, 3, &data);
/// assert_eq!(&cmd[..8], &[0x1D, 0x76, 0x30, 0x00, 2, 0, 3, 0]);
/// ```
pub fn raster(width_dots: u16, height: u16, data: &[u8]) -> Vec<u8> {
    let width_bytes = width_dots.div_ceil(8);

    debug_assert!(
        data.len() == width_bytes as usize * height as usize,
        "Raster data length mismatch. Expected {} ({} bytes × {} rows), got {}",
        width_bytes as usize * height as usize,
        width_bytes,
        height,
        data.len()
    );

    let [xl, xh] = u16_le(width_bytes);
    let [yl, yh] = u16_le(height);

    let mut cmd = Vec::with_capacity(8 + data.len());
    cmd.extend([GS, b'v', b'0', 0, xl, xh, yl, yh]);
    cmd.extend_from_slice(data);
    cmd
}

/// Split an image into bands of at most [`MAX_BAND_ROWS`] rows, each sent
/// as its own raster command.
pub fn raster_banded(width_dots: u16, height: u16, data: &[u8]) -> Vec<u8> {
    let width_bytes = width_dots.div_ceil(8) as usize;
    let mut out = Vec::with_capacity(data.len() + 8 * (height / MAX_BAND_ROWS + 1) as usize);

    let mut row = 0u16;
    while row < height {
        let rows = (height - row).min(MAX_BAND_ROWS);
        let start = row as usize * width_bytes;
        let end = start + rows as usize * width_bytes;
        out.extend(raster(width_dots, rows, &data[start..end]));
        row += rows;
    }

    out
}

// ============================================================================
// TESTS
// ============================================================================

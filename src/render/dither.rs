//! # Bayer 8x8 Ordered Dithering
//!
//! Converts grayscale intensities to the 1-bit dots a thermal head prints.
//!
//! For each pixel `(x, y)` the intensity (0.0 = white, 1.0 = black) is
//! compared with a threshold taken from the Bayer matrix at
//! `(x mod 8, y mod 8)`; the dot prints when the intensity is above it.
//!
//! ```
//! use escpos_generator::render::dither;
//!
//! assert!(dither::should_print(3, 5, 1.0));
//! assert!(!dither::should_print(3, 5, 0.0));
//!
//! let packed = dither::pack_row(&[true, true, false, false, true, false, true, false]);
//! assert_eq!(packed, vec![0b1100_1010]);
//! ```

/// Bayer 8x8 dithering matrix, values 0-63.
pub const BAYER8: [[u8; 8]; 8] = [
    [0, 32, 8, 40, 2, 34, 10, 42],
    [48, 16, 56, 24, 50, 18, 58, 26],
    [12, 44, 4, 36, 14, 46, 6, 38],
    [60, 28, 52, 20, 62, 30, 54, 22],
    [3, 35, 11, 43, 1, 33, 9, 41],
    [51, 19, 59, 27, 49, 17, 57, 25],
    [15, 47, 7, 39, 13, 45, 5, 37],
    [63, 31, 55, 23, 61, 29, 53, 21],
];

/// Threshold for a pixel position, strictly between 0 and 1.
///
/// `(BAYER8[y mod 8][x mod 8] + 0.5) / 64`, so pure black always prints and
/// pure white never does.
#[inline]
pub fn threshold(x: usize, y: usize) -> f32 {
    (BAYER8[y & 7][x & 7] as f32 + 0.5) / 64.0
}

/// Whether a dot prints at `(x, y)` for the given intensity.
#[inline]
pub fn should_print(x: usize, y: usize, intensity: f32) -> bool {
    intensity > threshold(x, y)
}

/// Pack a row of dots MSB-first; the last byte is zero-padded.
pub fn pack_row(pixels: &[bool]) -> Vec<u8> {
    let mut bytes = vec![0u8; pixels.len().div_ceil(8)];
    for (i, _) in pixels.iter().enumerate().filter(|(_, on)| **on) {
        bytes[i / 8] |= 0x80 >> (i % 8);
    }
    bytes
}

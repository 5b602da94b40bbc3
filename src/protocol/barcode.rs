//! # ESC/POS Barcode Commands
//!
//! Command builders for 1D barcodes (`GS k`) and native QR codes (`GS ( k`).
//!
//! These builders do not validate payloads: callers go through
//! [`crate::codes`], which rejects malformed data before anything reaches the
//! device.
//!
//! ## 1D Barcode Usage
//!
//! ```
//! use escpos_generator::protocol::barcode::barcode1d;
//!
//! let data = barcode1d::code39(b"HELLO123", 80, 3);
//! assert_eq!(&data[..3], &[0x1D, 0x68, 80]);
//! ```
//!
//! ## QR Code Usage
//!
//! QR codes are generated in a multi-step process:
//!
//! 1. Select model 2
//! 2. Set module size and error correction level
//! 3. Store the data in the symbol buffer
//! 4. Print the stored symbol
//!
//! ```
//! use escpos_generator::protocol::barcode::qr;
//!
//! let data = qr::generate(b"https://example.com", 4, qr::QrErrorLevel::M);
//! assert!(data.ends_with(&qr::print()));
//! ```

use super::commands::GS;

// ============================================================================
// 1D BARCODE COMMANDS (GS k)
// ============================================================================

/// 1D Barcode command builders
pub mod barcode1d {
    use super::GS;

    /// `GS k` system codes (function B, length-prefixed form)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[repr(u8)]
    pub enum BarcodeType {
        /// Code39 (0-9, A-Z, space, $%*+-./)
        Code39 = 69,
        /// Code128 (full ASCII, data starts with a `{A`/`{B`/`{C` selector)
        Code128 = 73,
    }

    /// HRI (Human Readable Interpretation) position
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum HriPosition {
        None = 0,
        Above = 1,
        /// HRI below barcode (default)
        #[default]
        Below = 2,
        Both = 3,
    }

    /// # Set Barcode Height (GS h n)
    ///
    /// Height in dots, 1-255.
    #[inline]
    pub fn set_height(height: u8) -> Vec<u8> {
        vec![GS, b'h', height]
    }

    /// # Set Barcode Module Width (GS w n)
    ///
    /// Width of the narrowest bar, 2-6.
    #[inline]
    pub fn set_width(width: u8) -> Vec<u8> {
        vec![GS, b'w', width]
    }

    /// # Select HRI Print Position (GS H n)
    #[inline]
    pub fn set_hri(position: HriPosition) -> Vec<u8> {
        vec![GS, b'H', position as u8]
    }

    /// # Print Barcode (GS k m n d1...dn)
    ///
    /// ## Protocol Details
    ///
    /// | Format  | Bytes |
    /// |---------|-------|
    /// | ASCII   | GS k m n d1...dn |
    /// | Hex     | 1D 6B m n d1...dn |
    ///
    /// Emits the height, width and HRI settings first so the symbol does not
    /// depend on whatever a previous job left configured.
    ///
    /// Data longer than 255 bytes is truncated; validated payloads never are.
    pub fn barcode(kind: BarcodeType, data: &[u8], height: u8, width: u8) -> Vec<u8> {
        let data = &data[..data.len().min(255)];
        let mut cmd = Vec::with_capacity(13 + data.len());
        cmd.extend(set_height(height));
        cmd.extend(set_width(width));
        cmd.extend(set_hri(HriPosition::Below));
        cmd.extend([GS, b'k', kind as u8, data.len() as u8]);
        cmd.extend_from_slice(data);
        cmd
    }

    /// Code39 barcode
    pub fn code39(data: &[u8], height: u8, width: u8) -> Vec<u8> {
        barcode(BarcodeType::Code39, data, height, width)
    }

    /// Code128 barcode. `data` must already carry its code-set selector.
    pub fn code128(data: &[u8], height: u8, width: u8) -> Vec<u8> {
        barcode(BarcodeType::Code128, data, height, width)
    }
}

// ============================================================================
// QR CODE COMMANDS (GS ( k, cn = 49)
// ============================================================================

/// QR Code command builders
pub mod qr {
    use super::GS;

    /// QR error correction level
    ///
    /// | Level | Recovery |
    /// |-------|----------|
    /// | L | ~7% |
    /// | M | ~15% |
    /// | Q | ~25% |
    /// | H | ~30% |
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum QrErrorLevel {
        #[default]
        L = 48,
        M = 49,
        Q = 50,
        H = 51,
    }

    fn function(pl: u8, ph: u8, fn_code: u8, params: &[u8]) -> Vec<u8> {
        let mut cmd = vec![GS, b'(', b'k', pl, ph, 49, fn_code];
        cmd.extend_from_slice(params);
        cmd
    }

    /// # Select QR Model 2 (GS ( k 4 0 49 65 50 0)
    pub fn set_model2() -> Vec<u8> {
        function(4, 0, 65, &[50, 0])
    }

    /// # Set Module Size (GS ( k 3 0 49 67 n)
    ///
    /// Module size in dots, 1-16.
    pub fn set_cell_size(size: u8) -> Vec<u8> {
        function(3, 0, 67, &[size.clamp(1, 16)])
    }

    /// # Select Error Correction Level (GS ( k 3 0 49 69 n)
    pub fn set_error_correction(level: QrErrorLevel) -> Vec<u8> {
        function(3, 0, 69, &[level as u8])
    }

    /// # Store Data in Symbol Buffer (GS ( k pL pH 49 80 48 d1...dk)
    ///
    /// `pL pH` encode `k + 3` little-endian.
    pub fn set_data(data: &[u8]) -> Vec<u8> {
        let len = (data.len() + 3).min(u16::MAX as usize) as u16;
        let [pl, ph] = crate::protocol::commands::u16_le(len);
        let mut cmd = function(pl, ph, 80, &[48]);
        cmd.extend_from_slice(data);
        cmd
    }

    /// # Print Stored Symbol (GS ( k 3 0 49 81 48)
    pub fn print() -> Vec<u8> {
        function(3, 0, 81, &[48])
    }

    /// Full QR sequence: model, size, error correction, data, print.
    pub fn generate(data: &[u8], cell_size: u8, error_level: QrErrorLevel) -> Vec<u8> {
        let mut cmd = Vec::new();
        cmd.extend(set_model2());
        cmd.extend(set_cell_size(cell_size));
        cmd.extend(set_error_correction(error_level));
        cmd.extend(set_data(data));
        cmd.extend(print());
        cmd
    }
}

// ============================================================================
// TESTS
// ============================================================================

//! # Barcodes and QR Codes
//!
//! Validated payloads for the 1D barcode and QR operations. The fields are
//! private and the factories are the only way to build these values, so a
//! [`Barcode`] or [`QrCode`] that exists is always printable.
//!
//! ```
//! use escpos_generator::codes::{Barcode, QrCode, QrCorrection};
//!
//! let code = Barcode::code39("ABC123").unwrap();
//! assert_eq!(code.height(), 162);
//!
//! assert!(Barcode::code39("").is_err());
//! assert!(Barcode::code128("A").is_err());
//!
//! let qr = QrCode::new("https://example.com", 6, QrCorrection::M).unwrap();
//! assert_eq!(qr.size(), 6);
//! ```

use qrcode::{EcLevel, QrCode as QrSymbol};

use crate::error::ValidationError;
use crate::protocol::barcode::qr::QrErrorLevel;

/// Default bar height in dots.
pub const DEFAULT_HEIGHT: u8 = 162;

/// Default module width.
pub const DEFAULT_WIDTH: u8 = 3;

/// Characters accepted by CODE39.
const CODE39_CHARSET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./";

/// Supported 1D symbologies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarcodeKind {
    Code39,
    Code128,
}

/// CODE128 code set, sent as a `{A` / `{B` / `{C` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Code128Set {
    A,
    #[default]
    B,
    C,
}

impl Code128Set {
    pub fn selector(self) -> &'static str {
        match self {
            Code128Set::A => "{A",
            Code128Set::B => "{B",
            Code128Set::C => "{C",
        }
    }
}

/// A validated 1D barcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Barcode {
    kind: BarcodeKind,
    data: String,
    code_set: Code128Set,
    height: u8,
    width: u8,
}

impl Barcode {
    /// CODE39 with default height and width.
    pub fn code39(data: &str) -> Result<Self, ValidationError> {
        check_length("CODE39", data.chars().count(), 1, 255)?;
        if let Some(ch) = data.chars().find(|c| !CODE39_CHARSET.contains(*c)) {
            return Err(ValidationError::BarcodeCharacter { kind: "CODE39", ch });
        }
        Ok(Self {
            kind: BarcodeKind::Code39,
            data: data.to_string(),
            code_set: Code128Set::default(),
            height: DEFAULT_HEIGHT,
            width: DEFAULT_WIDTH,
        })
    }

    /// CODE128 in code set B with default height and width.
    pub fn code128(data: &str) -> Result<Self, ValidationError> {
        Self::code128_with_set(data, Code128Set::B)
    }

    /// CODE128 in an explicit code set.
    ///
    /// The payload must be at least two ASCII characters, and with its
    /// two-character selector must fit the 255-byte command limit.
    pub fn code128_with_set(data: &str, code_set: Code128Set) -> Result<Self, ValidationError> {
        if let Some(ch) = data.chars().find(|c| !c.is_ascii()) {
            return Err(ValidationError::BarcodeCharacter { kind: "CODE128", ch });
        }
        check_length("CODE128", data.len(), 2, 255 - code_set.selector().len())?;
        Ok(Self {
            kind: BarcodeKind::Code128,
            data: data.to_string(),
            code_set,
            height: DEFAULT_HEIGHT,
            width: DEFAULT_WIDTH,
        })
    }

    /// Override the bar height (1..=255 dots).
    pub fn with_height(mut self, height: u16) -> Result<Self, ValidationError> {
        if !(1..=255).contains(&height) {
            return Err(ValidationError::BarcodeHeight(height));
        }
        self.height = height as u8;
        Ok(self)
    }

    /// Override the module width (2..=6).
    pub fn with_width(mut self, width: u8) -> Result<Self, ValidationError> {
        if !(2..=6).contains(&width) {
            return Err(ValidationError::BarcodeWidth(width));
        }
        self.width = width;
        Ok(self)
    }

    pub fn kind(&self) -> BarcodeKind {
        self.kind
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    /// Bytes as sent after `GS k m n`, including the CODE128 selector.
    pub fn encoded_data(&self) -> Vec<u8> {
        match self.kind {
            BarcodeKind::Code39 => self.data.as_bytes().to_vec(),
            BarcodeKind::Code128 => {
                let mut out = self.code_set.selector().as_bytes().to_vec();
                out.extend_from_slice(self.data.as_bytes());
                out
            }
        }
    }
}

fn check_length(kind: &'static str, len: usize, min: usize, max: usize) -> Result<(), ValidationError> {
    if (min..=max).contains(&len) {
        Ok(())
    } else {
        Err(ValidationError::BarcodeLength { kind, len, min, max })
    }
}

// ============================================================================
// QR CODES
// ============================================================================

/// QR error correction level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QrCorrection {
    #[default]
    L,
    M,
    Q,
    H,
}

impl QrCorrection {
    /// The printer's native level.
    pub fn level(self) -> QrErrorLevel {
        match self {
            QrCorrection::L => QrErrorLevel::L,
            QrCorrection::M => QrErrorLevel::M,
            QrCorrection::Q => QrErrorLevel::Q,
            QrCorrection::H => QrErrorLevel::H,
        }
    }

    fn ec_level(self) -> EcLevel {
        match self {
            QrCorrection::L => EcLevel::L,
            QrCorrection::M => EcLevel::M,
            QrCorrection::Q => EcLevel::Q,
            QrCorrection::H => EcLevel::H,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "L" => Some(Self::L),
            "M" => Some(Self::M),
            "Q" => Some(Self::Q),
            "H" => Some(Self::H),
            _ => None,
        }
    }
}

/// Default QR module size.
pub const DEFAULT_QR_SIZE: u8 = 4;

/// A validated QR code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrCode {
    data: String,
    size: u8,
    correction: QrCorrection,
}

impl QrCode {
    /// Build a QR code with module size 1..=16.
    ///
    /// The payload is checked against the symbol capacity for the chosen
    /// correction level.
    pub fn new(data: &str, size: u8, correction: QrCorrection) -> Result<Self, ValidationError> {
        if !(1..=16).contains(&size) {
            return Err(ValidationError::QrSize(size));
        }
        if data.is_empty() {
            return Err(ValidationError::QrEmpty);
        }
        QrSymbol::with_error_correction_level(data.as_bytes(), correction.ec_level())
            .map_err(|e| ValidationError::QrCapacity(e.to_string()))?;
        Ok(Self {
            data: data.to_string(),
            size,
            correction,
        })
    }

    /// Default size (4) and correction (L).
    pub fn simple(data: &str) -> Result<Self, ValidationError> {
        Self::new(data, DEFAULT_QR_SIZE, QrCorrection::default())
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn correction(&self) -> QrCorrection {
        self.correction
    }
}

// ============================================================================
// TESTS
// ============================================================================

//! # Error Types
//!
//! This module defines error types used throughout the generator.
//!
//! ## Propagation
//!
//! | Kind | When | Surfaced? |
//! |------|------|-----------|
//! | [`ValidationError`] | Building a barcode, QR code or text size | Always, before any I/O |
//! | [`PosError::DeviceUnreachable`] | Probe and reopen attempts all failed | Only in strict mode |
//! | [`PosError::Protocol`] / [`PosError::Io`] | Encoder or mid-write failure | Always |

use thiserror::Error;

/// Main error type for generator operations
#[derive(Debug, Error)]
pub enum PosError {
    /// Malformed barcode, QR or style parameters
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Device could not be reached after the bounded reopen attempts.
    ///
    /// Only returned when the generator runs in strict mode; otherwise the
    /// operation is skipped and reported as [`crate::Outcome::Skipped`].
    #[error("Device unreachable")]
    DeviceUnreachable,

    /// The encoder or transport rejected a well-formed request
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Image loading or rasterization error
    #[error("Image error: {0}")]
    Image(String),

    /// Invalid configuration value
    #[error("Config error: {0}")]
    Config(String),

    /// Malformed print job document
    #[error("Print job error: {0}")]
    Job(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Caller-side parameter errors, raised at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("barcode height {0} out of range 1..=255")]
    BarcodeHeight(u16),

    #[error("barcode width {0} out of range 2..=6")]
    BarcodeWidth(u8),

    #[error("{kind} payload length {len} out of range {min}..={max}")]
    BarcodeLength {
        kind: &'static str,
        len: usize,
        min: usize,
        max: usize,
    },

    #[error("{kind} payload contains unsupported character {ch:?}")]
    BarcodeCharacter { kind: &'static str, ch: char },

    #[error("QR size {0} out of range 1..=16")]
    QrSize(u8),

    #[error("QR payload is empty")]
    QrEmpty,

    #[error("QR payload does not fit: {0}")]
    QrCapacity(String),

    #[error("text size multiplier {0} out of range 1..=8")]
    TextSize(u8),

    #[error("unknown {what} {value:?}")]
    UnknownValue { what: &'static str, value: String },
}

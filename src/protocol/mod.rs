//! # ESC/POS Protocol Implementation
//!
//! This module provides low-level command builders for the ESC/POS protocol
//! spoken by most thermal receipt printers, and the [`EscPos`] encoder that
//! drives a device with them.
//!
//! ## Module Structure
//!
//! - [`commands`]: Basic printer commands (init, cut, feed)
//! - [`text`]: Text styling (alignment, fonts, bold, underline, size)
//! - [`barcode`]: 1D barcodes and QR codes
//! - [`graphics`]: Raster bit images
//! - [`cp437`]: Text encoding for the printer's default code page
//! - [`escpos`]: The [`PrinterProtocol`] capability and its ESC/POS encoder
//!
//! ## Usage Example
//!
//! ```
//! use escpos_generator::protocol::{commands, cp437, text};
//!
//! let mut data = Vec::new();
//! data.extend(commands::init());
//! data.extend(text::align(text::Alignment::Center));
//! data.extend(text::bold(true));
//! data.extend(cp437::encode("RECEIPT"));
//! data.extend(commands::feed_lines(1));
//! data.extend(text::bold(false));
//! data.extend(commands::cut_full_feed());
//!
//! assert_eq!(&data[..2], &[0x1B, 0x40]);
//! ```

pub mod barcode;
pub mod commands;
pub mod cp437;
pub mod escpos;
pub mod graphics;
pub mod text;

pub use escpos::{EscPos, PrinterProtocol};

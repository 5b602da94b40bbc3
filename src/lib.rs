//! # ESC/POS Generator - Stateful Receipt Printing
//!
//! A Rust library for printing on ESC/POS thermal receipt printers over USB.
//! It provides:
//!
//! - **Style reconciliation**: a session that tracks the printer's formatting
//!   mode and sends only what changes
//! - **Protocol implementation**: ESC/POS command builders and encoder
//! - **Validated codes**: CODE39 / CODE128 barcodes and QR codes
//! - **Images**: Bayer 8x8 dithered raster graphics
//! - **Transport**: Linux `usblp` devices with probe-and-reopen recovery
//!
//! ## Quick Start
//!
//! ```no_run
//! use escpos_generator::{
//!     Generator, GeneratorConfig, Style,
//!     codes::Barcode,
//!     protocol::{EscPos, text::Alignment},
//!     transport::UsbTransport,
//! };
//!
//! let config = GeneratorConfig::from_env()?;
//! let transport = UsbTransport::open_path("/dev/usb/lp0")?;
//! let printer = EscPos::new(transport, config.paper.width_dots());
//! let mut generator = Generator::new(printer, config);
//!
//! generator.init()?;
//! generator.text("RECEIPT", 1, Some(&Style::new().bold(true).align(Alignment::Center)), false)?;
//! generator.rule(false)?;
//! generator.text("Coffee            3.50", 1, None, false)?;
//! generator.barcode(&Barcode::code39("ORDER42")?)?;
//! generator.cut()?;
//!
//! # Ok::<(), escpos_generator::PosError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`generator`] | Session state, reconciliation, connection guard |
//! | [`style`] | Three-valued style model and merge rules |
//! | [`codes`] | Validated barcodes and QR codes |
//! | [`protocol`] | ESC/POS command builders and encoder |
//! | [`render`] | Dithering and image rasterization |
//! | [`transport`] | USB and in-memory devices |
//! | [`printer`] | Paper profiles and configuration |
//! | [`job`] | JSON print jobs |
//! | [`error`] | Error types |

pub mod codes;
pub mod error;
pub mod generator;
pub mod job;
pub mod printer;
pub mod protocol;
pub mod render;
pub mod style;
pub mod transport;

// Re-exports for convenience
pub use error::{PosError, ValidationError};
pub use generator::{Generator, Outcome};
pub use printer::{GeneratorConfig, PaperSize};
pub use style::Style;

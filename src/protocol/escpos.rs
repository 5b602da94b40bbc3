//! # ESC/POS Encoder
//!
//! [`PrinterProtocol`] is the set of fully-resolved printer operations the
//! generator drives. [`EscPos`] implements it by building command bytes with
//! the other `protocol` modules and writing them to a [`Device`].
//!
//! ```
//! use escpos_generator::protocol::{EscPos, PrinterProtocol};
//! use escpos_generator::style::Style;
//! use escpos_generator::transport::MemoryDevice;
//!
//! let mut printer = EscPos::new(MemoryDevice::new(), 372);
//! printer.set_style(&Style::new().bold(true))?;
//! printer.write_text(b"Hi")?;
//! assert_eq!(printer.device().bytes(), &[0x1B, 0x45, 0x01, b'H', b'i']);
//! # Ok::<(), escpos_generator::PosError>(())
//! ```

use std::path::Path;

use tracing::debug;

use super::barcode::{barcode1d, qr};
use super::{commands, graphics, text};
use crate::codes::{Barcode, BarcodeKind, QrCode};
use crate::error::PosError;
use crate::render::image;
use crate::style::Style;
use crate::transport::Device;

/// Printer operations with fully-resolved parameters.
pub trait PrinterProtocol {
    type Device: Device;

    /// The underlying connection, for liveness probing and reopening.
    fn device(&mut self) -> &mut Self::Device;

    /// Return the printer to its power-on state.
    fn reset(&mut self) -> Result<(), PosError>;

    /// Send the set fields of `style`; unset fields are left alone.
    fn set_style(&mut self, style: &Style) -> Result<(), PosError>;

    /// Send already-encoded text.
    fn write_text(&mut self, text: &[u8]) -> Result<(), PosError>;

    fn feed(&mut self, lines: u8) -> Result<(), PosError>;

    fn cut(&mut self) -> Result<(), PosError>;

    fn draw_barcode(&mut self, code: &Barcode) -> Result<(), PosError>;

    fn draw_qr(&mut self, code: &QrCode) -> Result<(), PosError>;

    fn draw_image(&mut self, path: &Path) -> Result<(), PosError>;
}

/// ESC/POS encoder over a [`Device`].
#[derive(Debug)]
pub struct EscPos<D> {
    device: D,
    max_width_dots: u16,
}

impl<D: Device> EscPos<D> {
    /// `max_width_dots` bounds raster images; wider images are scaled down.
    pub fn new(device: D, max_width_dots: u16) -> Self {
        Self {
            device,
            max_width_dots,
        }
    }

    pub fn max_width_dots(&self) -> u16 {
        self.max_width_dots
    }

    pub fn device_ref(&self) -> &D {
        &self.device
    }

    pub fn into_device(self) -> D {
        self.device
    }

    fn send(&mut self, bytes: &[u8]) -> Result<(), PosError> {
        self.device.write_all(bytes)?;
        Ok(())
    }
}

/// Command bytes for the set fields of `style`.
///
/// The size group is written as one `GS !` whenever any member is set;
/// unset members count as 1× / off.
pub fn style_commands(style: &Style) -> Vec<u8> {
    let mut out = Vec::new();
    if let Some(a) = style.align.get() {
        out.extend(text::align(a));
    }
    if let Some(b) = style.bold.get() {
        out.extend(text::bold(b));
    }
    if let Some(u) = style.underline.get() {
        out.extend(text::underline(u));
    }
    if let Some(f) = style.font.get() {
        out.extend(text::font(f));
    }
    if let Some(u) = style.upside_down.get() {
        out.extend(text::upside_down(u));
    }
    if let Some(r) = style.rotation.get() {
        out.extend(text::rotation(r));
    }
    if let Some(i) = style.inverted.get() {
        out.extend(text::invert(i));
    }
    if style.touches_size() {
        let (width, height) = style.effective_size();
        out.extend(text::size(width, height));
    }
    out
}

impl<D: Device> PrinterProtocol for EscPos<D> {
    type Device = D;

    fn device(&mut self) -> &mut D {
        &mut self.device
    }

    fn reset(&mut self) -> Result<(), PosError> {
        let mut cmd = commands::init();
        cmd.extend(commands::select_pc437());
        self.send(&cmd)
    }

    fn set_style(&mut self, style: &Style) -> Result<(), PosError> {
        if style.italic.is_set() {
            debug!("italic has no ESC/POS command, tracking only");
        }
        let cmd = style_commands(style);
        if cmd.is_empty() {
            return Ok(());
        }
        self.send(&cmd)
    }

    fn write_text(&mut self, text: &[u8]) -> Result<(), PosError> {
        if text.is_empty() {
            return Ok(());
        }
        self.send(text)
    }

    fn feed(&mut self, lines: u8) -> Result<(), PosError> {
        if lines == 0 {
            return Ok(());
        }
        self.send(&commands::feed_lines(lines))
    }

    fn cut(&mut self) -> Result<(), PosError> {
        self.send(&commands::cut_full_feed())
    }

    fn draw_barcode(&mut self, code: &Barcode) -> Result<(), PosError> {
        let data = code.encoded_data();
        if data.len() > 255 {
            return Err(PosError::Protocol(format!(
                "Barcode data is {} bytes, limit is 255",
                data.len()
            )));
        }
        let cmd = match code.kind() {
            BarcodeKind::Code39 => barcode1d::code39(&data, code.height(), code.width()),
            BarcodeKind::Code128 => barcode1d::code128(&data, code.height(), code.width()),
        };
        self.send(&cmd)
    }

    fn draw_qr(&mut self, code: &QrCode) -> Result<(), PosError> {
        let cmd = qr::generate(code.data().as_bytes(), code.size(), code.correction().level());
        self.send(&cmd)
    }

    fn draw_image(&mut self, path: &Path) -> Result<(), PosError> {
        let raster = image::load(path, self.max_width_dots)?;
        debug!(
            "image {} rasterized to {}x{}",
            path.display(),
            raster.width,
            raster.height
        );
        self.send(&graphics::raster_banded(raster.width, raster.height, &raster.data))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::text::{Alignment, Font, Rotation};
    use crate::style::TextSize;
    use crate::transport::MemoryDevice;
    use pretty_assertions::assert_eq;

    fn printer() -> EscPos<MemoryDevice> {
        EscPos::new(MemoryDevice::new(), 372)
    }

    #[test]
    fn test_reset_selects_code_page() {
        let mut p = printer();
        p.reset().unwrap();
        assert_eq!(p.device().bytes(), &[0x1B, 0x40, 0x1B, 0x74, 0x00]);
    }

    #[test]
    fn test_empty_style_sends_nothing() {
        let mut p = printer();
        p.set_style(&Style::new()).unwrap();
        p.set_style(&Style::new().italic(true)).unwrap();
        assert!(p.device().bytes().is_empty());
    }

    #[test]
    fn test_style_only_set_fields() {
        let cmd = style_commands(&Style::new().align(Alignment::Center).underline(false));
        assert_eq!(cmd, vec![0x1B, 0x61, 0x01, 0x1B, 0x2D, 0x00]);
    }

    #[test]
    fn test_defaults_full_sequence() {
        let cmd = style_commands(&Style::defaults());
        assert_eq!(
            cmd,
            vec![
                0x1B, 0x61, 0x00, // align left
                0x1B, 0x45, 0x00, // bold off
                0x1B, 0x2D, 0x00, // underline off
                0x1B, 0x4D, 0x00, // font A
                0x1B, 0x7B, 0x00, // upside-down off
                0x1B, 0x56, 0x00, // no rotation
                0x1D, 0x42, 0x00, // invert off
                0x1D, 0x21, 0x00, // 1x1
            ]
        );
    }

    #[test]
    fn test_style_other_fields() {
        let cmd = style_commands(
            &Style::new()
                .font(Font::B)
                .rotation(Rotation::R90)
                .inverted(true)
                .upside_down(true),
        );
        assert_eq!(
            cmd,
            vec![0x1B, 0x4D, 0x01, 0x1B, 0x7B, 0x01, 0x1B, 0x56, 0x01, 0x1D, 0x42, 0x01]
        );
    }

    #[test]
    fn test_size_byte() {
        let three = TextSize::new(3).unwrap();
        assert_eq!(
            style_commands(&Style::new().size(three, TextSize::NORMAL)),
            vec![0x1D, 0x21, 0x20]
        );
        assert_eq!(
            style_commands(&Style::new().double_height(true)),
            vec![0x1D, 0x21, 0x01]
        );
        assert_eq!(
            style_commands(&Style::new().double_width(true).double_height(true)),
            vec![0x1D, 0x21, 0x11]
        );
    }

    #[test]
    fn test_text_and_feed() {
        let mut p = printer();
        p.write_text(b"abc").unwrap();
        p.feed(2).unwrap();
        p.feed(0).unwrap();
        p.write_text(b"").unwrap();
        assert_eq!(p.device().bytes(), b"abc\n\n");
    }

    #[test]
    fn test_cut() {
        let mut p = printer();
        p.cut().unwrap();
        assert_eq!(p.device().bytes(), &[0x1D, 0x56, 0x41, 0x03]);
    }

    #[test]
    fn test_draw_code39() {
        let mut p = printer();
        p.draw_barcode(&Barcode::code39("AB").unwrap()).unwrap();
        assert_eq!(
            p.device().bytes(),
            &[
                0x1D, 0x68, 162, // height
                0x1D, 0x77, 3, // width
                0x1D, 0x48, 2, // HRI below
                0x1D, 0x6B, 69, 2, b'A', b'B',
            ]
        );
    }

    #[test]
    fn test_draw_code128_carries_selector() {
        let mut p = printer();
        p.draw_barcode(&Barcode::code128("ab").unwrap()).unwrap();
        assert!(p.device().bytes().ends_with(&[0x1D, 0x6B, 73, 4, b'{', b'B', b'a', b'b']));
    }

    #[test]
    fn test_draw_qr() {
        let mut p = printer();
        let code = QrCode::simple("hi").unwrap();
        p.draw_qr(&code).unwrap();
        assert_eq!(p.device().bytes(), qr::generate(b"hi", 4, qr::QrErrorLevel::L).as_slice());
    }

    #[test]
    fn test_draw_missing_image() {
        let mut p = printer();
        let err = p.draw_image(Path::new("/nonexistent/logo.png")).unwrap_err();
        assert!(matches!(err, PosError::Image(_)));
        assert!(p.device().bytes().is_empty());
    }

    #[test]
    fn test_write_failure_is_io_error() {
        let mut p = EscPos::new(MemoryDevice::new().fail_writes(1), 372);
        assert!(matches!(p.write_text(b"x"), Err(PosError::Io(_))));
    }
}

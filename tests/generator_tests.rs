//! # Generator Byte Tests
//!
//! End-to-end checks of the bytes a [`Generator`] writes through the ESC/POS
//! encoder into an in-memory device.

use std::path::PathBuf;
use std::time::Duration;

use escpos_generator::codes::{Barcode, QrCode};
use escpos_generator::generator::diagnostics::MemoryDiagnostics;
use escpos_generator::generator::guard::{ConnectionHealth, RecordingSleeper};
use escpos_generator::protocol::EscPos;
use escpos_generator::protocol::barcode::qr;
use escpos_generator::protocol::text::Alignment;
use escpos_generator::transport::MemoryDevice;
use escpos_generator::{Generator, GeneratorConfig, Outcome, PaperSize, PosError, Style};
use pretty_assertions::assert_eq;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

struct Session {
    generator: Generator<EscPos<MemoryDevice>>,
    diagnostics: MemoryDiagnostics,
    sleeper: RecordingSleeper,
}

fn session_with(device: MemoryDevice, config: GeneratorConfig) -> Session {
    let diagnostics = MemoryDiagnostics::new();
    let sleeper = RecordingSleeper::new();
    let width = config.paper.width_dots();
    let generator = Generator::with_parts(
        EscPos::new(device, width),
        config,
        Box::new(sleeper.clone()),
        Box::new(diagnostics.clone()),
    );
    Session {
        generator,
        diagnostics,
        sleeper,
    }
}

fn session() -> Session {
    session_with(MemoryDevice::new(), GeneratorConfig::default())
}

fn bytes(s: &Session) -> &[u8] {
    s.generator.printer().device_ref().bytes()
}

/// Every style command with the given alignment and bold, the rest at their
/// power-on values.
fn full_style(align: u8, bold: u8) -> Vec<u8> {
    vec![
        0x1B, 0x61, align, // ESC a
        0x1B, 0x45, bold, // ESC E
        0x1B, 0x2D, 0x00, // ESC -
        0x1B, 0x4D, 0x00, // ESC M
        0x1B, 0x7B, 0x00, // ESC {
        0x1B, 0x56, 0x00, // ESC V
        0x1D, 0x42, 0x00, // GS B
        0x1D, 0x21, 0x00, // GS !
    ]
}

const CUT: [u8; 4] = [0x1D, 0x56, 0x41, 0x03];

// ============================================================================
// TESTS
// ============================================================================

#[test]
fn test_init_resets_and_sends_session() {
    let mut s = session();
    s.generator.init().unwrap();

    let mut expected = vec![0x1B, 0x40, 0x1B, 0x74, 0x00];
    expected.extend(full_style(0, 0));
    assert_eq!(bytes(&s), expected.as_slice());
}

#[test]
fn test_plain_text() {
    let mut s = session();
    s.generator.text("Café", 2, None, false).unwrap();
    assert_eq!(bytes(&s), b"Caf\x82\n\n");
}

#[test]
fn test_transient_style_round_trip() {
    let mut s = session();
    let before = *s.generator.current_style();

    s.generator
        .text("TOTAL", 1, Some(&Style::new().bold(true)), false)
        .unwrap();

    let mut expected = full_style(0, 1);
    expected.extend(b"TOTAL\n");
    expected.extend(full_style(0, 0));
    assert_eq!(bytes(&s), expected.as_slice());
    assert_eq!(s.generator.current_style(), &before);
}

#[test]
fn test_persisted_style_reused() {
    let mut s = session();
    s.generator
        .text("A", 1, Some(&Style::new().bold(true)), true)
        .unwrap();
    s.generator.text("B", 1, None, false).unwrap();

    let mut expected = full_style(0, 1);
    expected.extend(b"A\nB\n");
    assert_eq!(bytes(&s), expected.as_slice());
    assert_eq!(s.generator.current_style(), &Style::defaults().bold(true));
}

#[test]
fn test_rule_is_centered_dashes() {
    let mut s = session();
    s.generator.rule(false).unwrap();

    let mut expected = full_style(1, 0);
    expected.extend([b'-'; 32]);
    expected.push(b'\n');
    expected.extend(full_style(0, 0));
    assert_eq!(bytes(&s), expected.as_slice());
}

#[test]
fn test_half_rule_on_80mm() {
    let mut s = session_with(MemoryDevice::new(), GeneratorConfig::with_paper(PaperSize::Mm80));
    s.generator.rule(true).unwrap();

    let mut expected = full_style(1, 0);
    expected.extend([b'-'; 24]);
    expected.push(b'\n');
    expected.extend(full_style(0, 0));
    assert_eq!(bytes(&s), expected.as_slice());
}

#[test]
fn test_barcode_centered() {
    let mut s = session();
    s.generator
        .barcode(&Barcode::code128("ab").unwrap())
        .unwrap();

    let mut expected = full_style(1, 0);
    expected.extend([0x1D, 0x68, 162, 0x1D, 0x77, 3, 0x1D, 0x48, 2]);
    expected.extend([0x1D, 0x6B, 73, 4, b'{', b'B', b'a', b'b']);
    expected.extend(full_style(0, 0));
    assert_eq!(bytes(&s), expected.as_slice());
}

#[test]
fn test_qr_centered() {
    let mut s = session();
    s.generator.qr(&QrCode::simple("hello").unwrap()).unwrap();

    let mut expected = full_style(1, 0);
    expected.extend(qr::generate(b"hello", 4, qr::QrErrorLevel::L));
    expected.extend(full_style(0, 0));
    assert_eq!(bytes(&s), expected.as_slice());
}

#[test]
fn test_image_alignment_then_full_restore() {
    let path: PathBuf =
        std::env::temp_dir().join(format!("posgen-image-{}.png", std::process::id()));
    image::GrayImage::from_pixel(8, 2, image::Luma([0]))
        .save(&path)
        .unwrap();

    let mut s = session();
    let outcome = s.generator.image(&path, Alignment::Center).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(outcome, Outcome::Done);
    let mut expected = vec![0x1B, 0x61, 0x01];
    expected.extend([0x1D, 0x76, 0x30, 0x00, 1, 0, 2, 0, 0xFF, 0xFF]);
    expected.extend(full_style(0, 0));
    assert_eq!(bytes(&s), expected.as_slice());
}

#[test]
fn test_test_page_layout() {
    let mut s = session();
    s.generator.test_page().unwrap();

    let mut expected = b"\n   0 1 2 3 4 5 6 7 8 9 A B C D E F \n\n".to_vec();
    for row in 0u8..16 {
        expected.push(b"0123456789ABCDEF"[row as usize]);
        for col in 0u8..16 {
            expected.push((row * 16 + col).max(0x20));
            expected.push(b' ');
        }
        expected.push(b'\n');
    }
    expected.extend(CUT);
    assert_eq!(bytes(&s), expected.as_slice());

    // Rows 0 and 1 are all blank cells.
    let first_row = &bytes(&s)[38..38 + 33];
    assert_eq!(first_row[0], b'0');
    assert!(first_row[1..].iter().all(|&b| b == b' '));
}

#[test]
fn test_unreachable_device_skips() {
    let device = MemoryDevice::new().fail_probes(1).fail_opens(2);
    let mut s = session_with(device, GeneratorConfig::default());

    let outcome = s
        .generator
        .text("lost", 1, Some(&Style::new().bold(true)), true)
        .unwrap();

    assert_eq!(outcome, Outcome::Skipped);
    assert!(bytes(&s).is_empty());
    assert_eq!(s.generator.current_style(), &Style::defaults());
    assert_eq!(s.generator.health(), ConnectionHealth::Unreachable);
    assert_eq!(s.sleeper.pauses(), vec![Duration::from_secs(5)]);
    assert!(!s.diagnostics.warnings().is_empty());

    // The device comes back for the next call.
    assert_eq!(s.generator.cut().unwrap(), Outcome::Done);
    assert_eq!(bytes(&s), &CUT);
}

#[test]
fn test_strict_mode_errors() {
    let device = MemoryDevice::new().fail_probes(1).fail_opens(2);
    let config = GeneratorConfig {
        strict: true,
        backoff: Duration::from_millis(10),
        ..GeneratorConfig::default()
    };
    let mut s = session_with(device, config);

    assert!(matches!(
        s.generator.test_page(),
        Err(PosError::DeviceUnreachable)
    ));
    assert!(bytes(&s).is_empty());
    assert_eq!(s.sleeper.pauses(), vec![Duration::from_millis(10)]);
}

#[test]
fn test_mid_write_failure_is_error() {
    let device = MemoryDevice::new().fail_writes(1);
    let mut s = session_with(device, GeneratorConfig::default());
    assert!(matches!(
        s.generator.text("x", 1, None, false),
        Err(PosError::Io(_))
    ));
}

#[test]
fn test_failed_operation_still_restores_transient_style() {
    // The style write succeeds, the text write fails.
    let device = MemoryDevice::new().fail_writes_after(1, 1);
    let mut s = session_with(device, GeneratorConfig::default());

    let result = s
        .generator
        .text("X", 0, Some(&Style::new().bold(true)), false);
    assert!(matches!(result, Err(PosError::Io(_))));
    assert_eq!(s.generator.current_style(), &Style::defaults());

    let mut expected = full_style(0, 1);
    expected.extend(full_style(0, 0));
    assert_eq!(bytes(&s), expected.as_slice());

    // Later plain text prints in the session style.
    s.generator.text("Y", 0, None, false).unwrap();
    expected.push(b'Y');
    assert_eq!(bytes(&s), expected.as_slice());
}

#[test]
fn test_failed_restore_keeps_override_in_session() {
    // The style write succeeds, the text and the restore fail.
    let device = MemoryDevice::new().fail_writes_after(1, 2);
    let mut s = session_with(device, GeneratorConfig::default());

    let result = s
        .generator
        .text("X", 0, Some(&Style::new().bold(true)), false);
    assert!(matches!(result, Err(PosError::Io(_))));
    assert_eq!(s.generator.current_style(), &Style::defaults().bold(true));
    assert!(!s.diagnostics.warnings().is_empty());

    // Switching bold off is now a real change and reaches the printer.
    s.generator
        .text("Y", 0, Some(&Style::new().bold(false)), true)
        .unwrap();
    let mut expected = full_style(0, 1);
    expected.extend(full_style(0, 0));
    expected.push(b'Y');
    assert_eq!(bytes(&s), expected.as_slice());
}

#[test]
fn test_missing_image_still_restores_session_style() {
    let mut s = session();
    let result = s.generator.image(
        &PathBuf::from("/nonexistent/posgen-logo.png"),
        Alignment::Right,
    );
    assert!(matches!(result, Err(PosError::Image(_))));

    let mut expected = vec![0x1B, 0x61, 0x02];
    expected.extend(full_style(0, 0));
    assert_eq!(bytes(&s), expected.as_slice());
    assert_eq!(s.generator.current_style(), &Style::defaults());
}

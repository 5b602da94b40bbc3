//! # Code Page 437 Encoding
//!
//! Converts Unicode strings to the PC437 single-byte character table that
//! ESC/POS printers select at power-on (`ESC t 0`).
//!
//! Printable ASCII and `\n` pass through unchanged. Other control characters
//! would be read as printer commands, so they are replaced with `?` like any
//! character not in CP437.

use tracing::debug;

/// Unicode code points for CP437 bytes 0x80–0xFF, in byte order.
const UPPER_HALF: [char; 128] = [
    // 0x80
    'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç', 'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å',
    // 0x90
    'É', 'æ', 'Æ', 'ô', 'ö', 'ò', 'û', 'ù', 'ÿ', 'Ö', 'Ü', '¢', '£', '¥', '₧', 'ƒ',
    // 0xA0
    'á', 'í', 'ó', 'ú', 'ñ', 'Ñ', 'ª', 'º', '¿', '⌐', '¬', '½', '¼', '¡', '«', '»',
    // 0xB0
    '░', '▒', '▓', '│', '┤', '╡', '╢', '╖', '╕', '╣', '║', '╗', '╝', '╜', '╛', '┐',
    // 0xC0
    '└', '┴', '┬', '├', '─', '┼', '╞', '╟', '╚', '╔', '╩', '╦', '╠', '═', '╬', '╧',
    // 0xD0
    '╨', '╤', '╥', '╙', '╘', '╒', '╓', '╫', '╪', '┘', '┌', '█', '▄', '▌', '▐', '▀',
    // 0xE0
    'α', 'ß', 'Γ', 'π', 'Σ', 'σ', 'µ', 'τ', 'Φ', 'Θ', 'Ω', 'δ', '∞', 'φ', 'ε', '∩',
    // 0xF0
    '≡', '±', '≥', '≤', '⌠', '⌡', '÷', '≈', '°', '∙', '·', '√', 'ⁿ', '²', '■', '\u{00A0}',
];

/// Encode a Unicode string as CP437 bytes.
pub fn encode(s: &str) -> Vec<u8> {
    s.chars()
        .map(|ch| {
            if ch == '\n' {
                b'\n'
            } else if ch.is_ascii_control() {
                debug!("cp437: control character U+{:04X} replaced", ch as u32);
                b'?'
            } else if ch.is_ascii() {
                ch as u8
            } else if let Some(byte) = unicode_to_cp437(ch) {
                byte
            } else {
                debug!("cp437: unmapped character {:?} (U+{:04X})", ch, ch as u32);
                b'?'
            }
        })
        .collect()
}

/// Map a Unicode code point to its CP437 byte value (0x80–0xFF).
fn unicode_to_cp437(ch: char) -> Option<u8> {
    UPPER_HALF
        .iter()
        .position(|&c| c == ch)
        .map(|idx| 0x80 + idx as u8)
}

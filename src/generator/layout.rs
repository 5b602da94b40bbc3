//! Line layouts: horizontal rules and the code-page test grid.

/// Column header of the test grid.
pub const TEST_PAGE_HEADER: &str = "   0 1 2 3 4 5 6 7 8 9 A B C D E F ";

/// A dash rule spanning `capacity` columns, or half of them (floored).
///
/// ```
/// use escpos_generator::generator::layout::rule_line;
///
/// assert_eq!(rule_line(32, false).len(), 32);
/// assert_eq!(rule_line(42, true), "-".repeat(21));
/// ```
pub fn rule_line(capacity: usize, half: bool) -> String {
    let width = if half { capacity / 2 } else { capacity };
    "-".repeat(width)
}

/// One row of the test grid, as raw code-page bytes.
///
/// The uppercase hex row label is followed by 16 cells, each the byte
/// `row * 16 + col` and a space. Control codes below `0x20` print as spaces.
pub fn test_page_row(row: u8) -> Vec<u8> {
    let row = row & 0x0F;
    let mut out = Vec::with_capacity(33);
    out.push(hex_digit(row));
    for col in 0..16u8 {
        out.push((row * 16 + col).max(0x20));
        out.push(b' ');
    }
    out
}

fn hex_digit(n: u8) -> u8 {
    match n {
        0..=9 => b'0' + n,
        _ => b'A' + (n - 10),
    }
}

//! Utilities for A1-style cell references ("B3", "A1:C4").
//!
//! Columns are letters (A = 0, Z = 25, AA = 26), rows are 1-based numbers.
//! All returned indices are 0-based.

/// Parse a cell reference like "A1" into (column, row), 0-indexed.
///
/// `$` anchors are ignored. Returns `None` for anything that is not letters
/// followed by digits, for row 0, and on overflow.
pub fn parse_cell_ref(cell_ref: &str) -> Option<(u32, u32)> {
    let mut column: u32 = 0;
    let mut row: u32 = 0;
    let mut saw_column = false;
    let mut saw_row = false;

    for b in cell_ref.trim().bytes() {
        if b == b'$' {
            continue;
        }
        if b.is_ascii_alphabetic() {
            if saw_row {
                return None;
            }
            let digit = u32::from(b.to_ascii_uppercase() - b'A') + 1;
            column = column.checked_mul(26)?.checked_add(digit)?;
            saw_column = true;
        } else if b.is_ascii_digit() {
            row = row.checked_mul(10)?.checked_add(u32::from(b - b'0'))?;
            saw_row = true;
        } else {
            return None;
        }
    }

    if !saw_column || !saw_row || row == 0 {
        return None;
    }

    Some((column - 1, row - 1))
}

/// Parse a range like "A1:B10" or a single "A1" into
/// (from_column, from_row, to_column, to_row).
pub fn parse_cell_range(range: &str) -> Option<(u32, u32, u32, u32)> {
    if let Some((start, end)) = range.split_once(':') {
        let (from_column, from_row) = parse_cell_ref(start)?;
        let (to_column, to_row) = parse_cell_ref(end)?;
        Some((from_column, from_row, to_column, to_row))
    } else {
        let (column, row) = parse_cell_ref(range)?;
        Some((column, row, column, row))
    }
}

/// Column letters for a 0-based column index (0 -> "A", 27 -> "AB").
pub fn column_name(column: u32) -> String {
    let mut n = u64::from(column) + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        // rem < 26, fits in u8
        letters.push(b'A' + u8::try_from(rem).unwrap_or(0));
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Format a 0-based (column, row) as an A1-style reference.
pub fn format_cell_ref(column: u32, row: u32) -> String {
    format!("{}{}", column_name(column), u64::from(row) + 1)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cell_ref() {
        assert_eq!(parse_cell_ref("A1"), Some((0, 0)));
        assert_eq!(parse_cell_ref("b3"), Some((1, 2)));
        assert_eq!(parse_cell_ref("$AA$10"), Some((26, 9)));
        assert_eq!(parse_cell_ref("1A"), None);
        assert_eq!(parse_cell_ref("A0"), None);
        assert_eq!(parse_cell_ref("A"), None);
        assert_eq!(parse_cell_ref("A-1"), None);
    }

    #[test]
    fn test_parse_cell_range() {
        assert_eq!(parse_cell_range("A1:B2"), Some((0, 0, 1, 1)));
        assert_eq!(parse_cell_range("C4"), Some((2, 3, 2, 3)));
        assert_eq!(parse_cell_range("A1:"), None);
    }

    #[test]
    fn test_column_name_round_trip() {
        for column in [0, 1, 25, 26, 27, 51, 52, 701, 702, 16_383] {
            let name = column_name(column);
            assert_eq!(parse_cell_ref(&format!("{name}1")), Some((column, 0)));
        }
        assert_eq!(column_name(0), "A");
        assert_eq!(column_name(26), "AA");
        assert_eq!(format_cell_ref(2, 9), "C10");
    }
}

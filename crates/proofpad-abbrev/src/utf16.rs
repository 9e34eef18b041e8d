//! UTF-16 column arithmetic.
//!
//! The host editor reports cursor positions as 1-based columns measured in
//! UTF-16 code units. All ranges this crate emits use the same convention,
//! so a non-BMP symbol (for example `𝔸`) counts as two units, not one.

/// Length of `s` in UTF-16 code units.
#[must_use]
pub fn len(s: &str) -> u32 {
    s.chars().map(|c| c.len_utf16() as u32).sum()
}

/// Byte index in `s` corresponding to 1-based UTF-16 column `column`.
///
/// Column `1` is the start of the line; column `len(s) + 1` is one past the
/// end. Returns `None` when the column is out of range or would land inside
/// a surrogate pair.
#[must_use]
pub fn byte_index(s: &str, column: u32) -> Option<usize> {
    let mut units = column.checked_sub(1)?;
    if units == 0 {
        return Some(0);
    }
    for (byte, c) in s.char_indices() {
        let w = c.len_utf16() as u32;
        if units < w {
            // Column points inside a surrogate pair.
            return None;
        }
        units -= w;
        if units == 0 {
            return Some(byte + c.len_utf8());
        }
    }
    None
}

//! Prefix completion behind the `\` trigger character.
//!
//! Read-only side channel: it shares the table with the replacement engine
//! but never touches the trigger state.

use crate::table::{AbbreviationTable, ESCAPE_MARKER};
use crate::utf16;

/// One completion candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// The abbreviation key, escape marker included (`\to`).
    pub label: String,
    /// Text to insert when accepted: the Unicode symbol.
    pub insert_text: String,
    /// Display detail: the symbol again, shown next to the label.
    pub detail: String,
    /// 1-based UTF-16 column range covering the typed `\prefix`.
    pub replace_start: u32,
    pub replace_end: u32,
}

/// Completion candidates for the `\`-prefixed token ending at the cursor.
///
/// `text_before_cursor` is the line up to (not including) the cursor;
/// `cursor_column` is its 1-based UTF-16 end column. Returns an empty list
/// unless the text ends with the escape marker followed by zero or more
/// letters. Candidates are ordered longest key first (the table's match
/// order), filtered to those starting with the typed prefix.
#[must_use]
pub fn completions(
    table: &AbbreviationTable,
    text_before_cursor: &str,
    cursor_column: u32,
) -> Vec<Suggestion> {
    let Some(prefix) = trailing_mnemonic_prefix(text_before_cursor) else {
        return Vec::new();
    };
    let prefix_units = utf16::len(prefix);
    let Some(replace_start) = cursor_column.checked_sub(prefix_units) else {
        return Vec::new();
    };
    if replace_start < 1 {
        return Vec::new();
    }

    table
        .match_order()
        .filter(|key| key.starts_with(prefix))
        .map(|key| Suggestion {
            label: key.to_string(),
            insert_text: table.get(key).unwrap_or_default().to_string(),
            detail: table.get(key).unwrap_or_default().to_string(),
            replace_start,
            replace_end: cursor_column,
        })
        .collect()
}

/// The trailing `\letters*` run of `text`, escape marker included, or `None`
/// when the text does not end in one.
#[must_use]
pub fn trailing_mnemonic_prefix(text: &str) -> Option<&str> {
    let mut start = None;
    for (i, c) in text.char_indices().rev() {
        if c == ESCAPE_MARKER {
            start = Some(i);
            break;
        }
        if !c.is_alphabetic() {
            return None;
        }
    }
    start.map(|i| &text[i..])
}

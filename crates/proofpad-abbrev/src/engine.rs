//! Trigger detection and replacement computation.
//!
//! The engine sits inside the host editor's content-change callback. Its
//! job on every keystroke: decide whether the token just behind the cursor
//! completed a known mnemonic, and if so compute one [`ReplacementOp`] the
//! host applies. The trigger heuristic is deliberately a single documented
//! rule (see [`replacement_for`]) rather than anything adaptive.

use tracing::trace;

use crate::table::{AbbreviationTable, ESCAPE_MARKER};
use crate::utf16;

/// One content-change notification from the host editor.
///
/// Columns are 1-based UTF-16 code units, the host editor's convention.
/// `inserted` is the fragment the *user* just typed - empty for pure cursor
/// moves, multi-character for paste. `cursor_column` is the position after
/// the insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditEvent<'a> {
    pub line_number: u32,
    /// Full text of the current line, after the insertion.
    pub line: &'a str,
    pub inserted: &'a str,
    pub cursor_column: u32,
}

/// A computed replace-and-reposition operation.
///
/// Computed fresh per qualifying [`EditEvent`], applied exactly once by the
/// host, then discarded. The delete range is half-open in UTF-16 columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementOp {
    pub line_number: u32,
    pub delete_start: u32,
    pub delete_end: u32,
    pub insert: String,
    /// Where the cursor must land after the edit, overriding whatever the
    /// host would compute from the raw splice.
    pub new_cursor_column: u32,
}

/// A character that ends a token: not a letter and not the escape marker.
#[must_use]
pub fn is_delimiter(c: char) -> bool {
    !c.is_alphabetic() && c != ESCAPE_MARKER
}

/// Decide whether `event` completes an abbreviation and compute the edit.
///
/// Trigger rule: the inserted fragment must be exactly one character, and
/// either that character is a delimiter, or the character immediately after
/// the cursor exists and is a delimiter. End-of-line does *not* count as a
/// trailing delimiter, so typing `\t`, `\ti`, `\tim`... at the end of a line
/// never fires until a real delimiter arrives.
///
/// Matching: strip the trailing delimiter run from the pre-cursor text,
/// then take the longest table key the remaining text ends with. The edit
/// replaces the matched mnemonic *and* its delimiter run with
/// `symbol + delimiter run`, so the new cursor column is
/// `token start + utf16_len(symbol) + utf16_len(delimiters)`.
///
/// Malformed input (column out of range, column inside a surrogate pair,
/// empty table) fails safe: `None`, never a panic.
#[must_use]
pub fn replacement_for(table: &AbbreviationTable, event: &EditEvent<'_>) -> Option<ReplacementOp> {
    if table.is_empty() {
        return None;
    }
    let mut inserted_chars = event.inserted.chars();
    let inserted = inserted_chars.next()?;
    if inserted_chars.next().is_some() {
        // Paste of multiple characters; never rewrite those.
        return None;
    }

    let cursor_byte = utf16::byte_index(event.line, event.cursor_column)?;
    let before = &event.line[..cursor_byte];
    let after = &event.line[cursor_byte..];

    let token_complete =
        is_delimiter(inserted) || after.chars().next().is_some_and(is_delimiter);
    if !token_complete {
        return None;
    }

    // Strip the trailing delimiter run; what remains is the token candidate.
    let token_end_byte = before
        .char_indices()
        .rev()
        .take_while(|(_, c)| is_delimiter(*c))
        .last()
        .map_or(before.len(), |(i, _)| i);
    let candidate = &before[..token_end_byte];
    let delimiters = &before[token_end_byte..];

    let (key, symbol) = table.longest_suffix_match(candidate)?;

    let delim_units = utf16::len(delimiters);
    let key_units = utf16::len(key);
    let token_end_col = event.cursor_column.checked_sub(delim_units)?;
    let delete_start = token_end_col.checked_sub(key_units)?;
    if delete_start < 1 {
        return None;
    }

    trace!(key, symbol, delete_start, "abbreviation completed");
    Some(ReplacementOp {
        line_number: event.line_number,
        delete_start,
        delete_end: event.cursor_column,
        insert: format!("{symbol}{delimiters}"),
        new_cursor_column: delete_start + utf16::len(symbol) + delim_units,
    })
}

/// Per-editor trigger state: the re-entrancy guard.
///
/// Invocation is strictly serial (single-threaded, synchronous callbacks),
/// so a plain boolean is sufficient: it guards against the engine's own
/// programmatic edit triggering a nested content-change callback, not
/// against concurrent threads. The table is shared and immutable; any
/// number of engines may reference the same one.
#[derive(Debug, Clone)]
pub struct AbbreviationEngine {
    table: std::sync::Arc<AbbreviationTable>,
    applying: bool,
}

impl AbbreviationEngine {
    #[must_use]
    pub fn new(table: std::sync::Arc<AbbreviationTable>) -> Self {
        Self {
            table,
            applying: false,
        }
    }

    #[must_use]
    pub fn table(&self) -> &AbbreviationTable {
        &self.table
    }

    /// True while a programmatic edit is in flight. Content-change
    /// notifications observed in this state must be swallowed.
    #[must_use]
    pub const fn is_applying(&self) -> bool {
        self.applying
    }

    /// Mark the start of a programmatic edit. Must be paired with
    /// [`end_apply`](Self::end_apply) in the same synchronous scope.
    pub fn begin_apply(&mut self) {
        self.applying = true;
    }

    pub fn end_apply(&mut self) {
        self.applying = false;
    }

    /// Compute the replacement for one edit notification, or `None` when the
    /// event does not qualify - including while the engine's own edit is in
    /// flight.
    #[must_use]
    pub fn on_edit(&self, event: &EditEvent<'_>) -> Option<ReplacementOp> {
        if self.applying {
            return None;
        }
        replacement_for(&self.table, event)
    }
}

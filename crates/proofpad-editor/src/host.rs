//! The editor-widget seam.
//!
//! [`EditorHost`] is shaped after the widget API the hosting page exposes:
//! line-oriented reads, a cursor, and range-based text replacement with
//! 1-based UTF-16 columns. [`BufferHost`] implements it over a plain line
//! vector so sessions are fully testable without a browser; a production
//! embedder bridges the same trait to the real widget.

use proofpad_abbrev::utf16;
use proofpad_protocol::Position;

/// Widget-shaped host surface consumed by the session.
///
/// Implementations must clamp rather than panic: a session never passes a
/// position it has not clamped itself, but the host is the last line of
/// defense.
pub trait EditorHost {
    fn line_count(&self) -> u32;

    /// Text of 1-based `line`, without its trailing newline.
    fn line_content(&self, line: u32) -> Option<&str>;

    fn position(&self) -> Position;

    fn set_position(&mut self, pos: Position);

    /// Replace the half-open UTF-16 column range `[start_col, end_col)` on
    /// `line` with `text`. `text` must not contain newlines.
    fn execute_edit(&mut self, line: u32, start_col: u32, end_col: u32, text: &str);

    fn value(&self) -> String;

    fn set_value(&mut self, text: &str);
}

/// Deterministic in-memory host.
#[derive(Debug, Clone)]
pub struct BufferHost {
    lines: Vec<String>,
    cursor: Position,
}

impl Default for BufferHost {
    fn default() -> Self {
        Self::new("")
    }
}

impl BufferHost {
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut host = Self {
            lines: Vec::new(),
            cursor: Position { line: 1, column: 1 },
        };
        host.set_value(text);
        host
    }

    /// Clamp `pos` to the buffer: line into `[1, line_count]`, column into
    /// `[1, line length + 1]`.
    #[must_use]
    pub fn clamp(&self, pos: Position) -> Position {
        let line = pos.line.clamp(1, self.line_count());
        let max_col = self
            .line_content(line)
            .map_or(1, |text| utf16::len(text) + 1);
        Position {
            line,
            column: pos.column.clamp(1, max_col),
        }
    }

    /// Insert `text` at the cursor and advance it, as if the user typed.
    /// Newlines split the current line, leaving the cursor at the start of
    /// the line below. Callers forward the same fragment to the
    /// content-change path.
    pub fn type_text(&mut self, text: &str) {
        let mut segments = text.split('\n');
        if let Some(first) = segments.next() {
            self.insert_fragment(first);
        }
        for segment in segments {
            self.break_line();
            self.insert_fragment(segment);
        }
    }

    /// Split the cursor's line in two at the cursor, moving the cursor to
    /// the start of the new line.
    pub fn break_line(&mut self) {
        let pos = self.clamp(self.cursor);
        let index = (pos.line - 1) as usize;
        let byte = Self::column_to_byte(&self.lines[index], pos.column);
        let tail = self.lines[index].split_off(byte);
        self.lines.insert(index + 1, tail);
        self.cursor = Position {
            line: pos.line + 1,
            column: 1,
        };
    }

    fn insert_fragment(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let pos = self.cursor;
        self.execute_edit(pos.line, pos.column, pos.column, text);
        self.cursor = Position {
            line: pos.line,
            column: pos.column + utf16::len(text),
        };
    }

    fn column_to_byte(line: &str, column: u32) -> usize {
        let clamped = column.clamp(1, utf16::len(line) + 1);
        utf16::byte_index(line, clamped).unwrap_or(line.len())
    }
}

impl EditorHost for BufferHost {
    fn line_count(&self) -> u32 {
        self.lines.len() as u32
    }

    fn line_content(&self, line: u32) -> Option<&str> {
        let index = usize::try_from(line.checked_sub(1)?).ok()?;
        self.lines.get(index).map(String::as_str)
    }

    fn position(&self) -> Position {
        self.cursor
    }

    fn set_position(&mut self, pos: Position) {
        self.cursor = self.clamp(pos);
    }

    fn execute_edit(&mut self, line: u32, start_col: u32, end_col: u32, text: &str) {
        debug_assert!(!text.contains('\n'));
        let Some(index) = line.checked_sub(1).map(|l| l as usize) else {
            return;
        };
        let Some(content) = self.lines.get_mut(index) else {
            return;
        };
        let start = Self::column_to_byte(content, start_col);
        let end = Self::column_to_byte(content, end_col.max(start_col));
        content.replace_range(start..end, text);
    }

    fn value(&self) -> String {
        self.lines.join("\n")
    }

    fn set_value(&mut self, text: &str) {
        self.lines = text.split('\n').map(str::to_string).collect();
        self.cursor = Position { line: 1, column: 1 };
    }
}

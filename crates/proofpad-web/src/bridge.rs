//! Target-independent JSON bridge over the editor session.
//!
//! Everything the wasm wrapper exports is implemented here against plain
//! strings, so the whole surface is exercised by native tests. The shim's
//! contract: JSON in, JSON out, host-supplied timestamps, and no panics -
//! every failure is a typed error the shim can log.

use std::sync::Arc;

use proofpad_abbrev::{AbbreviationTable, builtin_table};
use proofpad_editor::language::{TokenSpan, classify_lines};
use proofpad_editor::{BufferHost, EditorHost, EditorSession, StatusLevel};
use proofpad_protocol::{InboundMessage, Position};
use serde::Serialize;

/// Bridge-level failure, stringly enough for a JS console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// Malformed JSON or an unknown message type.
    Decode(String),
    /// JSON encoding failed (practically unreachable for these types).
    Encode(String),
    /// The session refused the operation (for example, save with no
    /// problem loaded).
    Session(String),
}

impl core::fmt::Display for BridgeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Decode(msg) => write!(f, "decode: {msg}"),
            Self::Encode(msg) => write!(f, "encode: {msg}"),
            Self::Session(msg) => write!(f, "session: {msg}"),
        }
    }
}

impl std::error::Error for BridgeError {}

/// Wire mirror of an applied replacement.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EditOutcome {
    line: u32,
    inserted: String,
    cursor_line: u32,
    cursor_column: u32,
}

/// Wire mirror of a completion candidate, shaped for the widget's
/// completion-provider registration point.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompletionItem {
    label: String,
    insert_text: String,
    detail: String,
    replace_start: u32,
    replace_end: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusView<'a> {
    message: &'a str,
    level: &'static str,
}

/// The deterministic core behind the wasm surface.
#[derive(Debug)]
pub struct ProofPadCore {
    session: EditorSession<BufferHost>,
}

impl Default for ProofPadCore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProofPadCore {
    /// Core with the built-in abbreviation table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            session: EditorSession::new(BufferHost::default(), Arc::new(builtin_table().clone())),
        }
    }

    /// Core with a host-supplied abbreviation table (JSON object of
    /// mnemonic → symbol).
    pub fn with_table_json(json: &str) -> Result<Self, BridgeError> {
        let table =
            AbbreviationTable::from_json_str(json).map_err(|e| BridgeError::Decode(e.to_string()))?;
        Ok(Self {
            session: EditorSession::new(BufferHost::default(), Arc::new(table)),
        })
    }

    /// The `IFRAME_READY` handshake, as JSON for `postMessage`.
    pub fn ready_message(&self, now_ms: u64) -> Result<String, BridgeError> {
        self.session
            .ready_message(now_ms)
            .to_json_string()
            .map_err(|e| BridgeError::Encode(e.to_string()))
    }

    /// Decode and dispatch one host message; returns the outbound replies
    /// as JSON strings for `postMessage`.
    pub fn handle_message(&mut self, json: &str, now_ms: u64) -> Result<Vec<String>, BridgeError> {
        let message =
            InboundMessage::from_json_str(json).map_err(|e| BridgeError::Decode(e.to_string()))?;
        self.session
            .handle_message(message, now_ms)
            .iter()
            .map(|reply| {
                reply
                    .to_json_string()
                    .map_err(|e| BridgeError::Encode(e.to_string()))
            })
            .collect()
    }

    /// Type `fragment` at the cursor and run the substitution engine.
    /// Newlines split the line, so Enter flows through here too.
    ///
    /// Returns the applied replacement as JSON when one fired, `null`-like
    /// `None` otherwise; the shim forwards it to the real widget.
    pub fn insert_text(&mut self, fragment: &str) -> Result<Option<String>, BridgeError> {
        self.session.host_mut().type_text(fragment);
        match self.session.notify_content_change(fragment) {
            Some(applied) => {
                let outcome = EditOutcome {
                    line: applied.line,
                    inserted: applied.inserted,
                    cursor_line: applied.new_cursor.line,
                    cursor_column: applied.new_cursor.column,
                };
                serde_json::to_string(&outcome)
                    .map(Some)
                    .map_err(|e| BridgeError::Encode(e.to_string()))
            }
            None => Ok(None),
        }
    }

    pub fn set_cursor(&mut self, line: u32, column: u32) {
        self.session
            .host_mut()
            .set_position(Position { line, column });
    }

    #[must_use]
    pub fn cursor(&self) -> (u32, u32) {
        let pos = self.session.host().position();
        (pos.line, pos.column)
    }

    #[must_use]
    pub fn value(&self) -> String {
        self.session.host().value()
    }

    pub fn set_value(&mut self, text: &str) {
        self.session.host_mut().set_value(text);
    }

    /// Completion candidates at the cursor, as a JSON array.
    pub fn completions(&self) -> Result<String, BridgeError> {
        let items: Vec<CompletionItem> = self
            .session
            .completions()
            .into_iter()
            .map(|s| CompletionItem {
                label: s.label,
                insert_text: s.insert_text,
                detail: s.detail,
                replace_start: s.replace_start,
                replace_end: s.replace_end,
            })
            .collect();
        serde_json::to_string(&items).map_err(|e| BridgeError::Encode(e.to_string()))
    }

    /// Save the buffer (the Ctrl-S path); returns the `SOLUTION_SUBMITTED`
    /// message as JSON.
    pub fn save(&mut self, now_ms: u64) -> Result<String, BridgeError> {
        let reply = self
            .session
            .save(now_ms)
            .map_err(|e| BridgeError::Session(e.to_string()))?;
        reply
            .to_json_string()
            .map_err(|e| BridgeError::Encode(e.to_string()))
    }

    /// Lexical classification of the whole buffer, one span array per line,
    /// as JSON for the shim's highlighter.
    pub fn classify(&self) -> Result<String, BridgeError> {
        let spans: Vec<Vec<TokenSpan>> = classify_lines(&self.value());
        serde_json::to_string(&spans).map_err(|e| BridgeError::Encode(e.to_string()))
    }

    /// Current status line as JSON (`{"message": ..., "level": ...}`).
    pub fn status(&self) -> Result<String, BridgeError> {
        let status = self.session.status();
        let level = match status.level {
            StatusLevel::Neutral => "",
            StatusLevel::Success => "success",
            StatusLevel::Error => "error",
        };
        serde_json::to_string(&StatusView {
            message: &status.message,
            level,
        })
        .map_err(|e| BridgeError::Encode(e.to_string()))
    }
}

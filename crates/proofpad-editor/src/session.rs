//! The editor session: protocol dispatch and abbreviation wiring.

use std::sync::Arc;

use proofpad_abbrev::{AbbreviationEngine, AbbreviationTable, EditEvent, Suggestion, utf16};
use proofpad_protocol::{
    Diagnostic, EditorConfig, InboundMessage, OutboundMessage, Position, ProblemData, Solution,
};
use tracing::debug;

use crate::host::EditorHost;

/// Placeholder shown before a problem is loaded and after `CLEAR_EDITOR`.
pub const PLACEHOLDER: &str = "-- Write your Lean proof here\n\n";

/// Session-level failure. Everything here is local and non-fatal; the
/// embedder surfaces it on the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// `save` or `REQUEST_SOLUTION` with no problem loaded.
    NoProblemLoaded,
}

impl core::fmt::Display for SessionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoProblemLoaded => write!(f, "no problem loaded"),
        }
    }
}

impl std::error::Error for SessionError {}

/// Status-line severity, mirrored to the host's status element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusLevel {
    #[default]
    Neutral,
    Success,
    Error,
}

/// Current status-line content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Status {
    pub message: String,
    pub level: StatusLevel,
}

/// What a content-change notification did, for tests and logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedReplacement {
    /// The line the replacement rewrote.
    pub line: u32,
    pub inserted: String,
    /// Where the cursor ended up: on the rewritten line normally, at the
    /// start of the following line when a newline completed the token.
    pub new_cursor: Position,
}

/// One editor instance: host widget, abbreviation engine, and the state the
/// hosting page drives through the message protocol.
#[derive(Debug)]
pub struct EditorSession<H: EditorHost> {
    host: H,
    engine: AbbreviationEngine,
    problem: Option<ProblemData>,
    config: EditorConfig,
    diagnostics: Vec<Diagnostic>,
    status: Status,
}

impl<H: EditorHost> EditorSession<H> {
    /// Create a session over `host` with the given abbreviation table. The
    /// buffer starts with the placeholder text.
    pub fn new(mut host: H, table: Arc<AbbreviationTable>) -> Self {
        host.set_value(PLACEHOLDER);
        Self {
            host,
            engine: AbbreviationEngine::new(table),
            problem: None,
            config: EditorConfig::default(),
            diagnostics: Vec::new(),
            status: Status {
                message: "Ready".to_string(),
                level: StatusLevel::Success,
            },
        }
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    #[must_use]
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub fn status(&self) -> &Status {
        &self.status
    }

    #[must_use]
    pub fn problem(&self) -> Option<&ProblemData> {
        self.problem.as_ref()
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The `IFRAME_READY` handshake message, announced once at startup.
    #[must_use]
    pub fn ready_message(&self, timestamp_ms: u64) -> OutboundMessage {
        OutboundMessage::IframeReady { timestamp_ms }
    }

    /// Dispatch one inbound message, returning the outbound replies.
    ///
    /// `now_ms` is the host clock (milliseconds since the Unix epoch); the
    /// session never reads time itself.
    pub fn handle_message(&mut self, message: InboundMessage, now_ms: u64) -> Vec<OutboundMessage> {
        debug!(?message, "inbound");
        match message {
            InboundMessage::LoadProblem(problem) => self.load_problem(problem),
            InboundMessage::RequestSolution => match self.solution(now_ms) {
                Ok(solution) => vec![OutboundMessage::SolutionData(solution)],
                Err(_) => Vec::new(),
            },
            InboundMessage::ClearEditor => {
                self.clear();
                Vec::new()
            }
            InboundMessage::Configure(config) => {
                self.configure(config);
                Vec::new()
            }
            InboundMessage::JumpToPosition(pos) => {
                self.host.set_position(pos);
                Vec::new()
            }
            InboundMessage::SetDiagnostics(diags) => {
                self.diagnostics = diags;
                Vec::new()
            }
        }
    }

    fn load_problem(&mut self, problem: ProblemData) -> Vec<OutboundMessage> {
        let initial = problem.initial_code.clone().unwrap_or_else(|| {
            format!("-- Problem: {}\n-- {}\n\n", problem.title, problem.description)
        });
        self.host.set_value(&initial);
        self.diagnostics.clear();
        self.set_status("Problem loaded", StatusLevel::Success);
        let id = problem.id.clone();
        self.problem = Some(problem);
        vec![OutboundMessage::ProblemLoaded { problem_id: id }]
    }

    fn clear(&mut self) {
        self.host.set_value(PLACEHOLDER);
        self.problem = None;
        self.diagnostics.clear();
        self.set_status("Editor cleared", StatusLevel::Success);
    }

    /// Merge `config` into the current settings, field by field: a message
    /// that omits a field leaves the current value untouched.
    fn configure(&mut self, config: EditorConfig) {
        let backend_ready =
            config.backend_config.is_some() && config.submit_to_backend == Some(true);
        if config.backend_config.is_some() {
            self.config.backend_config = config.backend_config;
        }
        if config.submit_to_backend.is_some() {
            self.config.submit_to_backend = config.submit_to_backend;
        }
        if config.user_id.is_some() {
            self.config.user_id = config.user_id;
        }
        if backend_ready {
            self.set_status("Backend configured", StatusLevel::Success);
        }
    }

    /// Snapshot the current buffer as a [`Solution`].
    pub fn solution(&self, timestamp_ms: u64) -> Result<Solution, SessionError> {
        let problem = self.problem.as_ref().ok_or(SessionError::NoProblemLoaded)?;
        Ok(Solution {
            problem_id: problem.id.clone(),
            code: self.host.value(),
            timestamp_ms,
            user_id: self.config.user_id.clone(),
            submission_id: None,
        })
    }

    /// Save the current solution (the Ctrl-S / save-button path).
    ///
    /// The returned `SOLUTION_SUBMITTED` message carries the payload; when a
    /// backend is configured the hosting page performs the actual HTTP call
    /// with it. On [`SessionError`] the status line turns into an error.
    pub fn save(&mut self, timestamp_ms: u64) -> Result<OutboundMessage, SessionError> {
        match self.solution(timestamp_ms) {
            Ok(solution) => {
                let message = if self.config.submit_to_backend == Some(true) {
                    "Submitting..."
                } else {
                    "Solution saved!"
                };
                self.set_status(message, StatusLevel::Success);
                Ok(OutboundMessage::SolutionSubmitted(solution))
            }
            Err(e) => {
                self.set_status("No problem loaded", StatusLevel::Error);
                Err(e)
            }
        }
    }

    /// Content-change entry point: the host calls this after every user
    /// edit, passing the fragment that was inserted.
    ///
    /// At most one replacement is computed and applied. The engine's guard
    /// is set for the duration of the programmatic edit, so the
    /// notification that edit produces (if the host re-enters synchronously)
    /// is swallowed. The cursor is repositioned explicitly, overriding
    /// whatever the widget would infer from the raw splice.
    pub fn notify_content_change(&mut self, inserted: &str) -> Option<AppliedReplacement> {
        if self.engine.is_applying() {
            return None;
        }
        let pos = self.host.position();
        // An Enter has already split the line by the time we hear about it:
        // the cursor sits at the start of the new line, and the token the
        // newline completed ends the line above.
        let line_break = inserted == "\n" && pos.column == 1 && pos.line > 1;
        let op = {
            let line_number = if line_break { pos.line - 1 } else { pos.line };
            let line = self.host.line_content(line_number)?;
            let cursor_column = if line_break {
                utf16::len(line) + 1
            } else {
                pos.column
            };
            let event = EditEvent {
                line_number,
                line,
                inserted,
                cursor_column,
            };
            self.engine.on_edit(&event)?
        };

        self.engine.begin_apply();
        self.host
            .execute_edit(op.line_number, op.delete_start, op.delete_end, &op.insert);
        // After an Enter the cursor already belongs to the new line, and the
        // rewrite above cannot shift it.
        let new_cursor = if line_break {
            pos
        } else {
            Position {
                line: op.line_number,
                column: op.new_cursor_column,
            }
        };
        self.host.set_position(new_cursor);
        self.engine.end_apply();

        debug!(line = op.line_number, insert = %op.insert, "applied abbreviation");
        Some(AppliedReplacement {
            line: op.line_number,
            inserted: op.insert,
            new_cursor,
        })
    }

    /// Completion candidates for the current cursor position.
    #[must_use]
    pub fn completions(&self) -> Vec<Suggestion> {
        let pos = self.host.position();
        let Some(line) = self.host.line_content(pos.line) else {
            return Vec::new();
        };
        let Some(cursor_byte) = utf16::byte_index(line, pos.column) else {
            return Vec::new();
        };
        proofpad_abbrev::completions(self.engine.table(), &line[..cursor_byte], pos.column)
    }

    fn set_status(&mut self, message: &str, level: StatusLevel) {
        self.status = Status {
            message: message.to_string(),
            level,
        };
    }
}

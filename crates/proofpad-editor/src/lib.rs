#![forbid(unsafe_code)]

//! Editor session logic for ProofPad.
//!
//! The host page owns the real editor widget; this crate owns everything
//! deterministic behind it:
//! - [`EditorHost`] - the widget-shaped seam (line content, cursor,
//!   range edits) plus [`BufferHost`], a deterministic in-memory
//!   implementation used by tests and the wasm facade,
//! - [`EditorSession`] - protocol dispatch, problem/config/status state,
//!   and the abbreviation engine wired into the content-change stream
//!   behind its re-entrancy guard,
//! - [`language`] - purely lexical Lean token classification for
//!   highlighting (no semantic analysis).

pub mod host;
pub mod language;
pub mod session;

pub use host::{BufferHost, EditorHost};
pub use session::{
    AppliedReplacement, EditorSession, PLACEHOLDER, SessionError, Status, StatusLevel,
};

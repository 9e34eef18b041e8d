#![forbid(unsafe_code)]

//! Message schema for the ProofPad iframe boundary.
//!
//! The hosting page and the embedded editor exchange `postMessage` payloads
//! of the shape `{ "type": "...", "data": ... }`. This crate pins that wire
//! format down as typed enums with stable JSON encoding:
//! - [`InboundMessage`] - host page → editor (`LOAD_PROBLEM`, `CONFIGURE`, ...),
//! - [`OutboundMessage`] - editor → host page (`IFRAME_READY`,
//!   `SOLUTION_SUBMITTED`, ...),
//! - payload types ([`ProblemData`], [`Solution`], [`EditorConfig`],
//!   [`Diagnostic`], [`Position`]) with the host page's camelCase field
//!   naming.
//!
//! Decoding an unknown `type` tag is an ordinary `Err`; the session logs and
//! drops it rather than crashing the host.
//!
//! # Example
//! ```
//! use proofpad_protocol::InboundMessage;
//!
//! let msg = InboundMessage::from_json_str(
//!     r#"{"type": "LOAD_PROBLEM", "data": {"id": "p1", "title": "Modus ponens", "description": "p → q"}}"#,
//! ).unwrap();
//! assert!(matches!(msg, InboundMessage::LoadProblem(_)));
//! ```

mod messages;
mod types;

pub use messages::{InboundMessage, OutboundMessage};
pub use types::{
    BackendConfig, Diagnostic, DiagnosticSeverity, EditorConfig, Position, ProblemData, Range,
    Solution,
};

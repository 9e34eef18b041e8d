//! Payload types carried in the `data` field of protocol messages.

use serde::{Deserialize, Serialize};

/// A problem pushed by the host page with `LOAD_PROBLEM`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemData {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Starter code; when absent the editor synthesizes a comment header
    /// from the title and description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_code: Option<String>,
}

/// A solution snapshot, sent outward with `SOLUTION_SUBMITTED` and
/// `SOLUTION_DATA`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Solution {
    pub problem_id: String,
    pub code: String,
    /// Milliseconds since the Unix epoch, supplied by the host clock.
    #[serde(rename = "timestamp")]
    pub timestamp_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Present when a backend submission assigned one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_id: Option<String>,
}

/// Backend submission endpoint description (`CONFIGURE` payload).
///
/// The editor core never performs the HTTP call itself; the host transport
/// does. This type exists so configuration round-trips losslessly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendConfig {
    pub endpoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Extra headers, kept ordered for deterministic encoding.
    #[serde(default, skip_serializing_if = "std::collections::BTreeMap::is_empty")]
    pub headers: std::collections::BTreeMap<String, String>,
}

/// Editor configuration (`CONFIGURE` payload).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend_config: Option<BackendConfig>,
    /// `None` when the message leaves the current setting untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submit_to_backend: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// 1-based position, column in UTF-16 code units (host editor convention).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

/// Half-open range between two positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Hint,
    Info,
    Warning,
    Error,
}

/// One diagnostic marker pushed by the host with `SET_DIAGNOSTICS`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub range: Range,
    pub severity: DiagnosticSeverity,
    pub message: String,
}

//! Inbound and outbound message envelopes.

use serde::{Deserialize, Serialize};

use crate::types::{Diagnostic, EditorConfig, Position, ProblemData, Solution};

/// Host page → editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InboundMessage {
    LoadProblem(ProblemData),
    RequestSolution,
    ClearEditor,
    Configure(EditorConfig),
    JumpToPosition(Position),
    SetDiagnostics(Vec<Diagnostic>),
}

/// Editor → host page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutboundMessage {
    #[serde(rename_all = "camelCase")]
    IframeReady {
        #[serde(rename = "timestamp")]
        timestamp_ms: u64,
    },
    #[serde(rename_all = "camelCase")]
    ProblemLoaded { problem_id: String },
    SolutionSubmitted(Solution),
    SolutionData(Solution),
}

impl InboundMessage {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl OutboundMessage {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BackendConfig, DiagnosticSeverity, Range};
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_host_shaped_load_problem() {
        // Exactly what the hosting page posts.
        let json = r#"{
            "type": "LOAD_PROBLEM",
            "data": {
                "id": "p-42",
                "title": "And commutes",
                "description": "Prove p ∧ q → q ∧ p",
                "initialCode": "theorem and_comm' : p ∧ q → q ∧ p := by\n  sorry\n"
            }
        }"#;
        let msg = InboundMessage::from_json_str(json).unwrap();
        let InboundMessage::LoadProblem(problem) = msg else {
            panic!("wrong variant");
        };
        assert_eq!(problem.id, "p-42");
        assert!(problem.initial_code.unwrap().starts_with("theorem"));
    }

    #[test]
    fn unit_variants_decode_with_or_without_data() {
        assert_eq!(
            InboundMessage::from_json_str(r#"{"type": "REQUEST_SOLUTION"}"#).unwrap(),
            InboundMessage::RequestSolution
        );
        assert_eq!(
            InboundMessage::from_json_str(r#"{"type": "CLEAR_EDITOR", "data": null}"#).unwrap(),
            InboundMessage::ClearEditor
        );
    }

    #[test]
    fn unknown_tag_is_an_error_not_a_panic() {
        assert!(InboundMessage::from_json_str(r#"{"type": "SELF_DESTRUCT"}"#).is_err());
        assert!(InboundMessage::from_json_str("not json").is_err());
    }

    #[test]
    fn configure_round_trips_with_backend() {
        let json = r#"{
            "type": "CONFIGURE",
            "data": {
                "backendConfig": {"endpoint": "https://grader.example/submit", "apiKey": "k"},
                "submitToBackend": true,
                "userId": "u-7"
            }
        }"#;
        let msg = InboundMessage::from_json_str(json).unwrap();
        let InboundMessage::Configure(config) = &msg else {
            panic!("wrong variant");
        };
        assert_eq!(config.submit_to_backend, Some(true));
        assert_eq!(
            config.backend_config,
            Some(BackendConfig {
                endpoint: "https://grader.example/submit".into(),
                api_key: Some("k".into()),
                headers: Default::default(),
            })
        );
        let back = InboundMessage::from_json_str(&msg.to_json_string().unwrap()).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn diagnostics_decode() {
        let json = r#"{
            "type": "SET_DIAGNOSTICS",
            "data": [{
                "range": {"start": {"line": 3, "column": 1}, "end": {"line": 3, "column": 6}},
                "severity": "error",
                "message": "unknown identifier 'sory'"
            }]
        }"#;
        let InboundMessage::SetDiagnostics(diags) =
            InboundMessage::from_json_str(json).unwrap()
        else {
            panic!("wrong variant");
        };
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, DiagnosticSeverity::Error);
        assert_eq!(
            diags[0].range,
            Range {
                start: Position { line: 3, column: 1 },
                end: Position { line: 3, column: 6 },
            }
        );
    }

    #[test]
    fn outbound_wire_shape_matches_host_expectations() {
        let ready = OutboundMessage::IframeReady { timestamp_ms: 1700000000000 };
        assert_eq!(
            ready.to_json_string().unwrap(),
            r#"{"type":"IFRAME_READY","data":{"timestamp":1700000000000}}"#
        );

        let loaded = OutboundMessage::ProblemLoaded { problem_id: "p-42".into() };
        assert_eq!(
            loaded.to_json_string().unwrap(),
            r#"{"type":"PROBLEM_LOADED","data":{"problemId":"p-42"}}"#
        );

        let sol = OutboundMessage::SolutionData(Solution {
            problem_id: "p-42".into(),
            code: "exact h".into(),
            timestamp_ms: 5,
            user_id: None,
            submission_id: None,
        });
        assert_eq!(
            sol.to_json_string().unwrap(),
            r#"{"type":"SOLUTION_DATA","data":{"problemId":"p-42","code":"exact h","timestamp":5}}"#
        );
    }
}

#![forbid(unsafe_code)]

use wasm_bindgen::prelude::*;

use crate::bridge::ProofPadCore;

/// JS-facing editor core for the iframe shim.
///
/// The shim owns the widget, `postMessage`, and the clock; it forwards host
/// messages and keystrokes here and applies whatever comes back. All
/// methods are synchronous and string-based: JSON in, JSON out.
#[wasm_bindgen]
pub struct ProofPadWeb {
    core: ProofPadCore,
}

#[wasm_bindgen]
impl ProofPadWeb {
    /// Core with the built-in abbreviation table.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            core: ProofPadCore::new(),
        }
    }

    /// Core with a host-supplied abbreviation table (JSON object of
    /// mnemonic → symbol).
    #[wasm_bindgen(js_name = withTable)]
    pub fn with_table(table_json: &str) -> Result<ProofPadWeb, JsValue> {
        Ok(Self {
            core: ProofPadCore::with_table_json(table_json).map_err(js_err)?,
        })
    }

    /// The `IFRAME_READY` handshake message for `postMessage`.
    #[wasm_bindgen(js_name = readyMessage)]
    pub fn ready_message(&self, now_ms: f64) -> Result<String, JsValue> {
        self.core.ready_message(now_ms as u64).map_err(js_err)
    }

    /// Dispatch one inbound host message; returns an array of outbound
    /// message JSON strings.
    #[wasm_bindgen(js_name = handleMessage)]
    pub fn handle_message(&mut self, json: &str, now_ms: f64) -> Result<Vec<String>, JsValue> {
        self.core.handle_message(json, now_ms as u64).map_err(js_err)
    }

    /// Type a fragment at the cursor; returns the applied replacement as
    /// JSON, or `null` when nothing fired.
    #[wasm_bindgen(js_name = insertText)]
    pub fn insert_text(&mut self, fragment: &str) -> Result<Option<String>, JsValue> {
        self.core.insert_text(fragment).map_err(js_err)
    }

    #[wasm_bindgen(js_name = setCursor)]
    pub fn set_cursor(&mut self, line: u32, column: u32) {
        self.core.set_cursor(line, column);
    }

    /// Cursor as `[line, column]`.
    pub fn cursor(&self) -> Vec<u32> {
        let (line, column) = self.core.cursor();
        vec![line, column]
    }

    pub fn value(&self) -> String {
        self.core.value()
    }

    #[wasm_bindgen(js_name = setValue)]
    pub fn set_value(&mut self, text: &str) {
        self.core.set_value(text);
    }

    /// Completion candidates at the cursor, as a JSON array.
    pub fn completions(&self) -> Result<String, JsValue> {
        self.core.completions().map_err(js_err)
    }

    /// Save the buffer; returns the `SOLUTION_SUBMITTED` message JSON.
    pub fn save(&mut self, now_ms: f64) -> Result<String, JsValue> {
        self.core.save(now_ms as u64).map_err(js_err)
    }

    /// Lexical highlight spans for the whole buffer, as JSON.
    pub fn classify(&self) -> Result<String, JsValue> {
        self.core.classify().map_err(js_err)
    }

    /// Status line as JSON (`{"message": ..., "level": ...}`).
    pub fn status(&self) -> Result<String, JsValue> {
        self.core.status().map_err(js_err)
    }
}

impl Default for ProofPadWeb {
    fn default() -> Self {
        Self::new()
    }
}

fn js_err(e: crate::bridge::BridgeError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

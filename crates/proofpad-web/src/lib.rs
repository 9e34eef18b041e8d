#![forbid(unsafe_code)]

//! WASM facade for ProofPad.
//!
//! The iframe shim (JS/TS) owns the DOM, the editor widget, `postMessage`,
//! and the clock; this crate exposes the deterministic core behind a
//! string-in/string-out boundary:
//! - [`bridge::ProofPadCore`] - target-independent JSON bridge over
//!   [`proofpad_editor::EditorSession`], fully testable natively,
//! - `ProofPadWeb` (wasm32 only) - the `wasm-bindgen` wrapper the shim
//!   instantiates.
//!
//! Native builds compile only the bridge, so `cargo check --workspace` and
//! the test suite stay green off-wasm.

pub mod bridge;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::ProofPadWeb;

#![forbid(unsafe_code)]

//! Abbreviation-to-Unicode substitution for ProofPad.
//!
//! The host editor notifies this crate of every content change; the engine
//! decides whether the text just behind the cursor completes a known
//! backslash mnemonic and, if so, computes a single replace-and-reposition
//! operation for the host to apply:
//! - [`AbbreviationTable`] - immutable mnemonic → symbol mapping with a
//!   length-sorted match order (longest-match-wins),
//! - [`AbbreviationEngine`] - per-editor trigger state with the re-entrancy
//!   guard that swallows notifications caused by the engine's own edits,
//! - [`ReplacementOp`] - the computed edit, in 1-based UTF-16 columns
//!   matching the host editor's convention,
//! - [`completions`] - the read-only prefix query behind the `\` trigger
//!   character.
//!
//! # Example
//! ```
//! use proofpad_abbrev::{AbbreviationTable, EditEvent, replacement_for};
//!
//! let table = AbbreviationTable::from_pairs([("\\to", "→")]).unwrap();
//!
//! // The user typed a space after `\to`; cursor sits at column 7.
//! let event = EditEvent {
//!     line_number: 1,
//!     line: "a \\to ",
//!     inserted: " ",
//!     cursor_column: 7,
//! };
//! let op = replacement_for(&table, &event).unwrap();
//! assert_eq!((op.delete_start, op.delete_end), (3, 7));
//! assert_eq!(op.insert, "→ ");
//! assert_eq!(op.new_cursor_column, 5);
//! ```

pub mod builtin;
pub mod completion;
pub mod engine;
pub mod table;
pub mod utf16;

pub use builtin::builtin_table;
pub use completion::{Suggestion, completions};
pub use engine::{AbbreviationEngine, EditEvent, ReplacementOp, replacement_for};
pub use table::{AbbreviationTable, ESCAPE_MARKER, TableError};

//! Property-based invariant tests for the abbreviation engine.
//!
//! Verifies:
//! 1.  `replacement_for` never panics, whatever line/column/fragment it sees
//! 2.  Any emitted op has a well-formed range: 1 <= start <= end <= line end
//! 3.  Cursor law: new column == delete_start + utf16(symbol) + utf16(delims)
//! 4.  Longest-match: when one key is a suffix of another, typing the longer
//!     one never yields the shorter one's symbol
//! 5.  Applying an emitted op and re-notifying produces no second op
//!     (idempotence of the rewrite)
//! 6.  Completion candidates are always ordered longest-key-first and all
//!     start with the queried prefix

use proofpad_abbrev::{
    AbbreviationTable, EditEvent, ReplacementOp, completions, replacement_for,
};
use proptest::prelude::*;

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_line() -> impl Strategy<Value = String> {
    // Mix of ASCII, backslashes, math symbols, and astral-plane characters
    // so UTF-16 column arithmetic gets exercised.
    proptest::collection::vec(
        prop_oneof![
            proptest::char::range('a', 'z').prop_map(|c| c.to_string()),
            Just("\\".to_string()),
            Just(" ".to_string()),
            Just("→".to_string()),
            Just("𝔸".to_string()),
            Just("(".to_string()),
        ],
        0..24,
    )
    .prop_map(|parts| parts.concat())
}

fn arb_fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        proptest::char::any().prop_map(|c| c.to_string()),
        Just("ab".to_string()),
    ]
}

fn small_table() -> AbbreviationTable {
    AbbreviationTable::from_pairs([
        ("\\to", "→"),
        ("\\times", "×"),
        ("\\o", "∘"),
        ("\\bbA", "𝔸"),
    ])
    .unwrap()
}

fn utf16_len(s: &str) -> u32 {
    s.chars().map(|c| c.len_utf16() as u32).sum()
}

fn apply(line: &str, op: &ReplacementOp) -> String {
    let to_byte = |col: u32| {
        let mut units = col - 1;
        let mut byte = 0;
        for c in line.chars() {
            if units == 0 {
                break;
            }
            units -= c.len_utf16() as u32;
            byte += c.len_utf8();
        }
        byte
    };
    let mut out = line[..to_byte(op.delete_start)].to_string();
    out.push_str(&op.insert);
    out.push_str(&line[to_byte(op.delete_end)..]);
    out
}

// ── Properties ────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn never_panics_and_ranges_are_well_formed(
        line in arb_line(),
        fragment in arb_fragment(),
        column in 0u32..64,
    ) {
        let table = small_table();
        let event = EditEvent { line_number: 1, line: &line, inserted: &fragment, cursor_column: column };
        if let Some(op) = replacement_for(&table, &event) {
            prop_assert!(op.delete_start >= 1);
            prop_assert!(op.delete_start <= op.delete_end);
            prop_assert!(op.delete_end <= utf16_len(&line) + 1);
            prop_assert!(!op.insert.is_empty());
        }
    }

    #[test]
    fn cursor_law(key_body in "[a-z]{1,6}", symbol in prop_oneof![Just("→"), Just("𝔸"), Just("⁻¹")]) {
        let key = format!("\\{key_body}");
        let table = AbbreviationTable::from_pairs([(key.as_str(), symbol)]).unwrap();
        let line = format!("x {key} ");
        let column = utf16_len(&line) + 1;
        let event = EditEvent { line_number: 1, line: &line, inserted: " ", cursor_column: column };
        let op = replacement_for(&table, &event).unwrap();
        // Token starts at column 3 ("x " prefix), delimiter run is one space.
        prop_assert_eq!(op.delete_start, 3);
        prop_assert_eq!(op.new_cursor_column, 3 + utf16_len(symbol) + 1);
    }

    #[test]
    fn longest_match_beats_suffix(short in "[a-z]{1,3}", extra in "[a-z]{1,3}") {
        // Markerless keys, so the short key is a genuine suffix of the long
        // one and only the length-sorted match order keeps L in front.
        let long = format!("{extra}{short}");
        let table = AbbreviationTable::from_pairs([(short.as_str(), "S"), (long.as_str(), "L")]).unwrap();
        let line = format!("{long} ");
        let event = EditEvent {
            line_number: 1,
            line: &line,
            inserted: " ",
            cursor_column: utf16_len(&line) + 1,
        };
        let op = replacement_for(&table, &event).unwrap();
        prop_assert_eq!(op.insert.as_str(), "L ");
    }

    #[test]
    fn rewrite_is_idempotent(body in "[a-z]{1,5}", prefix in "[a-z ]{0,6}") {
        let table = small_table();
        let line = format!("{prefix}\\{body} ");
        let column = utf16_len(&line) + 1;
        let event = EditEvent { line_number: 1, line: &line, inserted: " ", cursor_column: column };
        if let Some(op) = replacement_for(&table, &event) {
            let rewritten = apply(&line, &op);
            let second = EditEvent {
                line_number: 1,
                line: &rewritten,
                inserted: " ",
                cursor_column: op.new_cursor_column,
            };
            prop_assert_eq!(replacement_for(&table, &second), None);
        }
    }

    #[test]
    fn completion_order_and_prefix(prefix_body in "[a-z]{0,3}") {
        let table = small_table();
        let text = format!("\\{prefix_body}");
        let got = completions(&table, &text, utf16_len(&text) + 1);
        let mut last_len = usize::MAX;
        for s in &got {
            prop_assert!(s.label.starts_with(&text));
            prop_assert!(s.label.len() <= last_len);
            last_len = s.label.len();
        }
    }
}

//! Lexical definition of the Lean surface syntax.
//!
//! Purely lexical: keywords, tactics, comments, strings, numbers, operators.
//! The host feeds [`classify_line`] output to its highlighter; nothing here
//! understands the language beyond token boundaries. Block comments span
//! lines, so classification threads a [`LineCarry`] from line to line.

use std::sync::OnceLock;

use rustc_hash::FxHashSet;
use serde::Serialize;

pub const LINE_COMMENT: &str = "--";
pub const BLOCK_COMMENT_OPEN: &str = "/-";
pub const BLOCK_COMMENT_CLOSE: &str = "-/";

pub const BRACKET_PAIRS: &[(char, char)] = &[('{', '}'), ('[', ']'), ('(', ')'), ('⟨', '⟩')];

#[rustfmt::skip]
pub const KEYWORDS: &[&str] = &[
    "abbrev", "axiom", "builtin_initialize", "catch", "class", "def",
    "deriving", "do", "elab", "else", "end", "example", "extends", "finally",
    "for", "fun", "have", "if", "import", "in", "inductive", "infix",
    "infixl", "infixr", "instance", "let", "macro", "match", "mutual",
    "namespace", "notation", "opaque", "open", "postfix", "prefix", "private",
    "protected", "return", "section", "show", "structure", "syntax",
    "theorem", "then", "try", "universe", "universes", "unless", "variable",
    "where", "with",
];

#[rustfmt::skip]
pub const TACTICS: &[&str] = &[
    "admit", "aesop", "apply", "assumption", "by", "calc", "cases", "clear",
    "constructor", "contradiction", "decide", "exact", "exfalso", "exists",
    "ext", "field_simp", "generalize", "induction", "intro", "intros",
    "left", "linarith", "norm_num", "obtain", "omega", "rcases", "refine",
    "revert", "rewrite", "rfl", "right", "ring", "rintro", "rw", "simp",
    "sorry", "specialize", "split", "suffices", "tauto", "trivial", "unfold",
    "use",
];

/// Token class, the granularity the host highlighter consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Keyword,
    Tactic,
    Identifier,
    Number,
    String,
    Comment,
    Operator,
    Bracket,
}

/// One classified span, in byte offsets into the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TokenSpan {
    pub start: usize,
    pub end: usize,
    pub kind: TokenKind,
}

/// Cross-line classifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCarry {
    #[default]
    Normal,
    /// Inside a `/- ... -/` block comment.
    BlockComment,
}

fn keyword_set() -> &'static FxHashSet<&'static str> {
    static SET: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| KEYWORDS.iter().copied().collect())
}

fn tactic_set() -> &'static FxHashSet<&'static str> {
    static SET: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| TACTICS.iter().copied().collect())
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '\''
}

fn is_bracket(c: char) -> bool {
    BRACKET_PAIRS.iter().any(|&(o, cl)| c == o || c == cl)
}

/// Classify one line. Whitespace is left unspanned; everything else lands in
/// exactly one span. Returns the spans and the carry for the next line.
#[must_use]
pub fn classify_line(line: &str, carry: LineCarry) -> (Vec<TokenSpan>, LineCarry) {
    let mut spans = Vec::new();
    let bytes = line.as_bytes();
    let mut i = 0;
    let mut state = carry;

    while i < line.len() {
        if state == LineCarry::BlockComment {
            // Consume up to and including `-/`, or the rest of the line.
            match line[i..].find(BLOCK_COMMENT_CLOSE) {
                Some(off) => {
                    let end = i + off + BLOCK_COMMENT_CLOSE.len();
                    spans.push(TokenSpan { start: i, end, kind: TokenKind::Comment });
                    i = end;
                    state = LineCarry::Normal;
                }
                None => {
                    spans.push(TokenSpan { start: i, end: line.len(), kind: TokenKind::Comment });
                    return (spans, LineCarry::BlockComment);
                }
            }
            continue;
        }

        let rest = &line[i..];
        let c = rest.chars().next().unwrap_or('\0');

        if c.is_whitespace() {
            i += c.len_utf8();
        } else if rest.starts_with(LINE_COMMENT) {
            spans.push(TokenSpan { start: i, end: line.len(), kind: TokenKind::Comment });
            break;
        } else if rest.starts_with(BLOCK_COMMENT_OPEN) {
            // No nesting, matching the host grammar.
            let open_end = i + BLOCK_COMMENT_OPEN.len();
            match line[open_end..].find(BLOCK_COMMENT_CLOSE) {
                Some(off) => {
                    let end = open_end + off + BLOCK_COMMENT_CLOSE.len();
                    spans.push(TokenSpan { start: i, end, kind: TokenKind::Comment });
                    i = end;
                }
                None => {
                    spans.push(TokenSpan { start: i, end: line.len(), kind: TokenKind::Comment });
                    return (spans, LineCarry::BlockComment);
                }
            }
        } else if c == '"' {
            let end = scan_string(bytes, i + 1);
            spans.push(TokenSpan { start: i, end, kind: TokenKind::String });
            i = end;
        } else if c.is_ascii_digit() {
            let end = scan_number(bytes, i);
            spans.push(TokenSpan { start: i, end, kind: TokenKind::Number });
            i = end;
        } else if is_ident_start(c) {
            let mut end = i + c.len_utf8();
            for (off, ch) in rest.char_indices().skip(1) {
                if !is_ident_continue(ch) {
                    break;
                }
                end = i + off + ch.len_utf8();
            }
            let word = &line[i..end];
            let kind = if keyword_set().contains(word) {
                TokenKind::Keyword
            } else if tactic_set().contains(word) {
                TokenKind::Tactic
            } else {
                TokenKind::Identifier
            };
            spans.push(TokenSpan { start: i, end, kind });
            i = end;
        } else if is_bracket(c) {
            let end = i + c.len_utf8();
            spans.push(TokenSpan { start: i, end, kind: TokenKind::Bracket });
            i = end;
        } else {
            // Anything else (ASCII punctuation, math symbols) is an operator
            // run up to the next classifiable character.
            let mut end = i + c.len_utf8();
            for (off, ch) in rest.char_indices().skip(1) {
                if ch.is_whitespace()
                    || ch.is_alphanumeric()
                    || ch == '_'
                    || ch == '"'
                    || is_bracket(ch)
                {
                    break;
                }
                end = i + off + ch.len_utf8();
            }
            spans.push(TokenSpan { start: i, end, kind: TokenKind::Operator });
            i = end;
        }
    }

    (spans, state)
}

/// Classify a whole buffer, threading the carry across lines.
#[must_use]
pub fn classify_lines(text: &str) -> Vec<Vec<TokenSpan>> {
    let mut carry = LineCarry::default();
    text.split('\n')
        .map(|line| {
            let (spans, next) = classify_line(line, carry);
            carry = next;
            spans
        })
        .collect()
}

fn scan_string(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return i + 1,
            _ => i += 1,
        }
    }
    // Unterminated: string runs to end of line.
    bytes.len()
}

fn scan_number(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i < bytes.len() && bytes[i] == b'.' && bytes.get(i + 1).is_some_and(u8::is_ascii_digit) {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(line: &str) -> Vec<(TokenKind, String)> {
        let (spans, _) = classify_line(line, LineCarry::default());
        spans
            .into_iter()
            .map(|s| (s.kind, line[s.start..s.end].to_string()))
            .collect()
    }

    #[test]
    fn keywords_tactics_and_identifiers() {
        use TokenKind::*;
        assert_eq!(
            kinds("theorem id' : p → p := by exact h"),
            vec![
                (Keyword, "theorem".into()),
                (Identifier, "id'".into()),
                (Operator, ":".into()),
                (Identifier, "p".into()),
                (Operator, "→".into()),
                (Identifier, "p".into()),
                (Operator, ":=".into()),
                (Tactic, "by".into()),
                (Tactic, "exact".into()),
                (Identifier, "h".into()),
            ]
        );
    }

    #[test]
    fn line_comment_swallows_the_rest() {
        use TokenKind::*;
        assert_eq!(
            kinds("x -- trailing := junk"),
            vec![(Identifier, "x".into()), (Comment, "-- trailing := junk".into())]
        );
    }

    #[test]
    fn block_comment_carries_across_lines() {
        let (spans, carry) = classify_line("def f /- open", LineCarry::default());
        assert_eq!(carry, LineCarry::BlockComment);
        assert_eq!(spans.last().unwrap().kind, TokenKind::Comment);

        let (spans, carry) = classify_line("still comment -/ def g", carry);
        assert_eq!(carry, LineCarry::Normal);
        assert_eq!(spans[0].kind, TokenKind::Comment);
        assert_eq!(spans[1].kind, TokenKind::Keyword);
        assert_eq!(spans.last().unwrap().kind, TokenKind::Identifier);
    }

    #[test]
    fn inline_block_comment_closes_on_same_line() {
        use TokenKind::*;
        assert_eq!(
            kinds("a /- note -/ b"),
            vec![
                (Identifier, "a".into()),
                (Comment, "/- note -/".into()),
                (Identifier, "b".into()),
            ]
        );
    }

    #[test]
    fn strings_numbers_and_brackets() {
        use TokenKind::*;
        assert_eq!(
            kinds(r#"⟨1, "two \" three", 4.5⟩"#),
            vec![
                (Bracket, "⟨".into()),
                (Number, "1".into()),
                (Operator, ",".into()),
                (String, r#""two \" three""#.into()),
                (Operator, ",".into()),
                (Number, "4.5".into()),
                (Bracket, "⟩".into()),
            ]
        );
    }

    #[test]
    fn unterminated_string_runs_to_eol() {
        use TokenKind::*;
        assert_eq!(
            kinds(r#"x "oops"#),
            vec![(Identifier, "x".into()), (String, r#""oops"#.into())]
        );
    }

    #[test]
    fn unicode_identifiers_are_single_tokens() {
        use TokenKind::*;
        assert_eq!(
            kinds("∀ ε δ, αβ"),
            vec![
                (Operator, "∀".into()),
                (Identifier, "ε".into()),
                (Identifier, "δ".into()),
                (Operator, ",".into()),
                (Identifier, "αβ".into()),
            ]
        );
    }

    #[test]
    fn whole_buffer_threading() {
        let spans = classify_lines("def f /- a\nb -/ 1");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[1][0].kind, TokenKind::Comment);
        assert_eq!(spans[1].last().unwrap().kind, TokenKind::Number);
    }
}

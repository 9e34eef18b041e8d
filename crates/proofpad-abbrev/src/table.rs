//! The abbreviation table and its length-sorted match order.

use rustc_hash::FxHashMap;

use crate::utf16;

/// The escape marker that introduces a mnemonic (`\to`, `\forall`, ...).
pub const ESCAPE_MARKER: char = '\\';

/// Table construction error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// A key was empty or contained characters other than a leading escape
    /// marker followed by letters.
    InvalidKey(String),
    /// A key appeared twice.
    DuplicateKey(String),
    /// A symbol value was empty.
    EmptyValue(String),
    /// The JSON source did not decode to a string-to-string map.
    Json(String),
}

impl core::fmt::Display for TableError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidKey(k) => write!(f, "invalid abbreviation key: {k:?}"),
            Self::DuplicateKey(k) => write!(f, "duplicate abbreviation key: {k:?}"),
            Self::EmptyValue(k) => write!(f, "empty symbol for abbreviation: {k:?}"),
            Self::Json(msg) => write!(f, "abbreviation JSON: {msg}"),
        }
    }
}

impl std::error::Error for TableError {}

/// Immutable mnemonic → Unicode symbol mapping.
///
/// Built once at startup; the match order (keys stably sorted by descending
/// UTF-16 length, ties keeping insertion order) is computed at construction so that
/// longer abbreviations are always tested before shorter ones that are their
/// suffixes — `\langle` wins over a colliding shorter suffix.
#[derive(Debug, Clone)]
pub struct AbbreviationTable {
    map: FxHashMap<Box<str>, Box<str>>,
    match_order: Vec<Box<str>>,
}

impl AbbreviationTable {
    /// Build a table from `(mnemonic, symbol)` pairs.
    ///
    /// Keys must be non-empty and consist of letters, optionally preceded by
    /// the escape marker. Values must be non-empty. Duplicates are rejected.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut map = FxHashMap::default();
        let mut order: Vec<Box<str>> = Vec::new();
        for (key, value) in pairs {
            if !is_valid_key(key) {
                return Err(TableError::InvalidKey(key.to_string()));
            }
            if value.is_empty() {
                return Err(TableError::EmptyValue(key.to_string()));
            }
            if map.insert(Box::from(key), Box::from(value)).is_some() {
                return Err(TableError::DuplicateKey(key.to_string()));
            }
            order.push(Box::from(key));
        }
        // Length in UTF-16 units, the same measure as all column math.
        // Stable sort: equal lengths keep insertion order, which makes
        // tie-breaking deterministic.
        order.sort_by(|a, b| utf16::len(b).cmp(&utf16::len(a)));
        Ok(Self {
            map,
            match_order: order,
        })
    }

    /// Build a table from a JSON object of `{"\\to": "→", ...}`.
    ///
    /// `serde_json` maps decode with lexicographically sorted keys, so the
    /// tie-break order for equal-length keys is deterministic here too.
    pub fn from_json_str(json: &str) -> Result<Self, TableError> {
        let raw: std::collections::BTreeMap<String, String> =
            serde_json::from_str(json).map_err(|e| TableError::Json(e.to_string()))?;
        Self::from_pairs(raw.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    /// Symbol for an exact mnemonic, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(|v| &**v)
    }

    /// Number of abbreviations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Keys in match order: longest first, insertion order among equals.
    pub fn match_order(&self) -> impl Iterator<Item = &str> {
        self.match_order.iter().map(|k| &**k)
    }

    /// Longest abbreviation that `candidate` ends with, together with its
    /// symbol. Ties among equal-length keys resolve to the earliest inserted.
    #[must_use]
    pub fn longest_suffix_match<'t>(&'t self, candidate: &str) -> Option<(&'t str, &'t str)> {
        for key in &self.match_order {
            if candidate.ends_with(&**key)
                && let Some(value) = self.map.get(key)
            {
                return Some((&**key, &**value));
            }
        }
        None
    }
}

fn is_valid_key(key: &str) -> bool {
    let body = key.strip_prefix(ESCAPE_MARKER).unwrap_or(key);
    !body.is_empty() && body.chars().all(|c| c.is_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn match_order_is_longest_first_and_stable() {
        let table = AbbreviationTable::from_pairs([
            ("\\to", "→"),
            ("\\ne", "≠"),
            ("\\times", "×"),
            ("\\le", "≤"),
        ])
        .unwrap();
        let order: Vec<&str> = table.match_order().collect();
        assert_eq!(order, vec!["\\times", "\\to", "\\ne", "\\le"]);
    }

    #[test]
    fn longest_suffix_match_prefers_longer_key() {
        let table =
            AbbreviationTable::from_pairs([("\\angle", "∠"), ("\\langle", "⟨")]).unwrap();
        assert_eq!(
            table.longest_suffix_match("f \\langle"),
            Some(("\\langle", "⟨"))
        );
        assert_eq!(
            table.longest_suffix_match("f \\angle"),
            Some(("\\angle", "∠"))
        );
        assert_eq!(table.longest_suffix_match("f x"), None);
    }

    #[test]
    fn match_order_measures_utf16_units_not_bytes() {
        // `\αβ` is 5 bytes but 3 UTF-16 units; `\abc` is 4 bytes but 4 units.
        let table = AbbreviationTable::from_pairs([("\\αβ", "x"), ("\\abc", "y")]).unwrap();
        let order: Vec<&str> = table.match_order().collect();
        assert_eq!(order, vec!["\\abc", "\\αβ"]);
    }

    #[test]
    fn rejects_malformed_keys() {
        assert_eq!(
            AbbreviationTable::from_pairs([("", "x")]).unwrap_err(),
            TableError::InvalidKey(String::new())
        );
        assert_eq!(
            AbbreviationTable::from_pairs([("\\", "x")]).unwrap_err(),
            TableError::InvalidKey("\\".into())
        );
        assert_eq!(
            AbbreviationTable::from_pairs([("\\a b", "x")]).unwrap_err(),
            TableError::InvalidKey("\\a b".into())
        );
        assert_eq!(
            AbbreviationTable::from_pairs([("\\to", "→"), ("\\to", "⟶")]).unwrap_err(),
            TableError::DuplicateKey("\\to".into())
        );
        assert_eq!(
            AbbreviationTable::from_pairs([("\\to", "")]).unwrap_err(),
            TableError::EmptyValue("\\to".into())
        );
    }

    #[test]
    fn json_source_decodes() {
        let table = AbbreviationTable::from_json_str(r#"{"\\to": "→", "\\and": "∧"}"#).unwrap();
        assert_eq!(table.get("\\to"), Some("→"));
        assert_eq!(table.get("\\and"), Some("∧"));
        assert!(AbbreviationTable::from_json_str("[1, 2]").is_err());
    }
}

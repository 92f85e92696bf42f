//! Suggestion records as delivered by a suggestion source

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier of a suggestion record
///
/// Remote sources send either numeric or string identifiers, so both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SuggestionId {
    Number(u64),
    Text(String),
}

impl fmt::Display for SuggestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuggestionId::Number(n) => write!(f, "{}", n),
            SuggestionId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for SuggestionId {
    fn from(value: u64) -> Self {
        SuggestionId::Number(value)
    }
}

impl From<&str> for SuggestionId {
    fn from(value: &str) -> Self {
        SuggestionId::Text(value.to_string())
    }
}

impl From<String> for SuggestionId {
    fn from(value: String) -> Self {
        SuggestionId::Text(value)
    }
}

/// A single suggestion record
///
/// Only `id` and `name` are interpreted. Every other field of the record is kept
/// in `attributes` so hosts can render domain details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionItem {
    pub id: SuggestionId,
    pub name: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl SuggestionItem {
    pub fn new(id: impl Into<SuggestionId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            attributes: Map::new(),
        }
    }

    /// Attach an extra domain attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Look up an extra domain attribute
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Split the name into the part covered by `query` and the remainder
    ///
    /// The split happens after as many characters as `query` has, matching how the
    /// prefix filter compares names.
    pub fn highlight(&self, query: &str) -> MatchHighlight<'_> {
        let at = char_boundary(&self.name, query.chars().count());
        let (matched, rest) = self.name.split_at(at);
        MatchHighlight { matched, rest }
    }
}

/// A suggestion name split at the typed prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchHighlight<'a> {
    pub matched: &'a str,
    pub rest: &'a str,
}

/// Byte offset of the `n`th character, clamped to the end of the string
pub(crate) fn char_boundary(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map(|(i, _)| i).unwrap_or(s.len())
}

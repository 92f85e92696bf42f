//! Inline completion hint ("ghost text")
//!
//! Shows the rest of the first suggestion behind what the user typed, keeping the
//! user's own casing for the typed part.

use crate::ranker::matches_prefix;
use crate::types::{char_boundary, SuggestionItem};

/// Typed text plus the dimmed remainder of the first suggestion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GhostText {
    pub typed: String,
    pub completion: String,
}

impl GhostText {
    /// Build the hint for `typed` from the first of `suggestions`
    ///
    /// There is no hint while the input is empty, when there are no suggestions, or
    /// when the first suggestion no longer starts with the typed text.
    pub fn from_suggestions(typed: &str, suggestions: &[SuggestionItem]) -> Option<Self> {
        if typed.is_empty() {
            return None;
        }
        let first = suggestions.first()?;
        if !matches_prefix(&first.name, typed) {
            return None;
        }

        let at = char_boundary(&first.name, typed.chars().count());
        Some(Self {
            typed: typed.to_string(),
            completion: first.name[at..].to_string(),
        })
    }

    /// The full text the hint displays
    pub fn full_text(&self) -> String {
        format!("{}{}", self.typed, self.completion)
    }

    pub fn is_empty(&self) -> bool {
        self.completion.is_empty()
    }
}

//! Suggestion filtering and ranking
//!
//! Reduces a fetched candidate set to the prefix matches of the current query,
//! ordered alphabetically and truncated to the dropdown size.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::types::SuggestionItem;

/// Number of suggestions shown when nothing else is configured
pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;

/// Case-insensitive prefix ranker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixRanker {
    limit: usize,
}

impl PrefixRanker {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Keep the prefix matches of `query`, sorted by name and truncated to the limit
    pub fn rank(&self, items: Vec<SuggestionItem>, query: &str) -> Vec<SuggestionItem> {
        filter_and_rank(items, query, self.limit)
    }
}

impl Default for PrefixRanker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SUGGESTIONS)
    }
}

/// Filter `items` to prefix matches of `query`, sort them by name and keep at most `limit`
pub fn filter_and_rank(
    items: Vec<SuggestionItem>,
    query: &str,
    limit: usize,
) -> Vec<SuggestionItem> {
    let needle = query.to_lowercase();
    let width = query.chars().count();

    let mut matches: Vec<SuggestionItem> = items
        .into_iter()
        .filter(|item| head_lowercase(&item.name, width) == needle)
        .collect();

    matches.sort_by(|a, b| collate(&a.name, &b.name));
    matches.truncate(limit);
    matches
}

/// Whether the first `query.chars().count()` characters of `name` equal `query`, ignoring case
pub fn matches_prefix(name: &str, query: &str) -> bool {
    head_lowercase(name, query.chars().count()) == query.to_lowercase()
}

/// Alphabetical ordering of display names
///
/// Names compare on their base letters first, ignoring accents and case, so "Éclair"
/// sorts among the other e-words. Ties go to the unaccented spelling, then to the
/// lower-case one.
pub fn collate(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

/// Case-folded name with combining marks stripped after canonical decomposition
fn base_letters(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn head_lowercase(name: &str, width: usize) -> String {
    name.chars().take(width).collect::<String>().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fruits(names: &[&str]) -> Vec<SuggestionItem> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| SuggestionItem::new(i as u64, *name))
            .collect()
    }

    fn names(items: &[SuggestionItem]) -> Vec<&str> {
        items.iter().map(|item| item.name.as_str()).collect()
    }

    #[test]
    fn test_prefix_match_sorted() {
        let items = fruits(&["Apple", "Apricot", "Banana", "Avocado", "Blueberry"]);
        let ranked = filter_and_rank(items, "ap", 5);
        assert_eq!(names(&ranked), vec!["Apple", "Apricot"]);
    }

    #[test]
    fn test_mixed_case_query() {
        let items = fruits(&["Apricot", "Banana", "Apple"]);
        let lower = filter_and_rank(items.clone(), "ap", 5);
        let mixed = filter_and_rank(items, "Ap", 5);
        assert_eq!(lower, mixed);
    }

    #[test]
    fn test_substring_is_not_a_match() {
        let items = fruits(&["Pineapple", "Grape"]);
        assert!(filter_and_rank(items, "ap", 5).is_empty());
    }

    #[test]
    fn test_truncates_after_sorting() {
        let items = fruits(&[
            "Blueberry",
            "Banana",
            "Blackberry",
            "Bilberry",
            "Boysenberry",
            "Breadfruit",
            "Bergamot",
        ]);
        let ranked = filter_and_rank(items, "b", 5);
        assert_eq!(
            names(&ranked),
            vec!["Banana", "Bergamot", "Bilberry", "Blackberry", "Blueberry"]
        );
    }

    #[test]
    fn test_query_longer_than_name() {
        let items = fruits(&["Fig", "Figs and more"]);
        let ranked = filter_and_rank(items, "figs", 5);
        assert_eq!(names(&ranked), vec!["Figs and more"]);
    }

    #[test]
    fn test_collate_orders_case_insensitively() {
        assert_eq!(collate("apple", "Banana"), Ordering::Less);
        assert_eq!(collate("Cherry", "banana"), Ordering::Greater);
        assert_eq!(collate("apple", "Apple"), Ordering::Less);
        assert_eq!(collate("Kiwi", "Kiwi"), Ordering::Equal);
    }

    #[test]
    fn test_accented_names_sort_with_their_base_letter() {
        let items = fruits(&["Fig", "Eggplant", "Éclair", "Date"]);
        let ranked = filter_and_rank(items, "", 5);
        assert_eq!(names(&ranked), vec!["Date", "Éclair", "Eggplant", "Fig"]);
    }

    #[test]
    fn test_collate_accent_ties() {
        assert_eq!(collate("resume", "résumé"), Ordering::Less);
        assert_eq!(collate("Résumé", "resume"), Ordering::Greater);
        assert_eq!(collate("éclair", "Éclair"), Ordering::Less);
        assert_eq!(collate("Ångström", "Angstrom"), Ordering::Greater);
    }

    #[test]
    fn test_matches_prefix() {
        assert!(matches_prefix("Lemon", "LE"));
        assert!(!matches_prefix("Lemon", "lime"));
        assert!(matches_prefix("Lemon", ""));
    }

    #[test]
    fn test_ranker_uses_limit() {
        let ranker = PrefixRanker::new(1);
        let ranked = ranker.rank(fruits(&["Apricot", "Apple"]), "a");
        assert_eq!(names(&ranked), vec!["Apple"]);
        assert_eq!(PrefixRanker::default().limit(), DEFAULT_MAX_SUGGESTIONS);
    }
}

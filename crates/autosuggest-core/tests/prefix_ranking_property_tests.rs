/// Property-based tests for prefix filtering and ranking of suggestions

use proptest::prelude::*;
use autosuggest_core::{collate, filter_and_rank, matches_prefix, SuggestionItem};

/// Strategy for generating suggestion names with mixed case
fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][a-zA-Z ]{0,12}".prop_map(|s| s.to_string())
}

/// Strategy for generating typed queries
fn query_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z]{0,3}".prop_map(|s| s.to_string())
}

fn items_strategy() -> impl Strategy<Value = Vec<SuggestionItem>> {
    prop::collection::vec(name_strategy(), 0..30).prop_map(|names| {
        names
            .into_iter()
            .enumerate()
            .map(|(i, name)| SuggestionItem::new(i as u64, name))
            .collect()
    })
}

proptest! {
    /// Property: every ranked suggestion starts with the query, ignoring case
    #[test]
    fn prop_only_prefix_matches_are_returned(
        items in items_strategy(),
        query in query_strategy()
    ) {
        let ranked = filter_and_rank(items, &query, 5);

        for item in &ranked {
            prop_assert!(
                item.name.to_lowercase().starts_with(&query.to_lowercase()),
                "Item '{}' does not match query '{}'",
                item.name,
                query
            );
        }
    }

    /// Property: the result never exceeds the limit, and is only short when matches run out
    #[test]
    fn prop_limit_is_respected(
        items in items_strategy(),
        query in query_strategy(),
        limit in 1usize..8
    ) {
        let expected_matches = items
            .iter()
            .filter(|item| matches_prefix(&item.name, &query))
            .count();

        let ranked = filter_and_rank(items, &query, limit);

        prop_assert!(ranked.len() <= limit);
        prop_assert_eq!(ranked.len(), expected_matches.min(limit));
    }

    /// Property: results are in collation order
    #[test]
    fn prop_results_are_sorted(
        items in items_strategy(),
        query in query_strategy()
    ) {
        let ranked = filter_and_rank(items, &query, 10);

        for pair in ranked.windows(2) {
            prop_assert_ne!(
                collate(&pair[0].name, &pair[1].name),
                std::cmp::Ordering::Greater,
                "'{}' sorted before '{}'",
                pair[0].name,
                pair[1].name
            );
        }
    }

    /// Property: query casing does not change the result
    #[test]
    fn prop_query_case_is_ignored(
        items in items_strategy(),
        query in query_strategy()
    ) {
        let lower = filter_and_rank(items.clone(), &query.to_lowercase(), 5);
        let upper = filter_and_rank(items, &query.to_uppercase(), 5);

        prop_assert_eq!(lower, upper);
    }

    /// Property: the ranked top-N are the smallest matching names
    #[test]
    fn prop_top_n_are_the_first_matches(
        items in items_strategy(),
        query in query_strategy()
    ) {
        let mut all: Vec<String> = items
            .iter()
            .filter(|item| matches_prefix(&item.name, &query))
            .map(|item| item.name.clone())
            .collect();
        all.sort_by(|a, b| collate(a, b));
        all.truncate(5);

        let ranked: Vec<String> = filter_and_rank(items, &query, 5)
            .into_iter()
            .map(|item| item.name)
            .collect();

        prop_assert_eq!(ranked, all);
    }
}

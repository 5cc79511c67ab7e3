//! Property-based tests for synonym expansion
//!
//! Tests invariants:
//! - The expansion starts with the query's own words, lowercased, in order
//! - Expanding a table key adds every synonym listed for it
//! - Expanding a listed synonym adds the keys that list it
//! - Words outside the table come back unchanged

use indexmap::IndexSet;
use proptest::prelude::*;

use crate::core::search::{SynonymExpander, SEARCH_SYNONYMS};

/// Lowercased query words, first occurrence kept.
fn own_words(query: &str) -> String {
    let lower = query.to_lowercase();
    let words: IndexSet<&str> = lower.split_whitespace().collect();
    words.into_iter().collect::<Vec<_>>().join(" ")
}

fn arb_key() -> impl Strategy<Value = (&'static str, &'static [&'static str])> {
    proptest::sample::select(SEARCH_SYNONYMS.to_vec())
}

fn arb_unknown_query() -> impl Strategy<Value = String> {
    proptest::collection::vec("zq[a-z]{0,5}", 1..5).prop_map(|words| words.join(" "))
}

proptest! {
    /// Property: The original words lead the expansion
    #[test]
    fn prop_expansion_starts_with_query(
        words in proptest::collection::vec(
            prop_oneof!["[A-Za-z]{1,8}", arb_key().prop_map(|(key, _)| key.to_string())],
            1..4,
        )
    ) {
        let expander = SynonymExpander::new();
        let query = words.join(" ");

        let expanded = expander.expand(&query);

        prop_assert!(expanded.starts_with(&own_words(&query)));
    }

    /// Property: A key's synonyms all appear in its expansion
    #[test]
    fn prop_key_adds_synonyms((key, synonyms) in arb_key(), upper in any::<bool>()) {
        let expander = SynonymExpander::new();
        let query = if upper { key.to_uppercase() } else { key.to_string() };

        let expanded = expander.expand(&query);

        for synonym in synonyms {
            prop_assert!(expanded.contains(synonym), "{:?} missing from {:?}", synonym, expanded);
        }
    }

    /// Property: A single-word synonym expands back to its key
    #[test]
    fn prop_synonym_adds_key((key, synonyms) in arb_key(), pick in any::<prop::sample::Index>()) {
        let expander = SynonymExpander::new();
        let single: Vec<&str> = synonyms.iter().copied().filter(|s| !s.contains(' ')).collect();
        prop_assume!(!single.is_empty());
        let synonym = single[pick.index(single.len())];

        let expanded = expander.expand(synonym);

        prop_assert!(expanded.contains(key), "{:?} missing from {:?}", key, expanded);
    }

    /// Property: Unknown words pass through as-is
    #[test]
    fn prop_unknown_words_unchanged(query in arb_unknown_query()) {
        let expander = SynonymExpander::new();

        prop_assert_eq!(expander.expand(&query), own_words(&query));
    }
}

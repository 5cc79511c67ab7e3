//! Property-based tests for the search pipeline
//!
//! Tests invariants:
//! - Same query and filters return the same order
//! - Every result passes the active filters
//! - No code appears twice in a result list
//! - A record's exact code always finds that record
//! - An empty query with no filters returns the whole catalog in order

use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;

use crate::core::catalog::{Catalog, Category, Severity};
use crate::core::search::{SearchFilters, SearchPipeline};
use crate::tests::common::bundled_catalog;

// ============================================================================
// Strategies
// ============================================================================

fn arb_query() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{0,8}",
        "[a-z]{2,8} [a-z]{2,8}",
        Just("frozen".to_string()),
        Just("account closed".to_string()),
        Just("wrong amount".to_string()),
        "[A-Z]{2}[0-9]{2}",
    ]
}

fn arb_filters() -> impl Strategy<Value = SearchFilters> {
    (
        proptest::option::of(proptest::sample::select(Category::ALL.to_vec())),
        proptest::option::of(proptest::sample::select(Severity::ALL.to_vec())),
    )
        .prop_map(|(category, severity)| SearchFilters { category, severity })
}

fn codes(catalog: &Catalog, pipeline: &SearchPipeline, query: &str, filters: &SearchFilters) -> Vec<String> {
    pipeline
        .search(catalog, query, filters)
        .iter()
        .map(|r| r.code.clone())
        .collect()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Property: Searching twice gives identical ordered results
    #[test]
    fn prop_search_is_deterministic(query in arb_query(), filters in arb_filters()) {
        let catalog = bundled_catalog();
        let pipeline = SearchPipeline::default();

        let first = codes(&catalog, &pipeline, &query, &filters);
        let second = codes(&catalog, &pipeline, &query, &filters);

        prop_assert_eq!(first, second);
    }

    /// Property: Results always satisfy the category and severity filters
    #[test]
    fn prop_results_respect_filters(query in arb_query(), filters in arb_filters()) {
        let catalog = bundled_catalog();
        let pipeline = SearchPipeline::default();

        for record in pipeline.search(&catalog, &query, &filters) {
            if let Some(category) = filters.category {
                prop_assert_eq!(record.category, category);
            }
            if let Some(severity) = filters.severity {
                prop_assert_eq!(record.severity, severity);
            }
        }
    }

    /// Property: The merged direct and synonym passes never repeat a code
    #[test]
    fn prop_results_are_unique(query in arb_query(), filters in arb_filters()) {
        let catalog = bundled_catalog();
        let pipeline = SearchPipeline::default();

        let found = codes(&catalog, &pipeline, &query, &filters);
        let unique: HashSet<&String> = found.iter().collect();

        prop_assert_eq!(unique.len(), found.len());
    }

    /// Property: Results are records of the catalog, shared not copied
    #[test]
    fn prop_results_come_from_catalog(query in arb_query()) {
        let catalog = bundled_catalog();
        let pipeline = SearchPipeline::default();

        for record in pipeline.search(&catalog, &query, &SearchFilters::default()) {
            let stored = catalog.get(&record.code);
            prop_assert!(stored.is_some());
            prop_assert!(Arc::ptr_eq(stored.unwrap(), &record));
        }
    }

    /// Property: Searching a record's code finds it, whatever the casing
    #[test]
    fn prop_exact_code_is_found(index in 0usize..45, lowercase in any::<bool>()) {
        let catalog = bundled_catalog();
        let pipeline = SearchPipeline::default();
        let record = &catalog.records()[index % catalog.len()];
        let query = if lowercase { record.code.to_lowercase() } else { record.code.clone() };

        let found = codes(&catalog, &pipeline, &query, &SearchFilters::default());

        prop_assert!(found.contains(&record.code), "{} not in {:?}", record.code, found);
    }

    /// Property: Whitespace-only queries list every record in catalog order
    #[test]
    fn prop_blank_query_returns_catalog(spaces in " {0,6}") {
        let catalog = bundled_catalog();
        let pipeline = SearchPipeline::default();

        let found = codes(&catalog, &pipeline, &spaces, &SearchFilters::default());
        let all: Vec<String> = catalog.records().iter().map(|r| r.code.clone()).collect();

        prop_assert_eq!(found, all);
    }
}

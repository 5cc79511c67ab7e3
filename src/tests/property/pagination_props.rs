//! Property-based tests for pagination
//!
//! Tests invariants:
//! - A page never holds more than the page size
//! - Pages 1..=page_count, concatenated, equal the full result list
//! - The page number stays within 1..=total_pages
//! - Changing the query or a filter always lands on page one

use proptest::prelude::*;

use crate::core::catalog::{Category, Severity};
use crate::core::search::SearchPipeline;
use crate::core::view_model::{page_count, paginate, SearchViewModel};
use crate::tests::common::make_catalog;

// ============================================================================
// Pure Pagination
// ============================================================================

proptest! {
    /// Property: A page slice is bounded by the page size
    #[test]
    fn prop_page_is_bounded(len in 0usize..200, page in 0usize..30, size in 1usize..25) {
        let items: Vec<usize> = (0..len).collect();
        let slice = paginate(&items, page, size, false);

        prop_assert!(slice.len() <= size);
    }

    /// Property: Walking every page reproduces the input exactly
    #[test]
    fn prop_pages_partition_results(len in 0usize..200, size in 1usize..25) {
        let items: Vec<usize> = (0..len).collect();

        let joined: Vec<usize> = (1..=page_count(len, size))
            .flat_map(|page| paginate(&items, page, size, false).iter().copied())
            .collect();

        prop_assert_eq!(joined, items);
    }

    /// Property: Show-all ignores the page entirely
    #[test]
    fn prop_show_all_returns_everything(len in 0usize..100, page in 0usize..30, size in 1usize..25) {
        let items: Vec<usize> = (0..len).collect();

        prop_assert_eq!(paginate(&items, page, size, true), items.as_slice());
    }

    /// Property: Pages past the last one are empty
    #[test]
    fn prop_pages_past_end_are_empty(len in 0usize..100, size in 1usize..25, extra in 1usize..10) {
        let items: Vec<usize> = (0..len).collect();
        let beyond = page_count(len, size) + extra;

        prop_assert!(paginate(&items, beyond, size, false).is_empty());
    }
}

// ============================================================================
// View-Model
// ============================================================================

proptest! {
    /// Property: Navigation keeps the page within range
    #[test]
    fn prop_page_stays_in_range(
        n in 0usize..80,
        size in 1usize..15,
        target in 0usize..40,
        steps in proptest::collection::vec(any::<bool>(), 0..20),
    ) {
        let mut vm = SearchViewModel::new(make_catalog(n), SearchPipeline::default(), size);
        vm.go_to_page(target);
        for forward in steps {
            if forward { vm.next_page() } else { vm.prev_page() }
        }

        prop_assert!(vm.page() >= 1);
        prop_assert!(vm.page() <= vm.total_pages());
        prop_assert!(vm.visible().len() <= size);
    }

    /// Property: Any change to what is searched resets to page one
    #[test]
    fn prop_input_change_resets_page(
        n in 10usize..80,
        size in 1usize..6,
        target in 2usize..20,
        change in 0u8..4,
        category in proptest::sample::select(Category::ALL.to_vec()),
    ) {
        let mut vm = SearchViewModel::new(make_catalog(n), SearchPipeline::default(), size);
        vm.go_to_page(target);

        match change {
            0 => vm.set_query("test"),
            1 => vm.set_category(Some(category)),
            2 => vm.set_severity(Some(Severity::Temporary)),
            _ => vm.clear_filters(),
        }

        prop_assert_eq!(vm.page(), 1);
    }

    /// Property: Every visible record belongs to the current result list
    #[test]
    fn prop_visible_is_window_of_results(n in 0usize..80, size in 1usize..15, target in 1usize..20) {
        let mut vm = SearchViewModel::new(make_catalog(n), SearchPipeline::default(), size);
        vm.go_to_page(target);

        let start = (vm.page() - 1) * size;
        let expected: Vec<&str> = vm
            .results()
            .iter()
            .skip(start)
            .take(size)
            .map(|r| r.code.as_str())
            .collect();
        let visible: Vec<&str> = vm.visible().iter().map(|r| r.code.as_str()).collect();

        prop_assert_eq!(visible, expected);
    }
}

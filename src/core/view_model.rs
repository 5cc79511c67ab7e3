//! Pagination View-Model
//!
//! Owns the search state of the result list: query, filters, page, and the
//! show-all flag. Changing what is searched always lands back on page one.

use std::sync::Arc;

use crate::core::catalog::{Catalog, Category, ErrorRecord, Severity};
use crate::core::search::{FuzzyMatcher, NucleoMatcher, SearchFilters, SearchPipeline};

/// Results per page.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Shown in place of an empty result list.
pub const EMPTY_RESULTS: &str = "No errors found. Try a different search term or filter";

/// Slice `results` to a 1-based page, or return everything when `show_all`.
///
/// Pages past the end yield an empty slice.
pub fn paginate<T>(results: &[T], page: usize, page_size: usize, show_all: bool) -> &[T] {
    if show_all {
        return results;
    }
    let size = page_size.max(1);
    let start = page.saturating_sub(1).saturating_mul(size);
    if start >= results.len() {
        return &[];
    }
    let end = start.saturating_add(size).min(results.len());
    &results[start..end]
}

/// Number of pages needed for `len` items; at least one.
pub fn page_count(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

pub struct SearchViewModel<M: FuzzyMatcher = NucleoMatcher> {
    catalog: Arc<Catalog>,
    pipeline: SearchPipeline<M>,
    query: String,
    filters: SearchFilters,
    page: usize,
    page_size: usize,
    show_all: bool,
    results: Vec<Arc<ErrorRecord>>,
}

impl SearchViewModel<NucleoMatcher> {
    pub fn with_defaults(catalog: Arc<Catalog>) -> Self {
        Self::new(catalog, SearchPipeline::default(), DEFAULT_PAGE_SIZE)
    }
}

impl<M: FuzzyMatcher> SearchViewModel<M> {
    pub fn new(catalog: Arc<Catalog>, pipeline: SearchPipeline<M>, page_size: usize) -> Self {
        let mut vm = Self {
            catalog,
            pipeline,
            query: String::new(),
            filters: SearchFilters::default(),
            page: 1,
            page_size: page_size.max(1),
            show_all: false,
            results: Vec::new(),
        };
        vm.refresh();
        vm
    }

    // ── Accessors ──────────────────────────────────────────────────────

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn filters(&self) -> SearchFilters {
        self.filters
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn show_all(&self) -> bool {
        self.show_all
    }

    pub fn results(&self) -> &[Arc<ErrorRecord>] {
        &self.results
    }

    /// Records on the current page (or all of them in show-all mode).
    pub fn visible(&self) -> &[Arc<ErrorRecord>] {
        paginate(&self.results, self.page, self.page_size, self.show_all)
    }

    pub fn total_pages(&self) -> usize {
        page_count(self.results.len(), self.page_size)
    }

    /// Whether the pager is worth showing at all.
    pub fn is_paginated(&self) -> bool {
        self.results.len() > self.page_size
    }

    // ── Search inputs ──────────────────────────────────────────────────

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.refresh();
    }

    pub fn set_category(&mut self, category: Option<Category>) {
        self.filters.category = category;
        self.refresh();
    }

    pub fn set_severity(&mut self, severity: Option<Severity>) {
        self.filters.severity = severity;
        self.refresh();
    }

    /// Step through `None -> each category -> None`.
    pub fn cycle_category(&mut self, forward: bool) {
        let next = cycle(&Category::ALL, self.filters.category, forward);
        self.set_category(next);
    }

    /// Step through `None -> fatal -> temporary -> None`.
    pub fn cycle_severity(&mut self) {
        let next = cycle(&Severity::ALL, self.filters.severity, true);
        self.set_severity(next);
    }

    pub fn clear_filters(&mut self) {
        self.filters = SearchFilters::default();
        self.refresh();
    }

    // ── Navigation ─────────────────────────────────────────────────────

    pub fn next_page(&mut self) {
        self.go_to_page(self.page.saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.go_to_page(self.page.saturating_sub(1));
    }

    /// Jump to `page`, clamped to the available pages.
    pub fn go_to_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.total_pages());
    }

    pub fn toggle_show_all(&mut self) {
        self.show_all = !self.show_all;
        if !self.show_all {
            self.page = 1;
        }
    }

    /// Re-run the search and land on page one.
    fn refresh(&mut self) {
        self.results = self
            .pipeline
            .search(&self.catalog, &self.query, &self.filters);
        self.page = 1;
        self.show_all = false;
        log::debug!(
            "Search {:?} with {:?} -> {} results",
            self.query,
            self.filters,
            self.results.len()
        );
    }
}

fn cycle<T: Copy + PartialEq>(options: &[T], current: Option<T>, forward: bool) -> Option<T> {
    let position = current.and_then(|c| options.iter().position(|o| *o == c));
    match (position, forward) {
        (None, true) => options.first().copied(),
        (None, false) => options.last().copied(),
        (Some(i), true) => options.get(i + 1).copied(),
        (Some(0), false) => None,
        (Some(i), false) => options.get(i - 1).copied(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(code: String, category: Category) -> crate::core::catalog::ErrorRecord {
        serde_json::from_value(serde_json::json!({
            "code": code,
            "category": category,
            "severity": "fatal",
        }))
        .unwrap()
    }

    /// 60 Account records and 15 Amount records.
    fn catalog() -> Arc<Catalog> {
        let accounts = (0..60).map(|i| record(format!("AC{i:02}"), Category::Account));
        let amounts = (0..15).map(|i| record(format!("AM{i:02}"), Category::Amount));
        Arc::new(Catalog::from_records(accounts.chain(amounts).collect()).unwrap())
    }

    #[test]
    fn test_paginate_slices() {
        let items: Vec<u32> = (0..25).collect();
        assert_eq!(paginate(&items, 1, 10, false).len(), 10);
        assert_eq!(paginate(&items, 3, 10, false), &[20, 21, 22, 23, 24]);
        assert!(paginate(&items, 4, 10, false).is_empty());
        assert_eq!(paginate(&items, 4, 10, true).len(), 25);
    }

    #[test]
    fn test_paginate_empty_input() {
        let items: Vec<u32> = Vec::new();
        assert!(paginate(&items, 1, 12, false).is_empty());
        assert_eq!(page_count(0, 12), 1);
        assert_eq!(page_count(25, 12), 3);
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut vm = SearchViewModel::new(catalog(), SearchPipeline::default(), 10);
        vm.set_category(Some(Category::Account));
        vm.go_to_page(5);
        assert_eq!(vm.page(), 5);
        assert_eq!(vm.visible().len(), 10);

        vm.set_category(Some(Category::Amount));
        assert_eq!(vm.page(), 1);
        assert_eq!(vm.visible().len(), 10);
        assert_eq!(vm.visible()[0].code, "AM00");
    }

    #[test]
    fn test_query_change_resets_page_and_show_all() {
        let mut vm = SearchViewModel::new(catalog(), SearchPipeline::default(), 10);
        vm.go_to_page(3);
        vm.toggle_show_all();
        vm.set_query("AM07");
        assert_eq!(vm.page(), 1);
        assert!(!vm.show_all());
    }

    #[test]
    fn test_navigation_keeps_show_all() {
        let mut vm = SearchViewModel::new(catalog(), SearchPipeline::default(), 10);
        vm.toggle_show_all();
        vm.next_page();
        assert!(vm.show_all());
        assert_eq!(vm.visible().len(), 75);
    }

    #[test]
    fn test_show_all_off_returns_to_first_page() {
        let mut vm = SearchViewModel::new(catalog(), SearchPipeline::default(), 10);
        vm.go_to_page(4);
        vm.toggle_show_all();
        vm.toggle_show_all();
        assert_eq!(vm.page(), 1);
    }

    #[test]
    fn test_navigation_clamps() {
        let mut vm = SearchViewModel::new(catalog(), SearchPipeline::default(), 10);
        vm.prev_page();
        assert_eq!(vm.page(), 1);
        vm.go_to_page(99);
        assert_eq!(vm.page(), vm.total_pages());
        assert_eq!(vm.total_pages(), 8);
    }

    #[test]
    fn test_cycle_category_wraps_through_none() {
        let mut vm = SearchViewModel::new(catalog(), SearchPipeline::default(), 10);
        vm.cycle_category(true);
        assert_eq!(vm.filters().category, Some(Category::Account));
        vm.cycle_category(false);
        assert_eq!(vm.filters().category, None);
        vm.cycle_category(false);
        assert_eq!(vm.filters().category, Some(Category::Other));
    }

    #[test]
    fn test_cycle_severity() {
        let mut vm = SearchViewModel::new(catalog(), SearchPipeline::default(), 10);
        vm.cycle_severity();
        assert_eq!(vm.filters().severity, Some(Severity::Fatal));
        vm.cycle_severity();
        assert_eq!(vm.filters().severity, Some(Severity::Temporary));
        vm.cycle_severity();
        assert_eq!(vm.filters().severity, None);
    }

    #[test]
    fn test_clear_filters() {
        let mut vm = SearchViewModel::new(catalog(), SearchPipeline::default(), 10);
        vm.set_category(Some(Category::Amount));
        assert_eq!(vm.results().len(), 15);
        vm.clear_filters();
        assert_eq!(vm.results().len(), 75);
        assert!(vm.filters().is_empty());
    }
}

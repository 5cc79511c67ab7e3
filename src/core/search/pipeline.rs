//! Search Pipeline
//!
//! Fuzzy match, synonym fallback, merge, then category and severity
//! filters. Total: a failed matcher pass counts as zero matches.

use std::collections::HashSet;
use std::sync::Arc;

use crate::core::catalog::{Catalog, Category, ErrorRecord, Severity};

use super::matcher::{FuzzyMatcher, NucleoMatcher};
use super::synonyms::SynonymExpander;

/// Below this many direct matches the expanded query is also searched.
pub const SYNONYM_FALLBACK_THRESHOLD: usize = 5;

/// Optional equality filters applied after matching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchFilters {
    pub category: Option<Category>,
    pub severity: Option<Severity>,
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.severity.is_none()
    }

    pub fn accepts(&self, record: &ErrorRecord) -> bool {
        self.category.map_or(true, |c| record.category == c)
            && self.severity.map_or(true, |s| record.severity == s)
    }
}

#[derive(Debug, Clone)]
pub struct SearchPipeline<M: FuzzyMatcher = NucleoMatcher> {
    matcher: M,
    expander: SynonymExpander,
}

impl Default for SearchPipeline<NucleoMatcher> {
    fn default() -> Self {
        Self::new(NucleoMatcher::new())
    }
}

impl<M: FuzzyMatcher> SearchPipeline<M> {
    pub fn new(matcher: M) -> Self {
        Self {
            matcher,
            expander: SynonymExpander::new(),
        }
    }

    pub fn with_expander(matcher: M, expander: SynonymExpander) -> Self {
        Self { matcher, expander }
    }

    pub fn expander(&self) -> &SynonymExpander {
        &self.expander
    }

    /// Ordered records matching `query` and `filters`.
    pub fn search(
        &self,
        catalog: &Catalog,
        query: &str,
        filters: &SearchFilters,
    ) -> Vec<Arc<ErrorRecord>> {
        let records = catalog.records();

        let matched: Vec<Arc<ErrorRecord>> = if query.trim().is_empty() {
            records.to_vec()
        } else {
            self.match_query(records, query)
        };

        matched
            .into_iter()
            .filter(|record| filters.accepts(record))
            .collect()
    }

    fn match_query(&self, records: &[Arc<ErrorRecord>], query: &str) -> Vec<Arc<ErrorRecord>> {
        let mut results: Vec<Arc<ErrorRecord>> = self
            .run_pass(records, query)
            .into_iter()
            .map(|index| Arc::clone(&records[index]))
            .collect();

        if results.len() >= SYNONYM_FALLBACK_THRESHOLD {
            return results;
        }

        let expanded = self.expander.expand(query);
        if expanded == query.to_lowercase() {
            return results;
        }

        log::debug!(
            "Query {:?} returned {} direct matches, retrying as {:?}",
            query,
            results.len(),
            expanded
        );

        let mut seen: HashSet<String> = results.iter().map(|r| r.code.clone()).collect();
        for index in self.run_pass(records, &expanded) {
            let record = &records[index];
            if seen.insert(record.code.clone()) {
                results.push(Arc::clone(record));
            }
        }

        results
    }

    /// Record indices for one matcher pass, best first.
    fn run_pass(&self, records: &[Arc<ErrorRecord>], query: &str) -> Vec<usize> {
        match self.matcher.search(query, records) {
            Ok(matches) => matches.into_iter().map(|m| m.index).collect(),
            Err(e) => {
                log::debug!("Matcher rejected query {:?}: {}", query, e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::search::matcher::{MatchError, ScoredMatch};
    use std::cell::RefCell;

    fn record(code: &str, category: Category, severity: Severity) -> ErrorRecord {
        serde_json::from_value(serde_json::json!({
            "code": code,
            "name": format!("Record {code}"),
            "category": category,
            "severity": severity,
        }))
        .unwrap()
    }

    fn catalog(codes: &[(&str, Category, Severity)]) -> Catalog {
        Catalog::from_records(codes.iter().map(|(c, cat, sev)| record(c, *cat, *sev)).collect())
            .unwrap()
    }

    /// Returns canned matches per query and records every call.
    struct ScriptedMatcher {
        script: Vec<(&'static str, Vec<usize>)>,
        calls: RefCell<Vec<String>>,
    }

    impl ScriptedMatcher {
        fn new(script: Vec<(&'static str, Vec<usize>)>) -> Self {
            Self {
                script,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl FuzzyMatcher for ScriptedMatcher {
        fn search(
            &self,
            query: &str,
            _records: &[Arc<ErrorRecord>],
        ) -> Result<Vec<ScoredMatch>, MatchError> {
            self.calls.borrow_mut().push(query.to_string());
            if query == "boom" {
                return Err(MatchError::QueryTooLong { len: 999, max: 256 });
            }
            Ok(self
                .script
                .iter()
                .find(|(q, _)| *q == query)
                .map(|(_, hits)| {
                    hits.iter()
                        .enumerate()
                        .map(|(rank, &index)| ScoredMatch {
                            index,
                            score: rank as f64 / 10.0,
                        })
                        .collect()
                })
                .unwrap_or_default())
        }
    }

    fn five_accounts() -> Catalog {
        catalog(&[
            ("AC01", Category::Account, Severity::Fatal),
            ("AC04", Category::Account, Severity::Fatal),
            ("AC06", Category::Account, Severity::Fatal),
            ("AM04", Category::Amount, Severity::Temporary),
            ("RC01", Category::Routing, Severity::Fatal),
            ("AB05", Category::System, Severity::Temporary),
        ])
    }

    fn codes(records: &[Arc<ErrorRecord>]) -> Vec<&str> {
        records.iter().map(|r| r.code.as_str()).collect()
    }

    #[test]
    fn test_empty_query_returns_everything_in_order() {
        let catalog = five_accounts();
        let pipeline = SearchPipeline::new(ScriptedMatcher::new(vec![]));
        let results = pipeline.search(&catalog, "   ", &SearchFilters::default());
        assert_eq!(codes(&results), ["AC01", "AC04", "AC06", "AM04", "RC01", "AB05"]);
        assert!(pipeline.matcher.calls.borrow().is_empty());
    }

    #[test]
    fn test_synonym_results_merge_after_direct() {
        let catalog = five_accounts();
        let matcher = ScriptedMatcher::new(vec![
            ("frozen", vec![4]),
            ("frozen blocked", vec![2, 4, 1]),
        ]);
        let pipeline = SearchPipeline::new(matcher);
        let results = pipeline.search(&catalog, "frozen", &SearchFilters::default());
        assert_eq!(codes(&results), ["RC01", "AC06", "AC04"]);
    }

    #[test]
    fn test_enough_direct_matches_skip_expansion() {
        let catalog = five_accounts();
        let matcher = ScriptedMatcher::new(vec![("account", vec![0, 1, 2, 3, 4])]);
        let pipeline = SearchPipeline::new(matcher);
        let results = pipeline.search(&catalog, "account", &SearchFilters::default());
        assert_eq!(results.len(), SYNONYM_FALLBACK_THRESHOLD);
        assert_eq!(*pipeline.matcher.calls.borrow(), ["account"]);
    }

    #[test]
    fn test_unexpandable_query_runs_one_pass() {
        let catalog = five_accounts();
        let pipeline = SearchPipeline::new(ScriptedMatcher::new(vec![]));
        let results = pipeline.search(&catalog, "XYZ123", &SearchFilters::default());
        assert!(results.is_empty());
        assert_eq!(*pipeline.matcher.calls.borrow(), ["XYZ123"]);
    }

    #[test]
    fn test_matcher_error_counts_as_no_matches() {
        let catalog = five_accounts();
        let pipeline = SearchPipeline::new(ScriptedMatcher::new(vec![]));
        let results = pipeline.search(&catalog, "boom", &SearchFilters::default());
        assert!(results.is_empty());
    }

    #[test]
    fn test_filters_apply_after_matching() {
        let catalog = five_accounts();
        let pipeline = SearchPipeline::new(ScriptedMatcher::new(vec![]));

        let by_category = pipeline.search(
            &catalog,
            "",
            &SearchFilters {
                category: Some(Category::Account),
                severity: None,
            },
        );
        assert_eq!(codes(&by_category), ["AC01", "AC04", "AC06"]);

        let by_both = pipeline.search(
            &catalog,
            "",
            &SearchFilters {
                category: Some(Category::System),
                severity: Some(Severity::Temporary),
            },
        );
        assert_eq!(codes(&by_both), ["AB05"]);
    }

    #[test]
    fn test_search_does_not_mutate_store() {
        let catalog = five_accounts();
        let before: Vec<String> = catalog.records().iter().map(|r| r.code.clone()).collect();
        let pipeline = SearchPipeline::default();
        let _ = pipeline.search(&catalog, "account", &SearchFilters::default());
        let after: Vec<String> = catalog.records().iter().map(|r| r.code.clone()).collect();
        assert_eq!(before, after);
    }
}

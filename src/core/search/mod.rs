//! Error code search: synonym expansion, weighted fuzzy matching, and the
//! pipeline that combines them with category and severity filters.

pub mod matcher;
pub mod pipeline;
pub mod synonyms;

pub use matcher::{
    FuzzyMatcher, MatchError, NucleoMatcher, ScoredMatch, SearchField, WeightedKey, SEARCH_KEYS,
};
pub use pipeline::{SearchFilters, SearchPipeline, SYNONYM_FALLBACK_THRESHOLD};
pub use synonyms::{SynonymExpander, SEARCH_SYNONYMS};

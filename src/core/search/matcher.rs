//! Weighted Fuzzy Matcher
//!
//! Scores records against a query across four weighted text fields.
//! Scores follow the "lower is better" convention: `0.0` is a perfect hit
//! and `1.0` means nothing matched.

use std::sync::Arc;

use nucleo::{
    pattern::{Atom, AtomKind, CaseMatching, Normalization},
    Matcher, Utf32Str,
};
use thiserror::Error;

use crate::core::catalog::ErrorRecord;

// ============================================================================
// Constants
// ============================================================================

/// Longest query the matcher accepts, in characters.
pub const MAX_QUERY_LEN: usize = 256;

/// Default match threshold. A token counts when its quality is at least
/// `1.0 - threshold`.
pub const DEFAULT_THRESHOLD: f64 = 0.35;

/// Minimum edit-distance similarity for a typo to count.
const TYPO_SIMILARITY_FLOOR: f64 = 0.8;

/// Tokens shorter than this are not typo-corrected.
const TYPO_MIN_TOKEN_CHARS: usize = 4;

// ============================================================================
// Keys
// ============================================================================

/// A searchable text field of an error record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    Code,
    Name,
    ShortDescription,
    DetailedDescription,
}

impl SearchField {
    pub fn text(self, record: &ErrorRecord) -> &str {
        match self {
            SearchField::Code => &record.code,
            SearchField::Name => &record.name,
            SearchField::ShortDescription => &record.description.short,
            SearchField::DetailedDescription => &record.description.detailed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedKey {
    pub field: SearchField,
    pub weight: f64,
}

/// A hit in the code outweighs an equal-quality hit in the detailed text.
pub const SEARCH_KEYS: [WeightedKey; 4] = [
    WeightedKey { field: SearchField::Code, weight: 2.0 },
    WeightedKey { field: SearchField::Name, weight: 1.5 },
    WeightedKey { field: SearchField::ShortDescription, weight: 1.0 },
    WeightedKey { field: SearchField::DetailedDescription, weight: 0.8 },
];

// ============================================================================
// Contract
// ============================================================================

/// One matching record: its position in the searched slice and its score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredMatch {
    pub index: usize,
    pub score: f64,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("Query is {len} characters long; at most {max} are supported")]
    QueryTooLong { len: usize, max: usize },
}

/// Ranked fuzzy matching over records.
///
/// Implementations return matches sorted by ascending score, ties broken by
/// record position, so results are deterministic for a given input.
pub trait FuzzyMatcher {
    fn search(
        &self,
        query: &str,
        records: &[Arc<ErrorRecord>],
    ) -> Result<Vec<ScoredMatch>, MatchError>;
}

// ============================================================================
// Nucleo Matcher
// ============================================================================

/// Production matcher: nucleo fuzzy scoring with strsim typo tolerance.
#[derive(Debug, Clone)]
pub struct NucleoMatcher {
    threshold: f64,
}

impl Default for NucleoMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl NucleoMatcher {
    pub fn new() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Threshold in `[0, 1]`; higher accepts looser matches.
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    fn prepare_tokens(&self, query: &str, matcher: &mut Matcher) -> Vec<QueryToken> {
        let mut buf = Vec::new();
        query
            .split_whitespace()
            .map(str::to_lowercase)
            .filter_map(|text| {
                let atom = Atom::new(
                    &text,
                    CaseMatching::Ignore,
                    Normalization::Smart,
                    AtomKind::Fuzzy,
                    false,
                );
                let self_score = atom.score(Utf32Str::new(&text, &mut buf), matcher)?;
                Some(QueryToken {
                    typo_eligible: text.chars().count() >= TYPO_MIN_TOKEN_CHARS,
                    self_score: f64::from(self_score.max(1)),
                    atom,
                    text,
                })
            })
            .collect()
    }
}

struct QueryToken {
    text: String,
    atom: Atom,
    self_score: f64,
    typo_eligible: bool,
}

impl QueryToken {
    /// Match quality of this token against a single lower-cased word.
    fn quality(&self, word: &str, matcher: &mut Matcher, buf: &mut Vec<char>) -> f64 {
        let fuzzy = self
            .atom
            .score(Utf32Str::new(word, buf), matcher)
            .map(|score| (f64::from(score) / self.self_score).min(1.0))
            .unwrap_or(0.0);

        let typo = if self.typo_eligible {
            let similarity = strsim::normalized_damerau_levenshtein(&self.text, word);
            if similarity >= TYPO_SIMILARITY_FLOOR {
                similarity
            } else {
                0.0
            }
        } else {
            0.0
        };

        fuzzy.max(typo)
    }
}

/// Mean quality of all tokens against a field, or `None` when no token counts.
fn field_quality(
    tokens: &[QueryToken],
    text: &str,
    floor: f64,
    matcher: &mut Matcher,
    buf: &mut Vec<char>,
) -> Option<f64> {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
        .collect();
    if words.is_empty() {
        return None;
    }

    let mut counted = false;
    let mut total = 0.0;
    for token in tokens {
        let mut best: f64 = 0.0;
        for word in &words {
            best = best.max(token.quality(word, matcher, buf));
            if best >= 1.0 {
                break;
            }
        }
        if best >= floor {
            counted = true;
            total += best;
        }
    }

    counted.then(|| total / tokens.len() as f64)
}

impl FuzzyMatcher for NucleoMatcher {
    fn search(
        &self,
        query: &str,
        records: &[Arc<ErrorRecord>],
    ) -> Result<Vec<ScoredMatch>, MatchError> {
        let len = query.chars().count();
        if len > MAX_QUERY_LEN {
            return Err(MatchError::QueryTooLong {
                len,
                max: MAX_QUERY_LEN,
            });
        }

        let mut matcher = Matcher::default();
        let tokens = self.prepare_tokens(query, &mut matcher);
        if tokens.is_empty() {
            return Ok(Vec::new());
        }

        let total_weight: f64 = SEARCH_KEYS.iter().map(|k| k.weight).sum();
        let floor = 1.0 - self.threshold;
        let mut buf = Vec::new();
        let mut matches = Vec::new();

        for (index, record) in records.iter().enumerate() {
            let mut score = 1.0;
            let mut matched = false;

            for key in &SEARCH_KEYS {
                let text = key.field.text(record);
                if let Some(quality) = field_quality(&tokens, text, floor, &mut matcher, &mut buf) {
                    matched = true;
                    let miss = (1.0 - quality).max(f64::EPSILON);
                    score *= miss.powf(key.weight / total_weight);
                }
            }

            if matched {
                matches.push(ScoredMatch { index, score });
            }
        }

        matches.sort_by(|a, b| a.score.total_cmp(&b.score).then(a.index.cmp(&b.index)));
        Ok(matches)
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Synonym Expansion
//!
//! Expands search queries with related payment terms so sparse queries
//! ("frozen") still reach records written with a different word ("blocked").
//! The table is stored one-directionally; lookup is bidirectional.

use std::collections::HashMap;

use indexmap::IndexSet;

// ============================================================================
// Constants - Synonym Table
// ============================================================================

/// Canonical term -> related terms. All entries lowercase.
pub const SEARCH_SYNONYMS: &[(&str, &[&str])] = &[
    // Account terms
    ("account", &["iban", "acct", "bank account", "acc"]),
    ("iban", &["account", "account number", "international bank account"]),
    ("closed", &["inactive", "terminated", "shut", "cancelled", "deactivated"]),
    ("blocked", &["frozen", "suspended", "locked", "restricted", "held"]),

    // Amount terms
    ("amount", &["sum", "value", "payment", "funds", "money"]),
    ("insufficient", &["not enough", "low balance", "short", "lacking"]),
    ("limit", &["maximum", "cap", "threshold", "ceiling", "restriction"]),
    ("exceeded", &["over", "surpassed", "breached", "above"]),

    // Party terms
    ("beneficiary", &["recipient", "payee", "creditor", "receiver"]),
    ("creditor", &["beneficiary", "recipient", "payee", "receiver"]),
    ("debtor", &["sender", "payer", "originator", "remitter"]),
    ("sender", &["debtor", "payer", "originator", "remitter"]),

    // Routing terms
    ("bic", &["swift", "swift code", "bank code", "routing"]),
    ("swift", &["bic", "swift code", "bank identifier"]),
    ("routing", &["bic", "swift", "correspondent", "intermediary"]),
    ("correspondent", &["intermediary", "agent", "routing bank"]),

    // Status terms
    ("rejected", &["declined", "refused", "failed", "returned"]),
    ("failed", &["rejected", "error", "unsuccessful", "declined"]),
    ("timeout", &["timed out", "delay", "slow", "unresponsive"]),
    ("duplicate", &["already sent", "repeat", "double", "existing"]),

    // Regulatory terms
    ("sanctions", &["ofac", "blocked", "restricted", "compliance"]),
    ("aml", &["anti-money laundering", "compliance", "kyc"]),
    ("kyc", &["know your customer", "verification", "identity"]),
    ("regulatory", &["compliance", "legal", "requirement", "rule"]),

    // Technical terms
    ("invalid", &["wrong", "incorrect", "bad", "malformed"]),
    ("missing", &["absent", "not provided", "empty", "blank"]),
    ("format", &["structure", "syntax", "layout", "schema"]),
    ("xml", &["message", "payload", "document", "file"]),

    // Code prefixes
    ("ac", &["account"]),
    ("am", &["amount"]),
    ("ag", &["agent"]),
    ("be", &["beneficiary"]),
    ("rc", &["regulatory", "compliance"]),
    ("ff", &["format", "field"]),
    ("dt", &["date", "time"]),
    ("md", &["mandate"]),
    ("du", &["duplicate"]),
    ("ts", &["technical", "system"]),
];

// ============================================================================
// Synonym Expander
// ============================================================================

/// Bidirectional view over a synonym table, pre-indexed at construction.
#[derive(Debug, Clone)]
pub struct SynonymExpander {
    /// Key -> related terms, in table order.
    forward: HashMap<String, Vec<String>>,
    /// Related term -> every key listing it, in table declaration order.
    reverse: HashMap<String, Vec<String>>,
}

impl Default for SynonymExpander {
    fn default() -> Self {
        Self::new()
    }
}

impl SynonymExpander {
    /// Expander over the built-in payment synonym table.
    pub fn new() -> Self {
        Self::from_table(SEARCH_SYNONYMS)
    }

    pub fn from_table(table: &[(&str, &[&str])]) -> Self {
        let mut forward: HashMap<String, Vec<String>> = HashMap::with_capacity(table.len());
        let mut reverse: HashMap<String, Vec<String>> = HashMap::new();

        for (key, synonyms) in table {
            forward.insert(
                key.to_string(),
                synonyms.iter().map(|s| s.to_string()).collect(),
            );
            for synonym in synonyms.iter() {
                let keys = reverse.entry(synonym.to_string()).or_default();
                if !keys.iter().any(|k| k == key) {
                    keys.push(key.to_string());
                }
            }
        }

        Self { forward, reverse }
    }

    /// Expand a query with synonyms in both directions.
    ///
    /// Output is the space-joined token set in first-insertion order: the
    /// original words, then per word its listed synonyms followed by every
    /// key that lists it. An empty query is returned unchanged.
    pub fn expand(&self, query: &str) -> String {
        if query.is_empty() {
            return String::new();
        }

        let lower = query.to_lowercase();
        let words: Vec<&str> = lower.split_whitespace().collect();
        let mut expanded: IndexSet<&str> = words.iter().copied().collect();

        for word in &words {
            if let Some(synonyms) = self.forward.get(*word) {
                expanded.extend(synonyms.iter().map(String::as_str));
            }
            if let Some(keys) = self.reverse.get(*word) {
                expanded.extend(keys.iter().map(String::as_str));
            }
        }

        expanded.into_iter().collect::<Vec<_>>().join(" ")
    }

    /// Terms listed under `term` as a key.
    pub fn synonyms_for(&self, term: &str) -> Option<&[String]> {
        self.forward.get(&term.to_lowercase()).map(Vec::as_slice)
    }

    /// Keys whose synonym list contains `term`.
    pub fn keys_listing(&self, term: &str) -> Option<&[String]> {
        self.reverse.get(&term.to_lowercase()).map(Vec::as_slice)
    }

    /// Number of canonical terms in the table.
    pub fn term_count(&self) -> usize {
        self.forward.len()
    }
}

// ============================================================================
// Tests
// ============================================================================

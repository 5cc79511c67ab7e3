//! Error Record Models
//!
//! Data structures for ISO 20022 rejection reason records as they appear
//! in the catalog file.

use serde::{Deserialize, Serialize};

// ============================================================================
// Closed Enumerations
// ============================================================================

/// Functional area of a payment message an error pertains to.
///
/// Unrecognized category strings in the catalog deserialize to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Account,
    Amount,
    Party,
    Routing,
    Regulatory,
    System,
    Mandate,
    Duplicate,
    Cancellation,
    Narrative,
    #[serde(other)]
    Other,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 11] = [
        Category::Account,
        Category::Amount,
        Category::Party,
        Category::Routing,
        Category::Regulatory,
        Category::System,
        Category::Mandate,
        Category::Duplicate,
        Category::Cancellation,
        Category::Narrative,
        Category::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Account => "Account",
            Category::Amount => "Amount",
            Category::Party => "Party",
            Category::Routing => "Routing",
            Category::Regulatory => "Regulatory",
            Category::System => "System",
            Category::Mandate => "Mandate",
            Category::Duplicate => "Duplicate",
            Category::Cancellation => "Cancellation",
            Category::Narrative => "Narrative",
            Category::Other => "Other",
        }
    }

    /// Parse a user-supplied label (case-insensitive). Unknown labels yield `None`.
    pub fn parse(label: &str) -> Option<Category> {
        let label = label.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(label))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether a rejection is permanent or may resolve on its own.
///
/// Anything other than the literal `temporary` deserializes to `Fatal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Temporary,
    #[serde(other)]
    Fatal,
}

impl Severity {
    pub const ALL: [Severity; 2] = [Severity::Fatal, Severity::Temporary];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Fatal => "fatal",
            Severity::Temporary => "temporary",
        }
    }

    pub fn parse(label: &str) -> Option<Severity> {
        match label.trim().to_ascii_lowercase().as_str() {
            "fatal" => Some(Severity::Fatal),
            "temporary" => Some(Severity::Temporary),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Error Record
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ErrorDescription {
    #[serde(default)]
    pub short: String,
    #[serde(default)]
    pub detailed: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HowToFix {
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prevention: Option<String>,
}

/// External reference attached to a record (standards document, market guide, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub title: String,
    pub url: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// One rejection reason code and everything we know about it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// Primary key, e.g. `AC04`.
    pub code: String,
    #[serde(default)]
    pub name: String,
    pub category: Category,
    pub severity: Severity,
    #[serde(default)]
    pub description: ErrorDescription,
    #[serde(default)]
    pub common_causes: Vec<String>,
    #[serde(default)]
    pub how_to_fix: HowToFix,
    #[serde(default)]
    pub xpath_locations: Vec<String>,
    #[serde(default)]
    pub message_types: Vec<String>,
    #[serde(default)]
    pub market_practices: Vec<String>,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

/// Header fields of the wrapped catalog document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CatalogMetadata {
    #[serde(default)]
    pub version: String,
    #[serde(default, alias = "last_updated")]
    pub generated: String,
    #[serde(default)]
    pub total_errors: usize,
}

/// The wrapped `{ version, generated, total_errors, errors }` document.
#[derive(Debug, Deserialize)]
pub(crate) struct WrappedCatalog {
    #[serde(flatten)]
    pub metadata: CatalogMetadata,
    pub errors: Vec<ErrorRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_category_is_other() {
        let c: Category = serde_json::from_str("\"Settlement\"").unwrap();
        assert_eq!(c, Category::Other);
    }

    #[test]
    fn test_severity_defaults_to_fatal() {
        let s: Severity = serde_json::from_str("\"permanent\"").unwrap();
        assert_eq!(s, Severity::Fatal);
        let s: Severity = serde_json::from_str("\"temporary\"").unwrap();
        assert_eq!(s, Severity::Temporary);
    }

    #[test]
    fn test_minimal_record_fills_defaults() {
        let json = r#"{ "code": "ZZ01", "category": "Account", "severity": "fatal" }"#;
        let record: ErrorRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.code, "ZZ01");
        assert!(record.name.is_empty());
        assert!(record.common_causes.is_empty());
        assert!(record.how_to_fix.prevention.is_none());
    }

    #[test]
    fn test_resource_type_field() {
        let json = r#"{ "title": "Spec", "url": "https://example.org", "type": "specification" }"#;
        let resource: Resource = serde_json::from_str(json).unwrap();
        assert_eq!(resource.kind, "specification");
    }

    #[test]
    fn test_category_parse_is_case_insensitive() {
        assert_eq!(Category::parse("account"), Some(Category::Account));
        assert_eq!(Category::parse(" ROUTING "), Some(Category::Routing));
        assert_eq!(Category::parse("nope"), None);
    }
}

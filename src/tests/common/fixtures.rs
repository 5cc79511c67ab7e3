//! Test Fixtures
//!
//! Builders for error records and small in-memory catalogs.

use std::sync::Arc;

use crate::core::catalog::{
    Catalog, Category, ErrorDescription, ErrorRecord, HowToFix, Severity,
};

/// A record with the given identity and empty optional fields.
pub fn make_record(code: &str, name: &str, category: Category, severity: Severity) -> ErrorRecord {
    ErrorRecord {
        code: code.to_string(),
        name: name.to_string(),
        category,
        severity,
        description: ErrorDescription::default(),
        common_causes: Vec::new(),
        how_to_fix: HowToFix::default(),
        xpath_locations: Vec::new(),
        message_types: Vec::new(),
        market_practices: Vec::new(),
        resources: Vec::new(),
    }
}

/// A record with descriptions, first cause and first fix step filled in.
pub fn make_described_record(
    code: &str,
    name: &str,
    short: &str,
    detailed: &str,
    cause: &str,
    fix: &str,
) -> ErrorRecord {
    let mut record = make_record(code, name, Category::Other, Severity::Fatal);
    record.description = ErrorDescription {
        short: short.to_string(),
        detailed: detailed.to_string(),
    };
    if !cause.is_empty() {
        record.common_causes.push(cause.to_string());
    }
    if !fix.is_empty() {
        record.how_to_fix.steps.push(fix.to_string());
    }
    record
}

/// `n` records with codes `T0000..`, cycling through categories and severities.
pub fn make_records(n: usize) -> Vec<ErrorRecord> {
    (0..n)
        .map(|i| {
            make_record(
                &format!("T{i:04}"),
                &format!("Test error number {i}"),
                Category::ALL[i % Category::ALL.len()],
                Severity::ALL[i % Severity::ALL.len()],
            )
        })
        .collect()
}

/// Catalog of `n` generated records.
pub fn make_catalog(n: usize) -> Arc<Catalog> {
    Arc::new(Catalog::from_records(make_records(n)).expect("generated codes are unique"))
}

/// The catalog shipped with the binary.
pub fn bundled_catalog() -> Arc<Catalog> {
    Arc::new(Catalog::bundled().expect("bundled catalog parses"))
}

//! Record Store
//!
//! Loads the catalog once and hands out shared, read-only record handles.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;
use tracing::instrument;

use super::error::{LoadError, LookupMiss, Result};
use super::models::{Category, CatalogMetadata, ErrorRecord, WrappedCatalog};

/// Catalog compiled into the binary, used when no file is configured.
pub const BUNDLED_CATALOG: &str = include_str!("../../../data/errors.json");

/// Where the catalog comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Bundled,
    File(PathBuf),
}

impl CatalogSource {
    pub fn from_path(path: Option<PathBuf>) -> Self {
        path.map(CatalogSource::File).unwrap_or(CatalogSource::Bundled)
    }

    pub fn describe(&self) -> String {
        match self {
            CatalogSource::Bundled => "bundled catalog".to_string(),
            CatalogSource::File(path) => path.display().to_string(),
        }
    }
}

/// Immutable collection of error records, in load order.
#[derive(Debug)]
pub struct Catalog {
    metadata: CatalogMetadata,
    records: Vec<Arc<ErrorRecord>>,
    /// Upper-cased code -> index into `records`.
    by_code: HashMap<String, usize>,
}

impl Catalog {
    /// Load from the given source. The only fallible operation in the core.
    #[instrument(skip_all, fields(source = %source.describe()))]
    pub async fn load(source: &CatalogSource) -> Result<Self> {
        let catalog = match source {
            CatalogSource::Bundled => Self::from_json(BUNDLED_CATALOG)?,
            CatalogSource::File(path) => {
                let contents =
                    tokio::fs::read_to_string(path)
                        .await
                        .map_err(|source| LoadError::Io {
                            path: path.clone(),
                            source,
                        })?;
                Self::from_json(&contents)?
            }
        };

        log::info!(
            "Loaded {} error records from {}",
            catalog.len(),
            source.describe()
        );
        Ok(catalog)
    }

    /// The bundled catalog, parsed synchronously.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_CATALOG)
    }

    /// Parse either a wrapped catalog document or a bare array of records.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        match value {
            Value::Array(_) => {
                let records: Vec<ErrorRecord> = serde_json::from_value(value)?;
                let metadata = CatalogMetadata {
                    total_errors: records.len(),
                    ..CatalogMetadata::default()
                };
                Self::build(metadata, records)
            }
            other => {
                let wrapped: WrappedCatalog = serde_json::from_value(other)?;
                if wrapped.metadata.total_errors != 0
                    && wrapped.metadata.total_errors != wrapped.errors.len()
                {
                    log::warn!(
                        "Catalog header claims {} errors but contains {}",
                        wrapped.metadata.total_errors,
                        wrapped.errors.len()
                    );
                }
                Self::build(wrapped.metadata, wrapped.errors)
            }
        }
    }

    /// Build a catalog from already-parsed records.
    pub fn from_records(records: Vec<ErrorRecord>) -> Result<Self> {
        let metadata = CatalogMetadata {
            total_errors: records.len(),
            ..CatalogMetadata::default()
        };
        Self::build(metadata, records)
    }

    fn build(metadata: CatalogMetadata, records: Vec<ErrorRecord>) -> Result<Self> {
        let mut by_code = HashMap::with_capacity(records.len());
        let mut shared = Vec::with_capacity(records.len());

        for (index, record) in records.into_iter().enumerate() {
            let key = record.code.trim().to_uppercase();
            if by_code.insert(key, index).is_some() {
                return Err(LoadError::DuplicateCode(record.code));
            }
            shared.push(Arc::new(record));
        }

        Ok(Self {
            metadata,
            records: shared,
            by_code,
        })
    }

    pub fn records(&self) -> &[Arc<ErrorRecord>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn metadata(&self) -> &CatalogMetadata {
        &self.metadata
    }

    /// Case-insensitive lookup by code.
    pub fn get(&self, code: &str) -> Option<&Arc<ErrorRecord>> {
        self.by_code
            .get(&code.trim().to_uppercase())
            .map(|&index| &self.records[index])
    }

    /// Case-insensitive lookup that reports the attempted code on a miss.
    pub fn lookup(&self, code: &str) -> std::result::Result<Arc<ErrorRecord>, LookupMiss> {
        self.get(code).cloned().ok_or_else(|| LookupMiss {
            code: code.trim().to_string(),
        })
    }

    /// Record count per category, in enumeration order, skipping empty ones.
    pub fn category_counts(&self) -> Vec<(Category, usize)> {
        Category::ALL
            .into_iter()
            .map(|category| {
                let count = self
                    .records
                    .iter()
                    .filter(|r| r.category == category)
                    .count();
                (category, count)
            })
            .filter(|(_, count)| *count > 0)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::models::Severity;

    fn record(code: &str, category: Category) -> ErrorRecord {
        serde_json::from_value(serde_json::json!({
            "code": code,
            "name": format!("Record {code}"),
            "category": category,
            "severity": "fatal",
        }))
        .unwrap()
    }

    #[test]
    fn test_bundled_catalog_parses() {
        let catalog = Catalog::bundled().unwrap();
        assert!(catalog.len() >= 30);
        assert!(!catalog.metadata().version.is_empty());
        assert!(catalog.get("AC04").is_some());
    }

    #[test]
    fn test_bare_array_accepted() {
        let json = r#"[{ "code": "AC01", "name": "Incorrect Account Number",
                        "category": "Account", "severity": "fatal" }]"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.metadata().total_errors, 1);
    }

    #[test]
    fn test_wrapped_document_accepted() {
        let json = r#"{ "version": "2.0", "generated": "2025-01-01", "total_errors": 1,
                        "errors": [{ "code": "AM04", "category": "Amount", "severity": "temporary" }] }"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.metadata().version, "2.0");
        assert_eq!(catalog.records()[0].severity, Severity::Temporary);
    }

    #[test]
    fn test_garbage_is_parse_error() {
        let err = Catalog::from_json("{ not json").unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
        let err = Catalog::from_json(r#"{ "version": "1" }"#).unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[test]
    fn test_duplicate_code_rejected() {
        let err = Catalog::from_records(vec![
            record("AC01", Category::Account),
            record("ac01", Category::Account),
        ])
        .unwrap_err();
        assert!(matches!(err, LoadError::DuplicateCode(code) if code == "ac01"));
    }

    #[test]
    fn test_lookup_is_case_insensitive_and_shared() {
        let catalog = Catalog::from_records(vec![record("AC04", Category::Account)]).unwrap();
        let upper = catalog.lookup("AC04").unwrap();
        let lower = catalog.lookup("ac04").unwrap();
        assert!(Arc::ptr_eq(&upper, &lower));
    }

    #[test]
    fn test_lookup_miss_echoes_code() {
        let catalog = Catalog::from_records(vec![record("AC04", Category::Account)]).unwrap();
        let miss = catalog.lookup("zz99").unwrap_err();
        assert_eq!(miss.code, "zz99");
        assert!(miss.to_string().contains("\"zz99\""));
    }

    #[test]
    fn test_category_counts_skip_empty() {
        let catalog = Catalog::from_records(vec![
            record("AC01", Category::Account),
            record("AC04", Category::Account),
            record("AM04", Category::Amount),
        ])
        .unwrap();
        assert_eq!(
            catalog.category_counts(),
            vec![(Category::Account, 2), (Category::Amount, 1)]
        );
    }

    #[tokio::test]
    async fn test_load_missing_file_is_io_error() {
        let source = CatalogSource::File(PathBuf::from("/definitely/not/here/errors.json"));
        let err = Catalog::load(&source).await.unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("errors.json");
        std::fs::write(
            &path,
            r#"[{ "code": "RC01", "category": "Routing", "severity": "fatal" }]"#,
        )
        .unwrap();
        let catalog = Catalog::load(&CatalogSource::File(path)).await.unwrap();
        assert!(catalog.get("rc01").is_some());
    }
}

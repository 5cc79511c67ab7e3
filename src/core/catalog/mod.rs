//! Error code catalog: record models, the immutable record store, and its errors.

pub mod error;
pub mod models;
pub mod store;

pub use error::{LoadError, LookupMiss};
pub use models::{
    Category, CatalogMetadata, ErrorDescription, ErrorRecord, HowToFix, Resource, Severity,
};
pub use store::{Catalog, CatalogSource, BUNDLED_CATALOG};

//! Catalog Error Types

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Failure to load the record store. Terminal for the session.
#[derive(Error, Diagnostic, Debug)]
pub enum LoadError {
    #[error("Failed to read error data from {path}")]
    #[diagnostic(
        code(catalog::io),
        help("check `data.catalog_path` in your config or pass --data <PATH>")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error data is not valid: {0}")]
    #[diagnostic(
        code(catalog::parse),
        help("the catalog must be a JSON array of records or an object with an `errors` array")
    )]
    Parse(#[from] serde_json::Error),

    #[error("Error code {0} appears more than once in the catalog")]
    #[diagnostic(code(catalog::duplicate_code))]
    DuplicateCode(String),
}

/// A requested code has no matching record. Non-fatal.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
#[error("Error code \"{code}\" not found in our database.")]
#[diagnostic(code(catalog::not_found), help("search all errors to find a similar code"))]
pub struct LookupMiss {
    /// The code exactly as the user supplied it.
    pub code: String,
}

/// Result type alias for catalog loading
pub type Result<T> = std::result::Result<T, LoadError>;

//! Error types for the catalog store.

use thiserror::Error;

/// Errors from catalog operations.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog file could not be parsed.
    #[error("invalid catalog file: {0}")]
    InvalidFile(#[from] serde_json::Error),

    /// No entry with the given name or id.
    #[error("not found: {0}")]
    NotFound(String),

    /// An entry with the given name already exists.
    #[error("already exists: {0}")]
    Duplicate(String),
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

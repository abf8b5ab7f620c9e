//! Error types for metadata extraction.

use thiserror::Error;

/// Errors that can occur while reading a sliced-model file.
///
/// Extraction itself never fails: missing or malformed annotations degrade
/// to defaults and sentinels. Only the initial read of the file into text
/// is fallible.
#[derive(Error, Debug)]
pub enum MetaError {
    /// The file could not be read.
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// The file contents are not valid UTF-8 text.
    #[error("file is not valid UTF-8 text")]
    NotUtf8(#[from] std::string::FromUtf8Error),
}

/// Result type for metadata operations.
pub type Result<T> = std::result::Result<T, MetaError>;

//! Error types for pricing.

use thiserror::Error;

/// Errors that can occur while computing a quote.
#[derive(Error, Debug)]
pub enum PricingError {
    /// Invalid cost settings.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

/// Result type for pricing operations.
pub type Result<T> = std::result::Result<T, PricingError>;

//! # Domain Errors
//!
//! Validation failures raised when constructing domain values.

use thiserror::Error;

/// Error type for domain validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Latitude outside [-90, 90] or not finite.
    #[error("invalid latitude: {0}")]
    InvalidLatitude(f64),

    /// Longitude outside [-180, 180] or not finite.
    #[error("invalid longitude: {0}")]
    InvalidLongitude(f64),

    /// Vehicle details failed validation.
    #[error("invalid details: {0}")]
    InvalidDetails(String),

    /// Unknown vehicle condition.
    #[error("invalid condition: {0}")]
    InvalidCondition(String),
}

impl DomainError {
    /// Creates an invalid details error.
    #[must_use]
    pub fn invalid_details(message: impl Into<String>) -> Self {
        Self::InvalidDetails(message.into())
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

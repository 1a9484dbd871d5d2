//! # Application Errors
//!
//! Error types for the application layer.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── NotFound { id }             - No vehicle stored under the identifier
//! ├── Lookup(LookupError)         - Price or location enrichment failed
//! └── Storage(RepositoryError)    - Record store failure, passed through
//! ```
//!
//! # Examples
//!
//! ```
//! use vehicles_api::application::error::ApplicationError;
//! use vehicles_api::domain::value_objects::VehicleId;
//! use vehicles_api::infrastructure::lookups::{LookupError, LookupKind};
//!
//! let err = ApplicationError::not_found(VehicleId::new(7));
//! assert!(err.is_not_found());
//!
//! let err: ApplicationError = LookupError::timeout(LookupKind::Price).into();
//! assert!(err.is_lookup());
//! ```

use crate::domain::value_objects::VehicleId;
use crate::infrastructure::lookups::LookupError;
use crate::infrastructure::persistence::RepositoryError;
use thiserror::Error;

/// Application layer error.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// No vehicle exists for the identifier.
    #[error("vehicle not found: {id}")]
    NotFound {
        /// Identifier that was looked up.
        id: VehicleId,
    },

    /// An enrichment lookup failed.
    #[error("lookup error: {0}")]
    Lookup(#[from] LookupError),

    /// The record store failed.
    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),
}

impl ApplicationError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(id: VehicleId) -> Self {
        Self::NotFound { id }
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true if an enrichment lookup failed.
    #[must_use]
    pub fn is_lookup(&self) -> bool {
        matches!(self, Self::Lookup(_))
    }

    /// Returns true if the record store failed.
    #[must_use]
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

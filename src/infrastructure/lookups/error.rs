//! # Lookup Errors
//!
//! Error types for the price and location lookups.
//!
//! # Examples
//!
//! ```
//! use vehicles_api::infrastructure::lookups::error::{LookupError, LookupKind};
//!
//! let error = LookupError::timeout_with_duration(LookupKind::Price, 5000);
//! assert!(error.is_timeout());
//! assert!(error.to_string().contains("price"));
//! ```

use std::fmt;
use thiserror::Error;

/// Which external lookup failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    /// The pricing service.
    Price,
    /// The maps (reverse geocoding) service.
    Location,
}

impl LookupKind {
    /// Returns the lookup name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::Location => "location",
        }
    }
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for lookup operations.
#[derive(Debug, Clone, Error)]
pub enum LookupError {
    /// Request did not complete in time.
    #[error("{kind} lookup timed out{}", fmt_timeout(.timeout_ms))]
    Timeout {
        /// Lookup that timed out.
        kind: LookupKind,
        /// Timeout duration in milliseconds.
        timeout_ms: Option<u64>,
    },

    /// Network or connection error.
    #[error("{kind} lookup connection error: {message}")]
    Connection {
        /// Lookup that failed.
        kind: LookupKind,
        /// Error message.
        message: String,
    },

    /// Remote service answered with a non-success status.
    #[error("{kind} lookup failed with status {status}: {message}")]
    Remote {
        /// Lookup that failed.
        kind: LookupKind,
        /// HTTP status code.
        status: u16,
        /// Response body or reason.
        message: String,
    },

    /// Response could not be understood.
    #[error("{kind} lookup returned a malformed response: {message}")]
    MalformedResponse {
        /// Lookup that failed.
        kind: LookupKind,
        /// Error message.
        message: String,
    },

    /// Client-side failure unrelated to the remote service.
    #[error("{kind} lookup internal error: {message}")]
    Internal {
        /// Lookup that failed.
        kind: LookupKind,
        /// Error message.
        message: String,
    },
}

fn fmt_timeout(timeout_ms: &Option<u64>) -> String {
    timeout_ms
        .map(|ms| format!(" after {}ms", ms))
        .unwrap_or_default()
}

impl LookupError {
    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(kind: LookupKind) -> Self {
        Self::Timeout {
            kind,
            timeout_ms: None,
        }
    }

    /// Creates a timeout error with duration.
    #[must_use]
    pub fn timeout_with_duration(kind: LookupKind, timeout_ms: u64) -> Self {
        Self::Timeout {
            kind,
            timeout_ms: Some(timeout_ms),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(kind: LookupKind, message: impl Into<String>) -> Self {
        Self::Connection {
            kind,
            message: message.into(),
        }
    }

    /// Creates a remote status error.
    #[must_use]
    pub fn remote(kind: LookupKind, status: u16, message: impl Into<String>) -> Self {
        Self::Remote {
            kind,
            status,
            message: message.into(),
        }
    }

    /// Creates a malformed response error.
    #[must_use]
    pub fn malformed(kind: LookupKind, message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            kind,
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(kind: LookupKind, message: impl Into<String>) -> Self {
        Self::Internal {
            kind,
            message: message.into(),
        }
    }

    /// Returns which lookup failed.
    #[must_use]
    pub fn kind(&self) -> LookupKind {
        match self {
            Self::Timeout { kind, .. }
            | Self::Connection { kind, .. }
            | Self::Remote { kind, .. }
            | Self::MalformedResponse { kind, .. }
            | Self::Internal { kind, .. } => *kind,
        }
    }

    /// Returns true if this is a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Result type for lookup operations.
pub type LookupResult<T> = Result<T, LookupError>;

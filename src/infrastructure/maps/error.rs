//! # Map Provider Errors
//!
//! Error types for distance lookups against the external map provider.
//!
//! Only quota exhaustion escapes the resolver to callers; every other
//! variant is absorbed into the marked-estimated fallback. The distinction
//! therefore matters: [`MapsError::is_quota`] decides whether a quote request
//! fails retryably or degrades to estimated pricing.
//!
//! # Examples
//!
//! ```
//! use courier_quote::infrastructure::maps::error::MapsError;
//!
//! let err = MapsError::quota_exceeded("daily element limit reached");
//! assert!(err.is_quota());
//! assert!(err.is_retryable());
//!
//! let err = MapsError::timeout("no response within 10s");
//! assert!(!err.is_quota());
//! ```

use thiserror::Error;

/// Error type for map-provider operations.
#[derive(Debug, Clone, Error)]
pub enum MapsError {
    /// Request exceeded its time budget.
    #[error("maps timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
    },

    /// Network or connection failure.
    #[error("maps connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// Provider quota exhausted; retry after a backoff.
    #[error("maps quota exceeded: {message}")]
    QuotaExceeded {
        /// Error message.
        message: String,
    },

    /// Credentials rejected by the provider.
    #[error("maps authentication error: {message}")]
    Authentication {
        /// Error message.
        message: String,
    },

    /// No route exists between the requested addresses.
    #[error("maps no route: {message}")]
    NoRoute {
        /// Error message.
        message: String,
    },

    /// Response did not match the provider contract.
    #[error("maps invalid response: {message}")]
    InvalidResponse {
        /// Error message.
        message: String,
    },

    /// Internal adapter error.
    #[error("maps internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl MapsError {
    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a quota-exceeded error.
    #[must_use]
    pub fn quota_exceeded(message: impl Into<String>) -> Self {
        Self::QuotaExceeded {
            message: message.into(),
        }
    }

    /// Creates an authentication error.
    #[must_use]
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Creates a no-route error.
    #[must_use]
    pub fn no_route(message: impl Into<String>) -> Self {
        Self::NoRoute {
            message: message.into(),
        }
    }

    /// Creates an invalid-response error.
    #[must_use]
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this is the distinguished quota error.
    #[must_use]
    pub const fn is_quota(&self) -> bool {
        matches!(self, Self::QuotaExceeded { .. })
    }

    /// Returns true if retrying later may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::Connection { .. } | Self::QuotaExceeded { .. }
        )
    }
}

/// Result type for map-provider operations.
pub type MapsResult<T> = Result<T, MapsError>;

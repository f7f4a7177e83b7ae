//! # Application Errors
//!
//! Error type for the quote service layer.
//!
//! The service does not translate errors; callers map them to
//! transport-specific status codes using the classification predicates:
//!
//! ```text
//! QuoteServiceError
//! ├── Domain(DomainError)        - QuoteInvalid (caller error) / ConfigInvalid
//! ├── DistanceUnavailable(...)   - quota exhaustion; retryable
//! └── Internal { .. }            - unexpected; logged with a correlation id
//! ```
//!
//! # Examples
//!
//! ```
//! use courier_quote::application::error::QuoteServiceError;
//! use courier_quote::infrastructure::maps::error::MapsError;
//!
//! let err = QuoteServiceError::distance_unavailable(MapsError::quota_exceeded("limit"));
//! assert!(err.is_retryable());
//! assert!(!err.is_user_error());
//! ```

use crate::domain::errors::{DomainError, QuoteInvalidReason};
use crate::domain::value_objects::ids::CorrelationId;
use crate::infrastructure::maps::error::MapsError;
use thiserror::Error;

/// Quote service error.
#[derive(Debug, Error)]
pub enum QuoteServiceError {
    /// Domain-level rejection: invalid quote request or invalid config.
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Distance could not be resolved and no fallback applies.
    ///
    /// Only quota exhaustion reaches this variant; every other provider
    /// failure degrades to the estimated fallback inside the resolver.
    #[error("distance unavailable: {0}")]
    DistanceUnavailable(#[source] MapsError),

    /// Unexpected condition. The correlation identifier is logged and
    /// returned to the caller.
    #[error("internal error [{correlation_id}]: {message}")]
    Internal {
        /// Identifier correlating the response with the server log line.
        correlation_id: CorrelationId,
        /// What went wrong.
        message: String,
    },
}

impl QuoteServiceError {
    /// Wraps a quota-exhaustion error from the distance resolver.
    #[must_use]
    pub const fn distance_unavailable(err: MapsError) -> Self {
        Self::DistanceUnavailable(err)
    }

    /// Creates an internal error, logging it with its correlation id.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        let correlation_id = CorrelationId::new();
        let message = message.into();
        tracing::error!(%correlation_id, %message, "internal error");
        Self::Internal {
            correlation_id,
            message,
        }
    }

    /// Returns the quote rejection reason, if this is one.
    #[must_use]
    pub const fn quote_invalid_reason(&self) -> Option<QuoteInvalidReason> {
        match self {
            Self::Domain(domain) => domain.quote_invalid_reason(),
            _ => None,
        }
    }

    /// Returns true if the caller's input caused this error (4xx-class).
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        match self {
            Self::Domain(domain) => domain.is_user_error(),
            _ => false,
        }
    }

    /// Returns true if retrying after a backoff may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::DistanceUnavailable(err) if err.is_retryable())
    }

    /// Returns the correlation identifier of an internal error.
    #[must_use]
    pub const fn correlation_id(&self) -> Option<CorrelationId> {
        match self {
            Self::Internal { correlation_id, .. } => Some(*correlation_id),
            _ => None,
        }
    }
}

/// Result type for quote service operations.
pub type QuoteServiceResult<T> = Result<T, QuoteServiceError>;

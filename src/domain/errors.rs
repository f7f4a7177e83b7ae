//! # Domain Errors
//!
//! Error types produced by the domain layer.
//!
//! The normalizer is the sole producer of [`DomainError::QuoteInvalid`]; the
//! calculator never fails on a normalized input, so an arithmetic error
//! escaping it indicates a programmer error upstream.
//!
//! # Examples
//!
//! ```
//! use courier_quote::domain::errors::{DomainError, QuoteInvalidReason};
//!
//! let err = DomainError::quote_invalid(QuoteInvalidReason::MissingLocations);
//! assert!(err.to_string().contains("missing_locations"));
//! ```

use crate::domain::value_objects::arithmetic::ArithmeticError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Machine-readable reason for rejecting a quote request.
///
/// The reason string is part of the caller-facing contract and is rendered
/// in snake_case both in `Display` and over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteInvalidReason {
    /// Pickup or delivery address absent or unusable after trimming.
    MissingLocations,
    /// Event date parsed to a moment at or before "now".
    PastEventDate,
    /// An item quantity coerced to zero or below.
    BadItemQuantity,
    /// Declared value coerced to a negative amount.
    BadDeclaredValue,
}

impl QuoteInvalidReason {
    /// Returns the stable snake_case tag for this reason.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingLocations => "missing_locations",
            Self::PastEventDate => "past_event_date",
            Self::BadItemQuantity => "bad_item_quantity",
            Self::BadDeclaredValue => "bad_declared_value",
        }
    }
}

impl fmt::Display for QuoteInvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain layer error.
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    /// The inbound quote request failed validation.
    #[error("invalid quote request: {0}")]
    QuoteInvalid(QuoteInvalidReason),

    /// A pricing configuration value violates its documented range.
    #[error("invalid pricing config: {field}: {message}")]
    ConfigInvalid {
        /// The offending configuration field.
        field: String,
        /// What was wrong with it.
        message: String,
    },

    /// Checked arithmetic failed while composing a price.
    #[error("pricing arithmetic failed: {0}")]
    Arithmetic(#[from] ArithmeticError),
}

impl DomainError {
    /// Creates a quote validation error.
    #[must_use]
    pub const fn quote_invalid(reason: QuoteInvalidReason) -> Self {
        Self::QuoteInvalid(reason)
    }

    /// Creates a configuration validation error.
    #[must_use]
    pub fn config_invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns the rejection reason if this is a quote validation error.
    #[must_use]
    pub const fn quote_invalid_reason(&self) -> Option<QuoteInvalidReason> {
        match self {
            Self::QuoteInvalid(reason) => Some(*reason),
            _ => None,
        }
    }

    /// Returns true if this error is caused by caller input.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(self, Self::QuoteInvalid(_))
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

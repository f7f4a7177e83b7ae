//! # Identifier Value Objects
//!
//! Consumer-visible quote identifiers and internal correlation identifiers.
//!
//! # Examples
//!
//! ```
//! use courier_quote::domain::value_objects::ids::QuoteId;
//! use courier_quote::domain::value_objects::timestamp::Timestamp;
//!
//! let id = QuoteId::generate_at(Timestamp::now());
//! assert!(QuoteId::is_valid_format(id.as_str()));
//! assert!(id.as_str().starts_with("QC-"));
//! ```

use crate::domain::value_objects::timestamp::Timestamp;
use rand::RngExt;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

const ID_PREFIX: &str = "QC";
const SUFFIX_LEN: usize = 5;
const BASE36: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        let digit = BASE36.get((value % 36) as usize).copied().unwrap_or(b'0');
        digits.push(digit);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

fn is_base36_upper(s: &str) -> bool {
    !s.is_empty()
        && s.bytes()
            .all(|b| b.is_ascii_digit() || b.is_ascii_uppercase())
}

/// Consumer-visible quote identifier.
///
/// Format: `QC-<base36 epoch millis>-<5 random base36 chars>`, upper-cased.
/// The timestamp component makes identifiers sortable by creation time; the
/// random suffix disambiguates quotes minted in the same millisecond.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuoteId(String);

impl QuoteId {
    /// Generates a fresh identifier stamped with the current time.
    #[must_use]
    pub fn generate() -> Self {
        Self::generate_at(Timestamp::now())
    }

    /// Generates a fresh identifier stamped with the given creation time.
    #[must_use]
    pub fn generate_at(created_at: Timestamp) -> Self {
        let millis = created_at.timestamp_millis().max(0) as u64;
        let mut rng = rand::rng();
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| {
                let idx = rng.random_range(0..BASE36.len());
                char::from(BASE36.get(idx).copied().unwrap_or(b'0'))
            })
            .collect();
        Self(format!("{ID_PREFIX}-{}-{suffix}", to_base36(millis)))
    }

    /// Parses an identifier, validating the `QC-...-...` format.
    ///
    /// Returns `None` if the string does not match the format.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        if Self::is_valid_format(s) {
            Some(Self(s.to_string()))
        } else {
            None
        }
    }

    /// Returns true if `s` matches `QC-<base36>-<5 base36 chars>`.
    #[must_use]
    pub fn is_valid_format(s: &str) -> bool {
        let mut parts = s.split('-');
        let (Some(prefix), Some(stamp), Some(suffix), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return false;
        };
        prefix == ID_PREFIX
            && is_base36_upper(stamp)
            && suffix.len() == SUFFIX_LEN
            && is_base36_upper(suffix)
    }

    /// Returns the identifier as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Correlation identifier attached to internal errors and their log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(Uuid);

impl CorrelationId {
    /// Generates a fresh correlation identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//! # Timestamp Value Object
//!
//! DateTime wrapper with quoting-specific methods.
//!
//! This module provides the [`Timestamp`] type used for quote creation
//! times, validity windows, and lead-time banding.
//!
//! # Examples
//!
//! ```
//! use courier_quote::domain::value_objects::timestamp::Timestamp;
//!
//! let now = Timestamp::now();
//! let valid_until = now.add_days(7);
//!
//! assert!(valid_until.is_after(&now));
//! assert_eq!(now.days_until_ceil(&valid_until), 7);
//! ```

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// A UTC timestamp with millisecond precision semantics.
///
/// Wraps `chrono::DateTime<Utc>` with the operations the quoting engine
/// needs: validity-window arithmetic and lead-time day counting.
///
/// # Invariants
///
/// - Always in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from Unix milliseconds.
    ///
    /// Returns `None` if the value is outside the representable range.
    #[must_use]
    pub fn from_millis(millis: i64) -> Option<Self> {
        Utc.timestamp_millis_opt(millis).single().map(Self)
    }

    /// Creates a timestamp from Unix seconds.
    ///
    /// Returns `None` if the value is outside the representable range.
    #[must_use]
    pub fn from_secs(secs: i64) -> Option<Self> {
        Utc.timestamp_opt(secs, 0).single().map(Self)
    }

    /// Returns the Unix timestamp in milliseconds.
    #[inline]
    #[must_use]
    pub fn timestamp_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Returns the Unix timestamp in seconds.
    #[inline]
    #[must_use]
    pub fn timestamp_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Adds seconds to the timestamp.
    #[must_use]
    pub fn add_secs(&self, secs: i64) -> Self {
        Self(self.0 + Duration::seconds(secs))
    }

    /// Subtracts seconds from the timestamp.
    #[must_use]
    pub fn sub_secs(&self, secs: i64) -> Self {
        Self(self.0 - Duration::seconds(secs))
    }

    /// Adds whole days to the timestamp.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    /// Returns true if this timestamp lies before the current moment.
    #[must_use]
    pub fn is_past(&self) -> bool {
        self.0 < Utc::now()
    }

    /// Returns true if this timestamp is before another.
    #[inline]
    #[must_use]
    pub fn is_before(&self, other: &Self) -> bool {
        self.0 < other.0
    }

    /// Returns true if this timestamp is after another.
    #[inline]
    #[must_use]
    pub fn is_after(&self, other: &Self) -> bool {
        self.0 > other.0
    }

    /// Returns the duration from this timestamp until another.
    ///
    /// Returns `Duration::ZERO` if `other` is not after `self`.
    #[must_use]
    pub fn duration_until(&self, other: &Self) -> std::time::Duration {
        (other.0 - self.0).to_std().unwrap_or(std::time::Duration::ZERO)
    }

    /// Returns the number of lead-time days until `other`, rounded up.
    ///
    /// A positive difference of any fraction of a day counts as a full day;
    /// a non-positive difference counts as zero days.
    ///
    /// # Examples
    ///
    /// ```
    /// use courier_quote::domain::value_objects::timestamp::Timestamp;
    ///
    /// let now = Timestamp::from_secs(0).unwrap();
    /// let later = now.add_secs(90_000); // 25 hours
    /// assert_eq!(now.days_until_ceil(&later), 2);
    /// ```
    #[must_use]
    pub fn days_until_ceil(&self, other: &Self) -> i64 {
        let millis = (other.0 - self.0).num_milliseconds();
        if millis <= 0 {
            0
        } else {
            (millis as u64).div_ceil(MILLIS_PER_DAY as u64) as i64
        }
    }

    /// Formats the timestamp as ISO 8601 / RFC 3339.
    #[must_use]
    pub fn to_iso8601(&self) -> String {
        self.0.to_rfc3339()
    }

    /// Returns the underlying DateTime.
    #[inline]
    #[must_use]
    pub const fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

impl Add<std::time::Duration> for Timestamp {
    type Output = Self;

    fn add(self, rhs: std::time::Duration) -> Self::Output {
        Self(self.0 + Duration::from_std(rhs).unwrap_or(Duration::zero()))
    }
}

impl Sub<Timestamp> for Timestamp {
    type Output = std::time::Duration;

    fn sub(self, rhs: Timestamp) -> Self::Output {
        (self.0 - rhs.0)
            .to_std()
            .unwrap_or(std::time::Duration::ZERO)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod construction {
        use super::*;

        #[test]
        fn from_millis_roundtrips() {
            let ts = Timestamp::from_millis(1_704_067_200_000).unwrap();
            assert_eq!(ts.timestamp_millis(), 1_704_067_200_000);
        }

        #[test]
        fn from_secs_roundtrips() {
            let ts = Timestamp::from_secs(1_704_067_200).unwrap();
            assert_eq!(ts.timestamp_secs(), 1_704_067_200);
        }

        #[test]
        fn now_is_not_past_of_itself() {
            let ts = Timestamp::now();
            assert!(!ts.is_before(&ts));
            assert!(!ts.is_after(&ts));
        }
    }

    mod arithmetic {
        use super::*;

        #[test]
        fn add_days_moves_forward() {
            let ts = Timestamp::from_secs(0).unwrap();
            assert_eq!(ts.add_days(7).timestamp_secs(), 7 * 86_400);
        }

        #[test]
        fn add_and_sub_secs() {
            let ts = Timestamp::from_secs(1000).unwrap();
            assert_eq!(ts.add_secs(60).timestamp_secs(), 1060);
            assert_eq!(ts.sub_secs(60).timestamp_secs(), 940);
        }

        #[test]
        fn std_duration_add() {
            let ts = Timestamp::from_secs(1000).unwrap();
            let later = ts + std::time::Duration::from_secs(60);
            assert_eq!(later.timestamp_secs(), 1060);
        }

        #[test]
        fn timestamp_difference() {
            let a = Timestamp::from_secs(1000).unwrap();
            let b = Timestamp::from_secs(1060).unwrap();
            assert_eq!((b - a).as_secs(), 60);
        }
    }

    mod lead_time {
        use super::*;

        #[test]
        fn exact_days_do_not_round_up() {
            let now = Timestamp::from_secs(0).unwrap();
            let event = now.add_days(2);
            assert_eq!(now.days_until_ceil(&event), 2);
        }

        #[test]
        fn fractions_round_up() {
            let now = Timestamp::from_secs(0).unwrap();
            assert_eq!(now.days_until_ceil(&now.add_secs(1)), 1);
            assert_eq!(now.days_until_ceil(&now.add_secs(90_000)), 2);
        }

        #[test]
        fn non_positive_difference_is_zero() {
            let now = Timestamp::from_secs(1000).unwrap();
            assert_eq!(now.days_until_ceil(&now), 0);
            assert_eq!(now.days_until_ceil(&now.sub_secs(60)), 0);
        }
    }

    mod comparison {
        use super::*;

        #[test]
        fn ordering_follows_time() {
            let a = Timestamp::from_secs(1000).unwrap();
            let b = Timestamp::from_secs(2000).unwrap();
            assert!(a.is_before(&b));
            assert!(b.is_after(&a));
            assert!(a < b);
        }

        #[test]
        fn epoch_is_past() {
            assert!(Timestamp::from_secs(0).unwrap().is_past());
        }

        #[test]
        fn duration_until_clamps_to_zero() {
            let a = Timestamp::from_secs(2000).unwrap();
            let b = Timestamp::from_secs(1000).unwrap();
            assert_eq!(a.duration_until(&b), std::time::Duration::ZERO);
        }
    }

    mod formatting {
        use super::*;

        #[test]
        fn iso8601_contains_date() {
            let ts = Timestamp::from_secs(1_704_067_200).unwrap();
            assert!(ts.to_iso8601().contains("2024-01-01"));
        }

        #[test]
        fn serde_roundtrip() {
            let ts = Timestamp::from_millis(1_704_067_200_123).unwrap();
            let json = serde_json::to_string(&ts).unwrap();
            let back: Timestamp = serde_json::from_str(&json).unwrap();
            assert_eq!(ts, back);
        }
    }
}

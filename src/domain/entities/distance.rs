//! # Distance Result Entity
//!
//! The resolved road distance between pickup and delivery.
//!
//! A [`DistanceResult`] is either a live provider measurement or the marked
//! fallback estimate used when the provider is unreachable. Consumers must
//! surface the `estimated` flag so users understand when pricing was computed
//! on a fallback distance.

use crate::domain::value_objects::enums::TravelMode;
use crate::domain::value_objects::timestamp::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fallback distance in miles when the provider is unavailable.
pub const FALLBACK_MILES: u32 = 25;

/// Fallback travel time in minutes when the provider is unavailable.
pub const FALLBACK_MINUTES: i64 = 45;

/// Road distance leg of a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadDistance {
    /// Distance in miles, rounded to two decimals.
    pub miles: Decimal,
}

/// Travel-time leg of a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelTime {
    /// Travel time in whole minutes.
    pub minutes: i64,
}

/// A resolved distance between two addresses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceResult {
    /// Road distance.
    pub distance: RoadDistance,
    /// Travel time.
    pub duration: TravelTime,
    /// Provider-canonicalized origin, or the raw input on the fallback path.
    pub origin: String,
    /// Provider-canonicalized destination, or the raw input on the fallback path.
    pub destination: String,
    /// Travel mode the resolution used.
    pub mode: TravelMode,
    /// True iff this result came from the fallback path.
    pub estimated: bool,
    /// When the resolution happened.
    pub timestamp: Timestamp,
    /// Human-readable note on the fallback path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl DistanceResult {
    /// Creates a live (non-estimated) result from provider data.
    #[must_use]
    pub fn resolved(
        origin: impl Into<String>,
        destination: impl Into<String>,
        mode: TravelMode,
        miles: Decimal,
        minutes: i64,
    ) -> Self {
        Self {
            distance: RoadDistance { miles },
            duration: TravelTime { minutes },
            origin: origin.into(),
            destination: destination.into(),
            mode,
            estimated: false,
            timestamp: Timestamp::now(),
            note: None,
        }
    }

    /// Creates the marked-estimated fallback result.
    ///
    /// Used when the provider fails for any non-quota reason; the caller's
    /// inputs stand in for the canonicalized addresses.
    #[must_use]
    pub fn fallback(
        origin: impl Into<String>,
        destination: impl Into<String>,
        mode: TravelMode,
    ) -> Self {
        Self {
            distance: RoadDistance {
                miles: Decimal::from(FALLBACK_MILES),
            },
            duration: TravelTime {
                minutes: FALLBACK_MINUTES,
            },
            origin: origin.into(),
            destination: destination.into(),
            mode,
            estimated: true,
            timestamp: Timestamp::now(),
            note: Some(
                "distance estimated; live route lookup was unavailable".to_string(),
            ),
        }
    }

    /// Returns the distance in miles.
    #[inline]
    #[must_use]
    pub fn miles(&self) -> Decimal {
        self.distance.miles
    }

    /// Returns the travel time in minutes.
    #[inline]
    #[must_use]
    pub const fn minutes(&self) -> i64 {
        self.duration.minutes
    }
}

//! # Analytics Ring
//!
//! Bounded in-memory record of recent quote summaries.
//!
//! Capacity is 1000 entries; when full, the oldest half is discarded so the
//! most recent 500 survive. This replace-by-halving policy is intentional
//! and distinct from per-entry LRU eviction: appends stay O(1) amortized and
//! the ring always holds a contiguous recent window.
//!
//! # Examples
//!
//! ```
//! use courier_quote::application::analytics::AnalyticsRing;
//!
//! let ring = AnalyticsRing::new();
//! assert!(ring.is_empty());
//! ```

use crate::domain::value_objects::enums::{EventType, ServiceLevel};
use crate::domain::value_objects::ids::QuoteId;
use crate::domain::value_objects::money::Money;
use crate::domain::value_objects::timestamp::Timestamp;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

/// Maximum entries held before halving.
pub const RING_CAPACITY: usize = 1000;

/// Entries retained when the halving policy fires.
pub const RING_RETAIN: usize = 500;

/// Per-quote summary recorded for analytics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummary {
    /// Quote identifier.
    pub quote_id: QuoteId,
    /// Rounded total charged.
    pub total_price: Money,
    /// Resolved distance in miles.
    pub distance_miles: Decimal,
    /// Event category quoted.
    pub event_type: EventType,
    /// Service level quoted.
    pub service_level: ServiceLevel,
    /// Quote creation time.
    pub timestamp: Timestamp,
}

/// Aggregate view over the ring for the admin surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    /// Number of summaries currently held.
    pub quote_count: usize,
    /// Mean rounded total across held summaries.
    pub average_total: Money,
    /// Mean distance in miles across held summaries.
    pub average_distance_miles: Decimal,
    /// Quote counts per service level.
    pub by_service_level: HashMap<ServiceLevel, usize>,
    /// Quote counts per event category.
    pub by_event_type: HashMap<EventType, usize>,
}

/// Bounded, thread-safe quote summary ring.
#[derive(Debug)]
pub struct AnalyticsRing {
    entries: Mutex<VecDeque<QuoteSummary>>,
    capacity: usize,
    retain: usize,
}

impl AnalyticsRing {
    /// Creates a ring with the standard capacity of 1000 / retain 500.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(RING_CAPACITY, RING_RETAIN)
    }

    /// Creates a ring with custom bounds. Used by capacity tests.
    ///
    /// `retain` is clamped to `capacity`.
    #[must_use]
    pub fn with_capacity(capacity: usize, retain: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity.min(RING_CAPACITY))),
            capacity,
            retain: retain.min(capacity),
        }
    }

    /// Appends a summary, halving the ring first when it is full.
    pub fn record(&self, summary: QuoteSummary) {
        let mut entries = self.entries.lock();
        if entries.len() >= self.capacity {
            let excess = entries.len() - self.retain;
            entries.drain(..excess);
        }
        entries.push_back(summary);
    }

    /// Returns the number of held summaries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns true if no summaries are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Returns a point-in-time copy of the held summaries, oldest first.
    ///
    /// The snapshot may lag concurrent writers; it is never torn.
    #[must_use]
    pub fn snapshot(&self) -> Vec<QuoteSummary> {
        self.entries.lock().iter().cloned().collect()
    }

    /// Aggregates the held summaries.
    #[must_use]
    pub fn summary(&self) -> AnalyticsSummary {
        let entries = self.snapshot();
        let quote_count = entries.len();

        let mut by_service_level: HashMap<ServiceLevel, usize> = HashMap::new();
        let mut by_event_type: HashMap<EventType, usize> = HashMap::new();
        let mut total_sum = Decimal::ZERO;
        let mut distance_sum = Decimal::ZERO;

        for entry in &entries {
            *by_service_level.entry(entry.service_level).or_default() += 1;
            *by_event_type.entry(entry.event_type).or_default() += 1;
            total_sum += entry.total_price.amount();
            distance_sum += entry.distance_miles;
        }

        let count = Decimal::from(quote_count.max(1));
        let average_total = if quote_count == 0 {
            Money::zero()
        } else {
            Money::new((total_sum / count).round_dp(2)).unwrap_or(Money::ZERO)
        };
        let average_distance_miles = if quote_count == 0 {
            Decimal::ZERO
        } else {
            (distance_sum / count).round_dp(2)
        };

        AnalyticsSummary {
            quote_count,
            average_total,
            average_distance_miles,
            by_service_level,
            by_event_type,
        }
    }
}

impl Default for AnalyticsRing {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn summary(tag: u32) -> QuoteSummary {
        QuoteSummary {
            quote_id: QuoteId::generate_at(
                Timestamp::from_millis(1_704_067_200_000 + i64::from(tag)).unwrap(),
            ),
            total_price: Money::from_major(100 + tag),
            distance_miles: Decimal::from(10u32 + tag),
            event_type: EventType::CorporateEvent,
            service_level: ServiceLevel::Standard,
            timestamp: Timestamp::from_secs(1_704_067_200).unwrap(),
        }
    }

    #[test]
    fn records_accumulate_in_order() {
        let ring = AnalyticsRing::new();
        ring.record(summary(1));
        ring.record(summary(2));

        let held = ring.snapshot();
        assert_eq!(held.len(), 2);
        assert_eq!(held.first().unwrap().total_price, Money::from_major(101));
        assert_eq!(held.last().unwrap().total_price, Money::from_major(102));
    }

    #[test]
    fn halving_retains_the_most_recent_entries() {
        let ring = AnalyticsRing::with_capacity(10, 5);
        for tag in 0..10 {
            ring.record(summary(tag));
        }
        assert_eq!(ring.len(), 10);

        // The 11th append fires the halving policy first.
        ring.record(summary(10));

        assert_eq!(ring.len(), 6);
        let held = ring.snapshot();
        // Oldest survivor is entry 5; newest is the one just appended.
        assert_eq!(held.first().unwrap().total_price, Money::from_major(105));
        assert_eq!(held.last().unwrap().total_price, Money::from_major(110));
    }

    #[test]
    fn halving_is_not_single_eviction() {
        let ring = AnalyticsRing::with_capacity(10, 5);
        for tag in 0..11 {
            ring.record(summary(tag));
        }
        // A per-entry LRU would hold 10 here; halving drops to retain + 1.
        assert_eq!(ring.len(), 6);
    }

    #[test]
    fn summary_aggregates_totals_and_counts() {
        let ring = AnalyticsRing::new();
        ring.record(QuoteSummary {
            service_level: ServiceLevel::SameDay,
            ..summary(0)
        });
        ring.record(summary(2));

        let aggregate = ring.summary();

        assert_eq!(aggregate.quote_count, 2);
        assert_eq!(aggregate.average_total, Money::from_major(101)); // (100+102)/2
        assert_eq!(aggregate.average_distance_miles, Decimal::from(11u32));
        assert_eq!(
            aggregate.by_service_level.get(&ServiceLevel::SameDay),
            Some(&1)
        );
        assert_eq!(
            aggregate.by_service_level.get(&ServiceLevel::Standard),
            Some(&1)
        );
    }

    #[test]
    fn empty_ring_summarizes_to_zeros() {
        let aggregate = AnalyticsRing::new().summary();
        assert_eq!(aggregate.quote_count, 0);
        assert_eq!(aggregate.average_total, Money::zero());
        assert!(aggregate.by_event_type.is_empty());
    }

    #[test]
    fn concurrent_appends_never_exceed_capacity_plus_one() {
        let ring = std::sync::Arc::new(AnalyticsRing::with_capacity(50, 25));

        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let ring = std::sync::Arc::clone(&ring);
                std::thread::spawn(move || {
                    for tag in 0..100 {
                        ring.record(summary(worker * 100 + tag));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert!(ring.len() <= 50);
        assert!(!ring.is_empty());
    }
}

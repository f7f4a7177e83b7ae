//! # Distance Cache
//!
//! Concurrent TTL cache in front of the distance provider.
//!
//! Keys are the case-insensitive `origin|destination|mode` fingerprint.
//! Entries expire after 24 hours and are removed both lazily on access and
//! proactively by the resolver's periodic sweep. Fallback results are never
//! inserted, so a degraded lookup is retried upstream on the next request.
//!
//! # Examples
//!
//! ```
//! use courier_quote::domain::entities::distance::DistanceResult;
//! use courier_quote::domain::value_objects::enums::TravelMode;
//! use courier_quote::infrastructure::maps::cache::DistanceCache;
//!
//! let cache = DistanceCache::new();
//! let key = DistanceCache::key("Oakland", "San Francisco", TravelMode::Driving);
//!
//! assert!(cache.get(&key).is_none());
//! ```

use crate::domain::entities::distance::DistanceResult;
use crate::domain::value_objects::enums::TravelMode;
use dashmap::DashMap;
use std::time::{Duration, Instant};

/// How long a cached distance stays fresh.
pub const CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone)]
struct CachedDistance {
    result: DistanceResult,
    inserted_at: Instant,
}

/// Concurrent distance cache with time-based eviction.
#[derive(Debug)]
pub struct DistanceCache {
    entries: DashMap<String, CachedDistance>,
    ttl: Duration,
}

impl DistanceCache {
    /// Creates a cache with the standard 24-hour TTL.
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(CACHE_TTL)
    }

    /// Creates a cache with a custom TTL. Used by expiry tests.
    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Builds the cache fingerprint for a lookup.
    #[must_use]
    pub fn key(origin: &str, destination: &str, mode: TravelMode) -> String {
        format!(
            "{}|{}|{}",
            origin.to_lowercase(),
            destination.to_lowercase(),
            mode.as_str()
        )
    }

    /// Returns the cached result for `key` if present and fresh.
    ///
    /// An expired entry is removed on the way out (lazy eviction).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<DistanceResult> {
        let expired = {
            let entry = self.entries.get(key)?;
            if entry.inserted_at.elapsed() < self.ttl {
                return Some(entry.result.clone());
            }
            true
        };
        // Guard dropped above; removing while holding it would deadlock.
        if expired {
            self.entries.remove(key);
        }
        None
    }

    /// Inserts a resolved distance under `key`.
    ///
    /// Concurrent inserts for the same key last-write-win; readers always
    /// observe one complete entry.
    pub fn insert(&self, key: String, result: DistanceResult) {
        self.entries.insert(
            key,
            CachedDistance {
                result,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Removes every expired entry, returning how many were evicted.
    pub fn sweep(&self) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| entry.inserted_at.elapsed() < self.ttl);
        before.saturating_sub(self.entries.len())
    }

    /// Returns the number of cached entries, fresh or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for DistanceCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use crate::domain::entities::distance::{RoadDistance, TravelTime};
    use crate::domain::value_objects::timestamp::Timestamp;

    // Fixed timestamp so results from separate calls compare equal.
    fn sample_result() -> DistanceResult {
        DistanceResult {
            distance: RoadDistance {
                miles: rust_decimal::Decimal::new(1240, 2),
            },
            duration: TravelTime { minutes: 25 },
            origin: "Oakland, CA, USA".to_string(),
            destination: "San Francisco, CA, USA".to_string(),
            mode: TravelMode::Driving,
            estimated: false,
            timestamp: Timestamp::from_secs(1_704_067_200).unwrap_or_default(),
            note: None,
        }
    }

    #[test]
    fn key_is_case_insensitive_on_addresses() {
        let a = DistanceCache::key("Oakland", "San Francisco", TravelMode::Driving);
        let b = DistanceCache::key("OAKLAND", "san francisco", TravelMode::Driving);
        assert_eq!(a, b);
    }

    #[test]
    fn key_distinguishes_modes() {
        let a = DistanceCache::key("a", "b", TravelMode::Driving);
        let b = DistanceCache::key("a", "b", TravelMode::Walking);
        assert_ne!(a, b);
    }

    #[test]
    fn insert_then_get_returns_verbatim() {
        let cache = DistanceCache::new();
        let key = DistanceCache::key("a", "b", TravelMode::Driving);
        let result = sample_result();

        cache.insert(key.clone(), result.clone());
        assert_eq!(cache.get(&key), Some(result));
    }

    #[test]
    fn get_on_missing_key_is_none() {
        let cache = DistanceCache::new();
        assert!(cache.get("nope|nope|driving").is_none());
    }

    #[test]
    fn expired_entry_is_lazily_evicted() {
        let cache = DistanceCache::with_ttl(Duration::ZERO);
        let key = DistanceCache::key("a", "b", TravelMode::Driving);
        cache.insert(key.clone(), sample_result());

        assert!(cache.get(&key).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn sweep_removes_only_expired_entries() {
        let cache = DistanceCache::with_ttl(Duration::from_millis(30));
        cache.insert("old|old|driving".to_string(), sample_result());
        std::thread::sleep(Duration::from_millis(40));
        cache.insert("new|new|driving".to_string(), sample_result());

        let evicted = cache.sweep();

        assert_eq!(evicted, 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.get("new|new|driving").is_some());
    }

    #[test]
    fn sweep_on_fresh_cache_evicts_nothing() {
        let cache = DistanceCache::new();
        cache.insert("a|b|driving".to_string(), sample_result());
        assert_eq!(cache.sweep(), 0);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn concurrent_inserts_converge() {
        let cache = std::sync::Arc::new(DistanceCache::new());
        let key = DistanceCache::key("a", "b", TravelMode::Driving);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = std::sync::Arc::clone(&cache);
                let key = key.clone();
                std::thread::spawn(move || {
                    cache.insert(key.clone(), sample_result());
                    cache.get(&key)
                })
            })
            .collect();

        for handle in handles {
            let seen = handle.join().unwrap();
            // Every reader observes one complete entry, never a torn one.
            assert_eq!(seen, Some(sample_result()));
        }
        assert_eq!(cache.len(), 1);
    }
}

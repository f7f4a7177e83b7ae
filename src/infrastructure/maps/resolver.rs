//! # Distance Resolver
//!
//! Resolves `(origin, destination, mode)` to a [`DistanceResult`], memoizing
//! provider lookups and degrading gracefully when the provider fails.
//!
//! Behavior per lookup:
//!
//! 1. Cache hit (younger than the TTL): return the cached result verbatim.
//! 2. Miss: invoke the provider under a 10-second budget.
//! 3. Success: insert into the cache and return.
//! 4. Quota exhaustion: propagate the distinguished error; never cached.
//! 5. Any other failure (timeout included): return the marked-estimated
//!    fallback; never cached, so the next lookup retries upstream.
//!
//! Concurrent lookups for the same key may each invoke the provider; they
//! converge on one complete cache entry.

use crate::domain::entities::distance::DistanceResult;
use crate::domain::value_objects::enums::TravelMode;
use crate::infrastructure::maps::cache::DistanceCache;
use crate::infrastructure::maps::error::MapsResult;
use crate::infrastructure::maps::provider::{DistanceProvider, PROVIDER_TIMEOUT_MS};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// How often the background sweeper evicts expired cache entries.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Cached, failure-absorbing distance resolver.
pub struct DistanceResolver {
    provider: Arc<dyn DistanceProvider>,
    cache: Arc<DistanceCache>,
    timeout: Duration,
}

impl std::fmt::Debug for DistanceResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DistanceResolver")
            .field("cache_len", &self.cache.len())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl DistanceResolver {
    /// Creates a resolver with a fresh 24-hour cache and the standard
    /// provider budget.
    #[must_use]
    pub fn new(provider: Arc<dyn DistanceProvider>) -> Self {
        Self::with_parts(
            provider,
            Arc::new(DistanceCache::new()),
            Duration::from_millis(PROVIDER_TIMEOUT_MS),
        )
    }

    /// Creates a resolver over an existing cache and custom budget.
    #[must_use]
    pub fn with_parts(
        provider: Arc<dyn DistanceProvider>,
        cache: Arc<DistanceCache>,
        timeout: Duration,
    ) -> Self {
        Self {
            provider,
            cache,
            timeout,
        }
    }

    /// Returns the cache behind this resolver.
    #[must_use]
    pub fn cache(&self) -> &Arc<DistanceCache> {
        &self.cache
    }

    /// Resolves the distance from `origin` to `destination`.
    ///
    /// # Errors
    ///
    /// Returns `MapsError::QuotaExceeded` when the provider reports quota
    /// exhaustion; every other provider failure is absorbed into the
    /// marked-estimated fallback result.
    pub async fn resolve(
        &self,
        origin: &str,
        destination: &str,
        mode: TravelMode,
    ) -> MapsResult<DistanceResult> {
        let key = DistanceCache::key(origin, destination, mode);

        if let Some(hit) = self.cache.get(&key) {
            tracing::debug!(%key, "distance cache hit");
            return Ok(hit);
        }

        let lookup = self.provider.distance(origin, destination, mode);
        match tokio::time::timeout(self.timeout, lookup).await {
            Ok(Ok(found)) => {
                let result = DistanceResult::resolved(
                    found.origin,
                    found.destination,
                    mode,
                    found.miles,
                    found.minutes,
                );
                self.cache.insert(key, result.clone());
                tracing::debug!(miles = %result.miles(), "distance resolved");
                Ok(result)
            }
            Ok(Err(err)) if err.is_quota() => {
                tracing::warn!(error = %err, "distance provider quota exhausted");
                Err(err)
            }
            Ok(Err(err)) => {
                tracing::warn!(error = %err, "distance provider failed; using estimated fallback");
                Ok(DistanceResult::fallback(origin, destination, mode))
            }
            Err(_elapsed) => {
                tracing::warn!(
                    timeout_ms = self.timeout.as_millis() as u64,
                    "distance provider timed out; using estimated fallback"
                );
                Ok(DistanceResult::fallback(origin, destination, mode))
            }
        }
    }

    /// Spawns the periodic sweeper that evicts expired cache entries.
    ///
    /// The task runs until the returned handle is aborted or the runtime
    /// shuts down; sweeping is safe against concurrent reads and writes.
    #[must_use]
    pub fn spawn_sweeper(&self, interval: Duration) -> JoinHandle<()> {
        let cache = Arc::clone(&self.cache);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick fires immediately; skip it.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let evicted = cache.sweep();
                if evicted > 0 {
                    tracing::debug!(evicted, "distance cache sweep");
                }
            }
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::infrastructure::maps::error::MapsError;
    use crate::infrastructure::maps::provider::ProviderDistance;
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct ScriptedProvider {
        responses: Mutex<VecDeque<MapsResult<ProviderDistance>>>,
        calls: AtomicUsize,
        delay: Option<Duration>,
    }

    impl ScriptedProvider {
        fn new(responses: Vec<MapsResult<ProviderDistance>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                calls: AtomicUsize::new(0),
                delay: None,
            })
        }

        fn slow(delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(VecDeque::new()),
                calls: AtomicUsize::new(0),
                delay: Some(delay),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl DistanceProvider for ScriptedProvider {
        async fn distance(
            &self,
            _origin: &str,
            _destination: &str,
            _mode: TravelMode,
        ) -> MapsResult<ProviderDistance> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(MapsError::internal("script exhausted")))
        }
    }

    fn measurement(miles_cents: i64) -> ProviderDistance {
        ProviderDistance {
            miles: Decimal::new(miles_cents, 2),
            minutes: 25,
            origin: "Oakland, CA, USA".to_string(),
            destination: "San Francisco, CA, USA".to_string(),
        }
    }

    fn resolver_with_ttl(
        provider: Arc<dyn DistanceProvider>,
        ttl: Duration,
    ) -> DistanceResolver {
        DistanceResolver::with_parts(
            provider,
            Arc::new(DistanceCache::with_ttl(ttl)),
            Duration::from_secs(1),
        )
    }

    #[tokio::test]
    async fn second_lookup_is_served_from_cache() {
        let provider = ScriptedProvider::new(vec![Ok(measurement(1240))]);
        let resolver = DistanceResolver::new(provider.clone());

        let first = resolver
            .resolve("Oakland", "San Francisco", TravelMode::Driving)
            .await
            .unwrap();
        let second = resolver
            .resolve("OAKLAND", "San Francisco", TravelMode::Driving)
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(provider.calls(), 1);
        assert!(!first.estimated);
    }

    #[tokio::test]
    async fn quota_error_propagates_and_is_not_cached() {
        let provider = ScriptedProvider::new(vec![
            Err(MapsError::quota_exceeded("limit")),
            Ok(measurement(1240)),
        ]);
        let resolver = DistanceResolver::new(provider.clone());

        let err = resolver
            .resolve("a", "b", TravelMode::Driving)
            .await
            .unwrap_err();
        assert!(err.is_quota());
        assert!(resolver.cache().is_empty());

        // The next call retries upstream and succeeds.
        let result = resolver.resolve("a", "b", TravelMode::Driving).await.unwrap();
        assert!(!result.estimated);
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn non_quota_failure_yields_uncached_fallback() {
        let provider = ScriptedProvider::new(vec![
            Err(MapsError::connection("refused")),
            Ok(measurement(1240)),
        ]);
        let resolver = DistanceResolver::new(provider.clone());

        let degraded = resolver.resolve("a", "b", TravelMode::Driving).await.unwrap();
        assert!(degraded.estimated);
        assert_eq!(degraded.miles(), Decimal::from(25u32));
        // The fallback is not cached; the next lookup retries upstream.
        assert!(resolver.cache().is_empty());

        let live = resolver.resolve("a", "b", TravelMode::Driving).await.unwrap();
        assert!(!live.estimated);
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn provider_timeout_yields_fallback() {
        let provider = ScriptedProvider::slow(Duration::from_millis(200));
        let resolver = DistanceResolver::with_parts(
            provider.clone(),
            Arc::new(DistanceCache::new()),
            Duration::from_millis(20),
        );

        let result = resolver.resolve("a", "b", TravelMode::Driving).await.unwrap();

        assert!(result.estimated);
        assert!(resolver.cache().is_empty());
    }

    #[tokio::test]
    async fn expired_entry_reinvokes_provider() {
        let provider =
            ScriptedProvider::new(vec![Ok(measurement(1240)), Ok(measurement(1360))]);
        let resolver = resolver_with_ttl(provider.clone(), Duration::from_millis(20));

        let first = resolver.resolve("a", "b", TravelMode::Driving).await.unwrap();
        tokio::time::sleep(Duration::from_millis(40)).await;
        let second = resolver.resolve("a", "b", TravelMode::Driving).await.unwrap();

        assert_eq!(provider.calls(), 2);
        assert_eq!(first.miles(), Decimal::new(1240, 2));
        assert_eq!(second.miles(), Decimal::new(1360, 2));
    }

    #[tokio::test]
    async fn sweeper_evicts_expired_entries() {
        let provider = ScriptedProvider::new(vec![Ok(measurement(1240))]);
        let resolver = resolver_with_ttl(provider, Duration::from_millis(10));

        resolver.resolve("a", "b", TravelMode::Driving).await.unwrap();
        assert_eq!(resolver.cache().len(), 1);

        let sweeper = resolver.spawn_sweeper(Duration::from_millis(20));
        tokio::time::sleep(Duration::from_millis(60)).await;
        sweeper.abort();

        assert!(resolver.cache().is_empty());
    }

    #[tokio::test]
    async fn concurrent_lookups_converge_on_one_entry() {
        let provider = ScriptedProvider::new(vec![
            Ok(measurement(1240)),
            Ok(measurement(1240)),
            Ok(measurement(1240)),
            Ok(measurement(1240)),
        ]);
        let resolver = Arc::new(DistanceResolver::new(provider));

        let tasks: Vec<_> = (0..4)
            .map(|_| {
                let resolver = Arc::clone(&resolver);
                tokio::spawn(async move {
                    resolver.resolve("a", "b", TravelMode::Driving).await
                })
            })
            .collect();

        for task in tasks {
            let result = task.await.unwrap().unwrap();
            assert_eq!(result.miles(), Decimal::new(1240, 2));
        }
        assert_eq!(resolver.cache().len(), 1);
    }
}

//! # Quote Service
//!
//! Orchestration glue: normalize, resolve distance, calculate, mint the
//! identifier and validity window, record analytics, return the quote.
//!
//! Failure semantics: normalizer errors are caller errors; quota exhaustion
//! from the distance resolver is a retryable service error; calculator
//! errors cannot occur on a well-normalized input and surface as internal
//! errors with a correlation identifier.

use crate::application::analytics::{AnalyticsRing, QuoteSummary};
use crate::application::calculator;
use crate::application::error::{QuoteServiceError, QuoteServiceResult};
use crate::application::normalizer;
use crate::config::ConfigStore;
use crate::domain::entities::quote::{Estimate, Quote, QuotePricing};
use crate::domain::entities::request::QuoteRequest;
use crate::domain::value_objects::enums::TravelMode;
use crate::domain::value_objects::ids::QuoteId;
use crate::domain::value_objects::timestamp::Timestamp;
use crate::infrastructure::maps::resolver::DistanceResolver;
use std::sync::Arc;
use std::time::Instant;

/// Orchestrates the quote pipeline.
#[derive(Debug)]
pub struct QuoteService {
    config: Arc<ConfigStore>,
    resolver: Arc<DistanceResolver>,
    analytics: Arc<AnalyticsRing>,
}

impl QuoteService {
    /// Creates a quote service over its collaborators.
    #[must_use]
    pub fn new(
        config: Arc<ConfigStore>,
        resolver: Arc<DistanceResolver>,
        analytics: Arc<AnalyticsRing>,
    ) -> Self {
        Self {
            config,
            resolver,
            analytics,
        }
    }

    /// Returns the configuration store.
    #[must_use]
    pub fn config(&self) -> &Arc<ConfigStore> {
        &self.config
    }

    /// Returns the analytics ring.
    #[must_use]
    pub fn analytics(&self) -> &Arc<AnalyticsRing> {
        &self.analytics
    }

    /// Produces a full quote for a raw request.
    ///
    /// # Errors
    ///
    /// - `QuoteServiceError::Domain` with a `QuoteInvalid` reason for caller
    ///   errors (no retry helps)
    /// - `QuoteServiceError::DistanceUnavailable` when the provider quota is
    ///   exhausted (retryable; no quote is minted, the ring is untouched)
    /// - `QuoteServiceError::Internal` for unexpected conditions
    pub async fn generate_quote(&self, raw: QuoteRequest) -> QuoteServiceResult<Quote> {
        let started = Instant::now();
        let now = Timestamp::now();

        let request = normalizer::normalize(raw, now)?;

        let distance = self
            .resolver
            .resolve(&request.pickup, &request.delivery, TravelMode::Driving)
            .await
            .map_err(QuoteServiceError::distance_unavailable)?;

        let config = self.config.snapshot();
        let QuotePricing {
            components,
            pricing,
        } = calculator::compute_pricing(&request, &distance, &config, now).map_err(|err| {
            QuoteServiceError::internal(format!("calculator failed on normalized input: {err}"))
        })?;

        let created_at = now;
        let quote_id = QuoteId::generate_at(created_at);
        let valid_until = created_at.add_days(Quote::VALIDITY_DAYS);

        self.analytics.record(QuoteSummary {
            quote_id: quote_id.clone(),
            total_price: pricing.total,
            distance_miles: distance.miles(),
            event_type: request.event_type,
            service_level: request.service_level,
            timestamp: created_at,
        });

        let processing_time_ms = started.elapsed().as_millis() as u64;
        tracing::info!(
            quote_id = %quote_id,
            total = %pricing.total,
            estimated = distance.estimated,
            processing_time_ms,
            "quote generated"
        );

        Ok(Quote {
            quote_id,
            request,
            distance_info: distance,
            components,
            pricing,
            valid_until,
            created_at,
            processing_time_ms,
        })
    }

    /// Produces a priced estimate: the same computation as a quote, but no
    /// identifier is minted, no validity window applies, and nothing is
    /// recorded in the analytics ring.
    ///
    /// # Errors
    ///
    /// Same classes as [`generate_quote`](Self::generate_quote).
    pub async fn estimate(&self, raw: QuoteRequest) -> QuoteServiceResult<Estimate> {
        let started = Instant::now();
        let now = Timestamp::now();

        let request = normalizer::normalize(raw, now)?;

        let distance = self
            .resolver
            .resolve(&request.pickup, &request.delivery, TravelMode::Driving)
            .await
            .map_err(QuoteServiceError::distance_unavailable)?;

        let config = self.config.snapshot();
        let QuotePricing {
            components,
            pricing,
        } = calculator::compute_pricing(&request, &distance, &config, now).map_err(|err| {
            QuoteServiceError::internal(format!("calculator failed on normalized input: {err}"))
        })?;

        Ok(Estimate {
            request,
            distance_info: distance,
            components,
            pricing,
            created_at: now,
            processing_time_ms: started.elapsed().as_millis() as u64,
        })
    }
}

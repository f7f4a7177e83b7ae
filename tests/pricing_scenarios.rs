//! End-to-end pricing scenarios through the full quote pipeline, pinned to
//! the default configuration.

#![allow(clippy::unwrap_used)]

use async_trait::async_trait;
use courier_quote::application::analytics::AnalyticsRing;
use courier_quote::application::error::QuoteServiceError;
use courier_quote::application::service::QuoteService;
use courier_quote::config::ConfigStore;
use courier_quote::domain::entities::request::{ItemInput, QuoteRequest};
use courier_quote::domain::errors::QuoteInvalidReason;
use courier_quote::domain::value_objects::enums::TravelMode;
use courier_quote::domain::value_objects::ids::QuoteId;
use courier_quote::domain::value_objects::money::Money;
use courier_quote::infrastructure::maps::cache::DistanceCache;
use courier_quote::infrastructure::maps::error::{MapsError, MapsResult};
use courier_quote::infrastructure::maps::provider::{DistanceProvider, ProviderDistance};
use courier_quote::infrastructure::maps::resolver::DistanceResolver;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;

enum Provider {
    Miles(i64),
    Down,
    Quota,
}

struct TestProvider(Provider);

#[async_trait]
impl DistanceProvider for TestProvider {
    async fn distance(
        &self,
        origin: &str,
        destination: &str,
        _mode: TravelMode,
    ) -> MapsResult<ProviderDistance> {
        match self.0 {
            Provider::Miles(miles) => Ok(ProviderDistance {
                miles: Decimal::from(miles),
                minutes: 30,
                origin: origin.to_string(),
                destination: destination.to_string(),
            }),
            Provider::Down => Err(MapsError::connection("connection refused")),
            Provider::Quota => Err(MapsError::quota_exceeded("daily element limit")),
        }
    }
}

fn service(provider: Provider) -> QuoteService {
    let resolver = DistanceResolver::with_parts(
        Arc::new(TestProvider(provider)),
        Arc::new(DistanceCache::new()),
        Duration::from_secs(1),
    );
    QuoteService::new(
        Arc::new(ConfigStore::with_defaults()),
        Arc::new(resolver),
        Arc::new(AnalyticsRing::new()),
    )
}

fn base_request() -> QuoteRequest {
    QuoteRequest {
        pickup: Some("A".to_string()),
        delivery: Some("B".to_string()),
        ..QuoteRequest::default()
    }
}

#[tokio::test]
async fn scenario_1_local_standard_no_items() {
    let quote = service(Provider::Miles(15))
        .generate_quote(base_request())
        .await
        .unwrap();

    assert_eq!(
        quote.components.subtotal_before_multipliers,
        Money::from_major(75)
    );
    assert_eq!(quote.pricing.subtotal, Money::from_cents(8250));
    assert_eq!(quote.pricing.taxes, Money::from_cents(701));
    assert_eq!(quote.pricing.total, Money::from_cents(8951));
}

#[tokio::test]
async fn scenario_2_cross_tier_distance() {
    let quote = service(Provider::Miles(40))
        .generate_quote(base_request())
        .await
        .unwrap();

    assert_eq!(quote.components.distance_fee, Money::from_major(30));
    assert_eq!(quote.pricing.subtotal, Money::from_cents(11550));
    assert_eq!(quote.pricing.taxes, Money::from_cents(982));
    assert_eq!(quote.pricing.total, Money::from_cents(12532));
}

#[tokio::test]
async fn scenario_3_same_day_large_delicate_pair() {
    let mut raw = base_request();
    raw.service_level = Some("sameDay".to_string());
    raw.items = vec![ItemInput {
        size: Some("large".to_string()),
        quantity: Some(2.0),
        special: vec!["delicate".to_string()],
        ..ItemInput::default()
    }];

    let quote = service(Provider::Miles(10))
        .generate_quote(raw)
        .await
        .unwrap();

    assert_eq!(quote.components.item_fees_total, Money::from_major(170));
    assert_eq!(
        quote.components.subtotal_before_multipliers,
        Money::from_major(295)
    );
    assert_eq!(quote.pricing.subtotal, Money::from_cents(32450));
    assert_eq!(quote.pricing.taxes, Money::from_cents(2758));
    assert_eq!(quote.pricing.total, Money::from_cents(35208));
}

#[tokio::test]
async fn scenario_4_emergency_urgency() {
    let mut raw = base_request();
    raw.urgency = Some("emergency".to_string());

    let quote = service(Provider::Miles(15))
        .generate_quote(raw)
        .await
        .unwrap();

    assert_eq!(quote.pricing.subtotal, Money::from_major(165));
    assert_eq!(quote.pricing.taxes, Money::from_cents(1403));
    assert_eq!(quote.pricing.total, Money::from_cents(17903));
}

#[tokio::test]
async fn scenario_5_provider_down_prices_on_estimated_fallback() {
    let quote = service(Provider::Down)
        .generate_quote(base_request())
        .await
        .unwrap();

    assert!(quote.distance_info.estimated);
    assert_eq!(quote.distance_info.miles(), Decimal::from(25u32));
    assert_eq!(quote.components.distance_fee, Money::from_cents(750));
    assert_eq!(quote.pricing.taxes, Money::from_cents(771));
    assert_eq!(quote.pricing.total, Money::from_cents(9846));
}

#[tokio::test]
async fn scenario_6_quota_exhaustion_mints_nothing() {
    let svc = service(Provider::Quota);

    let err = svc.generate_quote(base_request()).await.unwrap_err();

    assert!(matches!(err, QuoteServiceError::DistanceUnavailable(_)));
    assert!(err.is_retryable());
    assert!(svc.analytics().is_empty());
}

#[tokio::test]
async fn minted_quotes_carry_well_formed_ids_and_windows() {
    let svc = service(Provider::Miles(15));

    let quote = svc.generate_quote(base_request()).await.unwrap();

    assert!(QuoteId::is_valid_format(quote.quote_id.as_str()));
    let suffix = quote.quote_id.as_str().split('-').nth(2).unwrap();
    assert_eq!(suffix.len(), 5);
    assert_eq!(
        quote.valid_until.timestamp_secs() - quote.created_at.timestamp_secs(),
        7 * 24 * 60 * 60
    );
}

#[tokio::test]
async fn normalizer_reasons_surface_to_the_caller() {
    let svc = service(Provider::Miles(15));

    let mut raw = base_request();
    raw.items = vec![ItemInput {
        quantity: Some(0.0),
        ..ItemInput::default()
    }];
    let err = svc.generate_quote(raw).await.unwrap_err();
    assert_eq!(
        err.quote_invalid_reason(),
        Some(QuoteInvalidReason::BadItemQuantity)
    );

    let mut raw = base_request();
    raw.declared_value = Some(Decimal::from(-1));
    let err = svc.generate_quote(raw).await.unwrap_err();
    assert_eq!(
        err.quote_invalid_reason(),
        Some(QuoteInvalidReason::BadDeclaredValue)
    );

    assert!(svc.analytics().is_empty());
}

#[tokio::test]
async fn repeat_requests_reuse_the_cached_distance() {
    let svc = service(Provider::Miles(15));

    let first = svc.generate_quote(base_request()).await.unwrap();
    let second = svc.generate_quote(base_request()).await.unwrap();

    assert_eq!(first.pricing.total, second.pricing.total);
    assert_eq!(
        first.distance_info.timestamp,
        second.distance_info.timestamp
    );
    assert_eq!(svc.analytics().len(), 2);
}

//! # Courier Quote
//!
//! Deterministic delivery-quote pricing engine for courier and event
//! logistics, with a cached distance resolver in front of an external map
//! provider.
//!
//! The crate is organized in layers:
//!
//! - [`domain`] - Value objects, entities, and domain errors
//! - [`config`] - Pricing configuration and its atomic-snapshot store
//! - [`application`] - Normalizer, calculator, analytics ring, quote service
//! - [`infrastructure`] - Distance provider adapters and the TTL cache
//! - [`api`] - REST surface (axum)
//!
//! # Quote Pipeline
//!
//! ```text
//! raw request -> normalize -> resolve distance -> calculate -> mint id/expiry -> record
//! ```
//!
//! The calculator is a pure function over the normalized request, the
//! resolved distance, and an immutable configuration snapshot; every
//! intermediate component is preserved unrounded for auditability.
//!
//! # Examples
//!
//! ```
//! use courier_quote::application::calculator;
//! use courier_quote::application::normalizer;
//! use courier_quote::config::PricingConfig;
//! use courier_quote::domain::entities::distance::DistanceResult;
//! use courier_quote::domain::entities::request::QuoteRequest;
//! use courier_quote::domain::value_objects::enums::TravelMode;
//! use courier_quote::domain::value_objects::timestamp::Timestamp;
//! use rust_decimal::Decimal;
//!
//! let raw = QuoteRequest {
//!     pickup: Some("123 Harbor Way, Oakland".to_string()),
//!     delivery: Some("9 Mission St, San Francisco".to_string()),
//!     ..QuoteRequest::default()
//! };
//!
//! let now = Timestamp::now();
//! let request = normalizer::normalize(raw, now).unwrap();
//! let distance = DistanceResult::fallback("a", "b", TravelMode::Driving);
//! let config = PricingConfig::default();
//!
//! let pricing = calculator::compute_pricing(&request, &distance, &config, now).unwrap();
//! assert!(pricing.pricing.total.amount() > Decimal::ZERO);
//! ```

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

//! # REST Handlers
//!
//! HTTP handlers for the quoting surface. They only translate between HTTP
//! and the [`QuoteService`]; authentication, sessions, and rate limiting
//! live in upstream middleware outside this crate.
//!
//! Status mapping:
//!
//! - `QuoteInvalid` and `ConfigInvalid` -> 422 with the machine-readable reason
//! - `DistanceUnavailable` (quota) -> 503, retryable
//! - anything unexpected -> 500 with a correlation identifier

use crate::application::analytics::AnalyticsSummary;
use crate::application::error::QuoteServiceError;
use crate::application::service::QuoteService;
use crate::config::{ConfigUpdate, PricingConfig};
use crate::domain::entities::quote::{Estimate, Quote};
use crate::domain::entities::request::QuoteRequest;
use crate::domain::errors::{DomainError, QuoteInvalidReason};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

/// Shortest accepted location string on the HTTP surface.
pub const MIN_LOCATION_LEN: usize = 5;

/// Shared state behind every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The quote service and, through it, the config store and analytics.
    pub service: Arc<QuoteService>,
}

/// JSON error envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
    /// Machine-readable rejection reason, when the caller is at fault.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Correlation identifier for internal errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    /// True when retrying after a backoff may succeed.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub retryable: bool,
    /// The caller's request, echoed back on retryable distance failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<QuoteRequest>,
}

/// Health-check payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` when the process is serving.
    pub status: &'static str,
    /// Crate version.
    pub version: &'static str,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(err: &QuoteServiceError, echo: Option<QuoteRequest>) -> ApiError {
    let status = if err.quote_invalid_reason().is_some() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        match err {
            QuoteServiceError::Domain(DomainError::ConfigInvalid { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            QuoteServiceError::DistanceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    };
    let request = matches!(err, QuoteServiceError::DistanceUnavailable(_))
        .then_some(echo)
        .flatten();

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            reason: err.quote_invalid_reason().map(|r| r.as_str().to_string()),
            correlation_id: err.correlation_id().map(|id| id.to_string()),
            retryable: err.is_retryable(),
            request,
        }),
    )
}

/// Enforces the inbound 5-200 character location contract before the
/// normalizer sees the request. Internal callers are free to price shorter
/// synthetic addresses; HTTP callers are not.
fn check_location_lengths(raw: &QuoteRequest) -> Result<(), ApiError> {
    for location in [raw.pickup.as_deref(), raw.delivery.as_deref()] {
        let trimmed = location.map(str::trim).unwrap_or_default();
        if trimmed.len() < MIN_LOCATION_LEN {
            let err = QuoteServiceError::Domain(DomainError::quote_invalid(
                QuoteInvalidReason::MissingLocations,
            ));
            return Err(error_response(&err, None));
        }
    }
    Ok(())
}

/// `POST /api/v1/quotes` - produce a full quote.
pub async fn create_quote(
    State(state): State<Arc<AppState>>,
    Json(raw): Json<QuoteRequest>,
) -> Result<(StatusCode, Json<Quote>), ApiError> {
    check_location_lengths(&raw)?;
    let echo = raw.clone();
    let quote = state
        .service
        .generate_quote(raw)
        .await
        .map_err(|err| error_response(&err, Some(echo)))?;
    Ok((StatusCode::CREATED, Json(quote)))
}

/// `POST /api/v1/quotes/estimate` - price without minting.
pub async fn estimate_quote(
    State(state): State<Arc<AppState>>,
    Json(raw): Json<QuoteRequest>,
) -> Result<Json<Estimate>, ApiError> {
    check_location_lengths(&raw)?;
    let echo = raw.clone();
    let estimate = state
        .service
        .estimate(raw)
        .await
        .map_err(|err| error_response(&err, Some(echo)))?;
    Ok(Json(estimate))
}

/// `GET /api/v1/health`.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /api/v1/config` - the current pricing configuration snapshot.
pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<PricingConfig> {
    Json((*state.service.config().snapshot()).clone())
}

/// `PUT /api/v1/config` - shallow-merge update of the configuration.
pub async fn update_config(
    State(state): State<Arc<AppState>>,
    Json(update): Json<ConfigUpdate>,
) -> Result<Json<PricingConfig>, ApiError> {
    let installed = state
        .service
        .config()
        .update(update)
        .map_err(|err| error_response(&QuoteServiceError::Domain(err), None))?;
    Ok(Json((*installed).clone()))
}

/// `GET /api/v1/analytics/summary` - aggregate over the quote ring.
pub async fn analytics_summary(State(state): State<Arc<AppState>>) -> Json<AnalyticsSummary> {
    Json(state.service.analytics().summary())
}

//! # REST Routes
//!
//! Router assembly for the quoting surface.

use crate::api::rest::handlers::{self, AppState};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builds the application router.
///
/// Routes:
/// - `POST /api/v1/quotes`
/// - `POST /api/v1/quotes/estimate`
/// - `GET  /api/v1/health`
/// - `GET  /api/v1/config` / `PUT /api/v1/config`
/// - `GET  /api/v1/analytics/summary`
#[must_use]
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/quotes", post(handlers::create_quote))
        .route("/api/v1/quotes/estimate", post(handlers::estimate_quote))
        .route("/api/v1/health", get(handlers::health))
        .route(
            "/api/v1/config",
            get(handlers::get_config).put(handlers::update_config),
        )
        .route(
            "/api/v1/analytics/summary",
            get(handlers::analytics_summary),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

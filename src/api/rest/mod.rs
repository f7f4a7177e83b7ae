//! # REST API
//!
//! REST endpoints using axum for the quoting surface.
//!
//! # Endpoints
//!
//! ## Quotes
//! - `POST /api/v1/quotes` - Produce a full quote
//! - `POST /api/v1/quotes/estimate` - Price a request without minting a quote
//!
//! ## Admin
//! - `GET /api/v1/config` - Current pricing configuration
//! - `PUT /api/v1/config` - Shallow-merge configuration update
//! - `GET /api/v1/analytics/summary` - Aggregate over recent quotes
//!
//! ## Health
//! - `GET /api/v1/health` - Health check endpoint
//!
//! # Usage
//!
//! ```ignore
//! use courier_quote::api::rest::{create_router, AppState};
//! use std::sync::Arc;
//!
//! let state = Arc::new(AppState { service: /* ... */ });
//! let router = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, router).await?;
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{AppState, ErrorResponse, HealthResponse};
pub use routes::create_router;

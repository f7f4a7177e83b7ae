//! # Quote Server
//!
//! Wires configuration, logging, the distance resolver, and the REST router,
//! then serves until shutdown.

use anyhow::Context;
use courier_quote::api::rest::{create_router, AppState};
use courier_quote::application::analytics::AnalyticsRing;
use courier_quote::application::service::QuoteService;
use courier_quote::config::{ConfigStore, PricingConfig};
use courier_quote::infrastructure::maps::provider::DistanceMatrixProvider;
use courier_quote::infrastructure::maps::resolver::{DistanceResolver, SWEEP_INTERVAL};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const DEFAULT_MAPS_URL: &str = "https://maps.googleapis.com/maps/api/distancematrix/json";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = PricingConfig::from_env().context("loading pricing configuration")?;
    let store = Arc::new(ConfigStore::new(config)?);

    let maps_url = std::env::var("MAPS_API_URL").unwrap_or_else(|_| DEFAULT_MAPS_URL.to_string());
    let api_key = std::env::var("MAPS_API_KEY").unwrap_or_default();
    if api_key.is_empty() {
        tracing::warn!("MAPS_API_KEY is not set; distance lookups will fall back to estimates");
    }
    let provider = Arc::new(DistanceMatrixProvider::new(maps_url, api_key)?);

    let resolver = Arc::new(DistanceResolver::new(provider));
    let _sweeper = resolver.spawn_sweeper(SWEEP_INTERVAL);

    let service = Arc::new(QuoteService::new(
        store,
        resolver,
        Arc::new(AnalyticsRing::new()),
    ));
    let router = create_router(Arc::new(AppState { service }));

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "quote server listening");

    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}

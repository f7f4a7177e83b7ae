//! # Maps HTTP Client
//!
//! Thin reqwest wrapper for the map-provider adapter.
//!
//! Maps transport failures onto [`MapsError`] so the resolver can decide
//! between the estimated fallback and the distinguished quota error. An
//! HTTP 429 from the provider is treated as quota exhaustion.

use crate::infrastructure::maps::error::{MapsError, MapsResult};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client wrapper for map-provider requests.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    timeout_ms: u64,
}

impl HttpClient {
    /// Creates a new HTTP client with the specified timeout.
    ///
    /// # Errors
    ///
    /// Returns `MapsError::Internal` if the client cannot be created.
    pub fn new(timeout_ms: u64) -> MapsResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| MapsError::internal(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, timeout_ms })
    }

    /// Returns the configured timeout in milliseconds.
    #[inline]
    #[must_use]
    pub const fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Makes a GET request with query parameters and deserializes the JSON
    /// response.
    ///
    /// # Errors
    ///
    /// Returns `MapsError::Timeout`/`MapsError::Connection` if the request
    /// fails in transit, `MapsError::QuotaExceeded` on HTTP 429, and
    /// `MapsError::InvalidResponse` if the body cannot be parsed.
    pub async fn get_with_params<T: DeserializeOwned, P: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        params: &P,
    ) -> MapsResult<T> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        handle_response(response).await
    }
}

async fn handle_response<T: DeserializeOwned>(response: Response) -> MapsResult<T> {
    let status = response.status();

    if status.is_success() {
        response
            .json::<T>()
            .await
            .map_err(|e| MapsError::invalid_response(format!("failed to parse response: {e}")))
    } else {
        let error_body = response.text().await.unwrap_or_default();
        Err(map_status_error(status, &error_body))
    }
}

fn map_reqwest_error(error: reqwest::Error) -> MapsError {
    if error.is_timeout() {
        MapsError::timeout("request timed out")
    } else if error.is_connect() {
        MapsError::connection(format!("connection failed: {error}"))
    } else {
        MapsError::connection(format!("HTTP request failed: {error}"))
    }
}

fn map_status_error(status: StatusCode, body: &str) -> MapsError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => MapsError::quota_exceeded("HTTP 429 from provider"),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            MapsError::authentication(format!("authentication failed: {body}"))
        }
        StatusCode::INTERNAL_SERVER_ERROR
        | StatusCode::BAD_GATEWAY
        | StatusCode::SERVICE_UNAVAILABLE
        | StatusCode::GATEWAY_TIMEOUT => {
            MapsError::connection(format!("server error ({status}): {body}"))
        }
        _ => MapsError::invalid_response(format!("HTTP error ({status}): {body}")),
    }
}

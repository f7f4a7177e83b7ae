//! # Distance Provider
//!
//! The provider port and the distance-matrix HTTP adapter behind it.
//!
//! The resolver only depends on [`DistanceProvider`]; production wires in
//! [`DistanceMatrixProvider`], tests substitute scripted fakes. The adapter
//! sends `origins`, `destinations`, `mode`, and `units=imperial`, and accepts
//! a result only when the envelope status and the first element status are
//! both `OK`. Meters convert to miles at `0.000621371` (rounded to two
//! decimals) and seconds to whole minutes by rounding.

use crate::domain::value_objects::enums::TravelMode;
use crate::infrastructure::maps::client::HttpClient;
use crate::infrastructure::maps::error::{MapsError, MapsResult};
use async_trait::async_trait;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;

/// Per-request budget for provider calls, in milliseconds.
pub const PROVIDER_TIMEOUT_MS: u64 = 10_000;

/// A successful provider measurement, already converted to imperial units.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderDistance {
    /// Distance in miles, rounded to two decimals.
    pub miles: Decimal,
    /// Travel time in whole minutes.
    pub minutes: i64,
    /// Provider-canonicalized origin address.
    pub origin: String,
    /// Provider-canonicalized destination address.
    pub destination: String,
}

/// Port for resolving a road distance between two addresses.
#[async_trait]
pub trait DistanceProvider: Send + Sync {
    /// Measures the distance from `origin` to `destination` using `mode`.
    ///
    /// # Errors
    ///
    /// Returns a [`MapsError`]; only [`MapsError::QuotaExceeded`] reaches
    /// quote callers, everything else degrades to the estimated fallback.
    async fn distance(
        &self,
        origin: &str,
        destination: &str,
        mode: TravelMode,
    ) -> MapsResult<ProviderDistance>;
}

/// Converts provider meters to miles, rounded to two decimals.
#[must_use]
pub fn miles_from_meters(meters: i64) -> Decimal {
    (Decimal::from(meters) * Decimal::new(621_371, 9))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts provider seconds to whole minutes, rounded half up.
#[must_use]
pub fn minutes_from_seconds(seconds: i64) -> i64 {
    (seconds + 30).div_euclid(60)
}

#[derive(Debug, Deserialize)]
struct MatrixResponse {
    status: String,
    #[serde(default)]
    origin_addresses: Vec<String>,
    #[serde(default)]
    destination_addresses: Vec<String>,
    #[serde(default)]
    rows: Vec<MatrixRow>,
}

#[derive(Debug, Deserialize)]
struct MatrixRow {
    #[serde(default)]
    elements: Vec<MatrixElement>,
}

#[derive(Debug, Deserialize)]
struct MatrixElement {
    status: String,
    distance: Option<ValueText>,
    duration: Option<ValueText>,
}

// The provider also sends a human-readable `text` alongside each value;
// serde drops it with the other unused keys.
#[derive(Debug, Deserialize)]
struct ValueText {
    value: i64,
}

/// Distance-matrix HTTP adapter.
#[derive(Debug, Clone)]
pub struct DistanceMatrixProvider {
    http: HttpClient,
    base_url: String,
    api_key: String,
}

impl DistanceMatrixProvider {
    /// Creates an adapter against `base_url` using `api_key`.
    ///
    /// # Errors
    ///
    /// Returns `MapsError::Internal` if the HTTP client cannot be created.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> MapsResult<Self> {
        Ok(Self {
            http: HttpClient::new(PROVIDER_TIMEOUT_MS)?,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    fn interpret(
        &self,
        response: MatrixResponse,
        origin: &str,
        destination: &str,
    ) -> MapsResult<ProviderDistance> {
        match response.status.as_str() {
            "OK" => {}
            "OVER_QUERY_LIMIT" | "OVER_DAILY_LIMIT" => {
                return Err(MapsError::quota_exceeded(format!(
                    "provider status {}",
                    response.status
                )));
            }
            "REQUEST_DENIED" => {
                return Err(MapsError::authentication("provider denied the request"));
            }
            other => {
                return Err(MapsError::invalid_response(format!(
                    "unexpected provider status {other}"
                )));
            }
        }

        let element = response
            .rows
            .first()
            .and_then(|row| row.elements.first())
            .ok_or_else(|| MapsError::invalid_response("response carried no elements"))?;

        match element.status.as_str() {
            "OK" => {}
            "ZERO_RESULTS" | "NOT_FOUND" => {
                return Err(MapsError::no_route(format!(
                    "element status {}",
                    element.status
                )));
            }
            other => {
                return Err(MapsError::invalid_response(format!(
                    "unexpected element status {other}"
                )));
            }
        }

        let distance = element
            .distance
            .as_ref()
            .ok_or_else(|| MapsError::invalid_response("element missing distance"))?;
        let duration = element
            .duration
            .as_ref()
            .ok_or_else(|| MapsError::invalid_response("element missing duration"))?;

        Ok(ProviderDistance {
            miles: miles_from_meters(distance.value),
            minutes: minutes_from_seconds(duration.value),
            origin: response
                .origin_addresses
                .first()
                .cloned()
                .unwrap_or_else(|| origin.to_string()),
            destination: response
                .destination_addresses
                .first()
                .cloned()
                .unwrap_or_else(|| destination.to_string()),
        })
    }
}

#[async_trait]
impl DistanceProvider for DistanceMatrixProvider {
    async fn distance(
        &self,
        origin: &str,
        destination: &str,
        mode: TravelMode,
    ) -> MapsResult<ProviderDistance> {
        let params = [
            ("origins", origin),
            ("destinations", destination),
            ("mode", mode.as_str()),
            ("units", "imperial"),
            ("key", self.api_key.as_str()),
        ];

        let response: MatrixResponse = self.http.get_with_params(&self.base_url, &params).await?;
        self.interpret(response, origin, destination)
    }
}

//! Region client trait and OpenSky implementation.
//!
//! The [`RegionClient`] trait is the seam the polling coordinator depends on,
//! allowing mock clients in tests. [`OpenSkyClient`] queries the OpenSky
//! `states/all` endpoint via `reqwest`.

use std::future::Future;
use std::sync::Arc;

use reqwest::header::ACCEPT;

use super::bounds::BoundingBox;
use super::config::OpenSkyConfig;
use super::error::FetchError;
use crate::aircraft::{AircraftState, StatesResponse};

/// Trait for fetching the aircraft inside a bounding box.
///
/// Implementations make a single attempt per call and never retry.
pub trait RegionClient: Send + Sync {
    /// Fetch all aircraft currently reported inside `bbox`.
    fn fetch(
        &self,
        bbox: &BoundingBox,
    ) -> impl Future<Output = Result<Vec<AircraftState>, FetchError>> + Send;
}

impl<C: RegionClient> RegionClient for Arc<C> {
    fn fetch(
        &self,
        bbox: &BoundingBox,
    ) -> impl Future<Output = Result<Vec<AircraftState>, FetchError>> + Send {
        (**self).fetch(bbox)
    }
}

/// OpenSky Network client.
///
/// Holds a reusable `reqwest::Client` with connection pooling and the
/// configured timeout. Safe to share between tasks.
#[derive(Debug, Clone)]
pub struct OpenSkyClient {
    http: reqwest::Client,
    config: OpenSkyConfig,
}

impl OpenSkyClient {
    /// Create a new client from configuration.
    pub fn new(config: OpenSkyConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| FetchError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Create a client around a preconfigured `reqwest::Client`.
    ///
    /// The supplied client's own timeout applies; `config.timeout` is ignored.
    pub fn with_http_client(http: reqwest::Client, config: OpenSkyConfig) -> Self {
        Self { http, config }
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &OpenSkyConfig {
        &self.config
    }
}

impl RegionClient for OpenSkyClient {
    async fn fetch(&self, bbox: &BoundingBox) -> Result<Vec<AircraftState>, FetchError> {
        let mut request = self
            .http
            .get(self.config.states_url())
            .query(&bbox.query_params())
            .query(&[("extended", 1)])
            .header(ACCEPT, "application/json");

        if let Some(credentials) = &self.config.credentials {
            request = request.basic_auth(&credentials.username, Some(&credentials.password));
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), bbox = %bbox, "Region query rejected");
            return Err(FetchError::from_status(status.as_u16()));
        }

        let bytes = response.bytes().await?;

        let body: StatesResponse = serde_json::from_slice(&bytes)
            .map_err(|e| FetchError::Network(format!("Failed to parse response: {}", e)))?;

        let aircraft = body.aircraft();

        tracing::debug!(
            bbox = %bbox,
            upstream_time = body.time,
            rows = body.states.len(),
            aircraft = aircraft.len(),
            "Region query completed"
        );

        Ok(aircraft)
    }
}

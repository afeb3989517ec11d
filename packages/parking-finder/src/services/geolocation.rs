use serde::{Deserialize, Serialize};
use std::future::Future;

use crate::config::{ProviderConfig, USER_AGENT};
use crate::models::{Coordinate, GeolocationResult};

#[derive(Debug, thiserror::Error)]
pub enum GeolocationError {
    #[error("API responded with status {0}")]
    Status(reqwest::StatusCode),

    #[error("Geolocation request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Source of the device's current position
pub trait GeolocationProvider: Send + Sync + 'static {
    fn locate(&self) -> impl Future<Output = Result<GeolocationResult, GeolocationError>> + Send;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeolocateRequest {
    consider_ip: bool,
}

#[derive(Debug, Deserialize)]
struct GeolocateResponse {
    location: LatLng,
    accuracy: f64,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

/// Google Geolocation API client using IP-based lookup
#[derive(Debug, Clone)]
pub struct GoogleGeolocation {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

impl GoogleGeolocation {
    pub fn new(url: impl Into<String>, config: &ProviderConfig) -> Result<Self, GeolocationError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
            api_key: config.api_key.clone(),
        })
    }
}

impl GeolocationProvider for GoogleGeolocation {
    async fn locate(&self) -> Result<GeolocationResult, GeolocationError> {
        let response = self
            .client
            .post(&self.url)
            .query(&[("key", &self.api_key)])
            .json(&GeolocateRequest { consider_ip: true })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!("Geolocation API returned HTTP {}", status);
            return Err(GeolocationError::Status(status));
        }

        let data: GeolocateResponse = response.json().await?;
        tracing::debug!(
            "Located at ({}, {}) within {:.0}m",
            data.location.lat,
            data.location.lng,
            data.accuracy
        );

        Ok(GeolocationResult::new(
            Coordinate::new(data.location.lat, data.location.lng),
            data.accuracy,
        ))
    }
}

use serde::Deserialize;
use std::future::Future;

use crate::config::{ProviderConfig, USER_AGENT};
use crate::models::{Coordinate, RouteAlternative};

#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("Directions API responded with status {0}")]
    Http(reqwest::StatusCode),

    #[error("Directions request failed ({status}): {message}")]
    Status { status: String, message: String },

    #[error("Directions request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("No route alternative at index {index} ({available} available)")]
    NoSuchAlternative { index: usize, available: usize },
}

/// Routing backend returning driving routes with alternatives, primary first
pub trait DirectionsProvider: Send + Sync + 'static {
    fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> impl Future<Output = Result<Vec<RouteAlternative>, RouteError>> + Send;
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    routes: Vec<RouteAlternative>,
    #[serde(default)]
    error_message: Option<String>,
}

/// Google Directions API client
#[derive(Debug, Clone)]
pub struct GoogleDirections {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

impl GoogleDirections {
    pub fn new(url: impl Into<String>, config: &ProviderConfig) -> Result<Self, RouteError> {
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

impl DirectionsProvider for GoogleDirections {
    async fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Vec<RouteAlternative>, RouteError> {
        tracing::debug!("Requesting directions {} -> {}", origin, destination);

        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("origin", origin.to_string()),
                ("destination", destination.to_string()),
                ("mode", "driving".to_string()),
                ("alternatives", "true".to_string()),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!("Directions API returned HTTP {}", status);
            return Err(RouteError::Http(status));
        }

        let data: DirectionsResponse = response.json().await?;
        match data.status.as_str() {
            "OK" => Ok(data.routes),
            "ZERO_RESULTS" => Ok(Vec::new()),
            _ => Err(RouteError::Status {
                message: data.error_message.unwrap_or_default(),
                status: data.status,
            }),
        }
    }
}

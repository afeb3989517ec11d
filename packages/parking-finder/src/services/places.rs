use serde::{Deserialize, Serialize};
use std::future::Future;

use crate::config::{ProviderConfig, USER_AGENT};
use crate::models::Coordinate;
pub use crate::models::{Place, PlacePrediction, SessionToken, Viewport};

/// Fields fetched when a prediction is resolved to a place
pub const PLACE_FIELDS: &str = "viewport,location,iconMaskBaseUri,iconBackgroundColor";

#[derive(Debug, thiserror::Error)]
pub enum PlacesError {
    #[error("Places API responded with status {0}")]
    Status(reqwest::StatusCode),

    #[error("Places request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Place {0} has no location")]
    MissingLocation(String),
}

/// Place search backend: free-text predictions and place details
pub trait PlacesProvider: Send + Sync + 'static {
    fn autocomplete(
        &self,
        input: &str,
        session: SessionToken,
    ) -> impl Future<Output = Result<Vec<PlacePrediction>, PlacesError>> + Send;

    fn place(
        &self,
        place_id: &str,
        session: SessionToken,
    ) -> impl Future<Output = Result<Place, PlacesError>> + Send;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AutocompleteRequest<'a> {
    input: &'a str,
    session_token: String,
}

#[derive(Debug, Deserialize)]
struct AutocompleteResponse {
    #[serde(default)]
    suggestions: Vec<Suggestion>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Suggestion {
    place_prediction: Option<ApiPrediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiPrediction {
    place_id: String,
    text: ApiText,
}

#[derive(Debug, Deserialize)]
struct ApiText {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ApiLatLng {
    latitude: f64,
    longitude: f64,
}

impl From<ApiLatLng> for Coordinate {
    fn from(value: ApiLatLng) -> Self {
        Coordinate::new(value.latitude, value.longitude)
    }
}

#[derive(Debug, Deserialize)]
struct ApiViewport {
    low: ApiLatLng,
    high: ApiLatLng,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaceResponse {
    location: Option<ApiLatLng>,
    viewport: Option<ApiViewport>,
    icon_mask_base_uri: Option<String>,
    icon_background_color: Option<String>,
}

/// Google Places API (New) client
#[derive(Debug, Clone)]
pub struct GooglePlaces {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GooglePlaces {
    pub fn new(base_url: impl Into<String>, config: &ProviderConfig) -> Result<Self, PlacesError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn check(response: &reqwest::Response) -> Result<(), PlacesError> {
        if response.status().is_success() {
            return Ok(());
        }
        let status = response.status();
        tracing::warn!("Places API returned HTTP {}", status);
        Err(PlacesError::Status(status))
    }
}

impl PlacesProvider for GooglePlaces {
    async fn autocomplete(
        &self,
        input: &str,
        session: SessionToken,
    ) -> Result<Vec<PlacePrediction>, PlacesError> {
        if input.trim().is_empty() {
            return Ok(Vec::new());
        }

        let response = self
            .client
            .post(format!("{}/places:autocomplete", self.base_url))
            .header("X-Goog-Api-Key", &self.api_key)
            .json(&AutocompleteRequest {
                input,
                session_token: session.to_string(),
            })
            .send()
            .await?;
        Self::check(&response)?;

        let data: AutocompleteResponse = response.json().await?;
        let predictions: Vec<PlacePrediction> = data
            .suggestions
            .into_iter()
            .filter_map(|s| s.place_prediction)
            .map(|p| PlacePrediction {
                place_id: p.place_id,
                text: p.text.text,
            })
            .collect();

        tracing::debug!("{} prediction(s) for {:?}", predictions.len(), input);
        Ok(predictions)
    }

    async fn place(&self, place_id: &str, session: SessionToken) -> Result<Place, PlacesError> {
        let response = self
            .client
            .get(format!("{}/places/{}", self.base_url, place_id))
            .query(&[("sessionToken", session.to_string())])
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", PLACE_FIELDS)
            .send()
            .await?;
        Self::check(&response)?;

        let data: PlaceResponse = response.json().await?;
        let location = data
            .location
            .ok_or_else(|| PlacesError::MissingLocation(place_id.to_string()))?;

        Ok(Place {
            place_id: place_id.to_string(),
            location: location.into(),
            viewport: data.viewport.map(|v| Viewport {
                low: v.low.into(),
                high: v.high.into(),
            }),
            icon_mask_uri: data.icon_mask_base_uri,
            icon_background_color: data.icon_background_color,
        })
    }
}

pub mod directions;
pub mod location;
pub mod places;
pub mod spots;

use axum::{
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tokio::sync::watch;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::models::{Catalog, LocationState};
use crate::services::{
    GoogleDirections, GoogleGeolocation, GooglePlaces, LiveRouteSummarizer, LocationPoller,
    RouteTracker,
};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub places: Arc<GooglePlaces>,
    pub location: watch::Receiver<LocationState>,
    pub tracker: Arc<RouteTracker<GoogleDirections>>,
}

impl AppState {
    /// Wire the Google clients and start the location poller.
    ///
    /// The poller runs for as long as the returned handle is kept.
    pub fn from_config(config: &Config, catalog: Catalog) -> anyhow::Result<(Self, LocationPoller)> {
        let provider = config.provider();

        let geolocation = GoogleGeolocation::new(config.geolocation_url.clone(), &provider)?;
        let directions = GoogleDirections::new(config.directions_url.clone(), &provider)?;
        let places = GooglePlaces::new(config.places_url.clone(), &provider)?;

        let poller = LocationPoller::spawn(Arc::new(geolocation), config.poll_interval());
        let summarizer = Arc::new(LiveRouteSummarizer::new(directions));
        let tracker = RouteTracker::new(summarizer, poller.subscribe());

        let state = Self {
            catalog: Arc::new(catalog),
            places: Arc::new(places),
            location: poller.subscribe(),
            tracker: Arc::new(tracker),
        };
        Ok((state, poller))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/health", get(health))
        .route("/api/spots", get(spots::list_spots))
        .route("/api/spots/nearest", get(spots::nearest_spot))
        .route("/api/spots/:id", get(spots::get_spot))
        .route("/api/places/autocomplete", get(places::autocomplete))
        .route("/api/places/:place_id", get(places::select_place))
        .route("/api/location", get(location::current_location))
        .route("/api/directions", get(directions::live_directions))
        .route("/api/directions/select", post(directions::select_alternative))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "parking-finder",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

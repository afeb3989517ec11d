use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::debug;

use super::AppState;
use crate::libraries::nearest_spot;
use crate::models::{
    responses::{NearestSpotResponse, SpotDetail, SpotMarker, SpotsResponse},
    Coordinate,
};

#[derive(Debug, Deserialize)]
pub struct NearestQuery {
    pub lat: f64,
    pub lng: f64,
}

/// All markers for the map, plus where to center it
pub async fn list_spots(State(state): State<AppState>) -> Json<SpotsResponse> {
    Json(SpotsResponse {
        default_center: state.catalog.default_center(),
        spots: state.catalog.spots().iter().map(SpotMarker::from).collect(),
    })
}

pub async fn get_spot(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<SpotDetail>, StatusCode> {
    state
        .catalog
        .get(id)
        .map(|spot| Json(spot.into()))
        .ok_or(StatusCode::NOT_FOUND)
}

/// Closest available spot to an arbitrary point
pub async fn nearest_spot(
    State(state): State<AppState>,
    Query(query): Query<NearestQuery>,
) -> Result<Json<NearestSpotResponse>, StatusCode> {
    let target = Coordinate::new(query.lat, query.lng);
    if !target.is_finite() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let nearest = nearest_spot::resolve_with_distance(&target, state.catalog.spots());
    debug!(
        "Nearest spot to {}: {:?}",
        target,
        nearest.map(|(spot, _)| spot.id)
    );

    Ok(Json(NearestSpotResponse::new(target, nearest)))
}

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::{error, info};
use uuid::Uuid;

use super::AppState;
use crate::libraries::nearest_spot;
use crate::models::responses::{AutocompleteResponse, NearestSpotResponse, PlaceSelectionResponse};
use crate::services::{PlacesProvider, SessionToken};

#[derive(Debug, Deserialize)]
pub struct AutocompleteQuery {
    #[serde(default)]
    pub input: String,
    pub session: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct SelectPlaceQuery {
    pub session: Option<Uuid>,
}

/// Predictions for the search box. A session is created when none is given.
pub async fn autocomplete(
    State(state): State<AppState>,
    Query(query): Query<AutocompleteQuery>,
) -> (StatusCode, Json<AutocompleteResponse>) {
    let session = query.session.map(SessionToken::from).unwrap_or_default();

    match state.places.autocomplete(&query.input, session).await {
        Ok(predictions) => (
            StatusCode::OK,
            Json(AutocompleteResponse {
                session,
                predictions,
                error: None,
            }),
        ),
        Err(e) => {
            error!("Autocomplete failed: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(AutocompleteResponse {
                    session,
                    predictions: vec![],
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}

/// Resolve a prediction to a place and find the closest free spot to it.
///
/// Fetching the place ends the search session, so the response always
/// carries a new token for the next search.
pub async fn select_place(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
    Query(query): Query<SelectPlaceQuery>,
) -> (StatusCode, Json<PlaceSelectionResponse>) {
    let session = query.session.map(SessionToken::from).unwrap_or_default();
    let next_session = SessionToken::new();

    let place = match state.places.place(&place_id, session).await {
        Ok(place) => place,
        Err(e) => {
            error!("Failed to fetch place {}: {}", place_id, e);
            return (
                StatusCode::BAD_GATEWAY,
                Json(PlaceSelectionResponse::error(next_session, e.to_string())),
            );
        }
    };

    let nearest = nearest_spot::resolve_with_distance(&place.location, state.catalog.spots());
    match nearest {
        Some((spot, meters)) => info!(
            "Place {} resolved, nearest spot {} ({:.0}m)",
            place_id, spot.name, meters
        ),
        None => info!("Place {} resolved, no available spot", place_id),
    }

    let nearest = NearestSpotResponse::new(place.location, nearest);
    (
        StatusCode::OK,
        Json(PlaceSelectionResponse {
            session: next_session,
            place: Some(place),
            nearest: Some(nearest),
            error: None,
        }),
    )
}

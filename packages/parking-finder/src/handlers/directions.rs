use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::{debug, warn};

use super::AppState;
use crate::models::{
    parse_destination,
    responses::{DirectionsResponse, INVALID_DESTINATION_NOTICE, LOCATION_UNAVAILABLE_NOTICE},
};

#[derive(Debug, Deserialize)]
pub struct DirectionsQuery {
    pub destination: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SelectQuery {
    pub index: usize,
}

/// Live route from the polled location to `destination=<lat>,<lng>`.
///
/// The first request for a destination starts tracking it; later requests
/// return the route as refreshed by location updates.
pub async fn live_directions(
    State(state): State<AppState>,
    Query(query): Query<DirectionsQuery>,
) -> (StatusCode, Json<DirectionsResponse>) {
    let destination = match query.destination.as_deref().map(parse_destination) {
        Some(Ok(destination)) => destination,
        other => {
            debug!("Rejecting destination {:?}: {:?}", query.destination, other);
            return (
                StatusCode::BAD_REQUEST,
                Json(DirectionsResponse::error(None, INVALID_DESTINATION_NOTICE)),
            );
        }
    };

    let location = state.location.borrow().clone();
    if location.is_unavailable() {
        warn!("No current location: {:?}", location.error);
        return (
            StatusCode::OK,
            Json(DirectionsResponse::error(
                Some(destination),
                LOCATION_UNAVAILABLE_NOTICE,
            )),
        );
    }
    if location.coordinate().is_none() {
        return (StatusCode::OK, Json(DirectionsResponse::waiting(destination)));
    }

    let follow_error = state.tracker.follow(destination).await.err();
    let snapshot = state.tracker.summarizer().snapshot().await;

    let mut response = DirectionsResponse {
        destination: Some(destination),
        origin: snapshot.origin,
        error: follow_error.map(|e| e.to_string()).or(snapshot.error),
        ..Default::default()
    };
    // Alternatives for a previous destination are not shown
    if snapshot.destination == Some(destination) {
        response.alternatives = snapshot.alternatives;
        response.selected_index = snapshot.selected_index;
        response.summary = snapshot.summary;
    }

    (StatusCode::OK, Json(response))
}

/// Switch the displayed route to another alternative
pub async fn select_alternative(
    State(state): State<AppState>,
    Query(query): Query<SelectQuery>,
) -> (StatusCode, Json<DirectionsResponse>) {
    let summarizer = state.tracker.summarizer();

    if let Err(e) = summarizer.select(query.index).await {
        let snapshot = summarizer.snapshot().await;
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(DirectionsResponse::error(snapshot.destination, e.to_string())),
        );
    }

    let snapshot = summarizer.snapshot().await;
    (
        StatusCode::OK,
        Json(DirectionsResponse {
            destination: snapshot.destination,
            origin: snapshot.origin,
            waiting: false,
            alternatives: snapshot.alternatives,
            selected_index: snapshot.selected_index,
            summary: snapshot.summary,
            error: snapshot.error,
        }),
    )
}

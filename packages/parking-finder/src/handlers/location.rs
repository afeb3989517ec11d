use axum::{extract::State, Json};

use super::AppState;
use crate::models::LocationState;

/// Latest state of the location poller
pub async fn current_location(State(state): State<AppState>) -> Json<LocationState> {
    let snapshot = state.location.borrow().clone();
    Json(snapshot)
}

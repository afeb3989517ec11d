use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::coordinate::Coordinate;

/// A position reported by the geolocation provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeolocationResult {
    pub location: Coordinate,
    pub accuracy: f64, // meters
    pub fetched_at: DateTime<Utc>,
}

impl GeolocationResult {
    pub fn new(location: Coordinate, accuracy: f64) -> Self {
        Self {
            location,
            accuracy,
            fetched_at: Utc::now(),
        }
    }
}

/// Snapshot of the location poller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationState {
    pub is_loading: bool,
    pub location: Option<GeolocationResult>,
    pub error: Option<String>,
}

impl Default for LocationState {
    fn default() -> Self {
        Self {
            is_loading: true,
            location: None,
            error: None,
        }
    }
}

impl LocationState {
    /// Current coordinate, stale or not
    pub fn coordinate(&self) -> Option<Coordinate> {
        self.location.as_ref().map(|result| result.location)
    }

    /// Loading finished without ever producing a location
    pub fn is_unavailable(&self) -> bool {
        !self.is_loading && self.location.is_none()
    }
}

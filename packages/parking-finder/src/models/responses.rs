use serde::{Deserialize, Serialize};

use super::coordinate::Coordinate;
use super::place::{Place, PlacePrediction, SessionToken};
use super::route::RouteSummary;
use super::spot::ParkingSpot;

pub const NO_SPOT_NOTICE: &str = "No available parking spots found near this location.";
pub const INVALID_DESTINATION_NOTICE: &str = "Invalid destination parameter";
pub const LOCATION_UNAVAILABLE_NOTICE: &str = "Unable to get current location";

/// Map marker plus the info window text for one spot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotMarker {
    pub id: u32,
    pub name: String,
    pub location: Coordinate,
    pub position_label: String,
    pub status: String,
}

impl From<&ParkingSpot> for SpotMarker {
    fn from(spot: &ParkingSpot) -> Self {
        Self {
            id: spot.id,
            name: spot.name.clone(),
            location: spot.location,
            position_label: format!("{:.6}, {:.6}", spot.location.lat, spot.location.lng),
            status: spot.status_label().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotsResponse {
    pub default_center: Option<Coordinate>,
    pub spots: Vec<SpotMarker>,
}

/// Everything the spot detail panel shows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotDetail {
    pub id: u32,
    pub name: String,
    pub image_url: String,
    pub hourly_rate: f64,
    pub hourly_rate_label: String,
    pub rating: u8,
    pub stars: Vec<bool>,
    pub open_hours: String,
    pub phone: String,
    pub street: String,
    pub location: Coordinate,
    pub status: String,
    pub directions_link: String,
}

impl From<&ParkingSpot> for SpotDetail {
    fn from(spot: &ParkingSpot) -> Self {
        Self {
            id: spot.id,
            name: spot.name.clone(),
            image_url: spot.image_url.clone(),
            hourly_rate: spot.hourly_rate,
            hourly_rate_label: spot.hourly_rate_label(),
            rating: spot.rating,
            stars: spot.stars().to_vec(),
            open_hours: spot.open_hours.clone(),
            phone: spot.phone.clone(),
            street: spot.street.clone(),
            location: spot.location,
            status: spot.status_label().to_string(),
            directions_link: spot.directions_link(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearestSpotResponse {
    pub target: Coordinate,
    pub spot: Option<SpotDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_meters: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl NearestSpotResponse {
    pub fn new(target: Coordinate, nearest: Option<(&ParkingSpot, f64)>) -> Self {
        match nearest {
            Some((spot, meters)) => Self {
                target,
                spot: Some(spot.into()),
                distance_meters: Some(meters),
                notice: None,
            },
            None => Self {
                target,
                spot: None,
                distance_meters: None,
                notice: Some(NO_SPOT_NOTICE.to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutocompleteResponse {
    pub session: SessionToken,
    pub predictions: Vec<PlacePrediction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of picking a prediction: the place, its nearest free spot and a
/// fresh session for the next search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceSelectionResponse {
    pub session: SessionToken,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<Place>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nearest: Option<NearestSpotResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PlaceSelectionResponse {
    pub fn error(session: SessionToken, message: String) -> Self {
        Self {
            session,
            place: None,
            nearest: None,
            error: Some(message),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectionsResponse {
    pub destination: Option<Coordinate>,
    pub origin: Option<Coordinate>,
    pub waiting: bool,
    pub alternatives: usize,
    pub selected_index: usize,
    pub summary: Option<RouteSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DirectionsResponse {
    pub fn error(destination: Option<Coordinate>, message: impl Into<String>) -> Self {
        Self {
            destination,
            error: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn waiting(destination: Coordinate) -> Self {
        Self {
            destination: Some(destination),
            waiting: true,
            ..Default::default()
        }
    }
}

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use super::coordinate::Coordinate;

pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingSpot {
    pub id: u32,
    pub name: String,
    pub hourly_rate: f64,
    pub rating: u8, // out of 5
    pub image_url: String,
    pub open_hours: String,
    pub location: Coordinate,
    pub filled_up: bool,
    pub phone: String,
    pub street: String,
}

impl ParkingSpot {
    pub fn status_label(&self) -> &'static str {
        if self.filled_up {
            "Filled Up"
        } else {
            "Available"
        }
    }

    pub fn hourly_rate_label(&self) -> String {
        format!("${:.2} / hour", self.hourly_rate)
    }

    /// One entry per star position, lit for positions up to the rating
    pub fn stars(&self) -> [bool; MAX_RATING as usize] {
        let mut stars = [false; MAX_RATING as usize];
        for (i, star) in stars.iter_mut().enumerate() {
            *star = (i as u8) < self.rating;
        }
        stars
    }

    /// Shareable link to live directions towards this spot
    pub fn directions_link(&self) -> String {
        format!("/directions?destination={}", self.location)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Spot {id} has rating {rating}, expected 0-5")]
    InvalidRating { id: u32, rating: u8 },

    #[error("Spot {0} has a negative hourly rate")]
    NegativeRate(u32),

    #[error("Spot {0} has a non-finite location")]
    InvalidLocation(u32),

    #[error("Duplicate spot id {0}")]
    DuplicateId(u32),
}

/// The fixed list of known parking spots, in display order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    spots: Vec<ParkingSpot>,
}

impl Catalog {
    pub fn new(spots: Vec<ParkingSpot>) -> Result<Self, CatalogError> {
        let catalog = Self { spots };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog from a JSON array of spots
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        let spots: Vec<ParkingSpot> = serde_json::from_str(&contents)?;
        Self::new(spots)
    }

    pub fn spots(&self) -> &[ParkingSpot] {
        &self.spots
    }

    pub fn get(&self, id: u32) -> Option<&ParkingSpot> {
        self.spots.iter().find(|spot| spot.id == id)
    }

    pub fn len(&self) -> usize {
        self.spots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }

    /// Initial map center: the fifth spot, or the first one for short catalogs
    pub fn default_center(&self) -> Option<Coordinate> {
        self.spots
            .get(4)
            .or_else(|| self.spots.first())
            .map(|spot| spot.location)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for spot in &self.spots {
            if spot.rating > MAX_RATING {
                return Err(CatalogError::InvalidRating {
                    id: spot.id,
                    rating: spot.rating,
                });
            }
            if spot.hourly_rate.is_nan() || spot.hourly_rate < 0.0 {
                return Err(CatalogError::NegativeRate(spot.id));
            }
            if !spot.location.is_finite() {
                return Err(CatalogError::InvalidLocation(spot.id));
            }
            if !seen.insert(spot.id) {
                return Err(CatalogError::DuplicateId(spot.id));
            }
        }
        Ok(())
    }

    /// Built-in catalog of spots around Kampala
    pub fn kampala() -> Self {
        let spots = vec![
            spot(1, "Nakawa Oasis", 2.50, 4, "6:00 AM - 10:00 PM", "256-123-4567", "Nakawa Road, Kampala", (0.3476, 32.5825), false),
            spot(2, "Kololo Retreat", 3.00, 5, "7:00 AM - 11:00 PM", "256-234-5678", "Kololo Crescent, Kampala", (0.3600, 32.5800), false),
            spot(3, "Kampala Pinnacle", 2.75, 4, "6:30 AM - 10:30 PM", "256-345-6789", "Central Kampala, Kampala", (0.3300, 32.5950), false),
            spot(4, "Bugolobi Bay", 2.25, 3, "7:00 AM - 9:00 PM", "256-456-7890", "Bugolobi Road, Kampala", (0.3400, 32.5700), true),
            spot(5, "Ggaba Grove", 3.50, 5, "6:00 AM - 12:00 AM", "256-567-8901", "Ggaba Road, Kampala", (0.3550, 32.6100), false),
            spot(6, "Kawala Corner", 2.00, 3, "7:00 AM - 8:00 PM", "256-678-9012", "Kawala Street, Kampala", (0.3650, 32.5650), false),
            spot(7, "Makerere Mile", 3.25, 4, "8:00 AM - 10:00 PM", "256-789-0123", "Makerere Road, Kampala", (0.3200, 32.5800), true),
            spot(8, "Kampala Crest", 2.80, 4, "6:00 AM - 11:00 PM", "256-890-1234", "Kampala Crest, Kampala", (0.3500, 32.6000), false),
            spot(9, "Bwaise Boulevard", 2.30, 3, "7:00 AM - 9:00 PM", "256-901-2345", "Bwaise Lane, Kampala", (0.3600, 32.5900), false),
            spot(10, "Victoria Vista", 3.10, 5, "6:00 AM - 10:00 PM", "256-012-3456", "Victoria Road, Kampala", (0.3350, 32.5750), false),
        ];
        Self { spots }
    }
}

#[allow(clippy::too_many_arguments)]
fn spot(
    id: u32,
    name: &str,
    hourly_rate: f64,
    rating: u8,
    open_hours: &str,
    phone: &str,
    street: &str,
    (lat, lng): (f64, f64),
    filled_up: bool,
) -> ParkingSpot {
    ParkingSpot {
        id,
        name: name.to_string(),
        hourly_rate,
        rating,
        image_url: format!("https://picsum.photos/id/{}/400/300", 100 + id),
        open_hours: open_hours.to_string(),
        location: Coordinate::new(lat, lng),
        filled_up,
        phone: phone.to_string(),
        street: street.to_string(),
    }
}

use geo::{EuclideanDistance, HaversineDistance, Point};

use crate::models::{Coordinate, ParkingSpot};

/// Find the closest spot that is not filled up.
///
/// Distance is planar Euclidean in degree space, which is only meaningful for
/// a catalog covering a small area. Ties go to the spot that comes first in
/// catalog order.
pub fn resolve<'a>(target: &Coordinate, catalog: &'a [ParkingSpot]) -> Option<&'a ParkingSpot> {
    if !target.is_finite() {
        return None;
    }

    let target = to_point(target);
    let mut closest: Option<(&ParkingSpot, f64)> = None;

    for spot in catalog.iter().filter(|spot| !spot.filled_up) {
        let distance = target.euclidean_distance(&to_point(&spot.location));
        // Strictly closer only, so earlier spots win ties
        if closest.map_or(true, |(_, min_distance)| distance < min_distance) {
            closest = Some((spot, distance));
        }
    }

    closest.map(|(spot, _)| spot)
}

/// Like [`resolve`], also returning the approximate distance in meters.
/// The meter figure is for display only; ranking stays planar.
pub fn resolve_with_distance<'a>(
    target: &Coordinate,
    catalog: &'a [ParkingSpot],
) -> Option<(&'a ParkingSpot, f64)> {
    resolve(target, catalog).map(|spot| (spot, distance_meters(target, &spot.location)))
}

/// Calculate distance between two points in meters using Haversine formula
pub fn distance_meters(from: &Coordinate, to: &Coordinate) -> f64 {
    to_point(from).haversine_distance(&to_point(to))
}

fn to_point(coordinate: &Coordinate) -> Point<f64> {
    Point::new(coordinate.lng, coordinate.lat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Catalog;

    fn test_spot(id: u32, lat: f64, lng: f64, filled_up: bool) -> ParkingSpot {
        ParkingSpot {
            id,
            name: format!("Spot {}", id),
            hourly_rate: 1.0,
            rating: 3,
            image_url: String::new(),
            open_hours: String::new(),
            location: Coordinate::new(lat, lng),
            filled_up,
            phone: String::new(),
            street: String::new(),
        }
    }

    #[test]
    fn test_returns_closest_available() {
        let catalog = vec![test_spot(1, 0.0, 0.0, false), test_spot(2, 10.0, 10.0, false)];
        let spot = resolve(&Coordinate::new(1.0, 1.0), &catalog).unwrap();
        assert_eq!(spot.id, 1);
    }

    #[test]
    fn test_skips_filled_spots() {
        let catalog = vec![test_spot(1, 0.0, 0.0, true), test_spot(2, 10.0, 10.0, false)];
        let spot = resolve(&Coordinate::new(1.0, 1.0), &catalog).unwrap();
        assert_eq!(spot.id, 2);
    }

    #[test]
    fn test_empty_or_all_filled_returns_none() {
        assert!(resolve(&Coordinate::new(1.0, 1.0), &[]).is_none());

        let catalog = vec![test_spot(1, 0.0, 0.0, true), test_spot(2, 1.0, 1.0, true)];
        assert!(resolve(&Coordinate::new(1.0, 1.0), &catalog).is_none());
    }

    #[test]
    fn test_ties_go_to_first_in_catalog_order() {
        let catalog = vec![
            test_spot(1, 1.0, 0.0, false),
            test_spot(2, -1.0, 0.0, false),
            test_spot(3, 0.0, 1.0, false),
        ];
        let spot = resolve(&Coordinate::new(0.0, 0.0), &catalog).unwrap();
        assert_eq!(spot.id, 1);
    }

    #[test]
    fn test_never_returns_filled_spot_in_kampala() {
        let catalog = Catalog::kampala();
        for spot in catalog.spots() {
            // Targets sitting exactly on each spot, filled ones included
            let found = resolve(&spot.location, catalog.spots()).unwrap();
            assert!(!found.filled_up);
            if !spot.filled_up {
                assert_eq!(found.id, spot.id);
            }
        }
    }

    #[test]
    fn test_filled_target_resolves_to_neighbour() {
        let catalog = Catalog::kampala();
        // Bugolobi Bay (4) is full; Victoria Vista (10) is the closest open spot
        let bugolobi = catalog.get(4).unwrap().location;
        assert_eq!(resolve(&bugolobi, catalog.spots()).unwrap().id, 10);
    }

    #[test]
    fn test_non_finite_target() {
        let catalog = vec![test_spot(1, 0.0, 0.0, false)];
        assert!(resolve(&Coordinate::new(f64::NAN, 0.0), &catalog).is_none());
    }

    #[test]
    fn test_resolve_with_distance() {
        let catalog = vec![test_spot(1, 0.0, 0.0, false)];
        let (spot, meters) = resolve_with_distance(&Coordinate::new(0.001, 0.0), &catalog).unwrap();
        assert_eq!(spot.id, 1);
        // 0.001 degrees of latitude is roughly 111m
        assert!((meters - 111.0).abs() < 2.0);
    }
}

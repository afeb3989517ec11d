pub mod coordinate;
pub mod location;
pub mod place;
pub mod responses;
pub mod route;
pub mod spot;

// Re-export commonly used types
pub use coordinate::{parse_destination, Coordinate, CoordinateParseError};
pub use location::{GeolocationResult, LocationState};
pub use place::{Place, PlacePrediction, SessionToken, Viewport};
pub use route::{RouteAlternative, RouteLeg, RouteSummary, TextValue};
pub use spot::{Catalog, CatalogError, ParkingSpot};

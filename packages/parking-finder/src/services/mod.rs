pub mod directions;
pub mod geolocation;
pub mod live_route;
pub mod location_poller;
pub mod places;

#[cfg(test)]
pub(crate) mod test_support;

pub use directions::{DirectionsProvider, GoogleDirections, RouteError};
pub use geolocation::{GeolocationError, GeolocationProvider, GoogleGeolocation};
pub use live_route::{LiveRouteSummarizer, RouteSnapshot, RouteTracker};
pub use location_poller::LocationPoller;
pub use places::{GooglePlaces, Place, PlacePrediction, PlacesError, PlacesProvider, SessionToken};

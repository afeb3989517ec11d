pub mod nearest_spot;
pub mod route_summary;

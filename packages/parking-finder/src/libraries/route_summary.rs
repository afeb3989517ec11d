use crate::models::{RouteAlternative, RouteLeg, RouteSummary};

/// Strip everything from the first comma on, e.g. the city and country
pub fn short_address(address: &str) -> &str {
    address.split(',').next().unwrap_or(address)
}

pub fn summarize_leg(leg: &RouteLeg) -> RouteSummary {
    RouteSummary {
        start_address: short_address(&leg.start_address).to_string(),
        end_address: short_address(&leg.end_address).to_string(),
        distance: leg.distance.as_ref().map(|d| d.text.clone()),
        duration: leg.duration.as_ref().map(|d| d.text.clone()),
    }
}

/// Summary of the first leg of the alternative at `index`, if there is one
pub fn summarize(alternatives: &[RouteAlternative], index: usize) -> Option<RouteSummary> {
    alternatives
        .get(index)
        .and_then(|route| route.legs.first())
        .map(summarize_leg)
}

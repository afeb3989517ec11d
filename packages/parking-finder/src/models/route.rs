use serde::{Deserialize, Serialize};

/// Display text plus raw value as returned by the routing provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextValue {
    pub text: String,
    pub value: f64,
}

/// One point-to-point segment of a route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteLeg {
    pub start_address: String,
    pub end_address: String,
    #[serde(default)]
    pub distance: Option<TextValue>,
    #[serde(default)]
    pub duration: Option<TextValue>,
}

/// A candidate route between an origin and a destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteAlternative {
    #[serde(default)]
    pub summary: String,
    pub legs: Vec<RouteLeg>,
}

/// Human-readable summary of the selected route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub start_address: String,
    pub end_address: String,
    pub distance: Option<String>,
    pub duration: Option<String>,
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Both components are finite numbers. No range checks are applied.
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

impl FromStr for Coordinate {
    type Err = CoordinateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_destination(s)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoordinateParseError {
    #[error("Expected \"<lat>,<lng>\", got {0} part(s)")]
    WrongPartCount(usize),

    #[error("Invalid coordinate component: {0:?}")]
    InvalidNumber(String),
}

/// Parse a destination link parameter of the form `"<lat>,<lng>"`
pub fn parse_destination(param: &str) -> Result<Coordinate, CoordinateParseError> {
    let parts: Vec<&str> = param.split(',').collect();
    if parts.len() != 2 {
        return Err(CoordinateParseError::WrongPartCount(parts.len()));
    }

    let lat = parse_component(parts[0])?;
    let lng = parse_component(parts[1])?;

    Ok(Coordinate { lat, lng })
}

fn parse_component(raw: &str) -> Result<f64, CoordinateParseError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| CoordinateParseError::InvalidNumber(raw.to_string()))
}

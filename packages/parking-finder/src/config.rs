use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,

    // Google Maps Platform key shared by geolocation, directions and places
    pub google_maps_api_key: String,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_geolocation_url")]
    pub geolocation_url: String,

    #[serde(default = "default_directions_url")]
    pub directions_url: String,

    #[serde(default = "default_places_url")]
    pub places_url: String,

    // JSON spot catalog; the built-in Kampala catalog is used when unset
    #[serde(default)]
    pub catalog_path: Option<String>,

    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env::<Config>()
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn provider(&self) -> ProviderConfig {
        ProviderConfig {
            api_key: self.google_maps_api_key.clone(),
            timeout: self.http_timeout(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            google_maps_api_key: String::new(), // Must be provided via environment
            poll_interval_ms: default_poll_interval_ms(),
            geolocation_url: default_geolocation_url(),
            directions_url: default_directions_url(),
            places_url: default_places_url(),
            catalog_path: None,
            http_timeout_secs: default_http_timeout_secs(),
        }
    }
}

/// Settings handed to each provider client explicitly
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: String,
    pub timeout: Duration,
}

pub const USER_AGENT: &str = concat!("parking-finder/", env!("CARGO_PKG_VERSION"));

fn default_port() -> u16 {
    3000
}

fn default_poll_interval_ms() -> u64 {
    3000
}

fn default_geolocation_url() -> String {
    "https://www.googleapis.com/geolocation/v1/geolocate".to_string()
}

fn default_directions_url() -> String {
    "https://maps.googleapis.com/maps/api/directions/json".to_string()
}

fn default_places_url() -> String {
    "https://places.googleapis.com/v1".to_string()
}

fn default_http_timeout_secs() -> u64 {
    15
}

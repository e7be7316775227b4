//! Location model for geographic coordinates and metadata

use serde::{Deserialize, Serialize};

/// Label used when coordinates come straight from a geolocation source.
pub const CURRENT_POSITION_LABEL: &str = "Your location";

/// A place the weather can be looked up for
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Place name as returned by the geocoder
    pub name: String,
    /// Country code (ISO 3166-1 alpha-2)
    pub country_code: Option<String>,
    /// IANA timezone of the place
    pub timezone: Option<String>,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, name: String) -> Self {
        Self {
            latitude,
            longitude,
            name,
            country_code: None,
            timezone: None,
        }
    }

    /// Create location with country
    #[must_use]
    pub fn with_country(latitude: f64, longitude: f64, name: String, country_code: String) -> Self {
        Self {
            latitude,
            longitude,
            name,
            country_code: Some(country_code),
            timezone: None,
        }
    }

    /// Location for coordinates reported by a geolocation source
    #[must_use]
    pub fn current_position(latitude: f64, longitude: f64) -> Self {
        Self::new(latitude, longitude, CURRENT_POSITION_LABEL.to_string())
    }

    /// Display label, e.g. "Delhi, IN"
    #[must_use]
    pub fn label(&self) -> String {
        match self.country_code.as_deref() {
            Some(cc) if !cc.is_empty() => format!("{}, {}", self.name, cc),
            _ => self.name.clone(),
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

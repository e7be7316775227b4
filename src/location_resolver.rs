//! Location Resolution Module
//!
//! Turns a free-text place name into a `Location` through a geocoder.
//! Coordinates from a geolocation source skip this step entirely.

use crate::models::Location;
use crate::{Result, TripcastError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A single geocoder hit
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GeocodingMatch {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// ISO 3166-1 alpha-2 country code
    pub country_code: Option<String>,
    pub timezone: Option<String>,
}

impl From<GeocodingMatch> for Location {
    fn from(hit: GeocodingMatch) -> Self {
        let location = match hit.country_code {
            Some(cc) => Location::with_country(hit.latitude, hit.longitude, hit.name, cc),
            None => Location::new(hit.latitude, hit.longitude, hit.name),
        };
        Location {
            timezone: hit.timezone,
            ..location
        }
    }
}

/// Name → coordinates lookup, best match first
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn search(&self, name: &str) -> Result<Vec<GeocodingMatch>>;
}

/// Service for resolving location inputs
pub struct LocationResolver;

impl LocationResolver {
    /// Resolve a location name to coordinates via geocoding.
    ///
    /// Always takes the first (best) match; zero matches is `NotFound`.
    pub async fn resolve_by_name(geocoder: &dyn Geocoder, name: &str) -> Result<Location> {
        debug!("Geocoding location name: {}", name);

        let hit = geocoder
            .search(name)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                warn!("No results found for location '{}'", name);
                TripcastError::not_found(name)
            })?;

        debug!(
            "Found location: {} ({:.4}, {:.4})",
            hit.name, hit.latitude, hit.longitude
        );

        Ok(Location::from(hit))
    }

    /// Coordinates reported by a geolocation source, used as-is
    #[must_use]
    pub fn from_coordinates(latitude: f64, longitude: f64) -> Location {
        Location::current_position(latitude, longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticGeocoder(Vec<GeocodingMatch>);

    #[async_trait]
    impl Geocoder for StaticGeocoder {
        async fn search(&self, _name: &str) -> Result<Vec<GeocodingMatch>> {
            Ok(self.0.clone())
        }
    }

    struct BrokenGeocoder;

    #[async_trait]
    impl Geocoder for BrokenGeocoder {
        async fn search(&self, _name: &str) -> Result<Vec<GeocodingMatch>> {
            Err(TripcastError::lookup("connection reset"))
        }
    }

    fn hit(name: &str, cc: &str, lat: f64, lon: f64) -> GeocodingMatch {
        GeocodingMatch {
            name: name.to_string(),
            latitude: lat,
            longitude: lon,
            country_code: Some(cc.to_string()),
            timezone: Some("Europe/Paris".to_string()),
        }
    }

    #[tokio::test]
    async fn test_resolve_takes_first_match() {
        let geocoder = StaticGeocoder(vec![
            hit("Paris", "FR", 48.85341, 2.3488),
            hit("Paris", "US", 33.66094, -95.55551),
        ]);

        let location = LocationResolver::resolve_by_name(&geocoder, "Paris")
            .await
            .unwrap();

        assert_eq!(location.name, "Paris");
        assert_eq!(location.country_code.as_deref(), Some("FR"));
        assert_eq!(location.latitude, 48.85341);
        assert_eq!(location.longitude, 2.3488);
        assert_eq!(location.timezone.as_deref(), Some("Europe/Paris"));
        assert_eq!(location.label(), "Paris, FR");
    }

    #[tokio::test]
    async fn test_resolve_no_results_is_not_found() {
        let geocoder = StaticGeocoder(Vec::new());
        let err = LocationResolver::resolve_by_name(&geocoder, "Atlantis")
            .await
            .unwrap_err();
        assert!(matches!(err, TripcastError::NotFound { ref query } if query == "Atlantis"));
    }

    #[tokio::test]
    async fn test_resolve_propagates_lookup_errors() {
        let err = LocationResolver::resolve_by_name(&BrokenGeocoder, "Paris")
            .await
            .unwrap_err();
        assert!(matches!(err, TripcastError::Lookup { .. }));
    }

    #[tokio::test]
    async fn test_resolve_without_country_code() {
        let geocoder = StaticGeocoder(vec![GeocodingMatch {
            name: "Null Island".to_string(),
            latitude: 0.0,
            longitude: 0.0,
            country_code: None,
            timezone: Some("Etc/UTC".to_string()),
        }]);

        let location = LocationResolver::resolve_by_name(&geocoder, "Null Island")
            .await
            .unwrap();
        assert_eq!(location.label(), "Null Island");
        assert_eq!(location.timezone.as_deref(), Some("Etc/UTC"));
    }

    #[test]
    fn test_from_coordinates() {
        let location = LocationResolver::from_coordinates(46.8182, 8.2275);
        assert_eq!(location.latitude, 46.8182);
        assert_eq!(location.longitude, 8.2275);
        assert_eq!(location.label(), "Your location");
    }
}

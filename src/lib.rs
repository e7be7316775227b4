//! `tripcast` - weather lookup with a short forecast and travel advice
//!
//! Resolves a place name (or the user's position) to coordinates, fetches
//! current conditions and a daily forecast from Open-Meteo, and renders them
//! together with a travel advisory.

pub mod advisory;
pub mod config;
pub mod error;
pub mod geolocation;
pub mod location_resolver;
pub mod logging;
pub mod models;
pub mod presentation;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use advisory::{Severity, TravelAdvisory, advise};
pub use config::TripcastConfig;
pub use error::TripcastError;
pub use geolocation::{Coordinates, FixedPosition, GeolocationError, GeolocationSource, IpGeolocation};
pub use location_resolver::{Geocoder, GeocodingMatch, LocationResolver};
pub use models::{CurrentConditions, DailyForecastEntry, Location, WeatherReport};
pub use presentation::{Presenter, UserAction, ViewPhase, ViewState, WeatherView};
pub use weather::{OpenMeteoClient, WeatherSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TripcastError>;

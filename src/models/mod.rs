//! Data models for tripcast
//!
//! This module contains the core domain models organized by concern:
//! - Location: Geographic coordinates and place metadata
//! - Weather: Current conditions and their display formatting
//! - Forecast: Daily forecast entries and the combined report

pub mod forecast;
pub mod location;
pub mod weather;

// Re-export all public types for convenient access
pub use forecast::{DailyForecastEntry, WeatherReport};
pub use location::Location;
pub use weather::CurrentConditions;

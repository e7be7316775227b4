//! Configuration management for `tripcast`
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::TripcastError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Upper bound on forecast days the upstream will return.
pub const MAX_FORECAST_DAYS: usize = 16;

/// Root configuration structure for `tripcast`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TripcastConfig {
    /// Weather API configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Location and geolocation settings
    #[serde(default)]
    pub location: LocationConfig,
    /// Display settings
    #[serde(default)]
    pub display: DisplayConfig,
    /// Travel advisory settings
    #[serde(default)]
    pub advisory: AdvisoryConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Web server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Forecast endpoint
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,
    /// Geocoding endpoint
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
}

/// Location settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// City resolved when geolocation is unavailable or denied
    #[serde(default = "default_city")]
    pub default_city: String,
    /// Whether to attempt geolocation on page load
    #[serde(default = "default_geolocation")]
    pub geolocation: bool,
    /// IP geolocation endpoint
    #[serde(default = "default_geolocation_url")]
    pub geolocation_url: String,
}

/// Display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Number of forecast days rendered
    #[serde(default = "default_forecast_days")]
    pub forecast_days: usize,
}

/// How the advisory engine learns about storms
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StormPolicy {
    /// Storm flag is never raised; only wind and temperature rules apply
    #[default]
    Disabled,
    /// Storm flag follows thunderstorm weather codes
    FromWeatherCode,
}

/// Travel advisory settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvisoryConfig {
    #[serde(default)]
    pub storm_detection: StormPolicy,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Web server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
}

// Default value functions
fn default_forecast_url() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com/v1/search".to_string()
}

fn default_weather_timeout() -> u32 {
    30
}

fn default_city() -> String {
    "Delhi".to_string()
}

fn default_geolocation() -> bool {
    true
}

fn default_geolocation_url() -> String {
    "https://ipapi.co/json/".to_string()
}

fn default_forecast_days() -> usize {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            forecast_url: default_forecast_url(),
            geocoding_url: default_geocoding_url(),
            timeout_seconds: default_weather_timeout(),
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            default_city: default_city(),
            geolocation: default_geolocation(),
            geolocation_url: default_geolocation_url(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            forecast_days: default_forecast_days(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
        }
    }
}

impl TripcastConfig {
    /// Load configuration from a file (or the default path) and environment variables
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // TRIPCAST_WEATHER__TIMEOUT_SECONDS=10 style overrides
        builder = builder.add_source(
            Environment::with_prefix("TRIPCAST")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TripcastConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tripcast").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.weather.forecast_url.is_empty() {
            self.weather.forecast_url = default_forecast_url();
        }
        if self.weather.geocoding_url.is_empty() {
            self.weather.geocoding_url = default_geocoding_url();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_weather_timeout();
        }
        if self.location.default_city.trim().is_empty() {
            self.location.default_city = default_city();
        }
        if self.location.geolocation_url.is_empty() {
            self.location.geolocation_url = default_geolocation_url();
        }
        if self.display.forecast_days == 0 {
            self.display.forecast_days = default_forecast_days();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.server.host.is_empty() {
            self.server.host = default_server_host();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.weather.timeout_seconds > 300 {
            return Err(
                TripcastError::config("Weather API timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.display.forecast_days > MAX_FORECAST_DAYS {
            return Err(TripcastError::config(format!(
                "Forecast days cannot exceed {MAX_FORECAST_DAYS}"
            ))
            .into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TripcastError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TripcastError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("Forecast", &self.weather.forecast_url),
            ("Geocoding", &self.weather.geocoding_url),
            ("Geolocation", &self.location.geolocation_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(TripcastError::config(format!(
                    "{name} URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}

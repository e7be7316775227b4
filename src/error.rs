//! Error types and handling for the `tripcast` application

use thiserror::Error;

/// Main error type for the `tripcast` application
#[derive(Error, Debug)]
pub enum TripcastError {
    /// The geocoder returned no match for a place name
    #[error("Location not found: {query}")]
    NotFound { query: String },

    /// Transport or parse failure against an external lookup
    #[error("Lookup error: {message}")]
    Lookup { message: String },

    /// The weather response arrived but lacks the current-conditions block
    #[error("Weather unavailable: {message}")]
    WeatherUnavailable { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl TripcastError {
    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(query: S) -> Self {
        Self::NotFound {
            query: query.into(),
        }
    }

    /// Create a new lookup error
    pub fn lookup<S: Into<String>>(message: S) -> Self {
        Self::Lookup {
            message: message.into(),
        }
    }

    /// Create a new weather-unavailable error
    pub fn weather_unavailable<S: Into<String>>(message: S) -> Self {
        Self::WeatherUnavailable {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TripcastError::NotFound { .. } => "City not found".to_string(),
            TripcastError::Lookup { .. } => "Failed to fetch weather".to_string(),
            TripcastError::WeatherUnavailable { .. } => "Weather unavailable".to_string(),
            TripcastError::Validation { message } => message.clone(),
            TripcastError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            TripcastError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for TripcastError {
    fn from(err: reqwest::Error) -> Self {
        Self::lookup(err.to_string())
    }
}

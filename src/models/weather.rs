//! Current-conditions model and display methods

use serde::{Deserialize, Serialize};

/// Current weather conditions in fixed metric units
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CurrentConditions {
    /// Air temperature in Celsius
    pub temperature_c: f64,
    /// Apparent ("feels like") temperature in Celsius
    pub apparent_temperature_c: f64,
    /// WMO weather code
    pub weather_code: i32,
    /// Wind speed in km/h
    pub wind_speed_kmh: f64,
    /// Relative humidity percentage
    pub relative_humidity_pct: Option<i32>,
    /// Mean sea level pressure in hPa
    pub pressure_hpa: Option<f64>,
    /// Visibility in metres
    pub visibility_m: Option<f64>,
    /// Cloud cover percentage
    pub cloud_cover_pct: Option<i32>,
}

/// Round to the nearest integer, halves towards positive infinity.
#[must_use]
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

impl CurrentConditions {
    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{} °C", round_half_up(self.temperature_c))
    }

    #[must_use]
    pub fn format_feels_like(&self) -> String {
        format!("{} °C", round_half_up(self.apparent_temperature_c))
    }

    #[must_use]
    pub fn format_humidity(&self) -> String {
        match self.relative_humidity_pct {
            Some(h) => format!("{h}%"),
            None => "-%".to_string(),
        }
    }

    /// Format wind information
    #[must_use]
    pub fn format_wind(&self) -> String {
        format!("{} km/h", round_half_up(self.wind_speed_kmh))
    }

    /// Visibility in kilometres with one decimal
    #[must_use]
    pub fn format_visibility(&self) -> String {
        match self.visibility_m {
            Some(metres) => format!("{:.1} km", metres / 1000.0),
            None => "-- km".to_string(),
        }
    }

    /// Format atmospheric pressure with unit
    #[must_use]
    pub fn format_pressure(&self) -> String {
        match self.pressure_hpa {
            Some(p) => format!("{p} hPa"),
            None => "- hPa".to_string(),
        }
    }

    #[must_use]
    pub fn format_cloud_cover(&self) -> String {
        match self.cloud_cover_pct {
            Some(c) => format!("{c}%"),
            None => "--%".to_string(),
        }
    }
}

//! Open-Meteo API client
//!
//! Provides geocoding and forecast lookups against Open-Meteo (no API key
//! required). Each call is a single attempt; there is no retry or rate
//! limiting.

use crate::config::WeatherConfig;
use crate::location_resolver::{GeocodingMatch, Geocoder};
use crate::models::weather::round_half_up;
use crate::models::{CurrentConditions, DailyForecastEntry, WeatherReport};
use crate::weather::WeatherSource;
use crate::weather::codes::UNKNOWN_CODE;
use crate::{Result, TripcastError, VERSION};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

const CURRENT_FIELDS: [&str; 8] = [
    "temperature_2m",
    "apparent_temperature",
    "weather_code",
    "wind_speed_10m",
    "relative_humidity_2m",
    "pressure_msl",
    "visibility",
    "cloud_cover",
];

const DAILY_FIELDS: [&str; 5] = [
    "weather_code",
    "temperature_2m_max",
    "temperature_2m_min",
    "sunrise",
    "sunset",
];

/// Client for the Open-Meteo geocoding and forecast endpoints
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: Client,
    forecast_url: String,
    geocoding_url: String,
}

impl OpenMeteoClient {
    /// Create a client from the weather configuration
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_seconds.into());
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(format!("tripcast/{VERSION}"))
            .build()
            .map_err(|e| TripcastError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            forecast_url: config.forecast_url.clone(),
            geocoding_url: config.geocoding_url.clone(),
        })
    }

    /// Create a client pointed at custom endpoints
    pub fn with_base_urls(forecast_url: &str, geocoding_url: &str) -> Result<Self> {
        Self::new(&WeatherConfig {
            forecast_url: forecast_url.to_string(),
            geocoding_url: geocoding_url.to_string(),
            ..WeatherConfig::default()
        })
    }

    fn forecast_request_url(&self, latitude: f64, longitude: f64) -> String {
        format!(
            "{}?latitude={}&longitude={}&current={}&daily={}&timezone=auto&windspeed_unit=kmh&temperature_unit=celsius",
            self.forecast_url,
            latitude,
            longitude,
            CURRENT_FIELDS.join(","),
            DAILY_FIELDS.join(","),
        )
    }

    fn geocoding_request_url(&self, name: &str) -> String {
        format!(
            "{}?name={}&count=1&language=en&format=json",
            self.geocoding_url,
            urlencoding::encode(name)
        )
    }

    /// GET a URL and decode its JSON body
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let start_time = Instant::now();
        debug!("Open-Meteo request URL: {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!("Network error: {}", e);
            TripcastError::lookup(format!("Network error: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("HTTP error: {}", status);
            return Err(TripcastError::lookup(format!(
                "API request failed with status: {} - {}",
                status,
                status.canonical_reason().unwrap_or("Unknown error")
            )));
        }

        let body = response.json::<T>().await.map_err(|e| {
            error!("Failed to parse Open-Meteo response: {}", e);
            TripcastError::lookup(format!("Invalid response from Open-Meteo: {e}"))
        })?;

        let total_duration = start_time.elapsed();
        if total_duration.as_secs() > 5 {
            warn!(
                "Slow API response detected: {:.3}s",
                total_duration.as_secs_f64()
            );
        }

        Ok(body)
    }
}

#[async_trait]
impl Geocoder for OpenMeteoClient {
    #[instrument(skip(self))]
    async fn search(&self, name: &str) -> Result<Vec<GeocodingMatch>> {
        info!("Geocoding location: '{}'", name);
        let start_time = Instant::now();

        let url = self.geocoding_request_url(name);
        let response: api::GeocodingResponse = self.get_json(&url).await?;

        let matches: Vec<GeocodingMatch> = response
            .results
            .unwrap_or_default()
            .into_iter()
            .map(GeocodingMatch::from)
            .collect();

        info!(
            "Found {} geocoding results for '{}' in {:.3}s",
            matches.len(),
            name,
            start_time.elapsed().as_secs_f64()
        );

        Ok(matches)
    }
}

#[async_trait]
impl WeatherSource for OpenMeteoClient {
    #[instrument(skip(self))]
    async fn fetch(&self, latitude: f64, longitude: f64) -> Result<WeatherReport> {
        info!(
            "Getting weather for coordinates: {:.4}, {:.4}",
            latitude, longitude
        );
        let start_time = Instant::now();

        let url = self.forecast_request_url(latitude, longitude);
        let response: api::ForecastResponse = self.get_json(&url).await?;

        let report = response.into_report().ok_or_else(|| {
            warn!("Response has no current conditions block");
            TripcastError::weather_unavailable(format!(
                "No current weather data for {latitude:.4}, {longitude:.4}"
            ))
        })?;

        info!(
            "Retrieved current conditions and {} forecast days in {:.3}s",
            report.daily.len(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(report)
    }
}

/// Open-Meteo response structures
mod api {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct GeocodingResponse {
        pub results: Option<Vec<GeocodingResult>>,
    }

    #[derive(Debug, Deserialize)]
    pub struct GeocodingResult {
        pub name: String,
        pub latitude: f64,
        pub longitude: f64,
        pub country_code: Option<String>,
        pub timezone: Option<String>,
    }

    impl From<GeocodingResult> for GeocodingMatch {
        fn from(result: GeocodingResult) -> Self {
            GeocodingMatch {
                name: result.name,
                latitude: result.latitude,
                longitude: result.longitude,
                country_code: result.country_code,
                timezone: result.timezone,
            }
        }
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub timezone: Option<String>,
        pub current: Option<CurrentData>,
        pub daily: Option<DailyData>,
    }

    #[derive(Debug, Deserialize)]
    pub struct CurrentData {
        #[serde(rename = "temperature_2m")]
        pub temperature: f64,
        pub apparent_temperature: f64,
        pub weather_code: Option<i32>,
        #[serde(rename = "wind_speed_10m")]
        pub wind_speed: f64,
        #[serde(rename = "relative_humidity_2m")]
        pub relative_humidity: Option<f64>,
        pub pressure_msl: Option<f64>,
        pub visibility: Option<f64>,
        pub cloud_cover: Option<f64>,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    pub struct DailyData {
        pub time: Vec<String>,
        pub weather_code: Vec<Option<i32>>,
        #[serde(rename = "temperature_2m_max")]
        pub temperature_max: Vec<Option<f64>>,
        #[serde(rename = "temperature_2m_min")]
        pub temperature_min: Vec<Option<f64>>,
        pub sunrise: Vec<Option<String>>,
        pub sunset: Vec<Option<String>>,
    }

    fn parse_local_time(raw: Option<&Option<String>>) -> Option<NaiveDateTime> {
        let raw = raw?.as_deref()?;
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M").ok()
    }

    impl From<CurrentData> for CurrentConditions {
        fn from(c: CurrentData) -> Self {
            CurrentConditions {
                temperature_c: c.temperature,
                apparent_temperature_c: c.apparent_temperature,
                weather_code: c.weather_code.unwrap_or(UNKNOWN_CODE),
                wind_speed_kmh: c.wind_speed,
                relative_humidity_pct: c.relative_humidity.map(|h| round_half_up(h) as i32),
                pressure_hpa: c.pressure_msl,
                visibility_m: c.visibility,
                cloud_cover_pct: c.cloud_cover.map(|c| round_half_up(c) as i32),
            }
        }
    }

    impl DailyData {
        /// Zip the parallel arrays into entries, skipping incomplete days
        pub fn into_entries(self) -> Vec<DailyForecastEntry> {
            self.time
                .iter()
                .enumerate()
                .filter_map(|(i, day)| {
                    let date = NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()?;
                    Some(DailyForecastEntry {
                        date,
                        weather_code: (*self.weather_code.get(i)?)?,
                        temp_max_c: (*self.temperature_max.get(i)?)?,
                        temp_min_c: (*self.temperature_min.get(i)?)?,
                        sunrise: parse_local_time(self.sunrise.get(i)),
                        sunset: parse_local_time(self.sunset.get(i)),
                    })
                })
                .collect()
        }
    }

    impl ForecastResponse {
        /// `None` when the current-conditions block is missing
        pub fn into_report(self) -> Option<WeatherReport> {
            let current = self.current?;
            Some(WeatherReport {
                current: current.into(),
                daily: self.daily.map(DailyData::into_entries).unwrap_or_default(),
                timezone: self.timezone,
            })
        }
    }
}

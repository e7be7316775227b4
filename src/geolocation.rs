//! Current-position lookup
//!
//! A geolocation source either yields coordinates or reports why it could
//! not. Callers treat every failure the same way and fall back to the
//! configured default city.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeolocationError {
    #[error("Geolocation permission denied")]
    Denied,

    #[error("Geolocation unavailable: {0}")]
    Unavailable(String),
}

/// Something that knows where the user is
#[async_trait]
pub trait GeolocationSource: Send + Sync {
    async fn locate(&self) -> Result<Coordinates, GeolocationError>;
}

/// Coordinates supplied up front, e.g. from CLI flags or query parameters
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub Coordinates);

impl FixedPosition {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self(Coordinates {
            latitude,
            longitude,
        })
    }
}

#[async_trait]
impl GeolocationSource for FixedPosition {
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        Ok(self.0)
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
    city: Option<String>,
}

/// IP-based position lookup (ipapi.co-compatible JSON)
#[derive(Debug, Clone)]
pub struct IpGeolocation {
    client: Client,
    url: String,
}

impl IpGeolocation {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, GeolocationError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(format!("tripcast/{}", crate::VERSION))
            .build()
            .map_err(|e| GeolocationError::Unavailable(e.to_string()))?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl GeolocationSource for IpGeolocation {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        let response = self.client.get(&self.url).send().await.map_err(|e| {
            warn!("IP geolocation request failed: {}", e);
            GeolocationError::Unavailable(e.to_string())
        })?;

        match response.status() {
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
                warn!("IP geolocation refused: {}", response.status());
                return Err(GeolocationError::Denied);
            }
            status if !status.is_success() => {
                return Err(GeolocationError::Unavailable(format!("HTTP {status}")));
            }
            _ => {}
        }

        let body: IpApiResponse = response
            .json()
            .await
            .map_err(|e| GeolocationError::Unavailable(format!("Invalid response: {e}")))?;

        let (Some(latitude), Some(longitude)) = (body.latitude, body.longitude) else {
            return Err(GeolocationError::Unavailable(
                "Response has no coordinates".to_string(),
            ));
        };

        debug!("IP geolocation city: {:?}", body.city);
        info!("Located at {:.4}, {:.4}", latitude, longitude);

        Ok(Coordinates {
            latitude,
            longitude,
        })
    }
}

use async_trait::async_trait;

use crate::Result;
use crate::models::WeatherReport;

pub mod codes;
pub mod open_meteo;

pub use codes::{Symbol, condition_text, symbol_for};
pub use open_meteo::OpenMeteoClient;

/// Anything that can produce current conditions and a daily forecast for a point.
///
/// Implementations make a single attempt: failures surface immediately as
/// `Lookup` (transport/parse) or `WeatherUnavailable` (no current block).
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn fetch(&self, latitude: f64, longitude: f64) -> Result<WeatherReport>;
}

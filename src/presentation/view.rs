//! View state handed to renderers

use super::icon::render_icon;
use crate::advisory::{TravelAdvisory, advise, storm_detected};
use crate::config::StormPolicy;
use crate::models::forecast::format_clock;
use crate::models::{DailyForecastEntry, Location, WeatherReport};
use crate::weather::{Symbol, condition_text, symbol_for};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewPhase {
    #[default]
    Idle,
    Loading,
    Displayed,
    Errored,
}

/// One forecast tile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastItem {
    pub weekday: String,
    pub symbol: Symbol,
    pub icon_uri: String,
    pub condition: String,
    pub range: String,
}

impl From<&DailyForecastEntry> for ForecastItem {
    fn from(entry: &DailyForecastEntry) -> Self {
        let symbol = symbol_for(entry.weather_code);
        Self {
            weekday: entry.weekday(),
            symbol,
            icon_uri: render_icon(symbol).data_uri(),
            condition: condition_text(entry.weather_code).to_string(),
            range: entry.format_range(),
        }
    }
}

/// Display-ready text for one successful lookup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherView {
    pub place: String,
    pub date: String,
    pub symbol: Symbol,
    pub icon_uri: String,
    pub temperature: String,
    pub condition: String,
    pub humidity: String,
    pub wind: String,
    pub feels_like: String,
    pub visibility: String,
    pub pressure: String,
    pub cloud_cover: String,
    pub sunrise: String,
    pub sunset: String,
    pub forecast: Vec<ForecastItem>,
    pub advisory: TravelAdvisory,
}

impl WeatherView {
    #[must_use]
    pub fn build(
        location: &Location,
        report: &WeatherReport,
        now: DateTime<Utc>,
        forecast_days: usize,
        storm_policy: StormPolicy,
    ) -> Self {
        let current = &report.current;
        let symbol = symbol_for(current.weather_code);
        let today = report.today();

        let advisory = advise(
            current.temperature_c,
            current.wind_speed_kmh,
            storm_detected(storm_policy, current.weather_code),
        );

        Self {
            place: location.label(),
            date: report.date_label(now),
            symbol,
            icon_uri: render_icon(symbol).data_uri(),
            temperature: current.format_temperature(),
            condition: condition_text(current.weather_code).to_string(),
            humidity: current.format_humidity(),
            wind: current.format_wind(),
            feels_like: current.format_feels_like(),
            visibility: current.format_visibility(),
            pressure: current.format_pressure(),
            cloud_cover: current.format_cloud_cover(),
            sunrise: format_clock(today.and_then(|d| d.sunrise)),
            sunset: format_clock(today.and_then(|d| d.sunset)),
            forecast: report
                .forecast(forecast_days)
                .iter()
                .map(ForecastItem::from)
                .collect(),
            advisory,
        }
    }
}

/// Everything the rendered view shows
#[derive(Debug, Clone, Default, Serialize)]
pub struct ViewState {
    pub phase: ViewPhase,
    /// Last successful render; kept across failed cycles
    #[serde(skip)]
    pub view: Option<WeatherView>,
    pub error: Option<String>,
}

impl ViewState {
    /// Weather to draw right now; nothing while an error is showing
    #[must_use]
    pub fn visible_view(&self) -> Option<&WeatherView> {
        match self.phase {
            ViewPhase::Displayed => self.view.as_ref(),
            _ => None,
        }
    }
}

//! Orchestrates resolve → fetch → render cycles for one view

use super::view::{ViewPhase, ViewState, WeatherView};
use crate::config::{StormPolicy, TripcastConfig};
use crate::geolocation::GeolocationSource;
use crate::location_resolver::{Geocoder, LocationResolver};
use crate::models::{Location, WeatherReport};
use crate::weather::{OpenMeteoClient, WeatherSource};
use crate::{Result, TripcastError};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};

const WARNING_MARKER: &str = "⚠️";
const ERROR_MARKER: &str = "❌";

/// Input events from the search control
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    /// Search button pressed with the field's current text
    Search(String),
    /// Key pressed in the search field
    KeyDown { key: String, input: String },
}

#[derive(Debug, Clone)]
pub struct PresenterSettings {
    pub default_city: String,
    pub forecast_days: usize,
    pub storm_policy: StormPolicy,
}

impl From<&TripcastConfig> for PresenterSettings {
    fn from(config: &TripcastConfig) -> Self {
        Self {
            default_city: config.location.default_city.clone(),
            forecast_days: config.display.forecast_days,
            storm_policy: config.advisory.storm_detection,
        }
    }
}

fn validate_query(input: &str) -> Result<&str> {
    let city = input.trim();
    if city.is_empty() {
        return Err(TripcastError::validation("Please enter a city name!"));
    }
    Ok(city)
}

enum Target {
    Place(String),
    Position(Location),
}

pub struct Presenter {
    geocoder: Arc<dyn Geocoder>,
    weather: Arc<dyn WeatherSource>,
    settings: PresenterSettings,
    state: ViewState,
}

impl Presenter {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        weather: Arc<dyn WeatherSource>,
        settings: PresenterSettings,
    ) -> Self {
        Self {
            geocoder,
            weather,
            settings,
            state: ViewState::default(),
        }
    }

    /// Presenter backed by Open-Meteo for both lookups
    pub fn from_config(config: &TripcastConfig) -> Result<Self> {
        let client = Arc::new(OpenMeteoClient::new(&config.weather)?);
        Ok(Self::new(client.clone(), client, config.into()))
    }

    #[must_use]
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Handle one input event; non-submitting keys are ignored
    pub async fn dispatch(&mut self, action: UserAction) -> &ViewState {
        match action {
            UserAction::Search(input) => self.submit_search(&input).await,
            UserAction::KeyDown { key, input } if key == "Enter" => {
                self.submit_search(&input).await;
            }
            UserAction::KeyDown { key, .. } => debug!("Ignoring key '{}'", key),
        }
        &self.state
    }

    /// Look up the typed city. Blank input only sets a warning.
    pub async fn submit_search(&mut self, input: &str) {
        match validate_query(input) {
            Ok(city) => self.run_cycle(Target::Place(city.to_string())).await,
            Err(e) => {
                debug!("Rejected search input: {}", e);
                self.state.error = Some(format!("{WARNING_MARKER} {}", e.user_message()));
            }
        }
    }

    /// Initial load: current position if available, otherwise the default city
    pub async fn load_page(&mut self, geolocation: Option<&dyn GeolocationSource>) {
        let target = match geolocation {
            Some(source) => match source.locate().await {
                Ok(coords) => Target::Position(LocationResolver::from_coordinates(
                    coords.latitude,
                    coords.longitude,
                )),
                Err(e) => {
                    info!("{}, falling back to {}", e, self.settings.default_city);
                    Target::Place(self.settings.default_city.clone())
                }
            },
            None => Target::Place(self.settings.default_city.clone()),
        };
        self.run_cycle(target).await;
    }

    async fn lookup(&self, target: Target) -> Result<(Location, WeatherReport)> {
        let location = match target {
            Target::Place(name) => {
                LocationResolver::resolve_by_name(self.geocoder.as_ref(), &name).await?
            }
            Target::Position(location) => location,
        };
        let report = self
            .weather
            .fetch(location.latitude, location.longitude)
            .await?;
        Ok((location, report))
    }

    async fn run_cycle(&mut self, target: Target) {
        self.state.phase = ViewPhase::Loading;

        match self.lookup(target).await {
            Ok((location, report)) => {
                let view = WeatherView::build(
                    &location,
                    &report,
                    Utc::now(),
                    self.settings.forecast_days,
                    self.settings.storm_policy,
                );
                info!(
                    "Displaying weather for {} ({})",
                    view.place,
                    location.format_coordinates()
                );
                self.state.view = Some(view);
                self.state.error = None;
                self.state.phase = ViewPhase::Displayed;
            }
            Err(e) => self.fail(&e),
        }
    }

    fn fail(&mut self, error: &TripcastError) {
        warn!("Weather cycle failed: {}", error);
        self.state.error = Some(format!("{ERROR_MARKER} {}", error.user_message()));
        self.state.phase = ViewPhase::Errored;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisory::Severity;
    use crate::geolocation::{Coordinates, FixedPosition, GeolocationError};
    use crate::location_resolver::GeocodingMatch;
    use crate::models::{CurrentConditions, DailyForecastEntry};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeGeocoder {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Geocoder for FakeGeocoder {
        async fn search(&self, name: &str) -> Result<Vec<GeocodingMatch>> {
            self.calls.lock().unwrap().push(name.to_string());
            match name {
                "Delhi" => Ok(vec![GeocodingMatch {
                    name: "Delhi".to_string(),
                    latitude: 28.65195,
                    longitude: 77.23149,
                    country_code: Some("IN".to_string()),
                    timezone: Some("Asia/Kolkata".to_string()),
                }]),
                "London" => Ok(vec![GeocodingMatch {
                    name: "London".to_string(),
                    latitude: 51.50853,
                    longitude: -0.12574,
                    country_code: Some("GB".to_string()),
                    timezone: Some("Europe/London".to_string()),
                }]),
                "Offline" => Err(TripcastError::lookup("connection refused")),
                _ => Ok(Vec::new()),
            }
        }
    }

    struct FakeWeather {
        calls: AtomicUsize,
        available: AtomicBool,
        days: u32,
    }

    impl FakeWeather {
        fn new(days: u32) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                available: AtomicBool::new(true),
                days,
            }
        }

        fn unavailable() -> Self {
            let weather = Self::new(0);
            weather.available.store(false, Ordering::SeqCst);
            weather
        }
    }

    #[async_trait]
    impl WeatherSource for FakeWeather {
        async fn fetch(&self, _latitude: f64, _longitude: f64) -> Result<WeatherReport> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.available.load(Ordering::SeqCst) {
                return Err(TripcastError::weather_unavailable("no current block"));
            }
            Ok(WeatherReport {
                current: CurrentConditions {
                    temperature_c: 21.0,
                    apparent_temperature_c: 21.0,
                    weather_code: 1,
                    wind_speed_kmh: 8.0,
                    relative_humidity_pct: Some(50),
                    pressure_hpa: Some(1011.0),
                    visibility_m: Some(10000.0),
                    cloud_cover_pct: Some(20),
                },
                daily: (0..self.days)
                    .map(|i| DailyForecastEntry {
                        date: NaiveDate::from_ymd_opt(2026, 10, 19 + i).unwrap(),
                        weather_code: 0,
                        temp_min_c: 15.0,
                        temp_max_c: 25.0,
                        sunrise: None,
                        sunset: None,
                    })
                    .collect(),
                timezone: None,
            })
        }
    }

    struct DeniedPosition;

    #[async_trait]
    impl GeolocationSource for DeniedPosition {
        async fn locate(&self) -> std::result::Result<Coordinates, GeolocationError> {
            Err(GeolocationError::Denied)
        }
    }

    fn settings() -> PresenterSettings {
        PresenterSettings {
            default_city: "Delhi".to_string(),
            forecast_days: 5,
            storm_policy: StormPolicy::Disabled,
        }
    }

    fn setup(
        weather: FakeWeather,
    ) -> (Presenter, Arc<FakeGeocoder>, Arc<FakeWeather>) {
        let geocoder = Arc::new(FakeGeocoder::default());
        let weather = Arc::new(weather);
        let presenter = Presenter::new(geocoder.clone(), weather.clone(), settings());
        (presenter, geocoder, weather)
    }

    #[tokio::test]
    async fn test_initial_state_is_idle() {
        let (presenter, _, _) = setup(FakeWeather::new(5));
        assert_eq!(presenter.state().phase, ViewPhase::Idle);
        assert!(presenter.state().error.is_none());
    }

    #[tokio::test]
    async fn test_search_displays_weather() {
        let (mut presenter, geocoder, _) = setup(FakeWeather::new(7));

        let state = presenter
            .dispatch(UserAction::Search("  London ".to_string()))
            .await;

        assert_eq!(state.phase, ViewPhase::Displayed);
        assert!(state.error.is_none());
        let view = state.visible_view().unwrap();
        assert_eq!(view.place, "London, GB");
        assert_eq!(view.forecast.len(), 5);
        assert_eq!(view.advisory.severity, Severity::Good);
        assert_eq!(*geocoder.calls.lock().unwrap(), vec!["London".to_string()]);
    }

    #[tokio::test]
    async fn test_empty_search_makes_no_calls() {
        let (mut presenter, geocoder, weather) = setup(FakeWeather::new(5));

        let state = presenter.dispatch(UserAction::Search("   ".to_string())).await;

        assert_eq!(state.error.as_deref(), Some("⚠️ Please enter a city name!"));
        assert_eq!(state.phase, ViewPhase::Idle);
        assert!(geocoder.calls.lock().unwrap().is_empty());
        assert_eq!(weather.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_enter_key_submits_other_keys_do_not() {
        let (mut presenter, geocoder, _) = setup(FakeWeather::new(5));

        presenter
            .dispatch(UserAction::KeyDown {
                key: "a".to_string(),
                input: "London".to_string(),
            })
            .await;
        assert_eq!(presenter.state().phase, ViewPhase::Idle);
        assert!(geocoder.calls.lock().unwrap().is_empty());

        let state = presenter
            .dispatch(UserAction::KeyDown {
                key: "Enter".to_string(),
                input: "London".to_string(),
            })
            .await;
        assert_eq!(state.phase, ViewPhase::Displayed);
    }

    #[tokio::test]
    async fn test_unknown_city_shows_error_and_hides_previous_view() {
        let (mut presenter, _, weather) = setup(FakeWeather::new(5));

        presenter.submit_search("London").await;
        assert!(presenter.state().visible_view().is_some());

        presenter.submit_search("Atlantis").await;
        let state = presenter.state();
        assert_eq!(state.phase, ViewPhase::Errored);
        assert_eq!(state.error.as_deref(), Some("❌ City not found"));
        assert!(state.visible_view().is_none());
        assert_eq!(state.view.as_ref().unwrap().place, "London, GB");
        assert_eq!(weather.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_lookup_and_weather_failures() {
        let (mut presenter, _, _) = setup(FakeWeather::new(5));
        presenter.submit_search("Offline").await;
        assert_eq!(
            presenter.state().error.as_deref(),
            Some("❌ Failed to fetch weather")
        );

        let (mut presenter, _, _) = setup(FakeWeather::unavailable());
        presenter.submit_search("London").await;
        assert_eq!(presenter.state().phase, ViewPhase::Errored);
        assert_eq!(
            presenter.state().error.as_deref(),
            Some("❌ Weather unavailable")
        );
    }

    #[tokio::test]
    async fn test_weather_unavailable_keeps_previous_view_hidden() {
        let (mut presenter, _, weather) = setup(FakeWeather::new(5));

        presenter.submit_search("London").await;
        assert_eq!(presenter.state().phase, ViewPhase::Displayed);
        let previous = presenter.state().view.clone();

        weather.available.store(false, Ordering::SeqCst);
        presenter.submit_search("Delhi").await;

        let state = presenter.state();
        assert_eq!(state.phase, ViewPhase::Errored);
        assert_eq!(state.error.as_deref(), Some("❌ Weather unavailable"));
        assert_eq!(state.view, previous);
        assert!(state.visible_view().is_none());
        assert_eq!(weather.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_success_clears_previous_error() {
        let (mut presenter, _, _) = setup(FakeWeather::new(5));
        presenter.submit_search("Atlantis").await;
        assert!(presenter.state().error.is_some());

        presenter.submit_search("London").await;
        assert!(presenter.state().error.is_none());
        assert_eq!(presenter.state().phase, ViewPhase::Displayed);
    }

    #[tokio::test]
    async fn test_load_page_with_position_skips_geocoder() {
        let (mut presenter, geocoder, weather) = setup(FakeWeather::new(5));

        let position = FixedPosition::new(47.37, 8.54);
        presenter.load_page(Some(&position)).await;

        let view = presenter.state().visible_view().unwrap();
        assert_eq!(view.place, "Your location");
        assert!(geocoder.calls.lock().unwrap().is_empty());
        assert_eq!(weather.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_load_page_falls_back_to_default_city() {
        let (mut presenter, geocoder, _) = setup(FakeWeather::new(5));
        presenter.load_page(Some(&DeniedPosition)).await;
        assert_eq!(presenter.state().visible_view().unwrap().place, "Delhi, IN");
        assert_eq!(*geocoder.calls.lock().unwrap(), vec!["Delhi".to_string()]);

        let (mut presenter, geocoder, _) = setup(FakeWeather::new(5));
        presenter.load_page(None).await;
        assert_eq!(presenter.state().phase, ViewPhase::Displayed);
        assert_eq!(*geocoder.calls.lock().unwrap(), vec!["Delhi".to_string()]);
    }
}

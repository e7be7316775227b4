use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    extract::{Query, State},
    response::{Html, Json},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use crate::config::TripcastConfig;
use crate::geolocation::FixedPosition;
use crate::location_resolver::Geocoder;
use crate::presentation::html::render_page;
use crate::presentation::{
    Presenter, PresenterSettings, UserAction, ViewPhase, ViewState, WeatherView,
};
use crate::weather::{OpenMeteoClient, WeatherSource};

/// Lookup clients shared by all requests. Each request gets its own
/// presenter, so view state never crosses between clients.
#[derive(Clone)]
pub struct AppState {
    geocoder: Arc<dyn Geocoder>,
    weather: Arc<dyn WeatherSource>,
    settings: PresenterSettings,
}

impl AppState {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        weather: Arc<dyn WeatherSource>,
        settings: PresenterSettings,
    ) -> Self {
        Self {
            geocoder,
            weather,
            settings,
        }
    }

    /// State backed by Open-Meteo for both lookups
    pub fn from_config(config: &TripcastConfig) -> crate::Result<Self> {
        let client = Arc::new(OpenMeteoClient::new(&config.weather)?);
        Ok(Self::new(client.clone(), client, config.into()))
    }

    fn presenter(&self) -> Presenter {
        Presenter::new(
            self.geocoder.clone(),
            self.weather.clone(),
            self.settings.clone(),
        )
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct WeatherQuery {
    pub city: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct WeatherResponse {
    pub phase: ViewPhase,
    pub error: Option<String>,
    pub view: Option<WeatherView>,
}

impl From<&ViewState> for WeatherResponse {
    fn from(state: &ViewState) -> Self {
        Self {
            phase: state.phase,
            error: state.error.clone(),
            view: state.visible_view().cloned(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(page))
        .route("/api/weather", get(weather))
        .layer(cors)
        .with_state(state)
}

/// `city` is a search submission; `lat`/`lon` are the browser's position.
/// With neither, the page loads the default city.
async fn run_query(state: &AppState, query: &WeatherQuery) -> ViewState {
    let mut presenter = state.presenter();
    match (&query.city, query.lat, query.lon) {
        (Some(city), _, _) => {
            presenter.dispatch(UserAction::Search(city.clone())).await;
        }
        (None, Some(lat), Some(lon)) => {
            presenter.load_page(Some(&FixedPosition::new(lat, lon))).await;
        }
        _ => presenter.load_page(None).await,
    }
    presenter.state().clone()
}

async fn page(State(state): State<AppState>, Query(query): Query<WeatherQuery>) -> Html<String> {
    let view_state = run_query(&state, &query).await;
    Html(render_page(&view_state, query.city.as_deref().unwrap_or_default()).into_string())
}

async fn weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Json<WeatherResponse> {
    let view_state = run_query(&state, &query).await;
    Json(WeatherResponse::from(&view_state))
}

pub async fn run(config: &TripcastConfig) -> anyhow::Result<()> {
    let app = router(AppState::from_config(config)?);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://{}", addr);
    axum::serve(listener, app).await.context("Web server failed")?;
    Ok(())
}

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use tripcast::config::TripcastConfig;
use tripcast::geolocation::{FixedPosition, GeolocationSource, IpGeolocation};
use tripcast::presentation::terminal::render_text;
use tripcast::presentation::{Presenter, UserAction, ViewPhase, ViewState};
use tripcast::web::{self, WeatherResponse};

/// Weather lookup with current conditions, a short forecast and travel advice
#[derive(Parser)]
#[command(name = "tripcast", version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults to <config dir>/tripcast/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show weather for a city, given coordinates or the current position
    Weather {
        /// City name to search for
        #[arg(short, long, conflicts_with_all = ["lat", "lon"])]
        location: Option<String>,

        /// Latitude (-90 to 90)
        #[arg(long, allow_hyphen_values = true, requires = "lon")]
        lat: Option<f64>,

        /// Longitude (-180 to 180)
        #[arg(long, allow_hyphen_values = true, requires = "lat")]
        lon: Option<f64>,

        /// Skip IP geolocation and use the default city
        #[arg(long)]
        no_geolocate: bool,

        /// Print the view as JSON
        #[arg(long)]
        json: bool,
    },
    /// Read city names from stdin, one search per line
    Interactive,
    /// Serve the HTML page and JSON API
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(short, long)]
        port: Option<u16>,
    },
}

fn ip_geolocation(config: &TripcastConfig) -> Option<IpGeolocation> {
    if !config.location.geolocation {
        return None;
    }
    let timeout = Duration::from_secs(config.weather.timeout_seconds.into());
    IpGeolocation::new(&config.location.geolocation_url, timeout)
        .inspect_err(|e| warn!("IP geolocation disabled: {}", e))
        .ok()
}

fn print_state(state: &ViewState, json: bool) -> Result<()> {
    if json {
        let body = serde_json::to_string_pretty(&WeatherResponse::from(state))
            .context("Failed to serialize view")?;
        println!("{body}");
    } else {
        print!("{}", render_text(state));
    }
    Ok(())
}

async fn weather(
    config: &TripcastConfig,
    location: Option<String>,
    coordinates: Option<(f64, f64)>,
    no_geolocate: bool,
    json: bool,
) -> Result<ExitCode> {
    let mut presenter = Presenter::from_config(config)?;

    match (location, coordinates) {
        (Some(name), _) => {
            debug!("Fetching weather for: {}", name);
            presenter.dispatch(UserAction::Search(name)).await;
        }
        (None, Some((lat, lon))) => {
            presenter.load_page(Some(&FixedPosition::new(lat, lon))).await;
        }
        (None, None) => {
            let source = if no_geolocate {
                None
            } else {
                ip_geolocation(config)
            };
            presenter
                .load_page(source.as_ref().map(|s| s as &dyn GeolocationSource))
                .await;
        }
    }

    print_state(presenter.state(), json)?;
    Ok(if presenter.state().phase == ViewPhase::Displayed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn interactive(config: &TripcastConfig) -> Result<()> {
    let mut presenter = Presenter::from_config(config)?;

    let source = ip_geolocation(config);
    presenter
        .load_page(source.as_ref().map(|s| s as &dyn GeolocationSource))
        .await;
    print!("{}", render_text(presenter.state()));

    eprintln!("\nEnter a city name (Ctrl-D to quit)");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let state = presenter
            .dispatch(UserAction::KeyDown {
                key: "Enter".to_string(),
                input: line,
            })
            .await;
        println!();
        print!("{}", render_text(state));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = TripcastConfig::load_from_path(cli.config.clone())
        .context("Failed to load configuration")?;
    tripcast::logging::init(&config.logging, cli.verbose);
    debug!("Loaded configuration: {:?}", config);

    match cli.command {
        Command::Weather {
            location,
            lat,
            lon,
            no_geolocate,
            json,
        } => weather(&config, location, lat.zip(lon), no_geolocate, json).await,
        Command::Interactive => {
            interactive(&config).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            web::run(&config).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

//! Tracing subscriber setup

use crate::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Filter directive for the configured level; `verbose` forces debug
fn directive(config: &LoggingConfig, verbose: bool) -> String {
    let level = if verbose { "debug" } else { config.level.as_str() };
    format!("{}={level}", env!("CARGO_CRATE_NAME"))
}

/// Install the global subscriber. `RUST_LOG` takes precedence over config.
pub fn init(config: &LoggingConfig, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(directive(config, verbose))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive(config, false)))
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = match config.format.as_str() {
        "json" => builder.json().try_init(),
        _ => builder.pretty().try_init(),
    };

    if let Err(e) = result {
        eprintln!("Logging already initialised: {e}");
    }
}

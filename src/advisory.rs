//! Travel advisory engine
//!
//! A pure function of the current measurements. Rules are checked top to
//! bottom and the first match wins.

use crate::config::StormPolicy;
use crate::weather::{Symbol, symbol_for};
use serde::{Deserialize, Serialize};

const WIND_LIMIT_KMH: f64 = 50.0;
const FREEZING_C: f64 = 0.0;
const HEAT_C: f64 = 38.0;

/// Travel advisory urgency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Good,
    Warn,
    Bad,
}

impl Severity {
    /// Style class used by the rendered view
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Warn => "warn",
            Self::Bad => "bad",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelAdvisory {
    pub message: String,
    pub severity: Severity,
}

impl TravelAdvisory {
    fn new(message: &str, severity: Severity) -> Self {
        Self {
            message: message.to_string(),
            severity,
        }
    }
}

/// Derive travel advice from temperature, wind and the storm flag
#[must_use]
pub fn advise(temperature_c: f64, wind_speed_kmh: f64, storm_detected: bool) -> TravelAdvisory {
    if storm_detected || wind_speed_kmh >= WIND_LIMIT_KMH {
        TravelAdvisory::new(
            "Not recommended: Stormy or very windy conditions expected.",
            Severity::Bad,
        )
    } else if temperature_c <= FREEZING_C {
        TravelAdvisory::new(
            "Caution: Freezing temperatures may cause icy roads.",
            Severity::Warn,
        )
    } else if temperature_c >= HEAT_C {
        TravelAdvisory::new(
            "Caution: Very hot. Stay hydrated and limit sun exposure.",
            Severity::Warn,
        )
    } else {
        TravelAdvisory::new(
            "Good to go: Weather looks favorable for travel.",
            Severity::Good,
        )
    }
}

/// Storm flag for a weather code under the configured policy
#[must_use]
pub fn storm_detected(policy: StormPolicy, weather_code: i32) -> bool {
    match policy {
        StormPolicy::Disabled => false,
        StormPolicy::FromWeatherCode => symbol_for(weather_code) == Symbol::Thunderstorm,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(-5.0, 10.0, false, Severity::Warn, "Caution: Freezing")]
    #[case(0.0, 10.0, false, Severity::Warn, "Caution: Freezing")]
    #[case(40.0, 10.0, false, Severity::Warn, "Caution: Very hot")]
    #[case(38.0, 49.9, false, Severity::Warn, "Caution: Very hot")]
    #[case(20.0, 60.0, false, Severity::Bad, "Not recommended")]
    #[case(-10.0, 50.0, false, Severity::Bad, "Not recommended")]
    #[case(20.0, 10.0, true, Severity::Bad, "Not recommended")]
    #[case(20.0, 10.0, false, Severity::Good, "Good to go")]
    #[case(0.1, 49.9, false, Severity::Good, "Good to go")]
    fn test_advise_rules(
        #[case] temperature: f64,
        #[case] wind: f64,
        #[case] storm: bool,
        #[case] severity: Severity,
        #[case] prefix: &str,
    ) {
        let advisory = advise(temperature, wind, storm);
        assert_eq!(advisory.severity, severity);
        assert!(
            advisory.message.starts_with(prefix),
            "unexpected message: {}",
            advisory.message
        );
    }

    #[test]
    fn test_storm_policy() {
        assert!(!storm_detected(StormPolicy::Disabled, 95));
        assert!(storm_detected(StormPolicy::FromWeatherCode, 95));
        assert!(storm_detected(StormPolicy::FromWeatherCode, 99));
        assert!(!storm_detected(StormPolicy::FromWeatherCode, 65));
        assert!(!storm_detected(StormPolicy::FromWeatherCode, 100));

        let calm_storm = advise(20.0, 5.0, storm_detected(StormPolicy::FromWeatherCode, 95));
        assert_eq!(calm_storm.severity, Severity::Bad);
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Severity::Warn).unwrap(), "\"warn\"");
        assert_eq!(Severity::Bad.css_class(), "bad");
    }
}

//! Daily forecast model and the combined weather report

use super::CurrentConditions;
use super::weather::round_half_up;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// One day of the short-range forecast
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DailyForecastEntry {
    pub date: NaiveDate,
    /// WMO weather code
    pub weather_code: i32,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    /// Local sunrise time
    pub sunrise: Option<NaiveDateTime>,
    /// Local sunset time
    pub sunset: Option<NaiveDateTime>,
}

impl DailyForecastEntry {
    /// Short weekday name, e.g. "Mon"
    #[must_use]
    pub fn weekday(&self) -> String {
        self.date.format("%a").to_string()
    }

    /// Format the temperature range, e.g. "12° / 20°"
    #[must_use]
    pub fn format_range(&self) -> String {
        format!(
            "{}° / {}°",
            round_half_up(self.temp_min_c),
            round_half_up(self.temp_max_c)
        )
    }
}

/// Current conditions plus the daily forecast for one location
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    /// Chronological daily entries
    pub daily: Vec<DailyForecastEntry>,
    /// IANA timezone inferred by the upstream
    pub timezone: Option<String>,
}

impl WeatherReport {
    /// First `limit` forecast days
    #[must_use]
    pub fn forecast(&self, limit: usize) -> &[DailyForecastEntry] {
        &self.daily[..self.daily.len().min(limit)]
    }

    /// Today's entry, which carries sunrise and sunset
    #[must_use]
    pub fn today(&self) -> Option<&DailyForecastEntry> {
        self.daily.first()
    }

    /// Parsed timezone, `None` if absent or not a known IANA name
    #[must_use]
    pub fn tz(&self) -> Option<Tz> {
        self.timezone.as_deref().and_then(|tz| tz.parse().ok())
    }

    /// Date label for `now` in the report's timezone, e.g. "Mon Oct 19 2026"
    #[must_use]
    pub fn date_label(&self, now: DateTime<Utc>) -> String {
        const FORMAT: &str = "%a %b %d %Y";
        match self.tz() {
            Some(tz) => now.with_timezone(&tz).format(FORMAT).to_string(),
            None => now.format(FORMAT).to_string(),
        }
    }
}

/// Format an optional local time as "HH:MM"
#[must_use]
pub fn format_clock(time: Option<NaiveDateTime>) -> String {
    time.map_or_else(|| "--:--".to_string(), |t| t.format("%H:%M").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(day: u32) -> DailyForecastEntry {
        DailyForecastEntry {
            date: NaiveDate::from_ymd_opt(2026, 10, day).unwrap(),
            weather_code: 3,
            temp_min_c: 11.5,
            temp_max_c: 19.4,
            sunrise: NaiveDate::from_ymd_opt(2026, 10, day)
                .unwrap()
                .and_hms_opt(6, 31, 0),
            sunset: None,
        }
    }

    fn report(days: u32, timezone: Option<&str>) -> WeatherReport {
        WeatherReport {
            current: CurrentConditions {
                temperature_c: 20.0,
                apparent_temperature_c: 19.0,
                weather_code: 0,
                wind_speed_kmh: 5.0,
                relative_humidity_pct: None,
                pressure_hpa: None,
                visibility_m: None,
                cloud_cover_pct: None,
            },
            daily: (1..=days).map(entry).collect(),
            timezone: timezone.map(str::to_string),
        }
    }

    #[test]
    fn test_forecast_limit() {
        assert_eq!(report(7, None).forecast(5).len(), 5);
        assert_eq!(report(3, None).forecast(5).len(), 3);
        assert!(report(0, None).forecast(5).is_empty());
    }

    #[test]
    fn test_entry_formatting() {
        let e = entry(19);
        assert_eq!(e.weekday(), "Mon");
        assert_eq!(e.format_range(), "12° / 19°");
        assert_eq!(format_clock(e.sunrise), "06:31");
        assert_eq!(format_clock(e.sunset), "--:--");
    }

    #[test]
    fn test_date_label_uses_report_timezone() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 22, 30, 0).unwrap();
        assert_eq!(report(1, None).date_label(now), "Mon Oct 19 2026");
        assert_eq!(
            report(1, Some("Asia/Kolkata")).date_label(now),
            "Tue Oct 20 2026"
        );
        assert_eq!(
            report(1, Some("Not/AZone")).date_label(now),
            "Mon Oct 19 2026"
        );
    }
}

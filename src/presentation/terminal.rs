//! Plain-text rendering for the CLI

use super::view::{ViewState, WeatherView};
use std::fmt::Write;

#[must_use]
pub fn render_text(state: &ViewState) -> String {
    let mut out = String::new();
    if let Some(error) = &state.error {
        let _ = writeln!(out, "{error}");
    }
    if let Some(view) = state.visible_view() {
        render_view(&mut out, view);
    }
    out
}

fn render_view(out: &mut String, view: &WeatherView) {
    let _ = writeln!(out, "{}  {}", view.place, view.date);
    let _ = writeln!(
        out,
        "{}  {}  {}",
        view.symbol.glyph(),
        view.temperature,
        view.condition
    );
    let _ = writeln!(
        out,
        "Humidity {}  Wind {}  Feels like {}",
        view.humidity, view.wind, view.feels_like
    );
    let _ = writeln!(
        out,
        "Visibility {}  Pressure {}  Clouds {}",
        view.visibility, view.pressure, view.cloud_cover
    );
    let _ = writeln!(out, "Sunrise {}  Sunset {}", view.sunrise, view.sunset);

    if !view.forecast.is_empty() {
        out.push('\n');
        for item in &view.forecast {
            let _ = writeln!(
                out,
                "{:<4}{}  {:<12}{}",
                item.weekday,
                item.symbol.glyph(),
                item.range,
                item.condition
            );
        }
    }

    let _ = writeln!(out, "\n[{}] {}", view.advisory.severity.css_class(), view.advisory.message);
}

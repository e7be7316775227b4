//! HTML page renderer

use super::view::{ForecastItem, ViewState, WeatherView};
use maud::{DOCTYPE, Markup, PreEscaped, html};

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;background:#eef3f8;margin:0;padding:2rem;color:#1d2733}\
.card{max-width:34rem;margin:auto;background:#fff;border-radius:1rem;padding:1.5rem;box-shadow:0 4px 16px #0002}\
form{display:flex;gap:.5rem}input{flex:1;padding:.5rem}\
.error{color:#b3261e;min-height:1.2rem;margin:.5rem 0}\
.current{text-align:center}.current img{width:100px;height:100px}\
.details{display:grid;grid-template-columns:1fr 1fr;gap:.25rem 1rem}\
.forecast{display:flex;justify-content:space-between;text-align:center}.forecast img{width:48px;height:48px}\
.advice{padding:.75rem;border-radius:.5rem;margin-top:1rem}\
.advice.good{background:#e3f6e5}.advice.warn{background:#fff4d6}.advice.bad{background:#fde2e0}";

/// Full page for the current view state. `query` pre-fills the search field.
#[must_use]
pub fn render_page(state: &ViewState, query: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Tripcast" }
                style { (PreEscaped(STYLE)) }
            }
            body {
                main class="card" {
                    form method="get" action="/" {
                        input id="cityInput" name="city" placeholder="Enter city name" value=(query);
                        button id="searchBtn" type="submit" { "Search" }
                    }
                    p id="errorMsg" class="error" { (state.error.as_deref().unwrap_or_default()) }
                    @if let Some(view) = state.visible_view() {
                        (render_view(view))
                    }
                }
            }
        }
    }
}

fn render_view(view: &WeatherView) -> Markup {
    let details = [
        ("humidity", "Humidity", &view.humidity),
        ("wind", "Wind", &view.wind),
        ("feelsLike", "Feels like", &view.feels_like),
        ("visibility", "Visibility", &view.visibility),
        ("pressure", "Pressure", &view.pressure),
        ("clouds", "Clouds", &view.cloud_cover),
        ("sunrise", "Sunrise", &view.sunrise),
        ("sunset", "Sunset", &view.sunset),
    ];

    html! {
        section class="current" {
            h2 id="cityName" { (view.place) }
            p id="date" { (view.date) }
            img id="weatherIcon" src=(view.icon_uri) alt=(view.condition);
            h1 id="temperature" { (view.temperature) }
            p id="condition" { (view.condition) }
        }
        section class="details" {
            @for (id, label, value) in details {
                div { (label) ": " span id=(id) { (value) } }
            }
        }
        section id="forecastContainer" class="forecast" {
            @for item in &view.forecast {
                (render_forecast_item(item))
            }
        }
        p id="travelAdvice" class={ "advice " (view.advisory.severity.css_class()) } {
            (view.advisory.message)
        }
    }
}

fn render_forecast_item(item: &ForecastItem) -> Markup {
    html! {
        div class="forecast-item" {
            p { (item.weekday) }
            img src=(item.icon_uri) alt=(item.condition);
            p { (item.range) }
        }
    }
}

//! Presentation layer
//!
//! The `Presenter` drives lookup cycles and owns the `ViewState`; the
//! renderers turn that state into HTML or terminal text.

pub mod html;
pub mod icon;
pub mod presenter;
pub mod terminal;
pub mod view;

pub use icon::{IconResource, render_icon};
pub use presenter::{Presenter, PresenterSettings, UserAction};
pub use view::{ForecastItem, ViewPhase, ViewState, WeatherView};

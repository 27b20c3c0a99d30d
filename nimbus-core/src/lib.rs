//! Core library for the `nimbus` weather client.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The WeatherAPI.com provider and the two-request fetch
//! - Shared domain models (snapshot, forecasts, suggestions)
//! - Rendering onto an abstract display surface
//! - Theme preference, geolocation and the controller tying them together
//!
//! It is used by `nimbus-cli`, but any front end implementing
//! [`render::DisplayPort`] can drive it.

pub mod app;
pub mod config;
pub mod error;
pub mod fetch;
pub mod icon;
pub mod locate;
pub mod model;
pub mod provider;
pub mod render;
pub mod sequence;
pub mod suggest;
pub mod theme;

#[cfg(test)]
mod test_support;

pub use app::{AppState, LoadOutcome, WeatherApp};
pub use config::Config;
pub use error::{FetchError, GeolocationError};
pub use fetch::fetch_weather;
pub use icon::{IconId, resolve_icon};
pub use model::{LocationQuery, Suggestion, WeatherSnapshot};
pub use provider::{WeatherProvider, provider_from_config};
pub use render::{DisplayPort, Renderer};
pub use theme::{Theme, ThemeStore};

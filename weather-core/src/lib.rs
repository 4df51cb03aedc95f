//! Core library for the `weather` lookup widget.
//!
//! This crate defines:
//! - Shared domain models (city queries, current conditions, forecasts)
//! - Abstraction over weather providers, with a seedable mock and OpenWeather
//! - The display controller that renders records into a view mirror
//! - Configuration & credentials handling
//!
//! It is used by `weather-cli`, but can also be reused by other front ends.

pub mod calendar;
pub mod catalog;
pub mod cities;
pub mod config;
pub mod display;
pub mod error;
pub mod model;
pub mod provider;

pub use config::{Config, ProviderConfig};
pub use display::{Alert, DisplayController, Key, UiEvent, View};
pub use error::WeatherError;
pub use model::{CityQuery, CurrentConditions, ForecastEntry, ForecastSet};
pub use provider::{ProviderId, WeatherProvider};

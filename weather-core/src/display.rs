//! Rendering of weather records into a [`View`] and wiring of user input.
//!
//! The view mirrors the widget's output targets field by field. Front ends
//! build one at startup through [`DisplayController::new`] and read it back
//! after every event to paint it however they like.

pub mod controller;
pub mod view;

pub use controller::{DisplayController, LookupState};
pub use view::{ForecastCard, ImageTarget, View};

pub const LOADING_LABEL: &str = "Loading...";
pub const LOADING_TEMP: &str = "--°C";
pub const ERROR_LABEL: &str = "Error loading data";
pub const EMPTY_CITY_MESSAGE: &str = "Please enter a city name";
pub const FETCH_FAILED_MESSAGE: &str = "Could not fetch weather data. Please try again.";

pub fn current_icon_url(icon_id: &str) -> String {
    format!("https://openweathermap.org/img/wn/{icon_id}@2x.png")
}

pub fn forecast_icon_url(icon_id: &str) -> String {
    format!("https://openweathermap.org/img/wn/{icon_id}.png")
}

/// Blocking, user-facing notification (the widget's `alert`).
pub trait Alert {
    fn alert(&mut self, message: &str);
}

/// Collects alerts instead of showing them.
#[derive(Debug, Clone, Default)]
pub struct RecordedAlerts {
    pub messages: Vec<String>,
}

impl Alert for RecordedAlerts {
    fn alert(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Char(char),
}

/// Input events the controller reacts to once initialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    SearchClicked,
    /// Key pressed while the search input has focus.
    KeyPressed(Key),
}

use thiserror::Error;

/// Failures surfaced by providers and the display controller.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// User input rejected before any lookup was attempted.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Timeout, DNS or connection failure, or an unexpected HTTP status.
    #[error("Network error: {0}")]
    Network(String),

    /// The provider does not know the requested city.
    #[error("City not found: {0}")]
    NotFound(String),

    /// The provider answered with a body we could not decode.
    #[error("Failed to parse provider response: {0}")]
    Parse(String),

    /// A provider lookup failed while the display was being refreshed.
    #[error("Could not fetch weather data: {0}")]
    Fetch(#[source] Box<WeatherError>),
}

impl WeatherError {
    pub fn is_validation(&self) -> bool {
        matches!(self, WeatherError::Validation(_))
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(err: serde_json::Error) -> Self {
        WeatherError::Parse(err.to_string())
    }
}

use crate::{
    CityQuery, Config, CurrentConditions, ForecastSet, WeatherError,
    provider::{mock::MockProvider, openweather::OpenWeatherProvider},
};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug, time::Duration};

pub mod mock;
pub mod openweather;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    Mock,
    OpenWeather,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Mock => "mock",
            ProviderId::OpenWeather => "openweather",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::Mock, ProviderId::OpenWeather]
    }

    pub fn requires_api_key(&self) -> bool {
        matches!(self, ProviderId::OpenWeather)
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "mock" => Ok(ProviderId::Mock),
            "openweather" => Ok(ProviderId::OpenWeather),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: mock, openweather."
            )),
        }
    }
}

/// Source of current conditions and the five-day forecast for a city.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_current(&self, city: &CityQuery) -> Result<CurrentConditions, WeatherError>;

    /// Next five days, tomorrow first. Providers that do not need the city may ignore it.
    async fn fetch_forecast(&self, city: &CityQuery) -> Result<ForecastSet, WeatherError>;
}

/// Construct a provider from config and explicit ProviderId.
pub fn provider_from_config(
    id: ProviderId,
    config: &Config,
) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let boxed: Box<dyn WeatherProvider> = match id {
        ProviderId::Mock => match config.seed {
            Some(seed) => Box::new(MockProvider::seeded(seed)),
            None => Box::new(MockProvider::new()),
        },
        ProviderId::OpenWeather => {
            let api_key = config.provider_api_key(id).ok_or_else(|| {
                anyhow::anyhow!(
                    "No API key configured for provider '{id}'.\n\
                         Hint: run `weather configure {id}` and enter your API key."
                )
            })?;
            let timeout = Duration::from_secs(config.timeout_secs);
            Box::new(OpenWeatherProvider::new(api_key.to_owned(), timeout)?)
        }
    };

    Ok(boxed)
}

/// Construct the default provider from config, falling back to the mock provider.
pub fn default_provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let id = config.default_provider_id()?;
    provider_from_config(id, config)
}

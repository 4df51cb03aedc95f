use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::WeatherError;

/// Number of upcoming days covered by a [`ForecastSet`].
pub const FORECAST_DAYS: usize = 5;

/// Rounds halves toward positive infinity, so `-2.5` becomes `-2`.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// A trimmed, non-empty city name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CityQuery(String);

impl CityQuery {
    /// Trim `raw` and reject it if nothing is left.
    pub fn parse(raw: &str) -> Result<Self, WeatherError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(WeatherError::Validation("Please enter a city name".to_string()));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CityQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Present-moment snapshot for a city, in metric units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub city_name: String,
    /// Two-letter country code.
    pub country_code: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    /// Converted to km/h only when rendered.
    pub wind_speed_mps: f64,
    pub condition_description: String,
    pub condition_icon_id: String,
}

/// A single upcoming day's predicted weather summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub temperature_c: i32,
    pub condition_description: String,
    pub condition_icon_id: String,
}

/// Exactly five forecast entries, tomorrow first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSet {
    entries: [ForecastEntry; FORECAST_DAYS],
}

impl ForecastSet {
    pub fn new(entries: [ForecastEntry; FORECAST_DAYS]) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ForecastEntry; FORECAST_DAYS] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &ForecastEntry> {
        self.entries.iter()
    }
}

impl TryFrom<Vec<ForecastEntry>> for ForecastSet {
    type Error = WeatherError;

    fn try_from(entries: Vec<ForecastEntry>) -> Result<Self, Self::Error> {
        let len = entries.len();
        let entries: [ForecastEntry; FORECAST_DAYS] = entries.try_into().map_err(|_| {
            WeatherError::Parse(format!("expected {FORECAST_DAYS} forecast entries, got {len}"))
        })?;

        Ok(Self { entries })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(temperature_c: i32) -> ForecastEntry {
        ForecastEntry {
            temperature_c,
            condition_description: "clear sky".into(),
            condition_icon_id: "01d".into(),
        }
    }

    #[test]
    fn halves_round_up() {
        assert_eq!(round_half_up(19.8), 20);
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.6), -3);
    }

    #[test]
    fn city_query_is_trimmed() {
        let city = CityQuery::parse("  New York \t").expect("non-empty input");
        assert_eq!(city.as_str(), "New York");
    }

    #[test]
    fn blank_city_query_is_rejected() {
        for raw in ["", "   ", "\t\n"] {
            let err = CityQuery::parse(raw).unwrap_err();
            assert!(err.is_validation(), "{raw:?} should be a validation error");
        }
    }

    #[test]
    fn forecast_set_requires_five_entries() {
        let err = ForecastSet::try_from(vec![entry(20); 4]).unwrap_err();
        assert!(err.to_string().contains("expected 5 forecast entries, got 4"));

        let set = ForecastSet::try_from((1..=5).map(entry).collect::<Vec<_>>())
            .expect("five entries");
        let temps: Vec<i32> = set.iter().map(|e| e.temperature_c).collect();
        assert_eq!(temps, vec![1, 2, 3, 4, 5]);
    }
}

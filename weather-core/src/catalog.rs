//! Fixed weather-condition templates used when synthesizing mock data.

use serde::Serialize;

/// A named weather condition, keyed by its OpenWeather condition id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Condition {
    pub id: u16,
    pub label: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

/// Conditions drawn from for current weather.
pub static CURRENT_CONDITIONS: [Condition; 5] = [
    Condition { id: 800, label: "Clear", description: "clear sky", icon: "01d" },
    Condition { id: 801, label: "Clouds", description: "few clouds", icon: "02d" },
    Condition { id: 803, label: "Clouds", description: "broken clouds", icon: "04d" },
    Condition { id: 500, label: "Rain", description: "light rain", icon: "10d" },
    Condition { id: 600, label: "Snow", description: "light snow", icon: "13d" },
];

/// Forecast days never show snow.
pub fn forecast_conditions() -> &'static [Condition] {
    &CURRENT_CONDITIONS[..4]
}

pub fn current_conditions() -> &'static [Condition] {
    &CURRENT_CONDITIONS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forecast_catalog_excludes_snow() {
        assert_eq!(forecast_conditions().len(), 4);
        assert!(forecast_conditions().iter().all(|c| c.label != "Snow"));
        assert!(current_conditions().iter().any(|c| c.icon == "13d"));
    }
}

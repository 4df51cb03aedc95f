use async_trait::async_trait;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, instrument};

use crate::{
    CityQuery, CurrentConditions, ForecastEntry, ForecastSet, WeatherError,
    catalog::{self, Condition},
    cities,
};

use super::WeatherProvider;

/// Fabricates plausible readings in-process instead of calling a weather service.
///
/// Every call draws fresh random values, so two lookups for the same city
/// differ in condition, humidity and wind. Seed it for reproducible output.
#[derive(Debug)]
pub struct MockProvider {
    rng: Mutex<StdRng>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self { rng: Mutex::new(rng) }
    }

    fn rng(&self) -> MutexGuard<'_, StdRng> {
        // A panic mid-draw leaves the generator usable.
        self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn generate_current(&self, city: &CityQuery) -> CurrentConditions {
        let profile = cities::profile_or_default(city.as_str());
        let mut rng = self.rng();

        let condition = pick(&mut *rng, catalog::current_conditions());
        debug!(condition_id = condition.id, label = condition.label, "picked current condition");
        let humidity_pct = rng.random_range(30..=79);
        let wind = rng.random_range(2.0..=12.0_f64);

        CurrentConditions {
            city_name: city.as_str().to_string(),
            country_code: profile.country_code.to_string(),
            temperature_c: profile.temperature_c,
            feels_like_c: profile.feels_like_c,
            humidity_pct,
            wind_speed_mps: (wind * 10.0).round() / 10.0,
            condition_description: condition.description.to_string(),
            condition_icon_id: condition.icon.to_string(),
        }
    }

    pub fn generate_forecast(&self) -> ForecastSet {
        let mut rng = self.rng();

        let entries = std::array::from_fn(|_| {
            let temperature_c = rng.random_range(15..=29);
            let condition = pick(&mut *rng, catalog::forecast_conditions());
            ForecastEntry {
                temperature_c,
                condition_description: condition.description.to_string(),
                condition_icon_id: condition.icon.to_string(),
            }
        });

        ForecastSet::new(entries)
    }
}

fn pick<R: Rng + ?Sized>(rng: &mut R, conditions: &'static [Condition]) -> Condition {
    conditions[rng.random_range(0..conditions.len())]
}

#[async_trait]
impl WeatherProvider for MockProvider {
    #[instrument(skip(self, city), fields(city = %city))]
    async fn fetch_current(&self, city: &CityQuery) -> Result<CurrentConditions, WeatherError> {
        let current = self.generate_current(city);
        debug!(
            condition = %current.condition_description,
            humidity = current.humidity_pct,
            wind_mps = current.wind_speed_mps,
            "synthesized current conditions"
        );
        Ok(current)
    }

    #[instrument(skip(self, city), fields(city = %city))]
    async fn fetch_forecast(&self, city: &CityQuery) -> Result<ForecastSet, WeatherError> {
        let forecast = self.generate_forecast();
        debug!(entries = forecast.entries().len(), "synthesized forecast");
        Ok(forecast)
    }
}

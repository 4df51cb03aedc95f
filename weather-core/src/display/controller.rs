use chrono::Datelike;
use tracing::{error, info, warn};

use crate::{
    CityQuery, CurrentConditions, ForecastSet, WeatherError, WeatherProvider,
    calendar::{self, Clock},
    model::round_half_up,
};

use super::{
    Alert, EMPTY_CITY_MESSAGE, ERROR_LABEL, FETCH_FAILED_MESSAGE, ForecastCard, ImageTarget, Key,
    LOADING_LABEL, LOADING_TEMP, UiEvent, View, current_icon_url, forecast_icon_url,
};

/// Outcome of the most recent lookup. `Idle` until the first one starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupState {
    Idle,
    Loading,
    Rendered,
    Errored,
}

/// Drives a [`View`] from a [`WeatherProvider`].
///
/// Every operation takes `&mut self`, so lookups are processed one at a time
/// in the order they were requested.
pub struct DisplayController<A: Alert> {
    view: View,
    provider: Box<dyn WeatherProvider>,
    alert: A,
    clock: Box<dyn Clock>,
    default_city: CityQuery,
    triggers_bound: bool,
    state: LookupState,
}

impl<A: Alert> DisplayController<A> {
    pub fn new(
        provider: Box<dyn WeatherProvider>,
        alert: A,
        clock: Box<dyn Clock>,
        default_city: CityQuery,
    ) -> Self {
        Self {
            view: View::new(),
            provider,
            alert,
            clock,
            default_city,
            triggers_bound: false,
            state: LookupState::Idle,
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }

    pub fn alerts(&self) -> &A {
        &self.alert
    }

    pub fn state(&self) -> LookupState {
        self.state
    }

    /// Shows today's date, loads the default city and starts listening for input.
    pub async fn initialize(&mut self) -> Result<(), WeatherError> {
        self.view.current_date = calendar::format_long_date(self.clock.today());

        let city = self.default_city.clone();
        let result = self.lookup(&city).await;

        self.triggers_bound = true;
        result
    }

    /// Routes an input event. Events before [`initialize`](Self::initialize) are dropped.
    pub async fn dispatch(&mut self, event: UiEvent) -> Result<(), WeatherError> {
        if !self.triggers_bound {
            warn!(?event, "input received before initialization, ignoring");
            return Ok(());
        }

        match event {
            UiEvent::SearchClicked | UiEvent::KeyPressed(Key::Enter) => self.handle_search().await,
            UiEvent::KeyPressed(_) => Ok(()),
        }
    }

    pub async fn handle_search(&mut self) -> Result<(), WeatherError> {
        let city = match CityQuery::parse(&self.view.search_input) {
            Ok(city) => city,
            Err(err) => {
                self.alert.alert(EMPTY_CITY_MESSAGE);
                return Err(err);
            }
        };

        let result = self.lookup(&city).await;
        self.view.search_input.clear();
        result
    }

    pub async fn lookup(&mut self, city: &CityQuery) -> Result<(), WeatherError> {
        info!(city = %city, "looking up weather");
        self.state = LookupState::Loading;
        self.view.city_name = LOADING_LABEL.to_string();
        self.view.temp = LOADING_TEMP.to_string();

        match self.refresh(city).await {
            Ok(()) => {
                self.state = LookupState::Rendered;
                Ok(())
            }
            Err(err) => {
                error!(city = %city, error = %err, "error fetching weather data");
                self.state = LookupState::Errored;
                self.view.city_name = ERROR_LABEL.to_string();
                self.alert.alert(FETCH_FAILED_MESSAGE);
                Err(WeatherError::Fetch(Box::new(err)))
            }
        }
    }

    async fn refresh(&mut self, city: &CityQuery) -> Result<(), WeatherError> {
        let current = self.provider.fetch_current(city).await?;
        self.render(&current);

        let forecast = self.provider.fetch_forecast(city).await?;
        self.render_forecast(&forecast);

        Ok(())
    }

    pub fn render(&mut self, current: &CurrentConditions) {
        let view = &mut self.view;

        view.city_name = format!("{}, {}", current.city_name, current.country_code);
        view.temp = format!("{}°C", round_half_up(current.temperature_c));
        view.feels_like = format!("{}°C", round_half_up(current.feels_like_c));
        view.humidity = format!("{}%", current.humidity_pct);
        view.wind = format!("{} km/h", round_half_up(current.wind_speed_mps * 3.6));
        view.weather_desc = current.condition_description.clone();
        view.weather_img = ImageTarget {
            src: current_icon_url(&current.condition_icon_id),
            alt: current.condition_description.clone(),
        };
    }

    pub fn render_forecast(&mut self, forecast: &ForecastSet) {
        self.view.forecast_cards.clear();

        let labels = calendar::forecast_day_labels(self.clock.today().weekday());
        for (day, entry) in labels.into_iter().zip(forecast.iter()) {
            self.view.forecast_cards.push(ForecastCard {
                day: day.to_string(),
                icon: ImageTarget {
                    src: forecast_icon_url(&entry.condition_icon_id),
                    alt: entry.condition_description.clone(),
                },
                temp: format!("{}°C", entry.temperature_c),
            });
        }
    }
}

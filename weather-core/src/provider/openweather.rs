use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::{
    CityQuery, CurrentConditions, ForecastEntry, ForecastSet, WeatherError, model::round_half_up,
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Forecast slots are three hours apart.
const SLOTS_PER_DAY: usize = 8;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, timeout: Duration) -> anyhow::Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL, timeout)
    }

    pub fn with_base_url(
        api_key: String,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self { api_key, base_url: base_url.into(), http })
    }

    async fn get(&self, endpoint: &str, city: &CityQuery) -> Result<String, WeatherError> {
        let url = format!("{}/{endpoint}", self.base_url.trim_end_matches('/'));

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city.as_str()),
                ("units", "metric"),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                WeatherError::Network(format!("OpenWeather {endpoint} request failed: {e}"))
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            WeatherError::Network(format!("Failed to read OpenWeather {endpoint} body: {e}"))
        })?;

        if status == StatusCode::NOT_FOUND {
            return Err(WeatherError::NotFound(city.to_string()));
        }

        if !status.is_success() {
            warn!(%status, endpoint, "OpenWeather returned an error status");
            return Err(WeatherError::Network(format!(
                "OpenWeather {endpoint} request failed with status {status}: {}",
                truncate_body(&body),
            )));
        }

        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    #[serde(default)]
    feels_like: f64,
    #[serde(default)]
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: OwSys,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

fn first_condition(weather: &[OwWeather]) -> (String, String) {
    weather
        .first()
        .map(|w| (w.description.clone(), w.icon.clone()))
        .unwrap_or_else(|| ("Unknown".to_string(), "01d".to_string()))
}

fn parse_current(body: &str) -> Result<CurrentConditions, WeatherError> {
    let parsed: OwCurrentResponse = serde_json::from_str(body)?;
    let (condition_description, condition_icon_id) = first_condition(&parsed.weather);

    Ok(CurrentConditions {
        city_name: parsed.name,
        country_code: parsed.sys.country.unwrap_or_else(|| "US".to_string()),
        temperature_c: parsed.main.temp,
        feels_like_c: parsed.main.feels_like,
        humidity_pct: parsed.main.humidity,
        wind_speed_mps: parsed.wind.speed.max(0.0),
        condition_description,
        condition_icon_id,
    })
}

/// Picks one reading per day, 24 hours apart, starting a day from now.
fn parse_forecast(body: &str) -> Result<ForecastSet, WeatherError> {
    let parsed: OwForecastResponse = serde_json::from_str(body)?;
    let list = &parsed.list;

    if list.len() < 5 {
        return Err(WeatherError::Parse(format!(
            "OpenWeather forecast contained {} entries, need at least 5",
            list.len()
        )));
    }

    let entries = (1..=5)
        .map(|day| {
            // A truncated list still yields five distinct entries.
            let idx = (day * SLOTS_PER_DAY - 1).min(list.len() + day - 6);
            let entry = &list[idx];
            let (condition_description, condition_icon_id) = first_condition(&entry.weather);
            ForecastEntry {
                temperature_c: round_half_up(entry.main.temp) as i32,
                condition_description,
                condition_icon_id,
            }
        })
        .collect::<Vec<_>>();

    ForecastSet::try_from(entries)
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self, city), fields(city = %city))]
    async fn fetch_current(&self, city: &CityQuery) -> Result<CurrentConditions, WeatherError> {
        let body = self.get("weather", city).await?;
        let current = parse_current(&body)?;
        debug!(temp = current.temperature_c, "received current conditions");
        Ok(current)
    }

    #[instrument(skip(self, city), fields(city = %city))]
    async fn fetch_forecast(&self, city: &CityQuery) -> Result<ForecastSet, WeatherError> {
        let body = self.get("forecast", city).await?;
        parse_forecast(&body)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    fn city(name: &str) -> CityQuery {
        CityQuery::parse(name).expect("valid city")
    }

    fn provider(server: &MockServer) -> OpenWeatherProvider {
        OpenWeatherProvider::with_base_url("KEY".into(), server.uri(), Duration::from_secs(5))
            .expect("client builds")
    }

    fn forecast_slot(temp: f64, icon: &str) -> serde_json::Value {
        json!({ "main": { "temp": temp }, "weather": [{ "description": "few clouds", "icon": icon }] })
    }

    #[tokio::test]
    async fn current_response_maps_into_record() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", "Paris"))
            .and(query_param("units", "metric"))
            .and(query_param("appid", "KEY"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "Paris",
                "sys": { "country": "FR" },
                "main": { "temp": 21.4, "feels_like": 22.1, "humidity": 64 },
                "wind": { "speed": 3.6 },
                "weather": [{ "description": "light rain", "icon": "10d" }]
            })))
            .mount(&server)
            .await;

        let current = provider(&server).fetch_current(&city("Paris")).await.unwrap();

        assert_eq!(current.city_name, "Paris");
        assert_eq!(current.country_code, "FR");
        assert_eq!(current.humidity_pct, 64);
        assert_eq!(current.wind_speed_mps, 3.6);
        assert_eq!(current.condition_icon_id, "10d");
    }

    #[tokio::test]
    async fn unknown_city_maps_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(path("/weather"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({ "cod": "404", "message": "city not found" })),
            )
            .mount(&server)
            .await;

        let err = provider(&server).fetch_current(&city("Nowhere")).await.unwrap_err();
        assert!(matches!(err, WeatherError::NotFound(ref c) if c == "Nowhere"));
    }

    #[tokio::test]
    async fn server_error_maps_to_network_error() {
        let server = MockServer::start().await;
        Mock::given(path("/weather"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let err = provider(&server).fetch_current(&city("Paris")).await.unwrap_err();
        assert!(matches!(err, WeatherError::Network(ref msg) if msg.contains("503")));
    }

    #[tokio::test]
    async fn slow_response_times_out_as_network_error() {
        let server = MockServer::start().await;
        Mock::given(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(800)))
            .mount(&server)
            .await;

        let provider = OpenWeatherProvider::with_base_url(
            "KEY".into(),
            server.uri(),
            Duration::from_millis(100),
        )
        .expect("client builds");

        let err = provider.fetch_current(&city("Paris")).await.unwrap_err();
        assert!(matches!(err, WeatherError::Network(ref msg) if msg.contains("weather request failed")));
    }

    #[tokio::test]
    async fn malformed_body_maps_to_parse_error() {
        let server = MockServer::start().await;
        Mock::given(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = provider(&server).fetch_current(&city("Paris")).await.unwrap_err();
        assert!(matches!(err, WeatherError::Parse(_)));
    }

    #[tokio::test]
    async fn forecast_takes_one_slot_per_day() {
        let server = MockServer::start().await;
        let list: Vec<_> = (0..40).map(|i| forecast_slot(f64::from(i), "02d")).collect();
        Mock::given(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "list": list })))
            .mount(&server)
            .await;

        let forecast = provider(&server).fetch_forecast(&city("Paris")).await.unwrap();
        let temps: Vec<i32> = forecast.iter().map(|e| e.temperature_c).collect();

        assert_eq!(temps, vec![7, 15, 23, 31, 39]);
    }

    #[test]
    fn short_forecast_list_still_yields_five_days() {
        let list: Vec<_> = (0..6).map(|i| forecast_slot(f64::from(i), "01d")).collect();
        let body = json!({ "list": list }).to_string();

        let temps: Vec<i32> =
            parse_forecast(&body).unwrap().iter().map(|e| e.temperature_c).collect();
        assert_eq!(temps, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn too_short_forecast_list_is_rejected() {
        let list: Vec<_> = (0..3).map(|i| forecast_slot(f64::from(i), "01d")).collect();
        let body = json!({ "list": list }).to_string();

        assert!(matches!(parse_forecast(&body), Err(WeatherError::Parse(_))));
    }

    #[test]
    fn missing_weather_array_falls_back_to_unknown() {
        let body = json!({
            "name": "Oslo",
            "sys": {},
            "main": { "temp": 4.0, "feels_like": 1.0, "humidity": 80 },
            "wind": { "speed": 6.0 },
            "weather": []
        })
        .to_string();

        let current = parse_current(&body).unwrap();
        assert_eq!(current.condition_description, "Unknown");
        assert_eq!(current.country_code, "US");
    }
}

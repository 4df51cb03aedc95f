use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImageTarget {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForecastCard {
    pub day: String,
    pub icon: ImageTarget,
    pub temp: String,
}

/// Every text and image target of the widget, plus the search input value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct View {
    pub search_input: String,
    pub city_name: String,
    pub current_date: String,
    pub weather_img: ImageTarget,
    pub weather_desc: String,
    pub temp: String,
    pub feels_like: String,
    pub humidity: String,
    pub wind: String,
    pub forecast_cards: Vec<ForecastCard>,
}

impl View {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_search_input(&mut self, value: impl Into<String>) {
        self.search_input = value.into();
    }
}

use std::fmt::Write as _;

use weather_core::{Alert, View};

/// Shows alerts on stderr; the next prompt waits for the user anyway.
#[derive(Debug, Default)]
pub struct TerminalAlert;

impl Alert for TerminalAlert {
    fn alert(&mut self, message: &str) {
        eprintln!("! {message}");
    }
}

pub fn paint(view: &View) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", view.city_name);
    let _ = writeln!(out, "{}", view.current_date);
    let _ = writeln!(out);
    let _ = writeln!(out, "  {}  {}", view.temp, view.weather_desc);
    let _ = writeln!(out, "  Feels like  {}", view.feels_like);
    let _ = writeln!(out, "  Humidity    {}", view.humidity);
    let _ = writeln!(out, "  Wind        {}", view.wind);
    if !view.weather_img.src.is_empty() {
        let _ = writeln!(out, "  Icon        {}", view.weather_img.src);
    }

    if !view.forecast_cards.is_empty() {
        let _ = writeln!(out);
        let days: Vec<String> =
            view.forecast_cards.iter().map(|c| format!("{:>5}", c.day)).collect();
        let temps: Vec<String> =
            view.forecast_cards.iter().map(|c| format!("{:>5}", c.temp)).collect();
        let _ = writeln!(out, "{}", days.join(" "));
        let _ = writeln!(out, "{}", temps.join(" "));
    }

    out
}

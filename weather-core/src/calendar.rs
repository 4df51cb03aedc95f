use chrono::{Local, NaiveDate, Weekday};

use crate::model::FORECAST_DAYS;

/// Short weekday labels, Sunday first.
pub const DAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Source of "today" for the display.
pub trait Clock: Send + Sync + std::fmt::Debug {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// en-US long date, e.g. "Monday, January 1, 2024".
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Labels for today+1 .. today+5.
pub fn forecast_day_labels(today: Weekday) -> [&'static str; FORECAST_DAYS] {
    let today = today.num_days_from_sunday() as usize;
    std::array::from_fn(|i| DAY_LABELS[(today + i + 1) % 7])
}

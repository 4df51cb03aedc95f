//! Static per-city base values for the mock provider.

use std::{collections::HashMap, sync::OnceLock};

/// Base readings recorded for a known city.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CityProfile {
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub country_code: &'static str,
}

/// Used for any city missing from the table.
pub const UNKNOWN_CITY: CityProfile =
    CityProfile { temperature_c: 22.0, feels_like_c: 23.0, country_code: "US" };

static KNOWN_CITIES: [(&str, CityProfile); 10] = [
    ("London", profile(18.0, 17.0, "GB")),
    ("Paris", profile(22.0, 23.0, "FR")),
    ("New York", profile(25.0, 27.0, "US")),
    ("Tokyo", profile(28.0, 30.0, "JP")),
    ("Sydney", profile(15.0, 14.0, "AU")),
    ("Berlin", profile(20.0, 19.0, "DE")),
    ("Moscow", profile(12.0, 10.0, "RU")),
    ("Beijing", profile(26.0, 28.0, "CN")),
    ("Cairo", profile(32.0, 35.0, "EG")),
    ("Rio de Janeiro", profile(29.0, 31.0, "BR")),
];

const fn profile(
    temperature_c: f64,
    feels_like_c: f64,
    country_code: &'static str,
) -> CityProfile {
    CityProfile { temperature_c, feels_like_c, country_code }
}

fn table() -> &'static HashMap<&'static str, CityProfile> {
    static TABLE: OnceLock<HashMap<&'static str, CityProfile>> = OnceLock::new();
    TABLE.get_or_init(|| KNOWN_CITIES.iter().copied().collect())
}

/// Exact, case-sensitive lookup.
pub fn lookup(city: &str) -> Option<CityProfile> {
    table().get(city).copied()
}

pub fn profile_or_default(city: &str) -> CityProfile {
    lookup(city).unwrap_or(UNKNOWN_CITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_city_has_recorded_values() {
        let tokyo = lookup("Tokyo").expect("Tokyo is in the table");
        assert_eq!(tokyo, profile(28.0, 30.0, "JP"));
        assert_eq!(profile_or_default("Rio de Janeiro").country_code, "BR");
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert!(lookup("london").is_none());
        assert_eq!(profile_or_default("london"), UNKNOWN_CITY);
    }

    #[test]
    fn unknown_city_defaults_to_us() {
        assert_eq!(profile_or_default("Reykjavik").country_code, "US");
    }
}

//! Canonical schema for the catch log master file.
//!
//! The column list here is the single source of truth for column order and
//! presence everywhere the master file is read or written. This module also
//! carries the closed enumerations used by the validator (countries, states,
//! weather kinds, fishing methods) and the reference species list.

use csv::ReaderBuilder;

/// Canonical column header of the master file, in fixed order.
pub const CANONICAL_COLUMNS: [&str; 15] = [
    "Catch_id",
    "Date",
    "Time",
    "Country",
    "State",
    "Weather",
    "Temperature_in_Celsius",
    "Water_temperature_in_Celsius",
    "Wind_in_m/s",
    "Atmospheric_pressure_in_hPa",
    "Fishing_method",
    "Fish_name",
    "Fish_weight_in_kg",
    "Fish_length_in_cm",
    "Fish_sell_price",
];

/// Countries selectable on the entry form.
pub const COUNTRIES: [&str; 6] = [
    "United States",
    "Canada",
    "Peru",
    "Norway",
    "Finland",
    "Japan",
];

/// Weather kinds selectable on the entry form.
pub const WEATHER_KINDS: [&str; 9] = [
    "Sunny", "Cloudy", "Overcast", "Rain", "Drizzle", "Snow", "Fog", "Windy", "Storm",
];

/// Fishing methods selectable on the entry form.
pub const FISHING_METHODS: [&str; 7] = [
    "Spinning",
    "Fly fishing",
    "Bottom fishing",
    "Trolling",
    "Ice fishing",
    "Net",
    "Handline",
];

const UNITED_STATES_STATES: [&str; 8] = [
    "Alaska",
    "California",
    "Florida",
    "Michigan",
    "Minnesota",
    "Montana",
    "Oregon",
    "Washington",
];

const CANADA_STATES: [&str; 5] = [
    "British Columbia",
    "Manitoba",
    "Nova Scotia",
    "Ontario",
    "Quebec",
];

const PERU_STATES: [&str; 4] = ["Loreto", "Madre de Dios", "Puno", "Ucayali"];

const NORWAY_STATES: [&str; 4] = ["Finnmark", "Nordland", "Troms", "Møre og Romsdal"];

const FINLAND_STATES: [&str; 4] = ["Lapland", "North Karelia", "Pirkanmaa", "Uusimaa"];

const JAPAN_STATES: [&str; 4] = ["Hokkaido", "Aomori", "Shizuoka", "Kagoshima"];

/// Look up the valid states/regions registered for a country.
///
/// Returns `None` for a country not in the mapping; the validator treats
/// that as "skip the state check", not as an error.
pub fn states_for_country(country: &str) -> Option<&'static [&'static str]> {
    match country {
        "United States" => Some(&UNITED_STATES_STATES),
        "Canada" => Some(&CANADA_STATES),
        "Peru" => Some(&PERU_STATES),
        "Norway" => Some(&NORWAY_STATES),
        "Finland" => Some(&FINLAND_STATES),
        "Japan" => Some(&JAPAN_STATES),
        _ => None,
    }
}

/// Embedded CSV data for the reference fish species list.
pub static SPECIES_CSV: &str = include_str!("../fixtures/fish_species.csv");

/// Parse the embedded species fixture into the reference list of names.
pub fn fish_species() -> Vec<String> {
    ReaderBuilder::new()
        .has_headers(true)
        .from_reader(SPECIES_CSV.as_bytes())
        .records()
        .filter_map(|record| {
            let record = record.ok()?;
            let name = record.get(0)?.trim();
            if name.is_empty() {
                None
            } else {
                Some(name.to_string())
            }
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_canonical_columns_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for column in CANONICAL_COLUMNS {
            assert!(seen.insert(column), "duplicate column {column}");
        }
    }

    #[test]
    fn test_species_fixture_parses() {
        let species = fish_species();
        assert!(species.len() > 20);
        assert!(species.iter().any(|s| s == "Northern pike"));
        assert!(species.iter().any(|s| s == "Paiche"));
    }

    #[test]
    fn test_states_for_country() {
        assert!(states_for_country("Peru").unwrap().contains(&"Loreto"));
        assert!(!states_for_country("United States")
            .unwrap()
            .contains(&"Loreto"));
        assert!(states_for_country("Atlantis").is_none());
    }
}

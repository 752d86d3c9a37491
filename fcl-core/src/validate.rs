//! Validation of candidate catch entries before they are appended.
//!
//! All applicable rules are checked and every violation is collected, so a
//! caller sees the full list of problems in one pass rather than fixing them
//! one at a time.

use crate::schema::states_for_country;
use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

/// A single validation rule violation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuleViolation {
    #[error("Missing required field: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("Value for {field} out of range, expected {bound}")]
    OutOfRange {
        field: &'static str,
        bound: &'static str,
    },

    #[error("Value {value:?} is not a recognized {field}")]
    InvalidCategoricalValue {
        field: &'static str,
        value: String,
    },

    #[error("State {state:?} does not belong to country {country:?}")]
    StateCountryMismatch { state: String, country: String },

    #[error("Time {text:?} is not a valid HH:MM time")]
    InvalidTimeFormat { text: String },
}

/// A raw catch entry as submitted, before id assignment and price
/// derivation. `time_text` is free text and goes through [`normalize_time`];
/// `raw_price` is the integer sale price input, stored as `raw_price / 10`.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateCatch {
    pub date: NaiveDate,
    pub time_text: String,
    pub country: String,
    pub state: String,
    pub weather: String,
    pub temperature_c: f64,
    pub water_temperature_c: f64,
    pub wind_m_s: f64,
    pub pressure_hpa: f64,
    pub fishing_method: String,
    pub fish_name: String,
    pub fish_weight_kg: f64,
    pub fish_length_cm: f64,
    pub raw_price: i64,
}

/// Parse lenient free-text time input into a time of day.
///
/// Accepted grammar: `H`, `H:M`, `HH:MM` with a 1-2 digit hour 0-23 and a
/// 0-2 digit minute 0-59. Anything else is rejected.
pub fn normalize_time(text: &str) -> Option<NaiveTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let (hour_part, minute_part) = match text.split_once(':') {
        Some((hour, minute)) => (hour, minute),
        None => (text, ""),
    };
    if hour_part.is_empty() || hour_part.len() > 2 || minute_part.len() > 2 {
        return None;
    }
    if !hour_part.chars().all(|c| c.is_ascii_digit())
        || !minute_part.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }
    let hour: u32 = hour_part.parse().ok()?;
    let minute: u32 = if minute_part.is_empty() {
        0
    } else {
        minute_part.parse().ok()?
    };
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Check a candidate against every rule and collect all violations.
///
/// An empty result means the candidate is valid. The species list check is
/// only enforced when `species` is non-empty; an unknown country skips the
/// state membership check rather than failing it.
pub fn validate(candidate: &CandidateCatch, species: &[String]) -> Vec<RuleViolation> {
    let mut violations = Vec::new();

    let required = [
        ("Country", candidate.country.as_str()),
        ("State", candidate.state.as_str()),
        ("Fishing_method", candidate.fishing_method.as_str()),
        ("Fish_name", candidate.fish_name.as_str()),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            violations.push(RuleViolation::MissingRequiredField { field });
        }
    }

    let state = candidate.state.trim();
    if !state.is_empty() {
        if let Some(states) = states_for_country(candidate.country.trim()) {
            if !states.contains(&state) {
                violations.push(RuleViolation::StateCountryMismatch {
                    state: state.to_string(),
                    country: candidate.country.trim().to_string(),
                });
            }
        }
    }

    if !(-50.0..=60.0).contains(&candidate.temperature_c) {
        violations.push(RuleViolation::OutOfRange {
            field: "Temperature_in_Celsius",
            bound: "[-50, 60]",
        });
    }
    // only the upper bound is enforced here; the lower bound is covered by
    // the entry widget's input range
    if candidate.water_temperature_c > 40.0 {
        violations.push(RuleViolation::OutOfRange {
            field: "Water_temperature_in_Celsius",
            bound: "<= 40",
        });
    }
    if !(0.0..=60.0).contains(&candidate.wind_m_s) {
        violations.push(RuleViolation::OutOfRange {
            field: "Wind_in_m/s",
            bound: "[0, 60]",
        });
    }
    if !(850.0..=1100.0).contains(&candidate.pressure_hpa) {
        violations.push(RuleViolation::OutOfRange {
            field: "Atmospheric_pressure_in_hPa",
            bound: "[850, 1100]",
        });
    }
    if candidate.fish_weight_kg <= 0.0 || candidate.fish_weight_kg > 1000.0 {
        violations.push(RuleViolation::OutOfRange {
            field: "Fish_weight_in_kg",
            bound: "(0, 1000]",
        });
    }
    if candidate.fish_length_cm <= 0.0 || candidate.fish_length_cm > 1000.0 {
        violations.push(RuleViolation::OutOfRange {
            field: "Fish_length_in_cm",
            bound: "(0, 1000]",
        });
    }
    if !(1..=1_000_000).contains(&candidate.raw_price) {
        violations.push(RuleViolation::OutOfRange {
            field: "Fish_sell_price",
            bound: "[1, 1000000]",
        });
    }

    let fish_name = candidate.fish_name.trim();
    if !species.is_empty() && !fish_name.is_empty() && !species.iter().any(|s| s == fish_name) {
        violations.push(RuleViolation::InvalidCategoricalValue {
            field: "Fish_name",
            value: fish_name.to_string(),
        });
    }

    if normalize_time(&candidate.time_text).is_none() {
        violations.push(RuleViolation::InvalidTimeFormat {
            text: candidate.time_text.clone(),
        });
    }

    violations
}

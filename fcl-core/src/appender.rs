//! Id assignment, entry defaults and the append operation.
//!
//! `EntryDefaults` is the explicit per-interaction context the entry form
//! is pre-filled from: derived fresh from the loaded dataset on every
//! cycle, never carried as ambient process state.

use crate::error::{FclError, Result};
use crate::record::CatchRecord;
use crate::store::Dataset;
use crate::validate::{normalize_time, validate, CandidateCatch, RuleViolation};
use chrono::{Local, NaiveDate, NaiveTime};

/// Fallback time when no record carries a parseable Time.
const FALLBACK_TIME: (u32, u32) = (12, 0);

/// The id the next appended record will get: 1 for an empty dataset or one
/// with no numeric ids, otherwise max(numeric ids) + 1.
pub fn next_id(dataset: &Dataset) -> u64 {
    dataset
        .records
        .iter()
        .filter_map(|record| record.catch_id)
        .max()
        .map_or(1, |max| max + 1)
}

/// The most recently entered parseable Date, falling back to today.
pub fn last_known_date(dataset: &Dataset) -> NaiveDate {
    dataset
        .records
        .iter()
        .rev()
        .find_map(|record| record.date)
        .unwrap_or_else(|| Local::now().naive_local().date())
}

/// The most recently entered parseable Time, falling back to 12:00.
pub fn last_known_time(dataset: &Dataset) -> NaiveTime {
    dataset
        .records
        .iter()
        .rev()
        .find_map(|record| record.time)
        .unwrap_or_else(|| {
            NaiveTime::from_hms_opt(FALLBACK_TIME.0, FALLBACK_TIME.1, 0).unwrap()
        })
}

/// The last non-empty Fish_name in insertion order, if any.
pub fn last_known_fish_name(dataset: &Dataset) -> Option<String> {
    dataset
        .records
        .iter()
        .rev()
        .map(|record| record.fish_name.trim())
        .find(|name| !name.is_empty())
        .map(str::to_string)
}

/// Pre-fill values for a new entry, derived from the current dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDefaults {
    pub next_id: u64,
    pub last_date: NaiveDate,
    pub last_time: NaiveTime,
    pub last_fish_name: Option<String>,
}

impl EntryDefaults {
    pub fn derive(dataset: &Dataset) -> Self {
        EntryDefaults {
            next_id: next_id(dataset),
            last_date: last_known_date(dataset),
            last_time: last_known_time(dataset),
            last_fish_name: last_known_fish_name(dataset),
        }
    }
}

/// Validate a candidate, assign the next id, derive the sell price and
/// append the resulting record to the end of the dataset.
///
/// Refuses invalid candidates with the full violation list. Never removes
/// or reorders existing rows.
pub fn append<'a>(
    dataset: &'a mut Dataset,
    candidate: &CandidateCatch,
    species: &[String],
) -> Result<&'a CatchRecord> {
    let violations = validate(candidate, species);
    if !violations.is_empty() {
        return Err(FclError::Validation { violations });
    }
    let time = match normalize_time(&candidate.time_text) {
        Some(time) => time,
        None => {
            return Err(FclError::Validation {
                violations: vec![RuleViolation::InvalidTimeFormat {
                    text: candidate.time_text.clone(),
                }],
            })
        }
    };

    let record = CatchRecord {
        catch_id: Some(next_id(dataset)),
        date: Some(candidate.date),
        time: Some(time),
        country: candidate.country.trim().to_string(),
        state: candidate.state.trim().to_string(),
        weather: candidate.weather.trim().to_string(),
        temperature_c: Some(candidate.temperature_c),
        water_temperature_c: Some(candidate.water_temperature_c),
        wind_m_s: Some(candidate.wind_m_s),
        pressure_hpa: Some(candidate.pressure_hpa),
        fishing_method: candidate.fishing_method.trim().to_string(),
        fish_name: candidate.fish_name.trim().to_string(),
        fish_weight_kg: Some(candidate.fish_weight_kg),
        fish_length_cm: Some(candidate.fish_length_cm),
        sell_price: Some(candidate.raw_price as f64 / 10.0),
    };
    dataset.records.push(record);
    Ok(dataset.records.last().expect("record was just pushed"))
}

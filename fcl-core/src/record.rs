//! The catch record type and its conversions to and from master-file rows.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Date format used in the master file: "YYYY-MM-DD"
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Time format used in the master file: "HH:MM"
pub const TIME_FORMAT: &str = "%H:%M";

/// One observed catch, as stored in the master file.
///
/// Typed fields are optional because an externally-replaced master file may
/// carry blank or unparseable cells; only column presence is enforced there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatchRecord {
    pub catch_id: Option<u64>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub country: String,
    pub state: String,
    pub weather: String,
    pub temperature_c: Option<f64>,
    pub water_temperature_c: Option<f64>,
    pub wind_m_s: Option<f64>,
    pub pressure_hpa: Option<f64>,
    pub fishing_method: String,
    pub fish_name: String,
    pub fish_weight_kg: Option<f64>,
    pub fish_length_cm: Option<f64>,
    pub sell_price: Option<f64>,
}

fn parse_opt<T: std::str::FromStr>(cell: &str, blanked: &mut usize) -> Option<T> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    match cell.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            *blanked += 1;
            None
        }
    }
}

fn parse_date(cell: &str, blanked: &mut usize) -> Option<NaiveDate> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(cell, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            *blanked += 1;
            None
        }
    }
}

fn parse_time(cell: &str, blanked: &mut usize) -> Option<NaiveTime> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    match NaiveTime::parse_from_str(cell, TIME_FORMAT) {
        Ok(time) => Some(time),
        Err(_) => {
            *blanked += 1;
            None
        }
    }
}

fn fmt_opt<T: std::fmt::Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => String::new(),
    }
}

impl CatchRecord {
    /// Build a record from 15 cells in canonical column order.
    ///
    /// Cells that fail to parse are blanked rather than dropping the row;
    /// returns the record together with the number of blanked cells so the
    /// caller can log them.
    pub fn from_canonical_cells(cells: &[String]) -> (Self, usize) {
        let mut blanked = 0;
        let cell = |i: usize| cells.get(i).map(String::as_str).unwrap_or("");
        let record = CatchRecord {
            catch_id: parse_opt(cell(0), &mut blanked),
            date: parse_date(cell(1), &mut blanked),
            time: parse_time(cell(2), &mut blanked),
            country: cell(3).trim().to_string(),
            state: cell(4).trim().to_string(),
            weather: cell(5).trim().to_string(),
            temperature_c: parse_opt(cell(6), &mut blanked),
            water_temperature_c: parse_opt(cell(7), &mut blanked),
            wind_m_s: parse_opt(cell(8), &mut blanked),
            pressure_hpa: parse_opt(cell(9), &mut blanked),
            fishing_method: cell(10).trim().to_string(),
            fish_name: cell(11).trim().to_string(),
            fish_weight_kg: parse_opt(cell(12), &mut blanked),
            fish_length_cm: parse_opt(cell(13), &mut blanked),
            sell_price: parse_opt(cell(14), &mut blanked),
        };
        (record, blanked)
    }

    /// Serialize the record as 15 cells in canonical column order.
    pub fn to_canonical_cells(&self) -> Vec<String> {
        vec![
            fmt_opt(&self.catch_id),
            self.date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            self.time
                .map(|t| t.format(TIME_FORMAT).to_string())
                .unwrap_or_default(),
            self.country.clone(),
            self.state.clone(),
            self.weather.clone(),
            fmt_opt(&self.temperature_c),
            fmt_opt(&self.water_temperature_c),
            fmt_opt(&self.wind_m_s),
            fmt_opt(&self.pressure_hpa),
            self.fishing_method.clone(),
            self.fish_name.clone(),
            fmt_opt(&self.fish_weight_kg),
            fmt_opt(&self.fish_length_cm),
            fmt_opt(&self.sell_price),
        ]
    }
}

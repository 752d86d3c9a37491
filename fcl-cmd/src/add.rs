//! The add command: one full entry cycle against the master file.
//!
//! Mirrors the entry form flow: load the current dataset, derive pre-fill
//! defaults from it, build the candidate, validate, append, persist.

use chrono::NaiveDate;
use clap::Args;
use fcl_core::appender::{append, EntryDefaults};
use fcl_core::error::FclError;
use fcl_core::record::{DATE_FORMAT, TIME_FORMAT};
use fcl_core::schema::fish_species;
use fcl_core::store::{ensure_dataset, load_dataset, save_dataset};
use fcl_core::validate::CandidateCatch;
use log::{info, warn};
use std::path::Path;

#[derive(Args)]
pub struct AddArgs {
    /// Calendar date (YYYY-MM-DD); defaults to the last entered date
    #[arg(long)]
    pub date: Option<String>,

    /// Time of day, lenient H, H:M or HH:MM; defaults to the last entered time
    #[arg(long)]
    pub time: Option<String>,

    #[arg(long)]
    pub country: String,

    #[arg(long)]
    pub state: String,

    #[arg(long, default_value = "Sunny")]
    pub weather: String,

    /// Air temperature in Celsius
    #[arg(long)]
    pub temperature: f64,

    /// Water temperature in Celsius
    #[arg(long)]
    pub water_temperature: f64,

    /// Wind in m/s
    #[arg(long)]
    pub wind: f64,

    /// Atmospheric pressure in hPa
    #[arg(long, default_value_t = 1013.0)]
    pub pressure: f64,

    #[arg(long)]
    pub method: String,

    /// Fish species; defaults to the last entered fish name
    #[arg(long)]
    pub fish: Option<String>,

    /// Fish weight in kg
    #[arg(long)]
    pub weight: f64,

    /// Fish length in cm
    #[arg(long)]
    pub length: f64,

    /// Integer sale price; stored as price / 10
    #[arg(long)]
    pub price: i64,
}

/// Build a candidate from the arguments, filling gaps from the defaults
/// derived off the current dataset.
fn build_candidate(args: &AddArgs, defaults: &EntryDefaults) -> anyhow::Result<CandidateCatch> {
    let date = match &args.date {
        Some(text) => NaiveDate::parse_from_str(text, DATE_FORMAT)
            .map_err(|e| anyhow::anyhow!("Bad --date {:?}: {}", text, e))?,
        None => defaults.last_date,
    };
    let time_text = match &args.time {
        Some(text) => text.clone(),
        None => defaults.last_time.format(TIME_FORMAT).to_string(),
    };
    let fish_name = args
        .fish
        .clone()
        .or_else(|| defaults.last_fish_name.clone())
        .unwrap_or_default();

    Ok(CandidateCatch {
        date,
        time_text,
        country: args.country.clone(),
        state: args.state.clone(),
        weather: args.weather.clone(),
        temperature_c: args.temperature,
        water_temperature_c: args.water_temperature,
        wind_m_s: args.wind,
        pressure_hpa: args.pressure,
        fishing_method: args.method.clone(),
        fish_name,
        fish_weight_kg: args.weight,
        fish_length_cm: args.length,
        raw_price: args.price,
    })
}

pub fn run_add(data_csv: &str, args: AddArgs) -> anyhow::Result<()> {
    let path = Path::new(data_csv);
    ensure_dataset(path)?;
    let mut dataset = load_dataset(path);
    let defaults = EntryDefaults::derive(&dataset);

    let candidate = build_candidate(&args, &defaults)?;
    let species = fish_species();
    let record = match append(&mut dataset, &candidate, &species) {
        Ok(record) => record,
        Err(FclError::Validation { violations }) => {
            for violation in &violations {
                warn!("Validation: {violation}");
            }
            anyhow::bail!(
                "Record rejected with {} validation problem(s); nothing was saved",
                violations.len()
            );
        }
        Err(e) => return Err(e.into()),
    };
    let catch_id = record.catch_id;

    save_dataset(path, &dataset)?;
    info!(
        "Appended catch {:?} to {} ({} records total)",
        catch_id,
        data_csv,
        dataset.len()
    );
    println!(
        "Saved catch {} to {}",
        catch_id.unwrap_or_default(),
        data_csv
    );
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveTime;

    fn args() -> AddArgs {
        AddArgs {
            date: None,
            time: None,
            country: "Peru".to_string(),
            state: "Loreto".to_string(),
            weather: "Rain".to_string(),
            temperature: 28.5,
            water_temperature: 26.0,
            wind: 2.5,
            pressure: 1008.0,
            method: "Handline".to_string(),
            fish: None,
            weight: 45.2,
            length: 180.0,
            price: 100,
        }
    }

    fn defaults() -> EntryDefaults {
        EntryDefaults {
            next_id: 4,
            last_date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            last_time: NaiveTime::from_hms_opt(18, 30, 0).unwrap(),
            last_fish_name: Some("Dorado".to_string()),
        }
    }

    #[test]
    fn test_build_candidate_fills_gaps_from_defaults() {
        let candidate = build_candidate(&args(), &defaults()).unwrap();
        assert_eq!(
            candidate.date,
            NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
        );
        assert_eq!(candidate.time_text, "18:30");
        assert_eq!(candidate.fish_name, "Dorado");
    }

    #[test]
    fn test_build_candidate_explicit_values_win() {
        let mut explicit = args();
        explicit.date = Some("2023-01-01".to_string());
        explicit.time = Some("7:5".to_string());
        explicit.fish = Some("Paiche".to_string());
        let candidate = build_candidate(&explicit, &defaults()).unwrap();
        assert_eq!(
            candidate.date,
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
        );
        assert_eq!(candidate.time_text, "7:5");
        assert_eq!(candidate.fish_name, "Paiche");
    }

    #[test]
    fn test_build_candidate_rejects_bad_date() {
        let mut bad = args();
        bad.date = Some("January 1st".to_string());
        assert!(build_candidate(&bad, &defaults()).is_err());
    }

    #[test]
    fn test_run_add_end_to_end() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("catch_log.csv");
        let data_csv = path.to_str().unwrap();

        let mut first = args();
        first.date = Some("2024-06-15".to_string());
        first.time = Some("7:5".to_string());
        first.fish = Some("Paiche".to_string());
        run_add(data_csv, first).unwrap();

        // second entry leans on defaults derived from the first
        run_add(data_csv, args()).unwrap();

        let dataset = load_dataset(&path);
        assert_eq!(dataset.len(), 2);
        let last = dataset.records.last().unwrap();
        assert_eq!(last.catch_id, Some(2));
        assert_eq!(last.fish_name, "Paiche");
        assert_eq!(last.time, NaiveTime::from_hms_opt(7, 5, 0));
        assert_eq!(last.sell_price, Some(10.0));
    }

    #[test]
    fn test_run_add_rejects_invalid_and_saves_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("catch_log.csv");
        let data_csv = path.to_str().unwrap();

        let mut bad = args();
        bad.state = "Loreto".to_string();
        bad.country = "United States".to_string();
        bad.fish = Some("Paiche".to_string());
        assert!(run_add(data_csv, bad).is_err());
        assert!(load_dataset(&path).is_empty());
    }
}

//! The show command: print the current dataset.

use fcl_core::record::{DATE_FORMAT, TIME_FORMAT};
use fcl_core::store::load_dataset;
use std::path::Path;

fn fmt_opt_f64(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

pub fn run_show(data_csv: &str) -> anyhow::Result<()> {
    let dataset = load_dataset(Path::new(data_csv));
    for record in &dataset.records {
        let id = record
            .catch_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        let date = record
            .date
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_else(|| "-".to_string());
        let time = record
            .time
            .map(|t| t.format(TIME_FORMAT).to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "#{} {} {} | {} / {} | {} | {} kg, {} cm, {} | {}",
            id,
            date,
            time,
            record.country,
            record.state,
            record.fish_name,
            fmt_opt_f64(record.fish_weight_kg),
            fmt_opt_f64(record.fish_length_cm),
            fmt_opt_f64(record.sell_price),
            record.fishing_method,
        );
    }
    println!("{} records in {}", dataset.len(), data_csv);
    Ok(())
}

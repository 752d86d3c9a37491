//! Maintenance commands for the master file: init, replace, clear, export.

use fcl_core::store::{clear_dataset, ensure_dataset, read_raw, replace_dataset};
use log::info;
use std::path::Path;

pub fn run_init(data_csv: &str) -> anyhow::Result<()> {
    ensure_dataset(Path::new(data_csv))?;
    info!("Master file ready at {}", data_csv);
    Ok(())
}

/// Replace the master file with an incoming CSV file.
///
/// The incoming file must carry every canonical column by name; on any
/// failure the existing master file is left untouched.
pub fn run_replace(data_csv: &str, incoming: &str) -> anyhow::Result<()> {
    let incoming_path = Path::new(incoming);
    if !incoming_path.exists() {
        anyhow::bail!("Incoming file {} not found", incoming);
    }
    let incoming_text = std::fs::read_to_string(incoming_path)?;
    let rows = replace_dataset(Path::new(data_csv), &incoming_text)?;
    info!("Replaced {} with {} rows from {}", data_csv, rows, incoming);
    println!("Replaced {} with {} rows", data_csv, rows);
    Ok(())
}

pub fn run_clear(data_csv: &str, secret: &str, expected_secret: &str) -> anyhow::Result<()> {
    clear_dataset(Path::new(data_csv), secret, expected_secret)?;
    println!("Cleared {}", data_csv);
    Ok(())
}

/// Copy the master file to `dest`, byte for byte, no transformation.
pub fn run_export(data_csv: &str, dest: &str) -> anyhow::Result<()> {
    let bytes = read_raw(Path::new(data_csv))?;
    std::fs::write(dest, &bytes)?;
    info!("Exported {} bytes from {} to {}", bytes.len(), data_csv, dest);
    Ok(())
}

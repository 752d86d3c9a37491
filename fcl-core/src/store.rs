//! Load/save of the whole catch dataset to and from the master CSV file.
//!
//! Every save rewrites the file in full under the canonical column order.
//! Reads are lenient: a missing, unreadable or corrupt file degrades to an
//! empty dataset so the caller can always proceed; write failures are fatal
//! and propagate. No file lock spans the read-modify-write cycle, so two
//! overlapping writers are a last-writer-wins race.

use crate::error::{FclError, Result};
use crate::record::CatchRecord;
use crate::schema::CANONICAL_COLUMNS;
use csv::{ReaderBuilder, WriterBuilder};
use log::{info, warn};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// The in-memory dataset: catch records in insertion order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Dataset {
    pub records: Vec<CatchRecord>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Map header names to their column positions.
fn header_positions(headers: &csv::StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(position, name)| (name.trim().to_string(), position))
        .collect()
}

/// Parse CSV text into a dataset, reindexing columns to canonical order.
///
/// Canonical columns absent from the header are back-filled with blanks;
/// non-canonical columns are dropped. Rows the CSV reader rejects and cells
/// that fail to parse are counted and logged, never fatal.
fn parse_rows(csv_text: &str) -> std::result::Result<Dataset, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_text.as_bytes());
    let positions = header_positions(reader.headers()?);

    let mut records = Vec::new();
    let mut skipped_rows = 0usize;
    let mut blanked_cells = 0usize;
    for row in reader.records() {
        let row = match row {
            Ok(row) => row,
            Err(_) => {
                skipped_rows += 1;
                continue;
            }
        };
        let cells: Vec<String> = CANONICAL_COLUMNS
            .iter()
            .map(|column| {
                positions
                    .get(*column)
                    .and_then(|&position| row.get(position))
                    .unwrap_or("")
                    .to_string()
            })
            .collect();
        let (record, blanked) = CatchRecord::from_canonical_cells(&cells);
        blanked_cells += blanked;
        records.push(record);
    }
    if skipped_rows > 0 || blanked_cells > 0 {
        warn!(
            "Master file read: skipped {} unparseable rows, blanked {} unparseable cells",
            skipped_rows, blanked_cells
        );
    }
    Ok(Dataset { records })
}

/// Create an empty master file under the canonical schema if none exists.
///
/// Idempotent: an existing file is never touched, regardless of contents.
pub fn ensure_dataset(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    info!("Creating empty master file at {}", path.display());
    save_dataset(path, &Dataset::default())
}

/// Read the master file, normalizing columns to canonical order.
///
/// Never fails: an unreadable or corrupt file degrades to an empty dataset
/// with a warning, so the interaction cycle can always start.
pub fn load_dataset(path: &Path) -> Dataset {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            warn!(
                "Could not read master file {}: {}; starting from an empty dataset",
                path.display(),
                e
            );
            return Dataset::default();
        }
    };
    match parse_rows(&text) {
        Ok(dataset) => dataset,
        Err(e) => {
            warn!(
                "Could not parse master file {}: {}; starting from an empty dataset",
                path.display(),
                e
            );
            Dataset::default()
        }
    }
}

/// Serialize the full dataset to the master file in canonical column order,
/// overwriting it in full.
pub fn save_dataset(path: &Path, dataset: &Dataset) -> Result<()> {
    let mut writer = WriterBuilder::new().from_path(path)?;
    writer.write_record(CANONICAL_COLUMNS)?;
    for record in &dataset.records {
        writer.write_record(record.to_canonical_cells())?;
    }
    writer.flush().map_err(FclError::Persistence)?;
    Ok(())
}

/// Replace the master file with incoming CSV data.
///
/// The incoming data must contain every canonical column by name (order
/// independent) or the operation fails with [`FclError::Schema`] and the
/// existing store is left untouched. On success the data is reindexed to
/// canonical order (extra columns dropped), written out, then re-read to
/// confirm the row count survived. Returns the number of rows written.
pub fn replace_dataset(path: &Path, incoming_csv: &str) -> Result<usize> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(incoming_csv.as_bytes());
    let positions = header_positions(reader.headers()?);

    let missing: Vec<String> = CANONICAL_COLUMNS
        .iter()
        .filter(|column| !positions.contains_key(**column))
        .map(|column| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(FclError::Schema { missing });
    }

    let incoming = parse_rows(incoming_csv)?;
    let written = incoming.len();
    save_dataset(path, &incoming)?;

    let reread = load_dataset(path).len();
    if reread != written {
        return Err(FclError::ReplaceVerification { written, reread });
    }
    info!(
        "Replaced master file {} with {} rows",
        path.display(),
        written
    );
    Ok(written)
}

/// Wipe the master file back to zero records under the canonical schema.
///
/// Guarded by an exact-equality shared secret check; on mismatch the store
/// is left untouched. A shared plaintext secret is a documented limitation
/// of this system, not an authorization scheme.
pub fn clear_dataset(path: &Path, supplied_secret: &str, expected_secret: &str) -> Result<()> {
    if supplied_secret != expected_secret {
        return Err(FclError::SecretMismatch);
    }
    info!("Clearing master file {}", path.display());
    save_dataset(path, &Dataset::default())
}

/// Raw byte passthrough of the current master file, for download/export.
pub fn read_raw(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(FclError::Persistence)
}

#[cfg(test)]
mod test {
    use super::*;
    use tempfile::TempDir;

    const MASTER_FIXTURE: &str = "\
Catch_id,Date,Time,Country,State,Weather,Temperature_in_Celsius,Water_temperature_in_Celsius,Wind_in_m/s,Atmospheric_pressure_in_hPa,Fishing_method,Fish_name,Fish_weight_in_kg,Fish_length_in_cm,Fish_sell_price
1,2024-06-15,07:05,Peru,Loreto,Rain,28.5,26,2.5,1008,Handline,Paiche,45.2,180,320.5
2,2024-06-16,18:30,Norway,Troms,Overcast,9,7.5,11,995,Trolling,Atlantic cod,4.1,72,12
";

    // same rows, shuffled columns, one extra non-canonical column
    const SHUFFLED_FIXTURE: &str = "\
Fish_name,Catch_id,Date,Moon_phase,Time,Country,State,Weather,Temperature_in_Celsius,Water_temperature_in_Celsius,Wind_in_m/s,Atmospheric_pressure_in_hPa,Fishing_method,Fish_weight_in_kg,Fish_length_in_cm,Fish_sell_price
Paiche,1,2024-06-15,waxing,07:05,Peru,Loreto,Rain,28.5,26,2.5,1008,Handline,45.2,180,320.5
";

    fn master_path(dir: &TempDir) -> std::path::PathBuf {
        dir.path().join("catch_log.csv")
    }

    #[test]
    fn test_ensure_dataset_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = master_path(&dir);

        ensure_dataset(&path).unwrap();
        assert!(path.exists());
        assert!(load_dataset(&path).is_empty());

        fs::write(&path, MASTER_FIXTURE).unwrap();
        ensure_dataset(&path).unwrap();
        // second call must not alter the existing non-empty dataset
        assert_eq!(load_dataset(&path).len(), 2);
    }

    #[test]
    fn test_load_missing_or_corrupt_degrades_to_empty() {
        let dir = TempDir::new().unwrap();
        let path = master_path(&dir);
        assert!(load_dataset(&path).is_empty());

        // not valid UTF-8, the read itself fails
        fs::write(&path, [0xff, 0xfe, 0x00, 0x67]).unwrap();
        assert!(load_dataset(&path).is_empty());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = master_path(&dir);
        fs::write(&path, MASTER_FIXTURE).unwrap();

        let dataset = load_dataset(&path);
        assert_eq!(dataset.len(), 2);
        save_dataset(&path, &dataset).unwrap();
        let reloaded = load_dataset(&path);
        assert_eq!(reloaded, dataset);
        assert_eq!(reloaded.records[1].fish_name, "Atlantic cod");
    }

    #[test]
    fn test_load_backfills_missing_columns_and_reorders() {
        let dir = TempDir::new().unwrap();
        let path = master_path(&dir);
        // no Atmospheric_pressure_in_hPa column at all
        fs::write(
            &path,
            "Catch_id,Date,Fish_name\n1,2024-06-15,Paiche\n2,2024-06-16,Zander\n",
        )
        .unwrap();

        let dataset = load_dataset(&path);
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records[0].fish_name, "Paiche");
        assert_eq!(dataset.records[0].pressure_hpa, None);
        assert_eq!(dataset.records[1].catch_id, Some(2));
    }

    #[test]
    fn test_replace_reindexes_and_drops_extras() {
        let dir = TempDir::new().unwrap();
        let path = master_path(&dir);
        ensure_dataset(&path).unwrap();

        let written = replace_dataset(&path, SHUFFLED_FIXTURE).unwrap();
        assert_eq!(written, 1);

        let dataset = load_dataset(&path);
        assert_eq!(dataset.records[0].catch_id, Some(1));
        assert_eq!(dataset.records[0].fish_name, "Paiche");

        // the extra Moon_phase column is gone from the persisted header
        let text = fs::read_to_string(&path).unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(header, CANONICAL_COLUMNS.join(","));
    }

    #[test]
    fn test_replace_missing_column_fails_and_leaves_store_untouched() {
        let dir = TempDir::new().unwrap();
        let path = master_path(&dir);
        fs::write(&path, MASTER_FIXTURE).unwrap();

        // incoming data has no Fish_name column
        let incoming = "Catch_id,Date,Time,Country,State,Weather,Temperature_in_Celsius,Water_temperature_in_Celsius,Wind_in_m/s,Atmospheric_pressure_in_hPa,Fishing_method,Fish_weight_in_kg,Fish_length_in_cm,Fish_sell_price\n9,2024-01-01,09:00,Peru,Loreto,Sunny,30,27,1,1010,Net,10,100,5\n";
        let err = replace_dataset(&path, incoming).unwrap_err();
        match err {
            FclError::Schema { missing } => assert_eq!(missing, vec!["Fish_name".to_string()]),
            other => panic!("expected Schema error, got {other:?}"),
        }
        // original contents intact
        assert_eq!(load_dataset(&path).len(), 2);
        assert_eq!(load_dataset(&path).records[0].fish_name, "Paiche");
    }

    #[test]
    fn test_clear_requires_exact_secret() {
        let dir = TempDir::new().unwrap();
        let path = master_path(&dir);
        fs::write(&path, MASTER_FIXTURE).unwrap();

        assert!(matches!(
            clear_dataset(&path, "wrong", "letmein"),
            Err(FclError::SecretMismatch)
        ));
        assert!(matches!(
            clear_dataset(&path, "", "letmein"),
            Err(FclError::SecretMismatch)
        ));
        assert_eq!(load_dataset(&path).len(), 2);

        clear_dataset(&path, "letmein", "letmein").unwrap();
        assert!(load_dataset(&path).is_empty());
        // canonical header survives the wipe
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().next().unwrap(), CANONICAL_COLUMNS.join(","));
    }

    #[test]
    fn test_read_raw_is_byte_passthrough() {
        let dir = TempDir::new().unwrap();
        let path = master_path(&dir);
        fs::write(&path, MASTER_FIXTURE).unwrap();
        assert_eq!(read_raw(&path).unwrap(), MASTER_FIXTURE.as_bytes());
    }
}

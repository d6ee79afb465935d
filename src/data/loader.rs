use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::model::{CountrySummary, EvDataset, ModelRecord, StationRecord, WorldPeriod};

// ---------------------------------------------------------------------------
// File names and required columns
// ---------------------------------------------------------------------------

pub const STATIONS_FILE: &str = "clean_ev_stations.csv";
pub const MODELS_FILE: &str = "clean_ev_models.csv";
pub const COUNTRY_FILE: &str = "clean_country_summary.csv";
pub const WORLD_FILE: &str = "clean_world_summary.csv";

const STATION_COLUMNS: &[&str] = &["name", "country_code", "latitude", "longitude", "is_fast_dc"];
const MODEL_COLUMNS: &[&str] = &["make", "model", "first_year"];
const COUNTRY_COLUMNS: &[&str] = &["country_code", "stations"];
const WORLD_COLUMNS: &[&str] = &["period", "count"];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Load-time failures. All of these are fatal: no view renders without the
/// full dataset.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("missing data file: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("{file}: missing required column '{column}'")]
    MissingColumn { file: String, column: String },

    #[error("{file}, row {row}: {source}")]
    Row {
        file: String,
        row: usize,
        source: csv::Error,
    },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the four tables from `dir`. Called once per process lifetime; the
/// result is held immutably for as long as the app runs.
pub fn load_dir(dir: &Path) -> Result<EvDataset> {
    let stations: Vec<StationRecord> = load_table(&dir.join(STATIONS_FILE), STATION_COLUMNS)
        .context("loading charging stations")?;
    let models: Vec<ModelRecord> =
        load_table(&dir.join(MODELS_FILE), MODEL_COLUMNS).context("loading EV models")?;
    let countries: Vec<CountrySummary> =
        load_table(&dir.join(COUNTRY_FILE), COUNTRY_COLUMNS).context("loading country summary")?;
    let world: Vec<WorldPeriod> =
        load_table(&dir.join(WORLD_FILE), WORLD_COLUMNS).context("loading world summary")?;

    Ok(EvDataset {
        stations,
        models,
        countries,
        world,
    })
}

// ---------------------------------------------------------------------------
// Generic CSV table loader
// ---------------------------------------------------------------------------

/// Read one CSV table into typed records. The header is checked for the
/// required columns up front so a schema problem is reported by name rather
/// than as a per-row deserialization failure. Extra columns are ignored.
fn load_table<T: DeserializeOwned>(path: &Path, required: &[&str]) -> Result<Vec<T>> {
    if !path.exists() {
        return Err(DataError::MissingFile(path.to_path_buf()).into());
    }
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("<table>")
        .to_string();

    let mut reader =
        csv::Reader::from_path(path).with_context(|| format!("opening {file_name}"))?;

    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("reading {file_name} header"))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    for col in required {
        if !headers.iter().any(|h| h == col) {
            return Err(DataError::MissingColumn {
                file: file_name,
                column: (*col).to_string(),
            }
            .into());
        }
    }

    let mut rows = Vec::new();
    for (row_no, record) in reader.deserialize::<T>().enumerate() {
        let row = record.map_err(|source| DataError::Row {
            file: file_name.clone(),
            row: row_no + 1,
            source,
        })?;
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ev_insights_{}_{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn loads_stations_with_pandas_booleans() {
        let dir = scratch_dir("bools");
        let path = dir.join(STATIONS_FILE);
        std::fs::write(
            &path,
            "name,country_code,latitude,longitude,is_fast_dc\n\
             Alpha,DE,52.52,13.40,True\n\
             Beta,FR,48.85,2.35,False\n\
             Gamma,NO,59.91,10.75,true\n",
        )
        .unwrap();

        let rows: Vec<StationRecord> = load_table(&path, STATION_COLUMNS).unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].is_fast_dc);
        assert!(!rows[1].is_fast_dc);
        assert!(rows[2].is_fast_dc);
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let dir = scratch_dir("missing_col");
        let path = dir.join(COUNTRY_FILE);
        std::fs::write(&path, "country_code\nDE\n").unwrap();

        let err = load_table::<CountrySummary>(&path, COUNTRY_COLUMNS).unwrap_err();
        match err.downcast_ref::<DataError>() {
            Some(DataError::MissingColumn { column, .. }) => assert_eq!(column, "stations"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_fatal() {
        let dir = scratch_dir("missing_file");
        let err = load_table::<WorldPeriod>(&dir.join(WORLD_FILE), WORLD_COLUMNS).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::MissingFile(_))
        ));
    }

    #[test]
    fn bad_row_is_reported_with_its_number() {
        let dir = scratch_dir("bad_row");
        let path = dir.join(COUNTRY_FILE);
        std::fs::write(&path, "country_code,stations\nDE,12\nFR,not-a-number\n").unwrap();

        let err = load_table::<CountrySummary>(&path, COUNTRY_COLUMNS).unwrap_err();
        match err.downcast_ref::<DataError>() {
            Some(DataError::Row { row, .. }) => assert_eq!(*row, 2),
            other => panic!("expected Row, got {other:?}"),
        }
    }

    #[test]
    fn extra_columns_are_ignored() {
        let dir = scratch_dir("extra_cols");
        let path = dir.join(MODELS_FILE);
        std::fs::write(
            &path,
            "make,model,first_year,range_km\nTesla,Model 3,2017,491\n",
        )
        .unwrap();

        let rows: Vec<ModelRecord> = load_table(&path, MODEL_COLUMNS).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].make, "Tesla");
        assert_eq!(rows[0].first_year, 2017);
    }

    #[test]
    fn load_dir_reads_all_four_tables() {
        let dir = scratch_dir("full");
        std::fs::write(
            dir.join(STATIONS_FILE),
            "name,country_code,latitude,longitude,is_fast_dc\nAlpha,DE,52.5,13.4,True\n",
        )
        .unwrap();
        std::fs::write(
            dir.join(MODELS_FILE),
            "make,model,first_year\nTesla,Model 3,2017\n",
        )
        .unwrap();
        std::fs::write(dir.join(COUNTRY_FILE), "country_code,stations\nDE,1\n").unwrap();
        std::fs::write(dir.join(WORLD_FILE), "period,count\n2020,100\n").unwrap();

        let ds = load_dir(&dir).unwrap();
        assert_eq!(ds.stations.len(), 1);
        assert_eq!(ds.models.len(), 1);
        assert_eq!(ds.countries.len(), 1);
        assert_eq!(ds.world.len(), 1);
    }
}

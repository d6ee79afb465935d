use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Record types – one struct per source table
// ---------------------------------------------------------------------------

/// One physical charging station.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationRecord {
    pub name: String,
    pub country_code: String,
    pub latitude: f64,
    pub longitude: f64,
    /// `true` for DC fast chargers, `false` for slow AC.
    #[serde(deserialize_with = "flexible_bool")]
    pub is_fast_dc: bool,
}

/// One EV model as sold, keyed informally by manufacturer + model name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelRecord {
    pub make: String,
    pub model: String,
    /// Year the model first went on sale.
    pub first_year: i32,
}

/// Per-country station totals. `country_code` is unique within the table
/// and shares its code space with [`StationRecord::country_code`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountrySummary {
    pub country_code: String,
    pub stations: u64,
}

/// One period of the world summary. Row order is the time axis; `period`
/// is only a display label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldPeriod {
    pub period: String,
    pub count: f64,
}

/// Accept pandas-style booleans (`True`/`False`) and `1`/`0` alongside the
/// plain lowercase forms the csv crate handles natively.
fn flexible_bool<'de, D>(de: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(de)?;
    match raw.trim() {
        "true" | "True" | "TRUE" | "1" => Ok(true),
        "false" | "False" | "FALSE" | "0" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "'{other}' is not a boolean"
        ))),
    }
}

// ---------------------------------------------------------------------------
// EvDataset – the four loaded tables
// ---------------------------------------------------------------------------

/// The complete loaded dataset. Built once at load time and never mutated;
/// every view recomputes its derived tables from these rows per frame.
#[derive(Debug, Clone, Default)]
pub struct EvDataset {
    pub stations: Vec<StationRecord>,
    pub models: Vec<ModelRecord>,
    pub countries: Vec<CountrySummary>,
    pub world: Vec<WorldPeriod>,
}

impl EvDataset {
    /// Sorted unique manufacturer names, for the filter combo.
    pub fn makes(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self.models.iter().map(|m| m.make.as_str()).collect();
        set.into_iter().map(str::to_owned).collect()
    }

    /// Sorted unique launch years, for the filter combo.
    pub fn launch_years(&self) -> Vec<i32> {
        let set: BTreeSet<i32> = self.models.iter().map(|m| m.first_year).collect();
        set.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(make: &str, model: &str, year: i32) -> ModelRecord {
        ModelRecord {
            make: make.to_string(),
            model: model.to_string(),
            first_year: year,
        }
    }

    #[test]
    fn makes_are_sorted_and_unique() {
        let ds = EvDataset {
            models: vec![
                model("Tesla", "Model 3", 2017),
                model("BYD", "Dolphin", 2021),
                model("Tesla", "Model Y", 2020),
            ],
            ..Default::default()
        };
        assert_eq!(ds.makes(), vec!["BYD".to_string(), "Tesla".to_string()]);
    }

    #[test]
    fn launch_years_are_sorted_and_unique() {
        let ds = EvDataset {
            models: vec![
                model("A", "x", 2021),
                model("B", "y", 2017),
                model("C", "z", 2021),
            ],
            ..Default::default()
        };
        assert_eq!(ds.launch_years(), vec![2017, 2021]);
    }

    #[test]
    fn empty_dataset_has_no_filter_values() {
        let ds = EvDataset::default();
        assert!(ds.makes().is_empty());
        assert!(ds.launch_years().is_empty());
    }
}

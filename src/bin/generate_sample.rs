//! Writes a deterministic synthetic copy of the four dashboard tables, so
//! the app can be tried without the real cleaned datasets:
//!
//! ```text
//! cargo run --bin generate_sample [out_dir]   # default: data/
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

#[derive(Serialize)]
struct StationRow {
    name: String,
    country_code: String,
    latitude: f64,
    longitude: f64,
    is_fast_dc: bool,
}

#[derive(Serialize)]
struct ModelRow {
    make: String,
    model: String,
    first_year: i32,
}

#[derive(Serialize)]
struct CountryRow {
    country_code: String,
    stations: u64,
}

#[derive(Serialize)]
struct WorldRow {
    period: String,
    count: f64,
}

/// (code, lat range, lon range, relative station weight)
const COUNTRIES: &[(&str, [f64; 2], [f64; 2], u32)] = &[
    ("USA", [30.0, 47.0], [-120.0, -75.0], 30),
    ("CHN", [22.0, 41.0], [100.0, 122.0], 34),
    ("DEU", [47.5, 54.5], [6.5, 14.5], 12),
    ("NLD", [51.0, 53.3], [3.5, 7.0], 10),
    ("FRA", [43.0, 50.5], [-1.5, 7.5], 9),
    ("GBR", [50.5, 57.5], [-5.0, 1.5], 9),
    ("NOR", [58.0, 69.5], [5.0, 28.0], 8),
    ("SWE", [55.5, 67.0], [11.5, 23.0], 5),
    ("KOR", [34.5, 38.5], [126.0, 129.5], 5),
    ("JPN", [31.5, 43.5], [130.5, 144.0], 4),
    ("CAN", [43.0, 55.0], [-123.0, -65.0], 4),
    ("ITA", [37.5, 46.5], [7.0, 17.5], 3),
    ("ESP", [36.5, 43.0], [-8.5, 2.5], 3),
    ("DNK", [54.8, 57.5], [8.5, 12.5], 2),
    ("AUT", [46.5, 48.8], [9.5, 16.5], 2),
    ("CHE", [46.0, 47.5], [6.0, 10.0], 2),
];

const MAKES: &[(&str, &[&str])] = &[
    ("Tesla", &["Model S", "Model 3", "Model X", "Model Y"]),
    ("BYD", &["Dolphin", "Seal", "Atto 3", "Han"]),
    ("Nissan", &["Leaf", "Ariya"]),
    ("Volkswagen", &["ID.3", "ID.4", "ID.7", "e-Golf"]),
    ("Hyundai", &["Kona Electric", "Ioniq 5", "Ioniq 6"]),
    ("Kia", &["e-Niro", "EV6", "EV9"]),
    ("BMW", &["i3", "i4", "iX"]),
    ("Mercedes-Benz", &["EQA", "EQC", "EQS"]),
    ("Renault", &["Zoe", "Megane E-Tech", "5 E-Tech"]),
    ("Ford", &["Mustang Mach-E", "F-150 Lightning"]),
    ("Polestar", &["Polestar 2", "Polestar 3"]),
    ("Volvo", &["XC40 Recharge", "EX30"]),
];

const TOTAL_STATIONS: usize = 4200;
const FIRST_PERIOD: i32 = 2010;
const LAST_PERIOD: i32 = 2024;

fn main() -> Result<()> {
    let out_dir: PathBuf = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = StdRng::seed_from_u64(42);

    let station_counts = write_stations(&out_dir, &mut rng)?;
    write_country_summary(&out_dir, &station_counts)?;
    let n_models = write_models(&out_dir, &mut rng)?;
    write_world_summary(&out_dir, &mut rng)?;

    println!(
        "Wrote {} stations, {} models, {} countries, {} world periods to {}",
        TOTAL_STATIONS,
        n_models,
        COUNTRIES.len(),
        LAST_PERIOD - FIRST_PERIOD + 1,
        out_dir.display()
    );
    Ok(())
}

/// Generate stations per country in proportion to its weight. Returns the
/// per-country totals so the country summary stays joinable.
fn write_stations(out_dir: &Path, rng: &mut StdRng) -> Result<Vec<(&'static str, u64)>> {
    let weight_total: u32 = COUNTRIES.iter().map(|&(_, _, _, w)| w).sum();
    let mut writer = csv::Writer::from_path(out_dir.join("clean_ev_stations.csv"))
        .context("writing stations table")?;

    let mut totals = Vec::with_capacity(COUNTRIES.len());
    for &(code, lat, lon, weight) in COUNTRIES {
        let n = TOTAL_STATIONS * weight as usize / weight_total as usize;
        for i in 0..n {
            writer.serialize(StationRow {
                name: format!("{code} Station {:04}", i + 1),
                country_code: code.to_string(),
                latitude: rng.random_range(lat[0]..lat[1]),
                longitude: rng.random_range(lon[0]..lon[1]),
                is_fast_dc: rng.random_bool(0.3),
            })?;
        }
        totals.push((code, n as u64));
    }
    writer.flush()?;
    Ok(totals)
}

fn write_country_summary(out_dir: &Path, totals: &[(&str, u64)]) -> Result<()> {
    let mut writer = csv::Writer::from_path(out_dir.join("clean_country_summary.csv"))
        .context("writing country summary")?;
    for &(code, stations) in totals {
        writer.serialize(CountryRow {
            country_code: code.to_string(),
            stations,
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// Launch years skew towards the recent past: more of the catalogue arrived
/// in the last few years.
fn write_models(out_dir: &Path, rng: &mut StdRng) -> Result<usize> {
    let mut writer =
        csv::Writer::from_path(out_dir.join("clean_ev_models.csv")).context("writing models table")?;

    let mut n_models = 0;
    for &(make, models) in MAKES {
        for model in models {
            let span = (LAST_PERIOD - FIRST_PERIOD) as f64;
            let skew = rng.random::<f64>().sqrt();
            let first_year = FIRST_PERIOD + (skew * span) as i32;
            writer.serialize(ModelRow {
                make: make.to_string(),
                model: (*model).to_string(),
                first_year,
            })?;
            n_models += 1;
        }
    }
    writer.flush()?;
    Ok(n_models)
}

/// Yearly world totals on a rising linear trend with mild noise.
fn write_world_summary(out_dir: &Path, rng: &mut StdRng) -> Result<()> {
    let mut writer = csv::Writer::from_path(out_dir.join("clean_world_summary.csv"))
        .context("writing world summary")?;
    for (i, year) in (FIRST_PERIOD..=LAST_PERIOD).enumerate() {
        let trend = 800.0 + 600.0 * i as f64;
        let noise = (rng.random::<f64>() - 0.5) * 120.0;
        writer.serialize(WorldRow {
            period: year.to_string(),
            count: (trend + noise).round(),
        })?;
    }
    writer.flush()?;
    Ok(())
}

use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::analysis::aggregate::{count_by, top_n};
use crate::analysis::cluster::kmeans_1d;
use crate::analysis::forecast::{model_growth_forecast, world_growth_forecast};
use crate::chart;
use crate::data::model::{ModelRecord, StationRecord, WorldPeriod};
use crate::state::{AppState, ForecastTab, InfrastructureTab, InsightsTab, Page};
use crate::ui::plot::render_chart;

// ---------------------------------------------------------------------------
// Fixed view parameters
// ---------------------------------------------------------------------------

/// Bars shown in the top-countries view.
pub const TOP_COUNTRIES: usize = 10;

/// Clusters in the country-clustering view.
pub const CLUSTER_COUNT: usize = 3;
pub const CLUSTER_SEED: u64 = 42;

/// Station-map sampling cap and seed.
pub const MAP_SAMPLE_LIMIT: usize = 5000;
pub const MAP_SAMPLE_SEED: u64 = 42;

/// World-summary rows shown on the overview page.
const OVERVIEW_ROWS: usize = 5;

// ---------------------------------------------------------------------------
// Page dispatch
// ---------------------------------------------------------------------------

/// Render the currently selected page. Everything derived (counts, top-N,
/// clusters, forecasts) is recomputed from the loaded tables right here,
/// every frame.
pub fn show_page(ui: &mut Ui, state: &mut AppState) {
    if state.data.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a data folder to explore EV insights  (File → Open data folder…)");
        });
        return;
    }

    match state.page {
        Page::Overview => overview(ui, state),
        Page::GlobalInsights => global_insights(ui, state),
        Page::Models => models(ui, state),
        Page::Infrastructure => infrastructure(ui, state),
        Page::Forecasts => forecasts(ui, state),
    }
}

/// Horizontal tab strip; returns with `current` updated.
fn tab_strip<T: Copy + PartialEq>(ui: &mut Ui, current: &mut T, tabs: &[(T, &str)]) {
    ui.horizontal(|ui: &mut Ui| {
        for (tab, label) in tabs {
            if ui.selectable_label(*current == *tab, *label).clicked() {
                *current = *tab;
            }
        }
    });
    ui.separator();
}

// ---------------------------------------------------------------------------
// Overview
// ---------------------------------------------------------------------------

fn overview(ui: &mut Ui, state: &mut AppState) {
    let Some(data) = &state.data else { return };

    ui.heading("Global EV Infrastructure Insights");
    ui.label("A global view of EV adoption, charging networks, and growth forecasts.");
    ui.add_space(8.0);

    ui.columns(3, |cols: &mut [Ui]| {
        metric(&mut cols[0], "Charging Stations", data.stations.len());
        metric(&mut cols[1], "EV Models", data.models.len());
        metric(&mut cols[2], "Countries", data.countries.len());
    });

    ui.add_space(12.0);
    ui.strong("Global Data Overview");
    world_head_table(ui, &data.world);
}

fn metric(ui: &mut Ui, label: &str, value: usize) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(label);
        ui.heading(RichText::new(format_count(value)).size(26.0));
    });
}

/// Thousands-separated row counts for the metric tiles.
fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn world_head_table(ui: &mut Ui, world: &[WorldPeriod]) {
    if world.is_empty() {
        ui.label("No world summary data loaded.");
        return;
    }
    let rows = world.len().min(OVERVIEW_ROWS);
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(120.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Period");
            });
            header.col(|ui| {
                ui.strong("Count");
            });
        })
        .body(|body| {
            body.rows(18.0, rows, |mut row| {
                let period = &world[row.index()];
                row.col(|ui| {
                    ui.label(&period.period);
                });
                row.col(|ui| {
                    ui.label(format!("{:.0}", period.count));
                });
            });
        });
}

// ---------------------------------------------------------------------------
// Global Insights
// ---------------------------------------------------------------------------

fn global_insights(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Global Charging Infrastructure");
    ui.label("Charging density, hotspots, and geographic spread.");
    ui.add_space(4.0);

    tab_strip(
        ui,
        &mut state.insights_tab,
        &[
            (InsightsTab::ByCountry, "Stations by Country"),
            (InsightsTab::TopCountries, "Top 10 Countries"),
            (InsightsTab::StationMap, "Station Map"),
        ],
    );

    let Some(data) = &state.data else { return };
    if data.stations.is_empty() {
        ui.label("No station data loaded.");
        return;
    }

    match state.insights_tab {
        InsightsTab::ByCountry => {
            let mut counts = count_by(&data.stations, |s| s.country_code.clone());
            counts.sort_by(|a, b| a.0.cmp(&b.0));
            render_chart(ui, &chart::stations_by_country(&counts));
        }
        InsightsTab::TopCountries => {
            let counts = count_by(&data.stations, |s| s.country_code.clone());
            let top = top_n(&counts, TOP_COUNTRIES);
            render_chart(ui, &chart::top_countries(&top));
        }
        InsightsTab::StationMap => {
            let sampled = sample_stations(&data.stations, MAP_SAMPLE_LIMIT, MAP_SAMPLE_SEED);
            render_chart(ui, &chart::station_map(&sampled));
        }
    }
}

/// Draw at most `limit` stations with a fixed seed, keeping source order so
/// the view is stable frame to frame.
fn sample_stations(stations: &[StationRecord], limit: usize, seed: u64) -> Vec<&StationRecord> {
    if stations.len() <= limit {
        return stations.iter().collect();
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let mut picks = rand::seq::index::sample(&mut rng, stations.len(), limit).into_vec();
    picks.sort_unstable();
    picks.into_iter().map(|i| &stations[i]).collect()
}

// ---------------------------------------------------------------------------
// EV Models
// ---------------------------------------------------------------------------

fn models(ui: &mut Ui, state: &mut AppState) {
    ui.heading("EV Model Analytics");
    ui.label("Explore EV models by manufacturer and launch year.");
    ui.add_space(4.0);

    let (makes, years) = {
        let Some(data) = &state.data else { return };
        (data.makes(), data.launch_years())
    };

    let mut filter = state.model_filter.clone();
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Manufacturer:");
        let selected = filter.make.clone().unwrap_or_else(|| "All".to_string());
        egui::ComboBox::from_id_salt("make_filter")
            .selected_text(selected)
            .show_ui(ui, |ui: &mut Ui| {
                if ui.selectable_label(filter.make.is_none(), "All").clicked() {
                    filter.make = None;
                }
                for make in &makes {
                    if ui
                        .selectable_label(filter.make.as_deref() == Some(make), make)
                        .clicked()
                    {
                        filter.make = Some(make.clone());
                    }
                }
            });

        ui.label("Launch year:");
        let selected = filter
            .first_year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "All".to_string());
        egui::ComboBox::from_id_salt("year_filter")
            .selected_text(selected)
            .show_ui(ui, |ui: &mut Ui| {
                if ui
                    .selectable_label(filter.first_year.is_none(), "All")
                    .clicked()
                {
                    filter.first_year = None;
                }
                for &year in &years {
                    if ui
                        .selectable_label(filter.first_year == Some(year), year.to_string())
                        .clicked()
                    {
                        filter.first_year = Some(year);
                    }
                }
            });
    });
    state.model_filter = filter.clone();

    let Some(data) = &state.data else { return };
    let indices = crate::data::filter::filtered_indices(&data.models, &filter);

    ui.add_space(4.0);
    ui.label(format!("Displaying {} matching EV models", indices.len()));

    if indices.is_empty() {
        if filter.is_active() {
            ui.label("No matching EV models for the current selection.");
        } else {
            ui.label("The model table is empty.");
        }
        return;
    }
    model_table(ui, &data.models, &indices);
}

fn model_table(ui: &mut Ui, models: &[ModelRecord], indices: &[usize]) {
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(140.0))
        .column(Column::remainder())
        .column(Column::auto().at_least(80.0))
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Make");
            });
            header.col(|ui| {
                ui.strong("Model");
            });
            header.col(|ui| {
                ui.strong("First year");
            });
        })
        .body(|body| {
            body.rows(18.0, indices.len(), |mut row| {
                let record = &models[indices[row.index()]];
                row.col(|ui| {
                    ui.label(&record.make);
                });
                row.col(|ui| {
                    ui.label(&record.model);
                });
                row.col(|ui| {
                    ui.label(record.first_year.to_string());
                });
            });
        });
}

// ---------------------------------------------------------------------------
// Charging Infrastructure
// ---------------------------------------------------------------------------

fn infrastructure(ui: &mut Ui, state: &mut AppState) {
    ui.heading("EV Charging Network Overview");
    ui.label("Charger distribution and country level infrastructure.");
    ui.add_space(4.0);

    tab_strip(
        ui,
        &mut state.infrastructure_tab,
        &[
            (InfrastructureTab::ChargerMix, "Charger Mix"),
            (InfrastructureTab::Clustering, "Country Clustering"),
        ],
    );

    let Some(data) = &state.data else { return };

    match state.infrastructure_tab {
        InfrastructureTab::ChargerMix => {
            if data.stations.is_empty() {
                ui.label("No station data loaded.");
                return;
            }
            let counts = count_by(&data.stations, |s| s.is_fast_dc);
            let fast = counts.iter().find(|(k, _)| *k).map_or(0, |&(_, c)| c);
            let slow = counts.iter().find(|(k, _)| !*k).map_or(0, |&(_, c)| c);
            render_chart(ui, &chart::charger_mix(fast, slow));
        }
        InfrastructureTab::Clustering => {
            if data.countries.is_empty() {
                ui.label("No country summary data loaded.");
                return;
            }
            let values: Vec<f64> = data.countries.iter().map(|c| c.stations as f64).collect();
            let assignments = kmeans_1d(&values, CLUSTER_COUNT, CLUSTER_SEED);
            render_chart(
                ui,
                &chart::country_clusters(&data.countries, &assignments, CLUSTER_COUNT),
            );
        }
    }
}

// ---------------------------------------------------------------------------
// EV Forecasts
// ---------------------------------------------------------------------------

fn forecasts(ui: &mut Ui, state: &mut AppState) {
    ui.heading("EV Market Forecasts");
    ui.label("Least-squares projections for EV growth and infrastructure expansion.");
    ui.add_space(4.0);

    tab_strip(
        ui,
        &mut state.forecast_tab,
        &[
            (ForecastTab::Models, "EV Model Forecast"),
            (ForecastTab::Stations, "Charging Station Forecast"),
        ],
    );

    let Some(data) = &state.data else { return };

    match state.forecast_tab {
        ForecastTab::Models => match model_growth_forecast(&data.models) {
            Ok(points) => render_chart(ui, &chart::model_forecast(&points)),
            Err(e) => {
                ui.label(format!("Forecast unavailable: {e}"));
            }
        },
        ForecastTab::Stations => match world_growth_forecast(&data.world) {
            Ok(points) => render_chart(ui, &chart::world_forecast(&points)),
            Err(e) => {
                ui.label(format!("Forecast unavailable: {e}"));
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(code: &str, n: usize) -> StationRecord {
        StationRecord {
            name: format!("{code}-{n}"),
            country_code: code.to_string(),
            latitude: 0.0,
            longitude: 0.0,
            is_fast_dc: n % 2 == 0,
        }
    }

    #[test]
    fn format_count_groups_thousands() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn sampling_below_the_limit_keeps_everything() {
        let stations: Vec<StationRecord> = (0..10).map(|i| station("DE", i)).collect();
        let sampled = sample_stations(&stations, MAP_SAMPLE_LIMIT, MAP_SAMPLE_SEED);
        assert_eq!(sampled.len(), 10);
    }

    #[test]
    fn sampling_is_capped_and_deterministic() {
        let stations: Vec<StationRecord> = (0..50).map(|i| station("DE", i)).collect();
        let a = sample_stations(&stations, 20, MAP_SAMPLE_SEED);
        let b = sample_stations(&stations, 20, MAP_SAMPLE_SEED);
        assert_eq!(a.len(), 20);
        let names_a: Vec<&str> = a.iter().map(|s| s.name.as_str()).collect();
        let names_b: Vec<&str> = b.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names_a, names_b);
    }

    #[test]
    fn sampling_preserves_source_order() {
        let stations: Vec<StationRecord> = (0..50).map(|i| station("DE", i)).collect();
        let sampled = sample_stations(&stations, 20, MAP_SAMPLE_SEED);
        let numbers: Vec<usize> = sampled
            .iter()
            .map(|s| s.name[3..].parse().unwrap())
            .collect();
        assert!(numbers.windows(2).all(|w| w[0] < w[1]));
    }
}

use eframe::egui::Color32;

use crate::color;
use crate::data::model::{CountrySummary, StationRecord};

// ---------------------------------------------------------------------------
// Chart descriptions
// ---------------------------------------------------------------------------
// Each view's transformed table is mapped to a ChartSpec here; rendering
// with egui_plot happens in ui::plot. Builders are pure so they can be
// tested without a UI.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Line,
    Scatter,
}

#[derive(Debug, Clone)]
pub struct ChartSeries {
    pub name: String,
    pub color: Color32,
    pub points: Vec<[f64; 2]>,
    /// Marker radius for scatter points and line markers.
    pub radius: f32,
    /// Overlay markers on a line series.
    pub markers: bool,
}

impl ChartSeries {
    fn new(name: impl Into<String>, color: Color32, points: Vec<[f64; 2]>) -> Self {
        ChartSeries {
            name: name.into(),
            color,
            points,
            radius: 2.5,
            markers: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Tick labels for a categorical x axis; the x value is the index.
    pub x_categories: Option<Vec<String>>,
    pub series: Vec<ChartSeries>,
}

const FAST_DC_COLOR: Color32 = Color32::RED;
const SLOW_AC_COLOR: Color32 = Color32::BLUE;
const MODEL_FORECAST_COLOR: Color32 = Color32::from_rgb(44, 160, 44);
const WORLD_FORECAST_COLOR: Color32 = Color32::from_rgb(255, 165, 0);

/// One bar per category, colored per bar.
fn category_bars(
    title: &str,
    x_label: &str,
    y_label: &str,
    bars: Vec<(String, f64, Color32)>,
) -> ChartSpec {
    let categories: Vec<String> = bars.iter().map(|(label, _, _)| label.clone()).collect();
    let series = bars
        .into_iter()
        .enumerate()
        .map(|(i, (label, value, fill))| ChartSeries::new(label, fill, vec![[i as f64, value]]))
        .collect();
    ChartSpec {
        kind: ChartKind::Bar,
        title: title.to_string(),
        x_label: x_label.to_string(),
        y_label: y_label.to_string(),
        x_categories: Some(categories),
        series,
    }
}

fn forecast_line(title: &str, x_label: &str, color: Color32, points: &[[f64; 2]]) -> ChartSpec {
    let mut series = ChartSeries::new("Prediction", color, points.to_vec());
    series.markers = true;
    ChartSpec {
        kind: ChartKind::Line,
        title: title.to_string(),
        x_label: x_label.to_string(),
        y_label: "Predicted count".to_string(),
        x_categories: None,
        series: vec![series],
    }
}

// ---------------------------------------------------------------------------
// One builder per view
// ---------------------------------------------------------------------------

/// All countries, color-graded by station count.
pub fn stations_by_country(counts: &[(String, usize)]) -> ChartSpec {
    let max = counts.iter().map(|&(_, c)| c).max().unwrap_or(0).max(1) as f32;
    let bars = counts
        .iter()
        .map(|(code, count)| {
            (
                code.clone(),
                *count as f64,
                color::heat_color(*count as f32 / max),
            )
        })
        .collect();
    category_bars(
        "EV Charging Stations by Country",
        "Country",
        "Stations",
        bars,
    )
}

/// The top-N slice of the same counts, already sorted by the caller.
pub fn top_countries(top: &[(String, usize)]) -> ChartSpec {
    let max = top.iter().map(|&(_, c)| c).max().unwrap_or(0).max(1) as f32;
    let bars = top
        .iter()
        .map(|(code, count)| {
            (
                code.clone(),
                *count as f64,
                color::heat_color(*count as f32 / max),
            )
        })
        .collect();
    category_bars(
        "Top 10 Countries by Charging Infrastructure",
        "Country",
        "Stations",
        bars,
    )
}

/// Fast vs slow charger totals.
pub fn charger_mix(fast: usize, slow: usize) -> ChartSpec {
    category_bars(
        "Fast vs Slow Charger Distribution",
        "Charger Type",
        "Count",
        vec![
            ("Fast DC".to_string(), fast as f64, FAST_DC_COLOR),
            ("Slow AC".to_string(), slow as f64, SLOW_AC_COLOR),
        ],
    )
}

/// Sampled station positions, split into fast/slow series.
pub fn station_map(stations: &[&StationRecord]) -> ChartSpec {
    let fast: Vec<[f64; 2]> = stations
        .iter()
        .filter(|s| s.is_fast_dc)
        .map(|s| [s.longitude, s.latitude])
        .collect();
    let slow: Vec<[f64; 2]> = stations
        .iter()
        .filter(|s| !s.is_fast_dc)
        .map(|s| [s.longitude, s.latitude])
        .collect();

    let mut fast_series = ChartSeries::new("Fast DC", FAST_DC_COLOR, fast);
    fast_series.radius = 1.5;
    let mut slow_series = ChartSeries::new("Slow AC", SLOW_AC_COLOR, slow);
    slow_series.radius = 1.5;

    ChartSpec {
        kind: ChartKind::Scatter,
        title: "Sampled Charging Stations (Fast vs Slow)".to_string(),
        x_label: "Longitude".to_string(),
        y_label: "Latitude".to_string(),
        x_categories: None,
        series: vec![fast_series, slow_series],
    }
}

/// Countries as bubbles: x is the row index (labelled with the country
/// code), y and bubble size the station count, color the cluster id.
/// Cluster ids are arbitrary labels; the legend names them "Cluster n"
/// without attaching any meaning to the number.
pub fn country_clusters(
    countries: &[CountrySummary],
    assignments: &[usize],
    k: usize,
) -> ChartSpec {
    let palette = color::generate_palette(k);
    let max = countries.iter().map(|c| c.stations).max().unwrap_or(1).max(1) as f64;

    let series = countries
        .iter()
        .zip(assignments)
        .enumerate()
        .map(|(i, (country, &cluster))| {
            let mut s = ChartSeries::new(
                format!("Cluster {cluster}"),
                palette.get(cluster).copied().unwrap_or(Color32::GRAY),
                vec![[i as f64, country.stations as f64]],
            );
            s.radius = 2.0 + 8.0 * ((country.stations as f64 / max).sqrt() as f32);
            s
        })
        .collect();

    ChartSpec {
        kind: ChartKind::Scatter,
        title: "Clusters of Countries by Charging Infrastructure".to_string(),
        x_label: "Country".to_string(),
        y_label: "Stations".to_string(),
        x_categories: Some(
            countries
                .iter()
                .map(|c| c.country_code.clone())
                .collect(),
        ),
        series,
    }
}

/// Predicted model launches per year.
pub fn model_forecast(points: &[[f64; 2]]) -> ChartSpec {
    forecast_line(
        "Forecast: EV Models Over Time",
        "Launch year",
        MODEL_FORECAST_COLOR,
        points,
    )
}

/// Predicted charging-station counts over the timeline index.
pub fn world_forecast(points: &[[f64; 2]]) -> ChartSpec {
    forecast_line(
        "Forecast: Charging Stations (Timeline Index)",
        "Period index",
        WORLD_FORECAST_COLOR,
        points,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(code: &str, lon: f64, lat: f64, fast: bool) -> StationRecord {
        StationRecord {
            name: format!("{code}-{lon}"),
            country_code: code.to_string(),
            latitude: lat,
            longitude: lon,
            is_fast_dc: fast,
        }
    }

    #[test]
    fn bar_builders_place_one_bar_per_category() {
        let counts = vec![("DE".to_string(), 40), ("FR".to_string(), 10)];
        let spec = stations_by_country(&counts);
        assert_eq!(spec.kind, ChartKind::Bar);
        assert_eq!(spec.series.len(), 2);
        assert_eq!(spec.series[0].points, vec![[0.0, 40.0]]);
        assert_eq!(spec.series[1].points, vec![[1.0, 10.0]]);
        assert_eq!(
            spec.x_categories.as_deref(),
            Some(&["DE".to_string(), "FR".to_string()][..])
        );
    }

    #[test]
    fn bar_colors_follow_the_count_ramp() {
        let counts = vec![("DE".to_string(), 40), ("FR".to_string(), 10)];
        let spec = stations_by_country(&counts);
        assert_ne!(spec.series[0].color, spec.series[1].color);
        assert_eq!(spec.series[0].color, color::heat_color(1.0));
    }

    #[test]
    fn charger_mix_has_fixed_labels_and_colors() {
        let spec = charger_mix(7, 13);
        assert_eq!(spec.series.len(), 2);
        assert_eq!(spec.series[0].name, "Fast DC");
        assert_eq!(spec.series[0].color, Color32::RED);
        assert_eq!(spec.series[1].points, vec![[1.0, 13.0]]);
    }

    #[test]
    fn station_map_splits_by_charger_type() {
        let a = station("DE", 13.4, 52.5, true);
        let b = station("FR", 2.35, 48.85, false);
        let c = station("NO", 10.75, 59.91, false);
        let refs: Vec<&StationRecord> = vec![&a, &b, &c];
        let spec = station_map(&refs);

        assert_eq!(spec.kind, ChartKind::Scatter);
        assert_eq!(spec.series[0].points.len(), 1);
        assert_eq!(spec.series[1].points.len(), 2);
        // Longitude on x, latitude on y.
        assert_eq!(spec.series[0].points[0], [13.4, 52.5]);
    }

    #[test]
    fn cluster_chart_maps_rows_in_order() {
        let countries = vec![
            CountrySummary {
                country_code: "DE".to_string(),
                stations: 100,
            },
            CountrySummary {
                country_code: "FR".to_string(),
                stations: 25,
            },
        ];
        let spec = country_clusters(&countries, &[1, 0], 3);
        assert_eq!(spec.series.len(), 2);
        assert_eq!(spec.series[0].name, "Cluster 1");
        assert_eq!(spec.series[1].name, "Cluster 0");
        assert_eq!(spec.series[0].points, vec![[0.0, 100.0]]);
        // The larger country gets the larger bubble.
        assert!(spec.series[0].radius > spec.series[1].radius);
    }

    #[test]
    fn forecast_charts_are_marked_lines() {
        let points = [[2020.0, 10.0], [2021.0, 12.0]];
        let spec = model_forecast(&points);
        assert_eq!(spec.kind, ChartKind::Line);
        assert_eq!(spec.series.len(), 1);
        assert!(spec.series[0].markers);
        assert_eq!(spec.series[0].points.len(), 2);
    }
}

use std::path::Path;

use crate::data::filter::ModelFilter;
use crate::data::loader;
use crate::data::model::EvDataset;

// ---------------------------------------------------------------------------
// Pages and tabs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Overview,
    GlobalInsights,
    Models,
    Infrastructure,
    Forecasts,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Overview,
        Page::GlobalInsights,
        Page::Models,
        Page::Infrastructure,
        Page::Forecasts,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Page::Overview => "Overview",
            Page::GlobalInsights => "Global Insights",
            Page::Models => "EV Models",
            Page::Infrastructure => "Charging Infrastructure",
            Page::Forecasts => "EV Forecasts",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsightsTab {
    #[default]
    ByCountry,
    TopCountries,
    StationMap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InfrastructureTab {
    #[default]
    ChargerMix,
    Clustering,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForecastTab {
    #[default]
    Models,
    Stations,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering. Only the loaded tables are
/// held between frames; everything derived is recomputed per render.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until a data folder loads successfully).
    pub data: Option<EvDataset>,

    pub page: Page,
    pub insights_tab: InsightsTab,
    pub infrastructure_tab: InfrastructureTab,
    pub forecast_tab: ForecastTab,

    /// Current manufacturer / launch-year selection on the models page.
    pub model_filter: ModelFilter,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    /// Load the four tables from `dir`. On failure the previous dataset (if
    /// any) stays in place and the error lands in the status line.
    pub fn load_from_dir(&mut self, dir: &Path) {
        match loader::load_dir(dir) {
            Ok(data) => {
                log::info!(
                    "loaded {} stations, {} models, {} countries, {} world periods from {}",
                    data.stations.len(),
                    data.models.len(),
                    data.countries.len(),
                    data.world.len(),
                    dir.display()
                );
                self.model_filter = ModelFilter::default();
                self.status_message = None;
                self.data = Some(data);
            }
            Err(e) => {
                log::error!("failed to load data from {}: {e:#}", dir.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

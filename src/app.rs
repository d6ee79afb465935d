use std::path::Path;

use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, views};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct EvInsightsApp {
    pub state: AppState,
}

impl EvInsightsApp {
    /// Build the app and try the initial data load.
    pub fn with_data_dir(dir: &Path) -> Self {
        let mut state = AppState::default();
        state.load_from_dir(dir);
        Self { state }
    }
}

impl eframe::App for EvInsightsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: page navigation ----
        egui::SidePanel::left("nav_panel")
            .default_width(200.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: the selected page ----
        egui::CentralPanel::default().show(ctx, |ui| {
            views::show_page(ui, &mut self.state);
        });
    }
}

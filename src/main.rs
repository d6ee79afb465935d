mod analysis;
mod app;
mod chart;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use app::EvInsightsApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    // Data directory: first CLI argument, else ./data
    let data_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([700.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "EV Insights – Global EV Infrastructure",
        options,
        Box::new(move |_cc| Ok(Box::new(EvInsightsApp::with_data_dir(&data_dir)))),
    )
}

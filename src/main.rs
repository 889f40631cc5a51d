mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use app::EmissionExplorerApp;
use eframe::egui;
use state::AppState;

const DEFAULT_DATA_PATH: &str = "data/owid-co2-data.csv";
const DEFAULT_CODEBOOK_PATH: &str = "data/owid-co2-codebook.csv";

fn main() -> eframe::Result {
    env_logger::init();

    // Optional CLI overrides: emissions CSV path, then codebook path.
    let mut args = std::env::args().skip(1);
    let data_path = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_DATA_PATH.to_string()));
    let codebook_path =
        PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_CODEBOOK_PATH.to_string()));

    // Load once at startup; a missing file just leaves the app empty with a
    // status message, and File → Open works as a fallback.
    let mut state = AppState::default();
    state.load_dataset_from(&data_path);
    state.load_codebook_from(&codebook_path);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 840.0])
            .with_min_inner_size([700.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Emission Explorer – CO₂ & Greenhouse Gas Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(EmissionExplorerApp::new(state)))),
    )
}

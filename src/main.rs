mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use app::CarScopeApp;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    // Dataset path: first CLI argument, else ./vehicles.csv when present.
    let path = std::env::args().nth(1).map(PathBuf::from).or_else(|| {
        let default = PathBuf::from("vehicles.csv");
        default.exists().then_some(default)
    });

    let mut state = AppState::default();
    if let Some(path) = &path {
        state.load_path(path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([700.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "CarScope – Vehicle Listings",
        options,
        Box::new(move |_cc| Ok(Box::new(CarScopeApp::new(state)))),
    )
}

mod app;
mod color;
mod ui;

use acceptance_viewer::config::Config;
use app::AcceptanceViewerApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {e}");
            eprintln!("error: {e}");
            std::process::exit(2);
        }
    };
    log::info!(
        "Starting with model {} from {}",
        config.initial_model,
        config.data_root.display()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Acceptance Viewer – ICLR Predictions",
        options,
        Box::new(move |cc| Ok(Box::new(AcceptanceViewerApp::new(cc, &config)))),
    )
}

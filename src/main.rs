mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::ParkWaitsApp;
use config::DashboardConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::from_env();
    log::info!("Starting with {:?}", config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Park Waits – Theme Park Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(ParkWaitsApp::new(&config)))),
    )
}

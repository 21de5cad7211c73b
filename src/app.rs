use eframe::egui;

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ParkWaitsApp {
    pub state: AppState,
}

impl ParkWaitsApp {
    /// Build the app and load the configured source once, before the first frame.
    pub fn new(config: &DashboardConfig) -> Self {
        let mut state = AppState::new(config);
        state.load(config.source.clone());
        Self { state }
    }
}

impl eframe::App for ParkWaitsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: dashboard sections ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::dashboard(ui, &mut self.state);
        });
    }
}

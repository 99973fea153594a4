mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;
mod view;

use app::NewsDashboardApp;
use config::DashboardConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::discover();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "News Classification Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(NewsDashboardApp::new(config)))),
    )
}

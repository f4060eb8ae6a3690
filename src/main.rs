use std::path::Path;

use eframe::egui;
use mh_dashboard::app::DashboardApp;
use mh_dashboard::config;

fn main() -> eframe::Result {
    env_logger::init();

    let config = config::load_config(Path::new(config::CONFIG_FILENAME));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Mental Health Care Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, config)))),
    )
}

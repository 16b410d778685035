mod app;
mod ui;

use app::RustyCohpApp;
use eframe::egui;
use rusty_cohp::config::Settings;

fn main() -> eframe::Result {
    env_logger::init();

    let settings = Settings::load();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty COHP – COHP & COOP Plotter",
        options,
        Box::new(|_cc| Ok(Box::new(RustyCohpApp::new(settings)))),
    )
}

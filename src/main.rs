mod app;
mod chart;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::Context;
use app::LaunchDashboardApp;
use clap::Parser;
use config::DashboardConfig;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::parse();
    log::debug!("{config:?}");

    // The dataset is read once, before the window opens; a bad file ends here.
    let dataset = data::loader::load_file(&config.data)
        .with_context(|| format!("loading launch data from {}", config.data.display()))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.width, config.height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Launch Records Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchDashboardApp::new(dataset)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard: {e}"))
}

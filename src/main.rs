//! Sintraopo - Affiliate Registry Dashboard
//!
//! Loads the affiliate CSV, shows KPIs and regional reports, appends new
//! affiliates and re-exports the table.

mod charts;
mod config;
mod data;
mod gui;
mod session;
mod stats;

use config::{AppConfig, CONFIG_FILE};
use eframe::egui;
use gui::SintraopoApp;
use std::path::Path;

fn main() -> eframe::Result<()> {
    let (config, config_error) = match AppConfig::load(Path::new(CONFIG_FILE)) {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .init();

    if let Some(e) = config_error {
        tracing::warn!("invalid configuration, using defaults: {e:#}");
    }
    tracing::info!(data_file = %config.data_file.display(), "starting Sintraopo");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([1100.0, 650.0])
            .with_title("Gestión Sintraopo"),
        ..Default::default()
    };

    eframe::run_native(
        "Gestión Sintraopo",
        options,
        Box::new(|cc| Ok(Box::new(SintraopoApp::new(cc, config)))),
    )
}

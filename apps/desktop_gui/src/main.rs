use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::{load_settings, GatewaySettings};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::DiabetesRiskApp;

const APP_TITLE: &str = "Diabetes Prediction System";

#[derive(Debug, Parser)]
#[command(name = "desktop_gui", about = "Desktop client for the diabetes prediction service")]
struct Args {
    /// Base URL of the prediction service, overrides config and environment.
    #[arg(long)]
    backend_url: Option<String>,

    /// Path to a predictor.toml settings file.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn resolve_settings(args: &Args) -> GatewaySettings {
    let settings = match load_settings(args.config.as_deref()) {
        Ok(settings) => settings,
        Err(err) => {
            tracing::error!("failed to load settings, using defaults: {err:#}");
            GatewaySettings::default()
        }
    };
    settings.with_backend_url(args.backend_url.clone())
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let settings = resolve_settings(&args);
    tracing::info!(
        backend_url = %settings.backend_url,
        timeout_secs = settings.request_timeout_secs,
        "starting desktop client"
    );
    let backend_label = settings.backend_url.clone();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    let _backend = backend_bridge::runtime::launch(settings, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([960.0, 820.0])
            .with_min_inner_size([640.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(DiabetesRiskApp::new(cmd_tx, ui_rx, backend_label)))),
    )
}

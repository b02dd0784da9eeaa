mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::config::{load_settings, normalize_server_url};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::{backend_bridge::commands::BackendCommand, controller::events::UiEvent};

#[derive(Parser, Debug)]
struct Args {
    /// Overrides the server url from activities.toml / APP__SERVER_URL.
    #[arg(long)]
    server_url: Option<String>,
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();
    let mut settings = load_settings();
    if let Some(server_url) = args.server_url.as_deref() {
        settings.server_url = normalize_server_url(server_url);
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .init();
    tracing::info!(server_url = %settings.server_url, "starting activities client");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, settings.server_url);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Extracurricular Activities")
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Extracurricular Activities",
        options,
        Box::new(|_cc| Ok(Box::new(ui::ActivitiesApp::new(cmd_tx, ui_rx)))),
    )
}

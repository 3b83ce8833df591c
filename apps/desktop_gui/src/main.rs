use std::sync::Arc;

mod backend_bridge;
mod controller;
mod ui;

use anyhow::{anyhow, Result};
use clap::Parser;
use client_core::{load_settings, AdvisoryClient};
use crossbeam_channel::bounded;
use eframe::egui;
use shared::reference::CropNames;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::AdvisorApp;

#[derive(Parser, Debug)]
#[command(name = "agri-advisor-gui")]
struct Args {
    /// Recommendation endpoint; overrides advisor.toml and APP__ENDPOINT.
    #[arg(long)]
    endpoint: Option<String>,
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Hide Tamil crop names on the dashboard.
    #[arg(long)]
    no_local_names: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(endpoint) = args.endpoint {
        settings.endpoint = endpoint;
    }
    if let Some(secs) = args.timeout_secs {
        settings.request_timeout_secs = secs;
    }
    if args.no_local_names {
        settings.show_local_names = false;
    }

    let client = AdvisoryClient::from_settings(&settings)?;
    tracing::info!(endpoint = %client.endpoint(), "using recommendation endpoint");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, Arc::new(client));

    let crop_names = if settings.show_local_names {
        CropNames::tamil()
    } else {
        CropNames::empty()
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("AgriAdvisor TN")
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([720.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "AgriAdvisor TN",
        options,
        Box::new(move |_cc| Ok(Box::new(AdvisorApp::new(cmd_tx, ui_rx, crop_names)))),
    )
    .map_err(|err| anyhow!("desktop window failed: {err}"))
}

//! UltraShare - pin a window to a fixed-size screen region for screen sharing

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod cli;
mod logging;
mod state;
#[cfg(windows)]
mod ui;

use clap::Parser;
use cli::Args;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);
    run(args)
}

#[cfg(windows)]
fn run(args: Args) -> anyhow::Result<()> {
    use eframe::egui;
    use overlay::OverlayWindow;
    use region::{OverlayGeometry, OverlayStyle};
    use tracing::{info, warn};
    use winctl::Win32Surface;

    if let Err(err) = winctl::set_dpi_awareness() {
        warn!(error = %err, "could not enable per-monitor DPI awareness");
    }

    let mut geometry = OverlayGeometry::initial(OverlayStyle::default())?;
    geometry.move_to(args.x, args.y);
    geometry.apply_preset(args.preset);
    info!(preset = args.preset.name(), outer = %geometry.outer(), "starting");

    OverlayWindow::create(geometry, Win32Surface::new())?;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([400.0, 550.0])
            .with_title("UltraShare Control")
            .with_resizable(false),
        ..Default::default()
    };

    let preset = args.preset;
    let result = eframe::run_native(
        "UltraShare",
        native_options,
        Box::new(move |cc| Ok(Box::new(ui::ControlPanelApp::new(cc, preset)))),
    );

    OverlayWindow::destroy();
    result.map_err(|err| anyhow::anyhow!("control panel failed: {err}"))
}

#[cfg(not(windows))]
fn run(_args: Args) -> anyhow::Result<()> {
    anyhow::bail!("UltraShare drives Win32 windows and only runs on Windows")
}

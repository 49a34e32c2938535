#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use clap::Parser;
use eframe::egui;
use pickut::app::ImageCropper;
use pickut::cli::CliArgs;
use pickut::{Config, init_logging};

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let args = CliArgs::parse();

    let mut config = Config::load_or_default(args.config.as_deref())?;
    if let Some(preset) = args.preset {
        config.crop.default_preset = preset;
    }
    tracing::info!(version = pickut::VERSION, "starting pickut");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.ui.window_width, config.ui.window_height]),
        ..Default::default()
    };
    eframe::run_native(
        "PicKut",
        options,
        Box::new(move |cc| Ok(Box::new(ImageCropper::new(cc, config, args.image)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

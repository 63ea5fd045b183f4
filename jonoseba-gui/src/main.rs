//! জনসেবা — public site and admin dashboard client.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use anyhow::Result;
use clap::Parser;
use eframe::{egui, NativeOptions};
use jonoseba_core::SiteConfig;

mod admin;
mod app;
mod complaint;
mod home;

use app::SiteApp;

#[derive(Parser)]
#[command(name = "jonoseba-gui")]
#[command(about = "জনসেবা - promotional site with admin dashboard")]
#[command(version)]
struct Cli {
    /// Override the table store base URL from the config file
    #[arg(long)]
    api_url: Option<String>,

    /// Override the table store api key from the config file
    #[arg(long)]
    api_key: Option<String>,
}

fn main() -> Result<()> {
    {
        // Silence wgpu log spam (https://github.com/gfx-rs/wgpu/issues/3206)
        let mut rust_log = std::env::var("RUST_LOG").unwrap_or_else(|_| {
            if cfg!(debug_assertions) {
                "debug".to_owned()
            } else {
                "info".to_owned()
            }
        });
        for loud_crate in ["naga", "wgpu_core", "wgpu_hal"] {
            if !rust_log.contains(&format!("{loud_crate}=")) {
                rust_log += &format!(",{loud_crate}=warn");
            }
        }

        // SAFETY: we call this from the main thread without any other threads running.
        unsafe {
            std::env::set_var("RUST_LOG", rust_log);
        }
    }

    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let cli = Cli::parse();

    let mut config = SiteConfig::load()?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    if let Some(api_key) = cli.api_key {
        config.api_key = api_key;
    }

    let native_options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 820.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "জনসেবা",
        native_options,
        Box::new(move |cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(SiteApp::new(config)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))
}

// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! TypeSnap - text overlays for images
//!
//! A cross-platform desktop application for placing draggable, styled text
//! on top of an image and extracting the text an image already contains.

mod app;
mod config;
mod error;
mod io;
mod models;
mod ui;
mod util;

use anyhow::Result;
use app::TypeSnapApp;
use config::AppConfig;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let config = AppConfig::load();

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([800.0, 600.0])
            .with_title(config.window.title.clone())
            .with_drag_and_drop(true),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "TypeSnap",
        options,
        Box::new(move |_cc| Ok(Box::new(TypeSnapApp::new(&config)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}

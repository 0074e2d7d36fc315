//! Shared helpers for the viewer and the CLI.
//!
//! Config discovery, number formatting and the colors the spiral is painted
//! with.

use crate::config::SpiralConfig;
use crate::error::SpiralResult;
use eframe::egui;
use std::path::{Path, PathBuf};
use tracing::info;

/// Page background.
pub const BACKGROUND_COLOR: egui::Color32 = egui::Color32::from_rgb(20, 20, 28);
/// Guide curve.
pub const STROKE_COLOR: egui::Color32 = egui::Color32::from_rgb(60, 60, 78);
pub const PRIME_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 196, 64);
pub const NON_PRIME_COLOR: egui::Color32 = egui::Color32::from_rgb(70, 90, 130);

/// Diameter of a plain dot, in pixels.
pub const DOT_SIZE: f32 = 5.0;

/// Parse `--config` from the command line, if given.
pub fn parse_config_path() -> Option<PathBuf> {
    std::env::args()
        .skip_while(|a| a != "--config")
        .nth(1)
        .map(PathBuf::from)
}

/// Whether `--verbose` / `-v` was passed.
pub fn parse_verbose() -> bool {
    is_verbose(std::env::args())
}

fn is_verbose(mut args: impl Iterator<Item = String>) -> bool {
    args.any(|a| a == "--verbose" || a == "-v")
}

/// Log level selected by the command line: `DEBUG` with `--verbose`.
pub fn log_level() -> tracing::Level {
    if parse_verbose() {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    }
}

/// Load the config named by `--config`, or the default preset when the flag
/// is absent.
pub fn load_config() -> SpiralResult<SpiralConfig> {
    load_config_from(parse_config_path().as_deref())
}

/// Load `path` if given, otherwise the default preset.
pub fn load_config_from(path: Option<&Path>) -> SpiralResult<SpiralConfig> {
    let Some(path) = path else {
        return Ok(SpiralConfig::default());
    };
    let config = SpiralConfig::load(path)?;
    info!(path = %path.display(), variant = ?config.variant, "config loaded");
    Ok(config)
}

/// Format a number with comma separators: 1000000 → "1,000,000"
pub fn format_num(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// "?" toggle button that opens a small window describing the view.
pub fn show_help_panel(
    ui: &mut egui::Ui,
    open: &mut bool,
    title: &str,
    summary: &str,
    entries: &[(&str, &str)],
) {
    if ui.button("?").clicked() {
        *open = !*open;
    }
    egui::Window::new(title)
        .open(open)
        .resizable(false)
        .show(ui.ctx(), |ui| {
            ui.label(summary);
            ui.separator();
            for (term, meaning) in entries {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(*term).strong());
                    ui.label(*meaning);
                });
            }
        });
}

//! Visualization: Prime Spiral
//!
//! Every integer sits on an Archimedean spiral, one step of arc length after
//! its predecessor. Primes are highlighted; random mode swaps in a control
//! sieve of the same density to show that the rays and arcs are not an
//! artifact of the layout.
//!
//! Run: cargo run --release --bin viz_spiral [-- --config spiral.json]

use eframe::egui;
use egui_plot::{Line, Plot, PlotPoint, PlotPoints, Points, Text};
use prime_spiral::viz_common::{self, format_num};
use prime_spiral::{plan_frame, Frame, SieveSet, SpiralConfig, Variant, Viewport};
use tracing::{debug, error};

struct SpiralApp {
    config: SpiralConfig,
    sieves: Option<SieveSet>,
    frame: Option<Frame>,
    /// Inputs the current frame was planned from.
    planned_for: Option<(SpiralConfig, [u32; 2])>,
    error: Option<String>,
    /// Why the `--config` file was not used, shown until the app closes.
    config_error: Option<String>,
    show_help: bool,
}

impl SpiralApp {
    fn new(
        _cc: &eframe::CreationContext<'_>,
        config: SpiralConfig,
        config_error: Option<String>,
    ) -> Self {
        let mut app = Self {
            config,
            sieves: None,
            frame: None,
            planned_for: None,
            error: None,
            config_error,
            show_help: false,
        };
        app.rebuild_sieves();
        app
    }

    fn rebuild_sieves(&mut self) {
        match SieveSet::from_config(&self.config) {
            Ok(sieves) => {
                self.sieves = Some(sieves);
                self.error = None;
            }
            Err(e) => {
                error!(error = %e, "could not build sieves");
                self.sieves = None;
                self.error = Some(e.to_string());
            }
        }
        self.planned_for = None;
    }

    /// Re-plan only when the config or the canvas size changed.
    fn refresh(&mut self, size: egui::Vec2) {
        let key = (self.config.clone(), [size.x as u32, size.y as u32]);
        if self.planned_for.as_ref() == Some(&key) {
            return;
        }
        let Some(sieves) = &self.sieves else {
            return;
        };

        let viewport = Viewport::new(size.x as f64, size.y as f64);
        match plan_frame(
            &self.config,
            sieves.classifier(self.config.random_mode),
            viewport,
        ) {
            Ok(frame) => {
                debug!(points = frame.points.len(), "redraw");
                self.frame = Some(frame);
                self.error = None;
            }
            Err(e) => {
                self.frame = None;
                self.error = Some(e.to_string());
            }
        }
        self.planned_for = Some(key);
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        let detailed = self.frame.as_ref().map_or(true, |f| f.detailed);
        let previous_variant = self.config.variant;

        ui.horizontal(|ui| {
            egui::ComboBox::from_label("Variant")
                .selected_text(format!("{:?}", self.config.variant))
                .show_ui(ui, |ui| {
                    for v in [Variant::Dots, Variant::Numbers, Variant::Dense] {
                        ui.selectable_value(&mut self.config.variant, v, format!("{:?}", v));
                    }
                });

            ui.separator();
            ui.add(egui::Slider::new(&mut self.config.step, 1.0..=40.0).text("Spacing"));
            ui.add(
                egui::Slider::new(&mut self.config.radius_factor, 0.2..=20.0).text("Radius factor"),
            );

            ui.separator();
            ui.add_enabled(
                self.config.variant.has_random_toggle(),
                egui::Checkbox::new(&mut self.config.random_mode, "Random mode"),
            );
            ui.add_enabled(
                detailed,
                egui::Checkbox::new(&mut self.config.show_numbers, "Show numbers"),
            );
            ui.add_enabled(
                detailed,
                egui::Checkbox::new(&mut self.config.only_primes, "Only primes"),
            );

            viz_common::show_help_panel(
                ui,
                &mut self.show_help,
                "Prime Spiral Help",
                "Integers placed on an Archimedean spiral at equal arc-length spacing.",
                &[
                    ("Rays", "Primes avoid residues shared with the turn period."),
                    ("Random mode", "Same density, no structure."),
                    ("Spacing", "Arc length between consecutive numbers."),
                    ("Radius factor", "How fast the spiral opens up."),
                ],
            );
        });

        if self.config.variant != previous_variant {
            self.config = SpiralConfig::for_variant(self.config.variant);
            self.rebuild_sieves();
        }
    }
}

impl eframe::App for SpiralApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.heading("Prime Spiral");
            self.controls(ui);

            if let Some(frame) = &self.frame {
                ui.label(format!(
                    "{} numbers visible, {} highlighted{}",
                    format_num(frame.greatest),
                    format_num(frame.prime_points().count() as u64),
                    if frame.detailed { "" } else { " (detail reduced)" }
                ));
            }
            if let Some(err) = &self.config_error {
                ui.colored_label(egui::Color32::LIGHT_RED, err);
            }
            if let Some(err) = &self.error {
                ui.colored_label(egui::Color32::LIGHT_RED, err);
            }
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(viz_common::BACKGROUND_COLOR))
            .show(ctx, |ui| {
                self.refresh(ui.available_size());
                let Some(frame) = &self.frame else {
                    return;
                };

                let plot = Plot::new("spiral_plot")
                    .data_aspect(1.0)
                    .show_axes([false, false])
                    .show_grid([false, false])
                    .show_background(false);

                // Canvas y grows downward, plot y upward.
                plot.show(ui, |plot_ui| {
                    if let Some(curve) = &frame.curve {
                        let pts: Vec<[f64; 2]> =
                            curve.iter().map(|p| [p.x as f64, -(p.y as f64)]).collect();
                        plot_ui.line(
                            Line::new(PlotPoints::from(pts))
                                .color(viz_common::STROKE_COLOR)
                                .width(1.0),
                        );
                    }

                    if frame.glyphs {
                        for p in &frame.points {
                            let (color, text) = if p.is_prime {
                                (
                                    viz_common::PRIME_COLOR,
                                    egui::RichText::new(p.index.to_string()).strong(),
                                )
                            } else {
                                (
                                    viz_common::NON_PRIME_COLOR,
                                    egui::RichText::new(p.index.to_string()),
                                )
                            };
                            plot_ui.text(
                                Text::new(PlotPoint::new(p.x as f64, -(p.y as f64)), text)
                                    .color(color),
                            );
                        }
                        return;
                    }

                    let (primes, others): (Vec<_>, Vec<_>) =
                        frame.points.iter().partition(|p| p.is_prime);
                    let to_xy = |pts: Vec<&prime_spiral::PlacedPoint>| -> Vec<[f64; 2]> {
                        pts.iter().map(|p| [p.x as f64, -(p.y as f64)]).collect()
                    };
                    let radius = viz_common::DOT_SIZE / 2.0;

                    if !others.is_empty() {
                        plot_ui.points(
                            Points::new(to_xy(others))
                                .radius(radius)
                                .color(viz_common::NON_PRIME_COLOR)
                                .name("Non-primes"),
                        );
                    }
                    plot_ui.points(
                        Points::new(to_xy(primes))
                            .radius(radius)
                            .color(viz_common::PRIME_COLOR)
                            .name("Primes"),
                    );
                });
            });
    }
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(viz_common::log_level())
        .init();

    let (config, config_error) = match viz_common::load_config() {
        Ok(config) => (config, None),
        Err(e) => {
            error!(error = %e, "config file unusable, opening the default preset");
            (
                SpiralConfig::default(),
                Some(format!("Config file ignored: {}", e)),
            )
        }
    };
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 800.0])
            .with_resizable(true),
        ..Default::default()
    };
    eframe::run_native(
        "Prime Spiral",
        native_options,
        Box::new(move |cc| Ok(Box::new(SpiralApp::new(cc, config, config_error)))),
    )
}

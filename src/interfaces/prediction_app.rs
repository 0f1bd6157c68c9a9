use crate::application::ml::inference_service::InferenceService;
use crate::application::prediction_form::{PRICE_LABEL, PredictionForm, StartupBanner};
use crate::domain::errors::LoadError;
use crate::domain::ml::feature_registry::FEATURE_BOUNDS;
use crate::interfaces::components::card::Card;
use crate::interfaces::design_system::DesignSystem;
use crossbeam_channel::Receiver;
use eframe::egui;

const MAX_LOG_LINES: usize = 500;

/// Single-page prediction window.
///
/// When startup failed there is no service: only the failure banner is
/// rendered and no request can be issued.
pub struct PredictionApp {
    service: Option<InferenceService>,
    banner: StartupBanner,
    form: PredictionForm,
    log_rx: Receiver<String>,
    log_lines: Vec<String>,
}

impl PredictionApp {
    pub fn new(startup: Result<InferenceService, LoadError>, log_rx: Receiver<String>) -> Self {
        let banner = StartupBanner::from_startup(&startup);
        Self {
            service: startup.ok(),
            banner,
            form: PredictionForm::new(),
            log_rx,
            log_lines: Vec::new(),
        }
    }

    fn drain_logs(&mut self) {
        while let Ok(line) = self.log_rx.try_recv() {
            self.log_lines.push(line);
        }
        if self.log_lines.len() > MAX_LOG_LINES {
            let excess = self.log_lines.len() - MAX_LOG_LINES;
            self.log_lines.drain(0..excess);
        }
    }

    fn render_banner(&self, ui: &mut egui::Ui) {
        let color = if self.banner.ok {
            DesignSystem::SUCCESS
        } else {
            DesignSystem::DANGER
        };

        Card::new().accent(color).show(ui, |ui| {
            ui.label(
                egui::RichText::new(&self.banner.headline)
                    .strong()
                    .color(color),
            );
            if let Some(hint) = self.banner.hint {
                ui.label(egui::RichText::new(hint).color(DesignSystem::WARNING));
            }
            if let Some(detail) = &self.banner.detail {
                ui.label(
                    egui::RichText::new(detail)
                        .small()
                        .color(DesignSystem::TEXT_MUTED),
                );
            }
        });
    }

    fn render_form(&mut self, ui: &mut egui::Ui) {
        let Some(service) = self.service.as_ref() else {
            return;
        };

        Card::new().title("Input Features").show(ui, |ui| {
            ui.spacing_mut().slider_width = 320.0;
            for (index, bounds) in FEATURE_BOUNDS.iter().enumerate() {
                let mut value = self.form.values.to_array()[index];
                let response = ui.add(
                    egui::Slider::new(&mut value, bounds.min..=bounds.max)
                        .step_by(bounds.step)
                        .text(bounds.label),
                );
                if response.changed() {
                    self.form.set_value(index, value);
                }
            }

            ui.add_space(DesignSystem::SPACING_MEDIUM);
            ui.horizontal(|ui| {
                if ui.add(DesignSystem::primary_button("Predict Price")).clicked() {
                    self.form.submit(service);
                }
                if ui.button("Reset").clicked() {
                    self.form.reset();
                }
            });
        });

        if let Some(outcome) = self.form.last_outcome() {
            ui.add_space(DesignSystem::SPACING_MEDIUM);
            let color = if outcome.is_success() {
                DesignSystem::SUCCESS
            } else {
                DesignSystem::DANGER
            };
            Card::new().accent(color).show(ui, |ui| {
                ui.label(
                    egui::RichText::new(outcome.headline())
                        .size(18.0)
                        .strong()
                        .color(color),
                );
                if let Some(hint) = outcome.hint() {
                    ui.label(egui::RichText::new(hint).color(DesignSystem::WARNING));
                }
            });
        }
    }

    fn render_logs(&self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("System Logs")
            .default_open(false)
            .show(ui, |ui| {
                egui::ScrollArea::vertical()
                    .max_height(160.0)
                    .stick_to_bottom(true)
                    .auto_shrink([false, true])
                    .show(ui, |ui| {
                        for line in &self.log_lines {
                            let color = if line.contains("ERROR") {
                                DesignSystem::DANGER
                            } else if line.contains("WARN") {
                                DesignSystem::WARNING
                            } else {
                                DesignSystem::TEXT_SECONDARY
                            };
                            ui.label(egui::RichText::new(line).monospace().small().color(color));
                        }
                    });
            });
    }
}

impl eframe::App for PredictionApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(DesignSystem::theme());
        self.drain_logs();

        egui::TopBottomPanel::bottom("log_panel").show(ctx, |ui| {
            self.render_logs(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading(
                    egui::RichText::new(format!("💰 Price Prediction ({})", PRICE_LABEL))
                        .size(26.0)
                        .color(DesignSystem::ACCENT_GOLD),
                );
                ui.label(
                    egui::RichText::new(
                        "Enter the market indices and commodity prices to predict a target price.",
                    )
                    .color(DesignSystem::TEXT_SECONDARY),
                );
                ui.add_space(DesignSystem::SPACING_LARGE);

                self.render_banner(ui);
                ui.add_space(DesignSystem::SPACING_MEDIUM);
                self.render_form(ui);

                ui.add_space(DesignSystem::SPACING_LARGE);
                ui.separator();
                ui.label(
                    egui::RichText::new("Powered by Machine Learning")
                        .small()
                        .color(DesignSystem::TEXT_MUTED),
                );
            });
        });

        // Log lines arrive from other threads without user input
        ctx.request_repaint_after(std::time::Duration::from_millis(500));
    }
}

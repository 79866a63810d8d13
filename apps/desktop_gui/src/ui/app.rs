use std::time::Duration;

use client_core::{
    presentation::{
        confidence_bar, health_badge, input_summary, outside_advisory_range, prediction_headline,
        range_hint, risk_tone,
    },
    Screen,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::{
    domain::{FormField, HealthStatus},
    protocol::PredictionResult,
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{err_label, UiEvent};
use crate::controller::reducer::AppModel;
use crate::ui::theme;

const CONTENT_MAX_WIDTH: f32 = 760.0;

pub struct DiabetesRiskApp {
    ui_rx: Receiver<UiEvent>,
    model: AppModel,
    backend_label: String,
    visuals_applied: bool,
}

impl DiabetesRiskApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        backend_label: String,
    ) -> Self {
        Self {
            ui_rx,
            model: AppModel::new(cmd_tx),
            backend_label,
            visuals_applied: false,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.model.apply(event);
        }
    }

    fn apply_theme_if_needed(&mut self, ctx: &egui::Context) {
        if !self.visuals_applied {
            ctx.set_visuals(theme::app_visuals());
            self.visuals_applied = true;
        }
    }

    fn show_header(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("app_header").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.heading(
                        egui::RichText::new("Diabetes Prediction System")
                            .strong()
                            .color(theme::ACCENT),
                    );
                    ui.weak("ML-powered diabetes risk assessment");
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let health = self.model.session.health();
                    let color = if health.is_healthy() {
                        theme::HEALTH_ACTIVE
                    } else {
                        theme::HEALTH_INACTIVE
                    };
                    ui.label(egui::RichText::new(health_badge(health)).strong().color(color))
                        .on_hover_text(self.backend_label.as_str());
                    let (rect, _) =
                        ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                    ui.painter().circle_filled(rect.center(), 5.0, color);
                });
            });
            ui.add_space(8.0);
        });
    }

    fn show_footer(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("app_footer").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.small("Status:");
                ui.small(egui::RichText::new(&self.model.status).weak());
            });
        });
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        let Some(banner) = self.model.banner.clone() else {
            return;
        };
        egui::Frame::NONE
            .fill(theme::ERROR_FILL)
            .stroke(egui::Stroke::new(1.0, theme::ERROR_STROKE))
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(
                        egui::RichText::new(format!(
                            "{}: {}",
                            err_label(banner.category()),
                            banner.message()
                        ))
                        .color(egui::Color32::WHITE),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Dismiss").clicked() {
                            self.model.dismiss_banner();
                        }
                    });
                });
            });
        ui.add_space(8.0);
    }

    fn show_form_error(ui: &mut egui::Ui, message: &str) {
        egui::Frame::NONE
            .fill(theme::ERROR_FILL.gamma_multiply(0.7))
            .stroke(egui::Stroke::new(1.0, theme::ERROR_STROKE))
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(egui::RichText::new("⚠").color(egui::Color32::WHITE));
                    ui.label(egui::RichText::new(message).color(egui::Color32::WHITE));
                });
            });
        ui.add_space(8.0);
    }

    fn field_input(ui: &mut egui::Ui, field: FormField, value: &mut String) -> egui::Response {
        ui.vertical(|ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(field.label()).strong());
                ui.weak(field.unit_hint());
            });
            let edit = egui::TextEdit::singleline(value)
                .id_salt(field.key())
                .hint_text(field.placeholder());
            let response = ui
                .add_sized([240.0, 30.0], edit)
                .on_hover_text(range_hint(field));
            if outside_advisory_range(field, value) {
                ui.small(egui::RichText::new("Outside typical range").color(theme::ADVISORY));
            }
            response
        })
        .inner
    }

    fn show_input_screen(&mut self, ui: &mut egui::Ui) {
        ui.heading("Patient Data Input");
        ui.weak("Enter clinical parameters for diabetes risk assessment");
        ui.add_space(10.0);

        self.show_status_banner(ui);
        if let Some(error) = self.model.session.view().error().map(str::to_string) {
            Self::show_form_error(ui, &error);
        }

        let loading = self.model.session.is_loading();
        let mut submit_requested = false;

        theme::card_frame().show(ui, |ui| {
            egui::Grid::new("patient_form_grid")
                .num_columns(2)
                .spacing([28.0, 14.0])
                .show(ui, |ui| {
                    for (index, field) in FormField::ALL.into_iter().enumerate() {
                        let mut value = self.model.session.view().inputs().get(field).to_string();
                        let response = Self::field_input(ui, field, &mut value);
                        if response.changed() {
                            self.model.edit_field(field, value);
                        }
                        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                            submit_requested = true;
                        }
                        if index % 2 == 1 {
                            ui.end_row();
                        }
                    }
                });
        });

        ui.add_space(12.0);
        ui.horizontal(|ui| {
            if ui
                .add(egui::Button::new("↺ Reset Form").min_size(egui::vec2(140.0, 38.0)))
                .clicked()
            {
                self.model.reset();
            }

            let label = if loading {
                "Analyzing..."
            } else {
                "Run Analysis"
            };
            let run = egui::Button::new(egui::RichText::new(label).strong().size(16.0))
                .fill(theme::ACCENT.gamma_multiply(0.55))
                .min_size(egui::vec2(200.0, 38.0));
            if ui.add_enabled(!loading, run).clicked() {
                submit_requested = true;
            }
            if loading {
                ui.add(egui::Spinner::new().size(18.0));
            }
        });

        if submit_requested && !loading {
            self.model.submit();
        }
    }

    fn show_results_screen(&mut self, ui: &mut egui::Ui) {
        let Some(result) = self.model.session.view().result().cloned() else {
            return;
        };

        let mut new_analysis = false;
        ui.horizontal(|ui| {
            ui.heading("Analysis Complete");
            if let Some(at) = self.model.completed_at {
                ui.weak(format!("at {}", at.format("%H:%M:%S")));
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("← New Analysis").clicked() {
                    new_analysis = true;
                }
            });
        });
        ui.add_space(10.0);

        show_prediction_card(ui, &result);
        ui.add_space(10.0);
        ui.columns(2, |columns| {
            show_risk_card(&mut columns[0], &result);
            show_confidence_card(&mut columns[1], &result);
        });
        ui.add_space(10.0);
        show_recommendation_card(ui, &result);
        ui.add_space(10.0);
        show_summary_card(ui, &result);

        if new_analysis {
            self.model.reset();
        }
    }
}

fn show_prediction_card(ui: &mut egui::Ui, result: &PredictionResult) {
    let tone = theme::tone_color(risk_tone(&result.risk_level));
    theme::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.weak("Diabetes Risk Prediction");
        ui.horizontal(|ui| {
            let icon = if result.diabetes_detected() { "⚠" } else { "✔" };
            ui.label(egui::RichText::new(icon).size(32.0).color(tone));
            ui.label(
                egui::RichText::new(prediction_headline(result))
                    .size(24.0)
                    .strong(),
            );
        });
    });
}

fn show_risk_card(ui: &mut egui::Ui, result: &PredictionResult) {
    let tone = theme::tone_color(risk_tone(&result.risk_level));
    theme::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.weak("Risk Level");
        ui.add_space(6.0);
        egui::Frame::NONE
            .fill(tone.gamma_multiply(0.12))
            .stroke(egui::Stroke::new(1.0, tone))
            .corner_radius(16.0)
            .inner_margin(egui::Margin::symmetric(14, 6))
            .show(ui, |ui| {
                ui.label(
                    egui::RichText::new(result.risk_level.label())
                        .strong()
                        .color(tone),
                );
            });
    });
}

fn show_confidence_card(ui: &mut egui::Ui, result: &PredictionResult) {
    let Some(bar) = confidence_bar(result) else {
        return;
    };
    theme::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.weak("Confidence Score");
        ui.add_space(6.0);
        ui.add(
            egui::ProgressBar::new(bar.fraction)
                .desired_width(ui.available_width())
                .fill(theme::ACCENT)
                .text(bar.label()),
        );
    });
}

fn show_recommendation_card(ui: &mut egui::Ui, result: &PredictionResult) {
    theme::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.weak("★ Clinical Recommendation");
        ui.add_space(4.0);
        ui.label(egui::RichText::new(&result.recommendation).size(15.0));
    });
}

fn show_summary_card(ui: &mut egui::Ui, result: &PredictionResult) {
    let rows = input_summary(result);
    theme::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.weak("Input Summary");
        ui.add_space(4.0);
        if rows.is_empty() {
            ui.small("The service did not echo the submitted values.");
            return;
        }
        egui::Grid::new("input_summary_grid")
            .num_columns(4)
            .spacing([18.0, 6.0])
            .show(ui, |ui| {
                for (index, (key, value)) in rows.iter().enumerate() {
                    ui.weak(key.as_str());
                    ui.label(egui::RichText::new(value).strong());
                    if index % 2 == 1 {
                        ui.end_row();
                    }
                }
            });
    });
}

impl eframe::App for DiabetesRiskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.apply_theme_if_needed(ctx);

        self.show_header(ctx);
        self.show_footer(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.set_max_width(CONTENT_MAX_WIDTH);
                    ui.add_space(12.0);
                    match self.model.session.screen() {
                        Screen::Input => self.show_input_screen(ui),
                        Screen::Results => self.show_results_screen(ui),
                    }
                });
        });

        let waiting = self.model.session.is_loading()
            || *self.model.session.health() == HealthStatus::Unknown;
        if waiting {
            ctx.request_repaint_after(Duration::from_millis(50));
        } else {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}

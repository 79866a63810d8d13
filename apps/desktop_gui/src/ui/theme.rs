//! Colours and visuals for the dark clinical theme.

use client_core::presentation::RiskTone;
use eframe::egui;

pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(0, 212, 255);
pub const APP_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(10, 14, 26);
pub const CARD_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(18, 24, 40);
pub const CARD_STROKE: egui::Color32 = egui::Color32::from_rgb(38, 48, 72);
pub const ERROR_FILL: egui::Color32 = egui::Color32::from_rgb(111, 53, 53);
pub const ERROR_STROKE: egui::Color32 = egui::Color32::from_rgb(175, 96, 96);
pub const HEALTH_ACTIVE: egui::Color32 = egui::Color32::from_rgb(0, 255, 136);
pub const HEALTH_INACTIVE: egui::Color32 = egui::Color32::from_rgb(255, 51, 102);
pub const ADVISORY: egui::Color32 = egui::Color32::from_rgb(255, 187, 0);

pub fn tone_color(tone: RiskTone) -> egui::Color32 {
    match tone {
        RiskTone::Success => egui::Color32::from_rgb(0x00, 0xff, 0x88),
        RiskTone::Caution => egui::Color32::from_rgb(0xff, 0xbb, 0x00),
        RiskTone::Alert => egui::Color32::from_rgb(0xff, 0x33, 0x66),
        RiskTone::Neutral => egui::Color32::WHITE,
    }
}

pub fn app_visuals() -> egui::Visuals {
    let mut visuals = egui::Visuals::dark();
    visuals.override_text_color = Some(egui::Color32::from_rgb(230, 236, 245));
    visuals.window_fill = APP_BACKGROUND;
    visuals.panel_fill = APP_BACKGROUND;
    visuals.extreme_bg_color = egui::Color32::from_rgb(8, 11, 20);
    visuals.faint_bg_color = CARD_BACKGROUND;

    visuals.hyperlink_color = ACCENT;
    visuals.selection.bg_fill = ACCENT.gamma_multiply(0.6);
    visuals.widgets.active.bg_fill = ACCENT;
    visuals.widgets.hovered.bg_fill = ACCENT.gamma_multiply(0.85);
    visuals
}

pub fn card_frame() -> egui::Frame {
    egui::Frame::NONE
        .fill(CARD_BACKGROUND)
        .stroke(egui::Stroke::new(1.0, CARD_STROKE))
        .corner_radius(12.0)
        .inner_margin(egui::Margin::symmetric(16, 14))
}

//! Pure view-model helpers shared by the GUI and the CLI.

use serde_json::Value;
use shared::{
    domain::{FormField, HealthStatus, RiskLevel},
    protocol::PredictionResult,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskTone {
    Success,
    Caution,
    Alert,
    Neutral,
}

pub fn risk_tone(risk_level: &RiskLevel) -> RiskTone {
    match risk_level {
        RiskLevel::Low => RiskTone::Success,
        RiskLevel::Medium => RiskTone::Caution,
        RiskLevel::High => RiskTone::Alert,
        RiskLevel::Other(_) => RiskTone::Neutral,
    }
}

/// Same as [`risk_tone`] for a raw label, including empty or unknown ones.
pub fn risk_tone_for_label(label: &str) -> RiskTone {
    risk_tone(&RiskLevel::from(label))
}

pub fn prediction_headline(result: &PredictionResult) -> &'static str {
    if result.diabetes_detected() {
        "Diabetes Risk Detected"
    } else {
        "No Diabetes Detected"
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceBar {
    /// Bar fill in `[0, 1]`.
    pub fraction: f32,
    /// Width of the filled part in percent.
    pub percent: f64,
}

impl ConfidenceBar {
    pub fn label(&self) -> String {
        format!("{:.1}%", self.percent)
    }
}

/// `None` hides the confidence card: the field is absent, zero, or not a number.
pub fn confidence_bar(result: &PredictionResult) -> Option<ConfidenceBar> {
    let confidence = result.confidence.filter(|c| c.is_finite() && *c > 0.0)?;
    let fraction = confidence.clamp(0.0, 1.0);
    Some(ConfidenceBar {
        fraction: fraction as f32,
        percent: fraction * 100.0,
    })
}

pub fn health_badge(health: &HealthStatus) -> &'static str {
    if health.is_healthy() {
        "System Active"
    } else {
        "Offline"
    }
}

/// `diabetes_pedigree_function` -> `diabetes pedigree function`
pub fn humanize_key(key: &str) -> String {
    key.replace('_', " ")
}

pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

/// Rows of the "Input Summary" card. Known fields come first in form order,
/// keys the form does not know follow in key order.
pub fn input_summary(result: &PredictionResult) -> Vec<(String, String)> {
    let mut entries: Vec<_> = result
        .input_data
        .iter()
        .map(|(key, value)| (FormField::from_key(key), key, value))
        .collect();
    // `FormField` orders by declaration, which is the form order.
    entries.sort_by_key(|(field, _, _)| (field.is_none(), *field));
    entries
        .into_iter()
        .map(|(_, key, value)| (humanize_key(key), display_value(value)))
        .collect()
}

pub fn range_hint(field: FormField) -> String {
    let range = field.advisory_range();
    format!(
        "Typical range {} to {} {}, step {}",
        range.min,
        range.max,
        field.unit_hint(),
        range.step
    )
}

/// Advisory only: a parsable value outside the typical range.
pub fn outside_advisory_range(field: FormField, raw: &str) -> bool {
    let range = field.advisory_range();
    raw.trim()
        .parse::<f64>()
        .map(|value| value < range.min || value > range.max)
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "tests/presentation_tests.rs"]
mod tests;

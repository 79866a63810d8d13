use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Pregnancies,
    Glucose,
    BloodPressure,
    SkinThickness,
    Insulin,
    Bmi,
    DiabetesPedigreeFunction,
    Age,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
    Integer,
    Decimal,
}

/// Advisory bounds shown next to an input. Never enforced on submit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl FormField {
    /// Display order of the input form.
    pub const ALL: [FormField; 8] = [
        FormField::Pregnancies,
        FormField::Glucose,
        FormField::BloodPressure,
        FormField::SkinThickness,
        FormField::Insulin,
        FormField::Bmi,
        FormField::DiabetesPedigreeFunction,
        FormField::Age,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Pregnancies => "pregnancies",
            Self::Glucose => "glucose",
            Self::BloodPressure => "blood_pressure",
            Self::SkinThickness => "skin_thickness",
            Self::Insulin => "insulin",
            Self::Bmi => "bmi",
            Self::DiabetesPedigreeFunction => "diabetes_pedigree_function",
            Self::Age => "age",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pregnancies => "Pregnancies",
            Self::Glucose => "Glucose",
            Self::BloodPressure => "Blood Pressure",
            Self::SkinThickness => "Skin Thickness",
            Self::Insulin => "Insulin",
            Self::Bmi => "BMI",
            Self::DiabetesPedigreeFunction => "Diabetes Pedigree",
            Self::Age => "Age",
        }
    }

    pub fn unit_hint(self) -> &'static str {
        match self {
            Self::Pregnancies => "Count",
            Self::Glucose => "mg/dL",
            Self::BloodPressure => "mm Hg",
            Self::SkinThickness => "mm",
            Self::Insulin => "μU/mL",
            Self::Bmi => "kg/m²",
            Self::DiabetesPedigreeFunction => "Function",
            Self::Age => "Years",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Pregnancies => "0",
            Self::Glucose => "120",
            Self::BloodPressure => "70",
            Self::SkinThickness => "20",
            Self::Insulin => "80",
            Self::Bmi => "25.5",
            Self::DiabetesPedigreeFunction => "0.5",
            Self::Age => "33",
        }
    }

    pub fn kind(self) -> NumericKind {
        match self {
            Self::Pregnancies | Self::Age => NumericKind::Integer,
            _ => NumericKind::Decimal,
        }
    }

    pub fn advisory_range(self) -> FieldRange {
        let (min, max, step) = match self {
            Self::Pregnancies => (0.0, 20.0, 1.0),
            Self::Glucose => (0.0, 300.0, 0.1),
            Self::BloodPressure => (0.0, 200.0, 0.1),
            Self::SkinThickness => (0.0, 100.0, 0.1),
            Self::Insulin => (0.0, 900.0, 0.1),
            Self::Bmi => (0.0, 70.0, 0.1),
            Self::DiabetesPedigreeFunction => (0.0, 3.0, 0.001),
            Self::Age => (1.0, 120.0, 1.0),
        };
        FieldRange { min, max, step }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Risk bucket reported by the prediction service.
///
/// The service may grow new buckets; unknown labels are kept verbatim in
/// `Other` so they still round-trip and render.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Other(String),
}

impl RiskLevel {
    pub fn label(&self) -> &str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for RiskLevel {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Low" => Self::Low,
            "Medium" => Self::Medium,
            "High" => Self::High,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for RiskLevel {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<RiskLevel> for String {
    fn from(value: RiskLevel) -> Self {
        match value {
            RiskLevel::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub const HEALTHY_STATUS: &str = "healthy";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HealthStatus {
    /// The session-start health check has not reported yet.
    #[default]
    Unknown,
    Healthy,
    /// Reachable, but reported something other than `"healthy"`.
    Unhealthy(String),
    Offline,
}

impl HealthStatus {
    pub fn from_wire(status: &str) -> Self {
        if status == HEALTHY_STATUS {
            Self::Healthy
        } else {
            Self::Unhealthy(status.to_string())
        }
    }

    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }
}

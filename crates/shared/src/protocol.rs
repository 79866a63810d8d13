use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::RiskLevel;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Body of `POST /predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub pregnancies: i64,
    pub glucose: f64,
    pub blood_pressure: f64,
    pub skin_thickness: f64,
    pub insulin: f64,
    pub bmi: f64,
    pub diabetes_pedigree_function: f64,
    pub age: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: i64,
    pub risk_level: RiskLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    pub recommendation: String,
    #[serde(default)]
    pub input_data: Map<String, Value>,
}

impl PredictionResult {
    pub fn diabetes_detected(&self) -> bool {
        self.prediction != 0
    }
}

/// Error body of a non-2xx response.
///
/// `detail` is usually a string, but validation failures from FastAPI-style
/// backends carry a list of `{loc, msg, type}` objects.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
}

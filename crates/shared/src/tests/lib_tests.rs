use serde_json::json;

use crate::{
    domain::{FormField, HealthStatus, NumericKind, RiskLevel},
    error::FormError,
    protocol::{ErrorResponse, PredictRequest, PredictionResult},
};

#[test]
fn form_fields_keep_display_order_and_wire_keys() {
    let keys: Vec<_> = FormField::ALL.iter().map(|field| field.key()).collect();
    assert_eq!(
        keys,
        vec![
            "pregnancies",
            "glucose",
            "blood_pressure",
            "skin_thickness",
            "insulin",
            "bmi",
            "diabetes_pedigree_function",
            "age",
        ]
    );
    for field in FormField::ALL {
        assert_eq!(FormField::from_key(field.key()), Some(field));
    }
    assert_eq!(FormField::from_key("cholesterol"), None);

    let mut sorted = FormField::ALL;
    sorted.sort();
    assert_eq!(sorted, FormField::ALL);
}

#[test]
fn only_pregnancies_and_age_are_integers() {
    let integers: Vec<_> = FormField::ALL
        .into_iter()
        .filter(|field| field.kind() == NumericKind::Integer)
        .collect();
    assert_eq!(integers, vec![FormField::Pregnancies, FormField::Age]);
}

#[test]
fn risk_level_keeps_unknown_labels_verbatim() {
    let parsed: RiskLevel = serde_json::from_value(json!("Very High")).expect("risk level");
    assert_eq!(parsed, RiskLevel::Other("Very High".to_string()));
    assert_eq!(serde_json::to_value(&parsed).expect("ser"), json!("Very High"));

    let low: RiskLevel = serde_json::from_value(json!("Low")).expect("risk level");
    assert_eq!(low, RiskLevel::Low);
    // Case matters: the service emits capitalised labels.
    assert_eq!(RiskLevel::from("low"), RiskLevel::Other("low".to_string()));
}

#[test]
fn health_status_is_healthy_only_for_exact_literal() {
    assert_eq!(HealthStatus::from_wire("healthy"), HealthStatus::Healthy);
    assert_eq!(
        HealthStatus::from_wire("degraded"),
        HealthStatus::Unhealthy("degraded".to_string())
    );
    assert!(!HealthStatus::from_wire("Healthy").is_healthy());
    assert_eq!(HealthStatus::default(), HealthStatus::Unknown);
}

#[test]
fn predict_request_serializes_every_field_including_blood_pressure() {
    let request = PredictRequest {
        pregnancies: 2,
        glucose: 120.0,
        blood_pressure: 70.0,
        skin_thickness: 20.0,
        insulin: 80.0,
        bmi: 25.5,
        diabetes_pedigree_function: 0.5,
        age: 33,
    };
    let body = serde_json::to_value(&request).expect("ser");
    assert_eq!(body["pregnancies"], json!(2));
    assert_eq!(body["blood_pressure"], json!(70.0));
    assert_eq!(body["age"], json!(33));
    assert_eq!(body.as_object().map(|obj| obj.len()), Some(8));
}

#[test]
fn prediction_result_tolerates_missing_confidence_and_echo() {
    let result: PredictionResult = serde_json::from_value(json!({
        "prediction": 1,
        "risk_level": "High",
        "recommendation": "Consult a physician",
    }))
    .expect("result");
    assert!(result.diabetes_detected());
    assert_eq!(result.confidence, None);
    assert!(result.input_data.is_empty());
}

#[test]
fn error_detail_prefers_string_detail() {
    let body: ErrorResponse =
        serde_json::from_value(json!({ "detail": "glucose out of range" })).expect("body");
    assert_eq!(body.detail_message().as_deref(), Some("glucose out of range"));
}

#[test]
fn error_detail_string_is_kept_as_sent() {
    for raw in ["  glucose out of range\n", "   "] {
        let body = ErrorResponse {
            detail: Some(json!(raw)),
        };
        assert_eq!(body.detail_message().as_deref(), Some(raw));
    }
}

#[test]
fn error_detail_flattens_validation_lists() {
    let body: ErrorResponse = serde_json::from_value(json!({
        "detail": [
            { "loc": ["body", "glucose"], "msg": "value is not a valid float", "type": "type_error.float" },
            { "loc": ["body", "age"], "msg": "field required", "type": "value_error.missing" }
        ]
    }))
    .expect("body");
    assert_eq!(
        body.detail_message().as_deref(),
        Some("glucose: value is not a valid float; age: field required")
    );
}

#[test]
fn error_detail_ignores_empty_or_odd_shapes() {
    for detail in [json!(""), json!(42), json!({ "x": 1 }), json!([])] {
        let body = ErrorResponse {
            detail: Some(detail),
        };
        assert_eq!(body.detail_message(), None);
    }
    assert_eq!(ErrorResponse::default().detail_message(), None);
}

#[test]
fn form_errors_name_the_field_label() {
    let err = FormError::NotANumber {
        field: FormField::Glucose,
        raw: "abc".to_string(),
    };
    assert_eq!(err.to_string(), "Glucose must be a number (got \"abc\")");
    assert_eq!(err.field(), FormField::Glucose);
    assert_eq!(
        FormError::Missing {
            field: FormField::BloodPressure
        }
        .to_string(),
        "Blood Pressure is required"
    );
}

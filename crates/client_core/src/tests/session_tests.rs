use super::*;
use crate::{
    gateway::HttpPredictionGateway,
    presentation::{confidence_bar, prediction_headline},
};
use async_trait::async_trait;
use axum::{http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use serde_json::{json, Map};
use shared::domain::RiskLevel;
use tokio::{net::TcpListener, sync::Mutex};

struct FakeGateway {
    health: HealthStatus,
    outcome: Result<PredictionResult, PredictionError>,
    requests: Mutex<Vec<PredictRequest>>,
}

impl FakeGateway {
    fn returning(outcome: Result<PredictionResult, PredictionError>) -> Self {
        Self {
            health: HealthStatus::Healthy,
            outcome,
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl PredictionGateway for FakeGateway {
    async fn check_health(&self) -> HealthStatus {
        self.health.clone()
    }

    async fn predict(&self, request: &PredictRequest) -> Result<PredictionResult, PredictionError> {
        self.requests.lock().await.push(request.clone());
        self.outcome.clone()
    }
}

fn low_risk_result() -> PredictionResult {
    let mut input_data = Map::new();
    input_data.insert("glucose".to_string(), json!(120.0));
    PredictionResult {
        prediction: 0,
        risk_level: RiskLevel::Low,
        confidence: Some(0.92),
        recommendation: "Maintain healthy lifestyle".to_string(),
        input_data,
    }
}

fn fill_scenario_inputs(controller: &mut SessionController) {
    for (field, raw) in [
        (FormField::Pregnancies, "2"),
        (FormField::Glucose, "120"),
        (FormField::BloodPressure, "70"),
        (FormField::SkinThickness, "20"),
        (FormField::Insulin, "80"),
        (FormField::Bmi, "25.5"),
        (FormField::DiabetesPedigreeFunction, "0.5"),
        (FormField::Age, "33"),
    ] {
        controller.edit_field(field, raw);
    }
}

async fn spawn_backend(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

#[test]
fn starts_on_empty_input_screen() {
    let controller = SessionController::new();
    assert_eq!(controller.screen(), Screen::Input);
    assert!(controller.view().inputs().is_empty());
    assert_eq!(controller.view().error(), None);
    assert_eq!(controller.view().result(), None);
    assert!(!controller.is_loading());
    assert_eq!(controller.health(), &HealthStatus::Unknown);
}

#[test]
fn edits_are_last_write_wins_per_field() {
    let mut controller = SessionController::new();
    controller.edit_field(FormField::Glucose, "100");
    controller.edit_field(FormField::Insulin, "85");
    controller.edit_field(FormField::Glucose, "1");
    controller.edit_field(FormField::Glucose, "140");

    let inputs = controller.view().inputs();
    assert_eq!(inputs.get(FormField::Glucose), "140");
    assert_eq!(inputs.get(FormField::Insulin), "85");
    assert_eq!(inputs.get(FormField::Age), "");
}

#[test]
fn edits_while_loading_stay_with_the_inflight_form() {
    let mut controller = SessionController::new();
    fill_scenario_inputs(&mut controller);
    let ticket = controller.begin_submit().expect("ticket");

    controller.edit_field(FormField::Age, "34");
    assert!(controller.is_loading());
    assert_eq!(controller.view().inputs().get(FormField::Age), "34");
    // The request already sent keeps the value it was built from.
    assert_eq!(ticket.request.age, 33);
}

#[test]
fn begin_submit_enters_loading_and_clears_previous_error() {
    let mut controller = SessionController::new();
    fill_scenario_inputs(&mut controller);
    let first = controller.begin_submit().expect("ticket");
    controller.finish_submit(
        first.generation,
        Err(PredictionError::Service {
            status: 400,
            detail: "bad".to_string(),
        }),
    );
    assert_eq!(controller.view().error(), Some("bad"));

    let second = controller.begin_submit().expect("ticket");
    assert!(second.generation > first.generation);
    assert!(controller.is_loading());
    assert_eq!(controller.view().error(), None);
    assert_eq!(controller.view().result(), None);
}

#[test]
fn invalid_form_never_reaches_the_gateway() {
    let mut controller = SessionController::new();
    fill_scenario_inputs(&mut controller);
    controller.edit_field(FormField::BloodPressure, "");

    let err = controller.begin_submit().expect_err("missing field");
    assert_eq!(
        err,
        SubmitError::Form(shared::error::FormError::Missing {
            field: FormField::BloodPressure
        })
    );
    assert_eq!(controller.screen(), Screen::Input);
    assert!(!controller.is_loading());
    assert_eq!(controller.view().error(), Some("Blood Pressure is required"));
    assert_eq!(controller.view().inputs().get(FormField::Glucose), "120");
}

#[test]
fn results_screen_cannot_be_resubmitted_without_reset() {
    let mut controller = SessionController::new();
    fill_scenario_inputs(&mut controller);
    let ticket = controller.begin_submit().expect("ticket");
    controller.finish_submit(ticket.generation, Ok(low_risk_result()));

    assert_eq!(
        controller.begin_submit(),
        Err(SubmitError::ResultsOnScreen)
    );
    assert_eq!(controller.screen(), Screen::Results);

    controller.reset();
    assert_eq!(controller.screen(), Screen::Input);
}

#[test]
fn stale_response_after_reset_is_discarded() {
    let mut controller = SessionController::new();
    fill_scenario_inputs(&mut controller);
    let ticket = controller.begin_submit().expect("ticket");

    controller.reset();
    let outcome = controller.finish_submit(ticket.generation, Ok(low_risk_result()));

    assert_eq!(outcome, SubmitOutcome::Stale);
    assert_eq!(controller.screen(), Screen::Input);
    assert!(controller.view().inputs().is_empty());
    assert_eq!(controller.view().result(), None);
    assert_eq!(controller.view().error(), None);
}

#[test]
fn stale_response_does_not_settle_a_newer_submission() {
    let mut controller = SessionController::new();
    fill_scenario_inputs(&mut controller);
    let first = controller.begin_submit().expect("first");
    controller.reset();
    fill_scenario_inputs(&mut controller);
    let second = controller.begin_submit().expect("second");

    assert_eq!(
        controller.finish_submit(
            first.generation,
            Err(PredictionError::transport("connection reset"))
        ),
        SubmitOutcome::Stale
    );
    assert!(controller.is_loading());

    assert_eq!(
        controller.finish_submit(second.generation, Ok(low_risk_result())),
        SubmitOutcome::Succeeded
    );
    assert_eq!(controller.screen(), Screen::Results);
}

#[test]
fn superseding_submit_wins_over_the_first() {
    let mut controller = SessionController::new();
    fill_scenario_inputs(&mut controller);
    let first = controller.begin_submit().expect("first");
    let second = controller.begin_submit().expect("second");

    assert_eq!(
        controller.finish_submit(first.generation, Ok(low_risk_result())),
        SubmitOutcome::Stale
    );
    assert!(controller.is_loading());
    assert_eq!(
        controller.finish_submit(second.generation, Ok(low_risk_result())),
        SubmitOutcome::Succeeded
    );
}

#[test]
fn duplicate_delivery_of_a_settled_response_is_stale() {
    let mut controller = SessionController::new();
    fill_scenario_inputs(&mut controller);
    let ticket = controller.begin_submit().expect("ticket");
    controller.finish_submit(
        ticket.generation,
        Err(PredictionError::transport("timed out")),
    );
    let before = controller.snapshot();

    assert_eq!(
        controller.finish_submit(ticket.generation, Ok(low_risk_result())),
        SubmitOutcome::Stale
    );
    assert_eq!(controller.snapshot(), before);
}

#[test]
fn reset_always_returns_to_initial_state_and_is_idempotent() {
    let mut controller = SessionController::new();
    fill_scenario_inputs(&mut controller);
    let ticket = controller.begin_submit().expect("ticket");
    controller.finish_submit(ticket.generation, Ok(low_risk_result()));
    controller.apply_health(HealthStatus::Healthy);

    controller.reset();
    let once = controller.snapshot();
    controller.reset();
    let twice = controller.snapshot();

    assert_eq!(once, twice);
    assert_eq!(once.view, SessionView::default());
    assert_eq!(once.view.screen(), Screen::Input);
    // Health is session-scoped, not form-scoped.
    assert_eq!(once.health, HealthStatus::Healthy);
}

#[tokio::test]
async fn scenario_a_successful_prediction_shows_results() {
    let gateway = FakeGateway::returning(Ok(low_risk_result()));
    let mut controller = SessionController::new();
    fill_scenario_inputs(&mut controller);

    let outcome = controller.submit(&gateway).await;

    assert_eq!(outcome, SubmitOutcome::Succeeded);
    assert_eq!(controller.screen(), Screen::Results);
    assert_eq!(controller.view().error(), None);
    let result = controller.view().result().expect("result");
    assert_eq!(prediction_headline(result), "No Diabetes Detected");
    let bar = confidence_bar(result).expect("confidence");
    assert_eq!(bar.label(), "92.0%");
    assert!((bar.percent - 92.0).abs() < 1e-9);

    let requests = gateway.requests.lock().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].pregnancies, 2);
    assert_eq!(requests[0].blood_pressure, 70.0);
    assert_eq!(requests[0].bmi, 25.5);
    assert_eq!(requests[0].age, 33);
}

#[tokio::test]
async fn scenario_b_service_detail_is_shown_and_inputs_kept() {
    let app = Router::new().route(
        "/predict",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "detail": "glucose out of range" })),
            )
        }),
    );
    let gateway = HttpPredictionGateway::new(&spawn_backend(app).await).expect("gateway");
    let mut controller = SessionController::new();
    fill_scenario_inputs(&mut controller);
    let inputs_before = controller.view().inputs().clone();

    let outcome = controller.submit(&gateway).await;

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(controller.screen(), Screen::Input);
    assert_eq!(controller.view().error(), Some("glucose out of range"));
    assert_eq!(controller.view().result(), None);
    assert_eq!(controller.view().inputs(), &inputs_before);
    assert!(!controller.is_loading());
}

#[tokio::test]
async fn scenario_c_empty_error_body_uses_generic_message() {
    let app = Router::new().route(
        "/predict",
        post(|| async { StatusCode::BAD_GATEWAY.into_response() }),
    );
    let gateway = HttpPredictionGateway::new(&spawn_backend(app).await).expect("gateway");
    let mut controller = SessionController::new();
    fill_scenario_inputs(&mut controller);

    controller.submit(&gateway).await;

    assert_eq!(controller.screen(), Screen::Input);
    assert_eq!(controller.view().error(), Some("Prediction failed"));
}

#[tokio::test]
async fn scenario_d_unreachable_health_check_degrades_to_offline() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let gateway = HttpPredictionGateway::new(&format!("http://{addr}")).expect("gateway");
    let mut controller = SessionController::new();

    let health = controller.check_health(&gateway).await.clone();

    assert_eq!(health, HealthStatus::Offline);
    assert_eq!(controller.view().error(), None);
    fill_scenario_inputs(&mut controller);
    assert!(controller.begin_submit().is_ok());
}

#[tokio::test]
async fn transport_failure_surfaces_generic_message() {
    let gateway = FakeGateway::returning(Err(PredictionError::transport("connection refused")));
    let mut controller = SessionController::new();
    fill_scenario_inputs(&mut controller);

    assert_eq!(controller.submit(&gateway).await, SubmitOutcome::Failed);
    assert_eq!(
        controller.view().error(),
        Some("Prediction failed: service unreachable")
    );
    assert_eq!(controller.view().inputs().get(FormField::Bmi), "25.5");
}

#[tokio::test]
async fn invalid_form_submit_skips_gateway() {
    let gateway = FakeGateway::returning(Ok(low_risk_result()));
    let mut controller = SessionController::new();
    controller.edit_field(FormField::Glucose, "120");

    assert_eq!(controller.submit(&gateway).await, SubmitOutcome::Failed);
    assert!(gateway.requests.lock().await.is_empty());
    assert_eq!(controller.view().error(), Some("Pregnancies is required"));
}

//! UI-side state: the session controller plus status line and banner,
//! updated by user actions and backend events.

use chrono::{DateTime, Local};
use client_core::{PredictionError, SessionController, SubmitError, SubmitOutcome};
use crossbeam_channel::Sender;
use shared::domain::{FormField, HealthStatus};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{err_label, UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;

pub struct AppModel {
    pub session: SessionController,
    pub status: String,
    pub banner: Option<UiError>,
    pub completed_at: Option<DateTime<Local>>,
    cmd_tx: Sender<BackendCommand>,
}

impl AppModel {
    /// Creates the model and queues the one-off session health check.
    pub fn new(cmd_tx: Sender<BackendCommand>) -> Self {
        let mut model = Self {
            session: SessionController::new(),
            status: "Checking prediction service...".to_string(),
            banner: None,
            completed_at: None,
            cmd_tx,
        };
        if !dispatch_backend_command(&model.cmd_tx, BackendCommand::CheckHealth, &mut model.status)
        {
            model.session.apply_health(HealthStatus::Offline);
        }
        model
    }

    pub fn edit_field(&mut self, field: FormField, raw: String) {
        self.session.edit_field(field, raw);
    }

    pub fn submit(&mut self) {
        let ticket = match self.session.begin_submit() {
            Ok(ticket) => ticket,
            Err(SubmitError::Form(err)) => {
                self.status = format!("Check the form: {err}");
                return;
            }
            Err(SubmitError::ResultsOnScreen) => return,
        };

        let generation = ticket.generation;
        self.status = "Analyzing...".to_string();
        let queued = dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::Predict {
                generation,
                request: ticket.request,
            },
            &mut self.status,
        );
        if !queued {
            self.session.finish_submit(
                generation,
                Err(PredictionError::transport("backend worker unavailable")),
            );
        }
    }

    pub fn reset(&mut self) {
        self.session.reset();
        self.completed_at = None;
        self.status = "Form cleared".to_string();
    }

    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => {
                self.status = message;
            }
            UiEvent::Error(err) => {
                if err.context() == UiErrorContext::BackendStartup {
                    self.session.apply_health(HealthStatus::Offline);
                }
                self.status = format!("{} error: {}", err_label(err.category()), err.message());
                self.banner = Some(err);
            }
            UiEvent::HealthChecked(health) => {
                self.status = match &health {
                    HealthStatus::Healthy => "Prediction service is healthy".to_string(),
                    HealthStatus::Unhealthy(status) => {
                        format!("Prediction service reported '{status}'")
                    }
                    HealthStatus::Offline | HealthStatus::Unknown => {
                        "Prediction service unreachable; you can still submit".to_string()
                    }
                };
                self.session.apply_health(health);
            }
            UiEvent::PredictionFinished {
                generation,
                outcome,
            } => {
                let failure = outcome.as_ref().err().map(UiError::from_prediction_error);
                match self.session.finish_submit(generation, outcome) {
                    SubmitOutcome::Succeeded => {
                        self.completed_at = Some(Local::now());
                        self.status = "Analysis complete".to_string();
                    }
                    SubmitOutcome::Failed => {
                        if let Some(err) = failure {
                            self.status = format!(
                                "{} error: prediction was not completed",
                                err_label(err.category())
                            );
                        }
                    }
                    SubmitOutcome::Stale => {
                        tracing::debug!(generation, "ignored response for superseded submission");
                    }
                }
            }
        }
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;

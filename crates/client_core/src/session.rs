//! Session state machine for the prediction form.
//!
//! The controller is the single writer of session state. Front ends feed it
//! field edits, submits and resets, and render from [`SessionSnapshot`]s.
//!
//! Submission is split in two so an event loop can run the network call
//! elsewhere: [`SessionController::begin_submit`] hands out a
//! [`SubmitTicket`] tagged with a generation, and
//! [`SessionController::finish_submit`] applies the outcome only while that
//! generation is still the one being waited on. Resets and newer submits
//! bump the generation, so late responses are dropped instead of landing on
//! a form they no longer belong to.

use shared::{
    domain::{FormField, HealthStatus},
    protocol::{PredictRequest, PredictionResult},
};
use tracing::{debug, info, warn};

use crate::{
    error::{PredictionError, SubmitError},
    form::FormInputs,
    gateway::PredictionGateway,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Input,
    Results,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionView {
    Input {
        inputs: FormInputs,
        error: Option<String>,
    },
    Loading {
        inputs: FormInputs,
        generation: u64,
    },
    Results {
        inputs: FormInputs,
        result: PredictionResult,
    },
}

impl Default for SessionView {
    fn default() -> Self {
        Self::Input {
            inputs: FormInputs::default(),
            error: None,
        }
    }
}

impl SessionView {
    pub fn screen(&self) -> Screen {
        match self {
            Self::Input { .. } | Self::Loading { .. } => Screen::Input,
            Self::Results { .. } => Screen::Results,
        }
    }

    pub fn inputs(&self) -> &FormInputs {
        match self {
            Self::Input { inputs, .. } | Self::Loading { inputs, .. } | Self::Results { inputs, .. } => {
                inputs
            }
        }
    }

    fn inputs_mut(&mut self) -> &mut FormInputs {
        match self {
            Self::Input { inputs, .. } | Self::Loading { inputs, .. } | Self::Results { inputs, .. } => {
                inputs
            }
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Input { error, .. } => error.as_deref(),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        match self {
            Self::Results { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }
}

/// Immutable copy of the session handed to renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub view: SessionView,
    pub health: HealthStatus,
}

/// A submission that has been started and is waiting for its outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitTicket {
    pub generation: u64,
    pub request: PredictRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Succeeded,
    Failed,
    /// The response belonged to a submission superseded by a reset or a
    /// newer submit.
    Stale,
}

#[derive(Debug, Default)]
pub struct SessionController {
    view: SessionView,
    health: HealthStatus,
    generation: u64,
}

impl SessionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &SessionView {
        &self.view
    }

    pub fn health(&self) -> &HealthStatus {
        &self.health
    }

    pub fn screen(&self) -> Screen {
        self.view.screen()
    }

    pub fn is_loading(&self) -> bool {
        self.view.is_loading()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            view: self.view.clone(),
            health: self.health.clone(),
        }
    }

    pub fn edit_field(&mut self, field: FormField, raw: impl Into<String>) {
        self.view.inputs_mut().set(field, raw);
    }

    /// Starts a submission of the current inputs.
    ///
    /// Clears any previous error. When a field is missing or not numeric no
    /// request is produced and the form shows the problem instead. Results
    /// only leave the screen through [`SessionController::reset`].
    pub fn begin_submit(&mut self) -> Result<SubmitTicket, SubmitError> {
        if self.screen() == Screen::Results {
            return Err(SubmitError::ResultsOnScreen);
        }
        let inputs = std::mem::take(&mut self.view).into_inputs();

        let request = match inputs.to_request() {
            Ok(request) => request,
            Err(err) => {
                debug!(field = err.field().key(), "submit blocked by form validation");
                self.view = SessionView::Input {
                    inputs,
                    error: Some(err.to_string()),
                };
                return Err(err.into());
            }
        };

        self.generation += 1;
        let generation = self.generation;
        self.view = SessionView::Loading { inputs, generation };
        info!(generation, "prediction submitted");
        Ok(SubmitTicket {
            generation,
            request,
        })
    }

    pub fn finish_submit(
        &mut self,
        generation: u64,
        outcome: Result<PredictionResult, PredictionError>,
    ) -> SubmitOutcome {
        let current = matches!(
            &self.view,
            SessionView::Loading { generation: pending, .. } if *pending == generation
        );
        if !current {
            debug!(generation, latest = self.generation, "discarding stale prediction response");
            return SubmitOutcome::Stale;
        }

        let inputs = std::mem::take(&mut self.view).into_inputs();
        match outcome {
            Ok(result) => {
                info!(generation, risk_level = %result.risk_level, "prediction received");
                self.view = SessionView::Results { inputs, result };
                SubmitOutcome::Succeeded
            }
            Err(err) => {
                warn!(generation, "prediction failed: {err}");
                self.view = SessionView::Input {
                    inputs,
                    error: Some(err.user_message().to_string()),
                };
                SubmitOutcome::Failed
            }
        }
    }

    /// Runs a whole submission against `gateway`.
    ///
    /// Submits that never reach the gateway are reported as
    /// [`SubmitOutcome::Failed`]; form problems land in the view's error slot.
    pub async fn submit(&mut self, gateway: &dyn PredictionGateway) -> SubmitOutcome {
        let ticket = match self.begin_submit() {
            Ok(ticket) => ticket,
            Err(_) => return SubmitOutcome::Failed,
        };
        let outcome = gateway.predict(&ticket.request).await;
        self.finish_submit(ticket.generation, outcome)
    }

    pub fn reset(&mut self) {
        self.generation += 1;
        self.view = SessionView::default();
        debug!(generation = self.generation, "session reset");
    }

    pub fn apply_health(&mut self, health: HealthStatus) {
        info!(?health, "backend health updated");
        self.health = health;
    }

    pub async fn check_health(&mut self, gateway: &dyn PredictionGateway) -> &HealthStatus {
        let health = gateway.check_health().await;
        self.apply_health(health);
        &self.health
    }
}

impl SessionView {
    fn into_inputs(self) -> FormInputs {
        match self {
            Self::Input { inputs, .. } | Self::Loading { inputs, .. } | Self::Results { inputs, .. } => {
                inputs
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;

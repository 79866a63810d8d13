use shared::error::{FormError, PREDICTION_FAILED_MESSAGE};
use thiserror::Error;

pub const PREDICTION_UNREACHABLE_MESSAGE: &str = "Prediction failed: service unreachable";

/// Failure of a `POST /predict` call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictionError {
    #[error("prediction transport failure: {message}")]
    Transport { message: String },
    #[error("prediction service returned {status}: {detail}")]
    Service { status: u16, detail: String },
    #[error("prediction service returned {status} with an unreadable body: {reason}")]
    MalformedResponse { status: u16, reason: String },
}

impl PredictionError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Text shown in the form's error slot.
    pub fn user_message(&self) -> &str {
        match self {
            Self::Transport { .. } => PREDICTION_UNREACHABLE_MESSAGE,
            Self::Service { detail, .. } => detail,
            Self::MalformedResponse { .. } => PREDICTION_FAILED_MESSAGE,
        }
    }
}

impl From<reqwest::Error> for PredictionError {
    fn from(err: reqwest::Error) -> Self {
        Self::transport(err.to_string())
    }
}

/// Reasons a submit never reaches the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Form(#[from] FormError),
    #[error("results are on screen; reset before submitting again")]
    ResultsOnScreen,
}

//! UI/backend events and error modeling for desktop GUI controller.

use client_core::PredictionError;
use shared::{domain::HealthStatus, protocol::PredictionResult};

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    Error(UiError),
    HealthChecked(HealthStatus),
    PredictionFinished {
        generation: u64,
        outcome: Result<PredictionResult, PredictionError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Service,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Prediction,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("transport")
            || message_lower.contains("unreachable")
            || message_lower.contains("disconnected")
        {
            UiErrorCategory::Transport
        } else if message_lower.contains("invalid")
            || message_lower.contains("required")
            || message_lower.contains("must be")
            || message_lower.contains("malformed")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("service returned")
            || message_lower.contains("startup failure")
        {
            UiErrorCategory::Service
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn from_prediction_error(err: &PredictionError) -> Self {
        let category = match err {
            PredictionError::Transport { .. } => UiErrorCategory::Transport,
            PredictionError::Service { .. } | PredictionError::MalformedResponse { .. } => {
                UiErrorCategory::Service
            }
        };
        Self {
            category,
            context: UiErrorContext::Prediction,
            message: err.to_string(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Transport => "Connection",
        UiErrorCategory::Service => "Service",
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

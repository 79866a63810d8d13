use serde_json::Value;
use thiserror::Error;

use crate::{domain::FormField, protocol::ErrorResponse};

pub const PREDICTION_FAILED_MESSAGE: &str = "Prediction failed";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{field} is required")]
    Missing { field: FormField },
    #[error("{field} must be a number (got \"{raw}\")")]
    NotANumber { field: FormField, raw: String },
    #[error("{field} must be a whole number (got \"{raw}\")")]
    NotAnInteger { field: FormField, raw: String },
}

impl FormError {
    pub fn field(&self) -> FormField {
        match self {
            Self::Missing { field }
            | Self::NotANumber { field, .. }
            | Self::NotAnInteger { field, .. } => *field,
        }
    }
}

impl ErrorResponse {
    /// Human-readable detail, if the body carried a usable one.
    pub fn detail_message(&self) -> Option<String> {
        let message = match self.detail.as_ref()? {
            Value::String(detail) => detail.clone(),
            Value::Array(items) => items
                .iter()
                .filter_map(validation_item_message)
                .collect::<Vec<_>>()
                .join("; "),
            _ => return None,
        };
        (!message.is_empty()).then_some(message)
    }
}

fn validation_item_message(item: &Value) -> Option<String> {
    match item {
        Value::String(msg) => Some(msg.clone()),
        Value::Object(obj) => {
            let msg = obj.get("msg")?.as_str()?;
            let field = obj
                .get("loc")
                .and_then(Value::as_array)
                .and_then(|loc| loc.last())
                .and_then(Value::as_str);
            Some(match field {
                Some(field) => format!("{field}: {msg}"),
                None => msg.to_string(),
            })
        }
        _ => None,
    }
}

//! Backend commands queued from UI to backend worker.

use shared::protocol::PredictRequest;

#[derive(Debug, Clone)]
pub enum BackendCommand {
    CheckHealth,
    Predict {
        generation: u64,
        request: PredictRequest,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::CheckHealth => "check_health",
            Self::Predict { .. } => "predict",
        }
    }
}

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::HealthStatus,
    error::PREDICTION_FAILED_MESSAGE,
    protocol::{ErrorResponse, HealthResponse, PredictRequest, PredictionResult},
};
use tracing::{debug, warn};
use url::Url;

use crate::{config::GatewaySettings, error::PredictionError};

/// The remote prediction service as seen by the session controller.
#[async_trait]
pub trait PredictionGateway: Send + Sync {
    /// Never fails: anything other than a well-formed reply maps to `Offline`.
    async fn check_health(&self) -> HealthStatus;
    async fn predict(&self, request: &PredictRequest) -> Result<PredictionResult, PredictionError>;
}

pub struct HttpPredictionGateway {
    http: Client,
    base_url: Url,
}

impl HttpPredictionGateway {
    pub fn new(backend_url: &str) -> Result<Self> {
        Self::from_settings(&GatewaySettings {
            backend_url: backend_url.to_string(),
            ..GatewaySettings::default()
        })
    }

    pub fn from_settings(settings: &GatewaySettings) -> Result<Self> {
        let base_url = parse_base_url(&settings.backend_url)?;
        let http = Client::builder()
            .timeout(settings.request_timeout())
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("invalid endpoint path '{path}'"))
    }

    async fn fetch_health(&self) -> Result<HealthStatus> {
        let url = self.endpoint("health")?;
        debug!(%url, "checking backend health");
        let body: HealthResponse = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(HealthStatus::from_wire(&body.status))
    }
}

#[async_trait]
impl PredictionGateway for HttpPredictionGateway {
    async fn check_health(&self) -> HealthStatus {
        match self.fetch_health().await {
            Ok(status) => status,
            Err(err) => {
                warn!("health check failed, reporting backend offline: {err:#}");
                HealthStatus::Offline
            }
        }
    }

    async fn predict(&self, request: &PredictRequest) -> Result<PredictionResult, PredictionError> {
        let url = self
            .endpoint("predict")
            .map_err(|err| PredictionError::transport(format!("{err:#}")))?;
        debug!(%url, "submitting prediction request");

        let response = self.http.post(url).json(request).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let detail = serde_json::from_slice::<ErrorResponse>(&body)
                .ok()
                .and_then(|err| err.detail_message())
                .unwrap_or_else(|| PREDICTION_FAILED_MESSAGE.to_string());
            warn!(status = status.as_u16(), %detail, "prediction request rejected");
            return Err(PredictionError::Service {
                status: status.as_u16(),
                detail,
            });
        }

        serde_json::from_slice::<PredictionResult>(&body).map_err(|err| {
            warn!(status = status.as_u16(), "prediction response unreadable: {err}");
            PredictionError::MalformedResponse {
                status: status.as_u16(),
                reason: err.to_string(),
            }
        })
    }
}

/// Parses the backend URL and normalises it so endpoint joins append
/// instead of replacing the last path segment.
fn parse_base_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    let mut url =
        Url::parse(raw).with_context(|| format!("invalid prediction backend url '{raw}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(anyhow!(
            "unsupported scheme '{}' for prediction backend url '{raw}'",
            url.scheme()
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

#[cfg(test)]
#[path = "tests/gateway_tests.rs"]
mod tests;

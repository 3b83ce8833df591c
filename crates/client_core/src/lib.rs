use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::{
    error::{RequestError, ServiceErrorBody},
    protocol::{Recommendation, RecommendationRequest},
};
use tracing::{debug, warn};
use url::Url;

pub mod form;
pub mod render;
pub mod settings;
pub mod submission;

pub use form::{FormData, FormError, FormField, FormState};
pub use settings::{load_settings, Settings};
pub use submission::{
    Completion, Dispatch, IgnoreReason, RequestPhase, RequestSnapshot, SubmissionController,
    SubmitDecision, Ticket,
};

/// The remote scoring service, seen from the client as one call.
#[async_trait]
pub trait RecommendationService: Send + Sync {
    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> std::result::Result<Recommendation, RequestError>;
}

/// HTTP implementation posting JSON to a fixed endpoint. No retries.
#[derive(Debug, Clone)]
pub struct AdvisoryClient {
    http: Client,
    endpoint: Url,
}

impl AdvisoryClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        Self::with_url(settings::parse_endpoint(endpoint)?, timeout)
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::with_url(settings.endpoint_url()?, settings.request_timeout())
    }

    fn with_url(endpoint: Url, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl RecommendationService for AdvisoryClient {
    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> std::result::Result<Recommendation, RequestError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(transport_error)?;
        debug!(%status, bytes = body.len(), "recommendation response received");
        interpret_response(status, &body)
    }
}

fn transport_error(err: reqwest::Error) -> RequestError {
    if err.is_timeout() {
        warn!("recommendation request timed out: {err}");
    } else {
        warn!("recommendation request failed: {err}");
    }
    RequestError::transport(err.to_string())
}

/// Maps a raw response to a result. The service reports some failures as an
/// `{"error": ...}` body even with a success status.
fn interpret_response(
    status: StatusCode,
    body: &[u8],
) -> std::result::Result<Recommendation, RequestError> {
    if let Ok(ServiceErrorBody { error }) = serde_json::from_slice::<ServiceErrorBody>(body) {
        return Err(RequestError::service(error));
    }
    if !status.is_success() {
        return Err(RequestError::service(format!(
            "Request failed with status code {}",
            status.as_u16()
        )));
    }
    serde_json::from_slice::<Recommendation>(body)
        .map_err(|err| RequestError::malformed(format!("malformed recommendation response: {err}")))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

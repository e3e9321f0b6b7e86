//! ScoringClient: `RiskScorer` over the remote comparison endpoint.

use serde_json::Value;

use ratrack_core::config::BackendConfig;
use ratrack_core::errors::{RatrackResult, ScoringError};
use ratrack_core::models::{ComparisonRequest, ComparisonResult};
use ratrack_core::scoring_span;
use ratrack_core::traits::RiskScorer;

use crate::transport::{HttpClient, HttpClientConfig, RawResponse};

/// Message used when a failed response carries no `error` string.
const DEFAULT_SERVER_ERROR: &str = "Server Error";

pub struct ScoringClient {
    http: HttpClient,
    url: String,
}

impl ScoringClient {
    pub fn new(http: HttpClient, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    pub fn from_config(backend: &BackendConfig) -> RatrackResult<Self> {
        let http = HttpClient::new(HttpClientConfig::from(backend))?;
        Ok(Self::new(http, backend.compare_url()))
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl RiskScorer for ScoringClient {
    fn compare(&self, request: &ComparisonRequest) -> RatrackResult<ComparisonResult> {
        let _span = scoring_span!(self.url).entered();
        let response = self.http.post_json(&self.url, request)?;
        tracing::debug!(status = response.status, bytes = response.body.len(), "scoring: response received");
        let result = classify_response(&response)?;
        tracing::info!(trend = %result.risk_trend, "scoring: comparison received");
        Ok(result)
    }
}

/// Interpret a response body, which is read as text before anything else.
///
/// A body that is not JSON is reported as such whatever the status, since
/// that usually means a proxy or dev server answered instead of the API.
pub fn classify_response(response: &RawResponse) -> Result<ComparisonResult, ScoringError> {
    let value: Value = serde_json::from_str(&response.body).map_err(|_| {
        tracing::warn!(status = response.status, "scoring: non-JSON response body");
        ScoringError::NonJsonResponse {
            status: response.status,
        }
    })?;

    if !response.is_success() {
        let message = value
            .get("error")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_SERVER_ERROR)
            .to_string();
        return Err(ScoringError::Rejected {
            status: response.status,
            message,
        });
    }

    serde_json::from_value(value).map_err(|e| ScoringError::MalformedResult {
        reason: e.to_string(),
    })
}

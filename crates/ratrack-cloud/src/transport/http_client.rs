//! HTTP client with retry, exponential backoff, timeout, and gzip compression.

use std::time::Duration;

use serde::Serialize;

use ratrack_core::config::BackendConfig;
use ratrack_core::errors::{RatrackError, RatrackResult, ScoringError};

/// Configuration for the HTTP transport layer.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout.
    pub timeout: Duration,
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Initial backoff duration (doubles each retry).
    pub initial_backoff: Duration,
    /// Maximum backoff duration.
    pub max_backoff: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        BackendConfig::default().into()
    }
}

impl From<BackendConfig> for HttpClientConfig {
    fn from(backend: BackendConfig) -> Self {
        Self::from(&backend)
    }
}

impl From<&BackendConfig> for HttpClientConfig {
    fn from(backend: &BackendConfig) -> Self {
        Self {
            timeout: backend.timeout(),
            max_retries: backend.max_retries,
            initial_backoff: backend.initial_backoff(),
            max_backoff: backend.max_backoff(),
        }
    }
}

/// Status and body text of a response, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

fn net_err(reason: String) -> RatrackError {
    ScoringError::Network { reason }.into()
}

/// Gateway errors are the only statuses worth another attempt.
fn is_retryable_status(status: u16) -> bool {
    matches!(status, 502..=504)
}

/// Blocking HTTP transport.
#[derive(Debug)]
pub struct HttpClient {
    config: HttpClientConfig,
    client: reqwest::blocking::Client,
}

impl HttpClient {
    pub fn new(config: HttpClientConfig) -> RatrackResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .gzip(true)
            .build()
            .map_err(|e: reqwest::Error| net_err(e.to_string()))?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// POST a JSON body and return the raw response.
    ///
    /// Transport failures and gateway errors (502, 503, 504) are retried.
    /// A gateway error that survives every retry is returned as a response,
    /// not an error, so the caller can still inspect its body.
    pub fn post_json<Req: Serialize + ?Sized>(
        &self,
        url: &str,
        payload: &Req,
    ) -> RatrackResult<RawResponse> {
        let mut backoff = self.config.initial_backoff;
        let mut last_err = String::new();
        let mut last_response = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                tracing::debug!(
                    "scoring: retry attempt {}/{} after {:?}",
                    attempt,
                    self.config.max_retries,
                    backoff
                );
                std::thread::sleep(backoff);
                backoff = (backoff * 2).min(self.config.max_backoff);
            }

            match self.client.post(url).json(payload).send() {
                Ok(resp) => {
                    let status = resp.status().as_u16();
                    let body = resp
                        .text()
                        .map_err(|e: reqwest::Error| net_err(format!("reading body failed: {e}")))?;
                    let response = RawResponse { status, body };
                    if !is_retryable_status(status) {
                        return Ok(response);
                    }
                    tracing::warn!(status, attempt, "scoring: gateway error");
                    last_response = Some(response);
                }
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "scoring: transport error");
                    last_err = e.to_string();
                    last_response = None;
                }
            }
        }

        if let Some(response) = last_response {
            return Ok(response);
        }
        let attempts = self.config.max_retries + 1;
        if attempts == 1 {
            return Err(net_err(last_err));
        }
        Err(ScoringError::RetriesExhausted {
            attempts,
            last_error: last_err,
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_gateway_errors_are_retryable() {
        assert!(is_retryable_status(502));
        assert!(is_retryable_status(503));
        assert!(is_retryable_status(504));
        assert!(!is_retryable_status(500));
        assert!(!is_retryable_status(404));
        assert!(!is_retryable_status(200));
    }

    #[test]
    fn config_follows_backend_section() {
        let backend = BackendConfig {
            max_retries: 5,
            initial_backoff_ms: 10,
            ..BackendConfig::default()
        };
        let config = HttpClientConfig::from(&backend);
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.initial_backoff, Duration::from_millis(10));
        assert_eq!(config.timeout, Duration::from_secs(30));
    }
}

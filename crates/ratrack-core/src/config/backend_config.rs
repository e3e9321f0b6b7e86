use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants::COMPARE_RISK_PATH;

/// Remote scoring backend configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the scoring service, without a trailing slash.
    pub base_url: String,
    /// Path of the comparison endpoint.
    pub compare_path: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Retries after the first attempt on transport failures and gateway errors.
    pub max_retries: u32,
    /// Initial backoff in milliseconds (doubles each retry).
    pub initial_backoff_ms: u64,
    /// Backoff ceiling in milliseconds.
    pub max_backoff_ms: u64,
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn initial_backoff(&self) -> Duration {
        Duration::from_millis(self.initial_backoff_ms)
    }

    pub fn max_backoff(&self) -> Duration {
        Duration::from_millis(self.max_backoff_ms)
    }

    /// Full URL of the comparison endpoint.
    pub fn compare_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.compare_path)
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::DEFAULT_BACKEND_URL.to_string(),
            compare_path: COMPARE_RISK_PATH.to_string(),
            timeout_secs: defaults::DEFAULT_TIMEOUT_SECS,
            max_retries: defaults::DEFAULT_MAX_RETRIES,
            initial_backoff_ms: defaults::DEFAULT_INITIAL_BACKOFF_MS,
            max_backoff_ms: defaults::DEFAULT_MAX_BACKOFF_MS,
        }
    }
}

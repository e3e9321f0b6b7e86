//! Top-level RA Track configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{BackendConfig, LabsConfig, ObservabilityConfig, SessionConfig, StorageConfig};
use crate::errors::ConfigError;

/// Project-level config file name, looked up in the working root.
pub const PROJECT_CONFIG_FILE: &str = "ratrack.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`RATRACK_*`)
/// 3. Project config (`ratrack.toml` in the working root)
/// 4. User config (`~/.ratrack/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RatrackConfig {
    pub backend: BackendConfig,
    pub storage: StorageConfig,
    pub labs: LabsConfig,
    pub session: SessionConfig,
    pub observability: ObservabilityConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config_path: Option<PathBuf>,
    pub backend_url: Option<String>,
    pub db_path: Option<String>,
    pub log_level: Option<String>,
}

impl RatrackConfig {
    /// Load configuration with layered resolution.
    ///
    /// Files are merged key by key, so a project file that only sets
    /// `[backend] base_url` keeps every other value from the user file.
    /// An explicit `--config` path replaces the project file lookup and must exist.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut merged = toml::Table::new();

        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                let layer = Self::read_table(&user_config_path)?;
                merge_tables(&mut merged, layer);
            }
        }

        match cli_overrides.and_then(|c| c.config_path.as_ref()) {
            Some(explicit) => {
                if !explicit.exists() {
                    return Err(ConfigError::FileNotFound {
                        path: explicit.display().to_string(),
                    });
                }
                merge_tables(&mut merged, Self::read_table(explicit)?);
            }
            None => {
                let project_config_path = root.join(PROJECT_CONFIG_FILE);
                if project_config_path.exists() {
                    merge_tables(&mut merged, Self::read_table(&project_config_path)?);
                }
            }
        }

        let mut config: RatrackConfig =
            toml::Value::Table(merged)
                .try_into()
                .map_err(|e: toml::de::Error| ConfigError::ParseError {
                    path: "<merged>".to_string(),
                    message: e.to_string(),
                })?;

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.backend.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::ValidationFailed {
                field: "backend.base_url".to_string(),
                message: format!("must be an http(s) URL, got {url:?}"),
            });
        }
        if !self.backend.compare_path.starts_with('/') {
            return Err(ConfigError::ValidationFailed {
                field: "backend.compare_path".to_string(),
                message: "must start with '/'".to_string(),
            });
        }
        if self.backend.timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "backend.timeout_secs".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if self.backend.initial_backoff_ms > self.backend.max_backoff_ms {
            return Err(ConfigError::ValidationFailed {
                field: "backend.initial_backoff_ms".to_string(),
                message: "must not exceed backend.max_backoff_ms".to_string(),
            });
        }
        if self.labs.collections.iter().all(|c| c.trim().is_empty()) {
            return Err(ConfigError::ValidationFailed {
                field: "labs.collections".to_string(),
                message: "at least one collection is required".to_string(),
            });
        }
        if self.storage.db_path.trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "storage.db_path".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the user config path: `~/.ratrack/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".ratrack").join("config.toml"))
    }

    fn read_table(path: &Path) -> Result<toml::Table, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str::<toml::Table>(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Apply environment variable overrides.
    /// Unparseable numeric values are ignored.
    fn apply_env_overrides(config: &mut RatrackConfig) {
        if let Ok(val) = std::env::var("RATRACK_BACKEND_URL") {
            config.backend.base_url = val;
        }
        if let Ok(val) = std::env::var("RATRACK_BACKEND_TIMEOUT_SECS") {
            if let Ok(v) = val.parse::<u64>() {
                config.backend.timeout_secs = v;
            }
        }
        if let Ok(val) = std::env::var("RATRACK_BACKEND_MAX_RETRIES") {
            if let Ok(v) = val.parse::<u32>() {
                config.backend.max_retries = v;
            }
        }
        if let Ok(val) = std::env::var("RATRACK_DB_PATH") {
            config.storage.db_path = val;
        }
        if let Ok(val) = std::env::var("RATRACK_LAB_COLLECTIONS") {
            let collections: Vec<String> = val
                .split(',')
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect();
            if !collections.is_empty() {
                config.labs.collections = collections;
            }
        }
        if let Ok(val) = std::env::var("RATRACK_LOG_LEVEL") {
            config.observability.log_level = val;
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut RatrackConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.backend_url {
            config.backend.base_url = v.clone();
        }
        if let Some(ref v) = cli.db_path {
            config.storage.db_path = v.clone();
        }
        if let Some(ref v) = cli.log_level {
            config.observability.log_level = v.clone();
        }
    }
}

/// Recursively merge `overlay` into `base`. Nested tables merge; every other
/// value in `overlay` replaces the one in `base`.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}

//! Configuration system for RA Track.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod backend_config;
pub mod defaults;
pub mod labs_config;
pub mod observability_config;
pub mod ratrack_config;
pub mod session_config;
pub mod storage_config;

pub use backend_config::BackendConfig;
pub use labs_config::LabsConfig;
pub use observability_config::ObservabilityConfig;
pub use ratrack_config::{CliOverrides, RatrackConfig};
pub use session_config::SessionConfig;
pub use storage_config::StorageConfig;

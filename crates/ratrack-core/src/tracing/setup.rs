//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::ObservabilityConfig;

static INIT: Once = Once::new();

/// Initialize logging from config.
///
/// `RATRACK_LOG` holds per-subsystem levels, e.g.
/// `RATRACK_LOG=ratrack_labs=debug,ratrack_cloud=info`, and wins over
/// `log_level` when set. Falls back to `info` if both are invalid.
/// Idempotent.
pub fn init_tracing_with(config: &ObservabilityConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("RATRACK_LOG")
            .or_else(|_| EnvFilter::try_new(&config.log_level))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let registry = tracing_subscriber::registry().with(filter);
        if config.json {
            registry
                .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
                .init();
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_file(true)
                        .with_line_number(true)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    });
}

//! Observability for RA Track.
//! `tracing` crate with `EnvFilter`, per-subsystem log levels.

pub mod setup;
pub mod spans;

pub use setup::init_tracing_with;

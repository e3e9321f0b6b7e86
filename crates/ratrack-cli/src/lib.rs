//! # ratrack-cli
//!
//! Wiring for the `ratrack` binary: one [`App`] per invocation, backed by
//! the SQLite store, with session scope living only as long as the process.

pub mod app;
pub mod output;

pub use app::{App, CompareInput};
pub use output::{CommandOutput, OutputFormat};

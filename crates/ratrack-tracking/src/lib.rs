//! # ratrack-tracking
//!
//! The comparison workflow: load the prior lab record, collect current
//! values, ask the scorer for a comparison, and render the result.

pub mod form;
pub mod report;
pub mod tracker;

pub use form::{FormField, ProgressForm};
pub use report::{change_tone, render_report, trend_tone, Tone};
pub use tracker::{ProgressTracker, TrackerState};

//! # ratrack-core
//!
//! Foundation crate for RA Track.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;
pub mod tracing;

// Re-export the most commonly used types at the crate root.
pub use config::RatrackConfig;
pub use errors::{RatrackError, RatrackResult};
pub use models::{
    ComparisonRequest, ComparisonResult, Document, DocumentQuery, Gender, LabRecord, Role,
    SessionUser,
};

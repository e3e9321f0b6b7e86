//! # ratrack-labs
//!
//! Lab entries have been written under several collection names and with
//! several spellings of each field. This crate finds a user's latest entry
//! wherever it lives and maps it onto [`LabRecord`](ratrack_core::LabRecord).

pub mod locator;
pub mod normalize;
pub mod recorder;

pub use locator::LabRecordLocator;
pub use normalize::{normalize_lab_document, parse_created_at};
pub use recorder::record_lab_entry;

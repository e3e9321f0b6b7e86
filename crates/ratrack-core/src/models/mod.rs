//! Domain models shared across the workspace.

pub mod comparison;
pub mod document;
pub mod gender;
pub mod lab_record;
pub mod lenient;
pub mod session_user;

pub use comparison::{BiomarkerChange, ComparisonRequest, ComparisonResult, RiskTrend};
pub use document::{Document, DocumentQuery, FieldFilter, OrderBy, SortDirection};
pub use gender::Gender;
pub use lab_record::{LabRecord, LabValues};
pub use session_user::{Role, SessionUser};

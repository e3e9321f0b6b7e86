//! Canonical lab record shape, independent of how a document spelled its fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Gender;

/// The most recent prior lab entry, normalized.
///
/// Biomarkers are `None` when the source document had no usable number for
/// them; they serialize as `null` in that case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabRecord {
    pub age: Option<f64>,
    /// Raw gender text as stored; normalized only when a request is built.
    pub gender: Option<String>,
    #[serde(rename = "ESR")]
    pub esr: Option<f64>,
    #[serde(rename = "CRP")]
    pub crp: Option<f64>,
    #[serde(rename = "RF")]
    pub rf: Option<f64>,
    #[serde(rename = "antiCCP")]
    pub anti_ccp: Option<f64>,
    pub created_at: Option<DateTime<Utc>>,
    pub document_id: String,
    /// Collection the record was found in.
    pub collection: String,
}

impl LabRecord {
    /// Entry date as `YYYY-MM-DD`, or `Unknown` without a timestamp.
    pub fn test_date_label(&self) -> String {
        self.created_at
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

/// Values for a new lab entry, as a patient enters them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabValues {
    pub age: f64,
    pub gender: Gender,
    pub esr: f64,
    pub crp: f64,
    pub rf: f64,
    pub anti_ccp: f64,
}

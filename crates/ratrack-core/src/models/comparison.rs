//! Wire types for the remote RA risk comparison endpoint.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::lenient::{f64_from_any, text_from_any};
use super::Gender;

/// Request body for `POST /api/compare-ra-risk`.
///
/// Previous biomarkers are optional because the stored record may lack
/// them; absent values are sent as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRequest {
    #[serde(rename = "monthsSinceLastTest")]
    pub months_since_last_test: f64,
    #[serde(rename = "previousAge")]
    pub previous_age: Option<f64>,
    #[serde(rename = "previousGender")]
    pub previous_gender: Gender,
    #[serde(rename = "previousESR")]
    pub previous_esr: Option<f64>,
    #[serde(rename = "previousCRP")]
    pub previous_crp: Option<f64>,
    #[serde(rename = "previousRF")]
    pub previous_rf: Option<f64>,
    #[serde(rename = "previousAntiCCP")]
    pub previous_anti_ccp: Option<f64>,
    #[serde(rename = "currentAge")]
    pub current_age: f64,
    #[serde(rename = "currentGender")]
    pub current_gender: Gender,
    #[serde(rename = "currentESR")]
    pub current_esr: f64,
    #[serde(rename = "currentCRP")]
    pub current_crp: f64,
    #[serde(rename = "currentRF")]
    pub current_rf: f64,
    #[serde(rename = "currentAntiCCP")]
    pub current_anti_ccp: f64,
}

/// Direction of risk between the two appointments as the model reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RiskTrend {
    Improved,
    Worsened,
    Stable,
    Other(String),
}

impl RiskTrend {
    pub fn as_str(&self) -> &str {
        match self {
            RiskTrend::Improved => "Improved",
            RiskTrend::Worsened => "Worsened",
            RiskTrend::Stable => "Stable",
            RiskTrend::Other(s) => s.as_str(),
        }
    }
}

impl From<String> for RiskTrend {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Improved" => RiskTrend::Improved,
            "Worsened" => RiskTrend::Worsened,
            "Stable" => RiskTrend::Stable,
            _ => RiskTrend::Other(s),
        }
    }
}

impl From<RiskTrend> for String {
    fn from(trend: RiskTrend) -> Self {
        trend.as_str().to_string()
    }
}

impl fmt::Display for RiskTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One biomarker's movement between the two tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiomarkerChange {
    pub name: String,
    /// Free-form description of the change, e.g. `"30 → 20"`.
    #[serde(deserialize_with = "text_from_any", default)]
    pub change: String,
    #[serde(deserialize_with = "f64_from_any")]
    pub percent_change: f64,
}

/// Structured comparison returned by the scoring service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub risk_trend: RiskTrend,
    #[serde(deserialize_with = "f64_from_any")]
    pub previous_probability: f64,
    #[serde(deserialize_with = "f64_from_any")]
    pub current_probability: f64,
    #[serde(deserialize_with = "f64_from_any")]
    pub probability_change: f64,
    #[serde(deserialize_with = "f64_from_any")]
    pub months_between_tests: f64,
    #[serde(default)]
    pub biomarker_changes: Vec<BiomarkerChange>,
    #[serde(default)]
    pub interpretation: String,
    #[serde(default)]
    pub summary: String,
}

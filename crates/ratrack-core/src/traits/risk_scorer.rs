use crate::errors::RatrackResult;
use crate::models::{ComparisonRequest, ComparisonResult};

/// Scores a previous/current biomarker pair. The model lives elsewhere.
pub trait RiskScorer {
    fn compare(&self, request: &ComparisonRequest) -> RatrackResult<ComparisonResult>;
}

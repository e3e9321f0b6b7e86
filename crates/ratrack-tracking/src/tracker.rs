//! ProgressTracker: state machine behind the progress-tracking page.

use std::fmt;

use serde::Serialize;

use ratrack_core::errors::{RatrackResult, ValidationError};
use ratrack_core::models::{ComparisonRequest, ComparisonResult, Gender, LabRecord, SessionUser};
use ratrack_core::traits::RiskScorer;
use ratrack_core::tracking_span;
use ratrack_labs::LabRecordLocator;

use crate::form::{FormField, ProgressForm};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackerState {
    Loading,
    /// Nobody is signed in.
    NoUser,
    /// Signed in, but no prior lab entry exists to compare against.
    NoPreviousData,
    Ready,
    Submitting,
}

impl fmt::Display for TrackerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TrackerState::Loading => "loading",
            TrackerState::NoUser => "no-user",
            TrackerState::NoPreviousData => "no-previous-data",
            TrackerState::Ready => "ready",
            TrackerState::Submitting => "submitting",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub struct ProgressTracker {
    state: TrackerState,
    previous: Option<LabRecord>,
    form: ProgressForm,
    result: Option<ComparisonResult>,
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self {
            state: TrackerState::Loading,
            previous: None,
            form: ProgressForm::default(),
            result: None,
        }
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    pub fn previous(&self) -> Option<&LabRecord> {
        self.previous.as_ref()
    }

    pub fn form(&self) -> &ProgressForm {
        &self.form
    }

    pub fn result(&self) -> Option<&ComparisonResult> {
        self.result.as_ref()
    }

    /// Load the prior record for `user`.
    ///
    /// Lookup failures are logged and treated the same as having no record.
    pub fn load(&mut self, user: Option<&SessionUser>, locator: &LabRecordLocator) -> TrackerState {
        let _span = tracking_span!("load").entered();
        self.state = TrackerState::Loading;
        self.previous = None;
        self.result = None;

        let Some(uid) = user.and_then(SessionUser::uid) else {
            self.state = TrackerState::NoUser;
            return self.state;
        };

        let found = locator.latest_for_user(uid).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "tracking: loading previous lab data failed");
            None
        });
        self.attach_previous(found);
        tracing::info!(state = %self.state, "tracking: loaded");
        self.state
    }

    /// Use an already-located prior record.
    pub fn attach_previous(&mut self, previous: Option<LabRecord>) {
        self.form = ProgressForm::default();
        match previous {
            Some(record) => {
                self.form.current_age = age_text(record.age);
                self.previous = Some(record);
                self.state = TrackerState::Ready;
            }
            None => {
                self.previous = None;
                self.state = TrackerState::NoPreviousData;
            }
        }
    }

    /// Store a raw input. Entering a positive month count re-estimates the
    /// current age from the prior age.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        if field == FormField::MonthsSinceLastTest {
            if let Some(estimate) = self.estimate_age(&value) {
                self.form.current_age = estimate;
            }
        }
        *self.form.slot(field) = value;
    }

    fn estimate_age(&self, months_raw: &str) -> Option<String> {
        let prior_age = self.previous.as_ref()?.age.filter(|a| *a != 0.0)?;
        let months = months_raw.trim().parse::<f64>().ok()?;
        if !(months.is_finite() && months > 0.0) {
            return None;
        }
        Some(format!("{:.1}", prior_age + months / 12.0))
    }

    /// Normalize free-form gender input to the model's two codes.
    pub fn normalize_gender(raw: &str) -> Gender {
        Gender::normalize(Some(raw))
    }

    /// Assemble the scoring payload from the prior record and the form.
    pub fn build_request(&self) -> Result<ComparisonRequest, ValidationError> {
        let previous = match &self.previous {
            Some(p) if !self.form.months_since_last_test.trim().is_empty() => p,
            _ => return Err(ValidationError::IncompleteForm),
        };
        Ok(ComparisonRequest {
            months_since_last_test: self.form.number(FormField::MonthsSinceLastTest)?,
            previous_age: previous.age,
            previous_gender: Gender::normalize(previous.gender.as_deref()),
            previous_esr: previous.esr,
            previous_crp: previous.crp,
            previous_rf: previous.rf,
            previous_anti_ccp: previous.anti_ccp,
            current_age: self.form.number(FormField::CurrentAge)?,
            current_gender: Self::normalize_gender(&self.form.current_gender),
            current_esr: self.form.number(FormField::CurrentEsr)?,
            current_crp: self.form.number(FormField::CurrentCrp)?,
            current_rf: self.form.number(FormField::CurrentRf)?,
            current_anti_ccp: self.form.number(FormField::CurrentAntiCcp)?,
        })
    }

    /// Build, send, and keep the comparison. Any previous result is cleared
    /// first, so a failed submit leaves no stale result behind.
    pub fn submit(&mut self, scorer: &dyn RiskScorer) -> RatrackResult<&ComparisonResult> {
        let _span = tracking_span!("submit").entered();
        let request = self.begin_submit()?;
        let outcome = scorer.compare(&request);
        self.finish_submit(outcome)
    }

    /// First half of [`submit`](Self::submit): clear the old result, build
    /// the payload and enter `Submitting`. Fails while a submit is in flight.
    pub fn begin_submit(&mut self) -> RatrackResult<ComparisonRequest> {
        if self.state == TrackerState::Submitting {
            return Err(ValidationError::SubmitInProgress.into());
        }
        self.result = None;
        let request = self.build_request()?;
        self.state = TrackerState::Submitting;
        Ok(request)
    }

    /// Second half of [`submit`](Self::submit): leave `Submitting` and keep
    /// the result on success.
    pub fn finish_submit(
        &mut self,
        outcome: RatrackResult<ComparisonResult>,
    ) -> RatrackResult<&ComparisonResult> {
        if self.state == TrackerState::Submitting {
            self.state = TrackerState::Ready;
        }
        match outcome {
            Ok(result) => {
                tracing::info!(trend = %result.risk_trend, "tracking: comparison stored");
                Ok(&*self.result.insert(result))
            }
            Err(e) => {
                tracing::warn!(error = %e, "tracking: analysis failed");
                Err(e)
            }
        }
    }

    /// Reset every input, restore the prior age, and drop the result.
    pub fn clear_form(&mut self) {
        self.form = ProgressForm {
            current_age: age_text(self.previous.as_ref().and_then(|p| p.age)),
            ..ProgressForm::default()
        };
        self.result = None;
    }

    /// Prior entry date as `YYYY-MM-DD`, or `Unknown`.
    pub fn last_test_date(&self) -> String {
        self.previous
            .as_ref()
            .map(LabRecord::test_date_label)
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

fn age_text(age: Option<f64>) -> String {
    age.filter(|a| *a != 0.0)
        .map(|a| a.to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(age: Option<f64>) -> LabRecord {
        LabRecord {
            age,
            gender: Some("Female".to_string()),
            esr: Some(30.0),
            crp: None,
            rf: Some(20.0),
            anti_ccp: Some(10.0),
            created_at: None,
            document_id: "d1".to_string(),
            collection: "LabInformation".to_string(),
        }
    }

    #[test]
    fn months_estimate_current_age() {
        let mut tracker = ProgressTracker::new();
        tracker.attach_previous(Some(record(Some(50.0))));
        assert_eq!(tracker.form().current_age, "50");

        tracker.set_field(FormField::MonthsSinceLastTest, "6");
        assert_eq!(tracker.form().current_age, "50.5");
        tracker.set_field(FormField::MonthsSinceLastTest, "0");
        assert_eq!(tracker.form().current_age, "50.5");
        tracker.set_field(FormField::MonthsSinceLastTest, "abc");
        assert_eq!(tracker.form().current_age, "50.5");
        assert_eq!(tracker.form().months_since_last_test, "abc");
    }

    #[test]
    fn no_prior_age_means_no_estimate() {
        let mut tracker = ProgressTracker::new();
        tracker.attach_previous(Some(record(None)));
        tracker.set_field(FormField::MonthsSinceLastTest, "12");
        assert_eq!(tracker.form().current_age, "");
    }

    #[test]
    fn unknown_date_without_record() {
        let tracker = ProgressTracker::new();
        assert_eq!(tracker.last_test_date(), "Unknown");
        assert_eq!(tracker.state(), TrackerState::Loading);
    }
}

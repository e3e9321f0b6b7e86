use std::cell::RefCell;
use std::sync::Arc;

use proptest::prelude::*;
use serde_json::json;

use ratrack_core::config::LabsConfig;
use ratrack_core::errors::{RatrackError, RatrackResult, ScoringError, ValidationError};
use ratrack_core::models::{
    BiomarkerChange, ComparisonRequest, ComparisonResult, Gender, RiskTrend, Role, SessionUser,
};
use ratrack_core::traits::{DocumentStore, RiskScorer};
use ratrack_labs::LabRecordLocator;
use ratrack_storage::StorageEngine;
use ratrack_tracking::{render_report, FormField, ProgressTracker, TrackerState};

/// Scorer returning a fixed answer and remembering what it was asked.
struct StubScorer {
    answer: Result<ComparisonResult, u16>,
    seen: RefCell<Vec<ComparisonRequest>>,
}

impl StubScorer {
    fn ok() -> Self {
        Self {
            answer: Ok(sample_result()),
            seen: RefCell::new(Vec::new()),
        }
    }

    fn rejecting(status: u16) -> Self {
        Self {
            answer: Err(status),
            seen: RefCell::new(Vec::new()),
        }
    }
}

impl RiskScorer for StubScorer {
    fn compare(&self, request: &ComparisonRequest) -> RatrackResult<ComparisonResult> {
        self.seen.borrow_mut().push(request.clone());
        match &self.answer {
            Ok(result) => Ok(result.clone()),
            Err(status) => Err(ScoringError::Rejected {
                status: *status,
                message: "Server Error".to_string(),
            }
            .into()),
        }
    }
}

fn sample_result() -> ComparisonResult {
    ComparisonResult {
        risk_trend: RiskTrend::Improved,
        previous_probability: 62.5,
        current_probability: 48.1,
        probability_change: -14.4,
        months_between_tests: 6.0,
        biomarker_changes: vec![
            BiomarkerChange {
                name: "ESR".to_string(),
                change: "30 → 22".to_string(),
                percent_change: -26.7,
            },
            BiomarkerChange {
                name: "RF".to_string(),
                change: "20 → 25".to_string(),
                percent_change: 25.0,
            },
        ],
        interpretation: "Inflammatory markers improved.".to_string(),
        summary: "Risk decreased.\nKeep current treatment.".to_string(),
    }
}

fn seeded_locator() -> LabRecordLocator {
    let store = Arc::new(StorageEngine::open_in_memory().unwrap());
    store
        .put(
            "userLabs",
            "lab-1",
            &json!({
                "userId": "p1",
                "userAge": "50",
                "userGender": "female",
                "erythrocyteSedimentationRate": 30,
                "CRP": "n/a",
                "rheumatoidFactor": 20,
                "antiCcp": 10,
                "createdAt": "2026-04-02T10:00:00Z"
            }),
        )
        .unwrap();
    LabRecordLocator::new(store, LabsConfig::default())
}

fn ready_tracker() -> ProgressTracker {
    let mut tracker = ProgressTracker::new();
    let user = SessionUser::new("p1", Role::Patient);
    assert_eq!(tracker.load(Some(&user), &seeded_locator()), TrackerState::Ready);
    tracker
}

fn fill_current(tracker: &mut ProgressTracker) {
    tracker.set_field(FormField::MonthsSinceLastTest, "6");
    tracker.set_field(FormField::CurrentGender, "male");
    tracker.set_field(FormField::CurrentEsr, "22");
    tracker.set_field(FormField::CurrentCrp, "5");
    tracker.set_field(FormField::CurrentRf, "25");
    tracker.set_field(FormField::CurrentAntiCcp, "9");
}

#[test]
fn load_without_user_is_no_user() {
    let mut tracker = ProgressTracker::new();
    assert_eq!(tracker.load(None, &seeded_locator()), TrackerState::NoUser);

    let anonymous = SessionUser::default();
    assert_eq!(tracker.load(Some(&anonymous), &seeded_locator()), TrackerState::NoUser);
}

#[test]
fn load_without_record_is_no_previous_data() {
    let mut tracker = ProgressTracker::new();
    let user = SessionUser::new("nobody", Role::Patient);
    assert_eq!(
        tracker.load(Some(&user), &seeded_locator()),
        TrackerState::NoPreviousData
    );
    assert!(matches!(
        tracker.build_request(),
        Err(ValidationError::IncompleteForm)
    ));
}

#[test]
fn load_prefills_age_and_date() {
    let tracker = ready_tracker();
    assert_eq!(tracker.form().current_age, "50");
    assert_eq!(tracker.last_test_date(), "2026-04-02");
    assert_eq!(tracker.previous().unwrap().collection, "userLabs");
}

#[test]
fn submit_sends_full_payload_and_keeps_result() {
    let mut tracker = ready_tracker();
    fill_current(&mut tracker);
    assert_eq!(tracker.form().current_age, "50.5");

    let scorer = StubScorer::ok();
    let result = tracker.submit(&scorer).unwrap();
    assert_eq!(result.risk_trend, RiskTrend::Improved);
    assert_eq!(tracker.state(), TrackerState::Ready);

    let seen = scorer.seen.borrow();
    let request = &seen[0];
    assert_eq!(request.months_since_last_test, 6.0);
    assert_eq!(request.previous_age, Some(50.0));
    assert_eq!(request.previous_gender, Gender::Female);
    assert_eq!(request.previous_crp, None);
    assert_eq!(request.previous_anti_ccp, Some(10.0));
    assert_eq!(request.current_age, 50.5);
    assert_eq!(request.current_gender, Gender::Male);

    let wire = serde_json::to_value(request).unwrap();
    assert_eq!(wire["previousCRP"], json!(null));
    assert_eq!(wire.as_object().unwrap().len(), 13);
}

#[test]
fn missing_months_blocks_submit() {
    let mut tracker = ready_tracker();
    let scorer = StubScorer::ok();
    let err = tracker.submit(&scorer).unwrap_err();
    assert_eq!(err.to_string(), "validation error: Please ensure all fields are filled.");
    assert!(scorer.seen.borrow().is_empty());
}

#[test]
fn non_numeric_current_value_is_rejected() {
    let mut tracker = ready_tracker();
    fill_current(&mut tracker);
    tracker.set_field(FormField::CurrentRf, "high");
    assert!(matches!(
        tracker.build_request(),
        Err(ValidationError::InvalidNumber { ref field, .. }) if field == "currentRF"
    ));
}

#[test]
fn failed_submit_clears_previous_result() {
    let mut tracker = ready_tracker();
    fill_current(&mut tracker);
    tracker.submit(&StubScorer::ok()).unwrap();
    assert!(tracker.result().is_some());

    let err = tracker.submit(&StubScorer::rejecting(500)).unwrap_err();
    assert!(matches!(err, RatrackError::Scoring(ScoringError::Rejected { .. })));
    assert!(tracker.result().is_none());
    assert_eq!(tracker.state(), TrackerState::Ready);
}

#[test]
fn split_submit_exposes_submitting_state() {
    let mut tracker = ready_tracker();
    fill_current(&mut tracker);
    tracker.submit(&StubScorer::ok()).unwrap();

    let request = tracker.begin_submit().unwrap();
    assert_eq!(tracker.state(), TrackerState::Submitting);
    assert!(tracker.result().is_none());
    assert_eq!(request.current_esr, 22.0);

    let err = tracker.begin_submit().unwrap_err();
    assert!(matches!(
        err,
        RatrackError::Validation(ValidationError::SubmitInProgress)
    ));
    assert_eq!(tracker.state(), TrackerState::Submitting);

    let outcome = StubScorer::ok().compare(&request);
    tracker.finish_submit(outcome).unwrap();
    assert_eq!(tracker.state(), TrackerState::Ready);
    assert!(tracker.result().is_some());
}

#[test]
fn invalid_form_never_enters_submitting() {
    let mut tracker = ready_tracker();
    assert!(tracker.begin_submit().is_err());
    assert_eq!(tracker.state(), TrackerState::Ready);
}

#[test]
fn clear_form_restores_prior_age() {
    let mut tracker = ready_tracker();
    fill_current(&mut tracker);
    tracker.submit(&StubScorer::ok()).unwrap();

    tracker.clear_form();
    assert_eq!(tracker.form().current_age, "50");
    assert_eq!(tracker.form().months_since_last_test, "");
    assert_eq!(tracker.form().current_esr, "");
    assert!(tracker.result().is_none());
}

#[test]
fn report_renders_every_section() {
    let report = render_report(&sample_result());
    assert!(report.contains("RA Risk Comparison: Improved"));
    assert!(report.contains("First Appointment:   62.5%"));
    assert!(report.contains("Current Appointment: 48.1%"));
    assert!(report.contains("↓ 14.4% change over 6 months"));
    assert!(report.contains("  ESR: 30 → 22 (-26.7%)"));
    assert!(report.contains("  RF: 20 → 25 (+25%)"));
    assert!(report.contains("Clinical Interpretation:\n  Inflammatory markers improved."));
    assert!(report.contains("  Keep current treatment."));
}

proptest! {
    #[test]
    fn age_estimate_has_one_decimal(months in 1u32..600) {
        let mut tracker = ready_tracker();
        tracker.set_field(FormField::MonthsSinceLastTest, months.to_string());
        let age = &tracker.form().current_age;
        let (_, decimals) = age.split_once('.').unwrap();
        prop_assert_eq!(decimals.len(), 1);
        let parsed: f64 = age.parse().unwrap();
        prop_assert!((parsed - (50.0 + months as f64 / 12.0)).abs() <= 0.05 + 1e-9);
    }

    #[test]
    fn gender_normalization_is_total(raw in ".{0,8}") {
        let g = ProgressTracker::normalize_gender(&raw);
        let expected_male = raw.to_uppercase().starts_with('M') || raw == "1";
        prop_assert_eq!(g == Gender::Male, expected_male);
    }
}

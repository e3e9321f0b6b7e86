use ratrack_core::errors::*;

#[test]
fn incomplete_form_uses_user_facing_message() {
    let err: RatrackError = ValidationError::IncompleteForm.into();
    assert!(err.to_string().contains("Please ensure all fields are filled."));
    assert_eq!(err.error_code(), "VALIDATION_ERROR");
}

#[test]
fn non_json_response_points_at_the_server() {
    let err = ScoringError::NonJsonResponse { status: 500 };
    let msg = err.to_string();
    assert!(msg.contains("Backend returned HTML instead of JSON"));
    assert!(msg.contains("500"));
}

#[test]
fn rejected_carries_server_message() {
    let err = ScoringError::Rejected {
        status: 422,
        message: "Missing currentESR".into(),
    };
    assert!(err.to_string().contains("Missing currentESR"));
    assert_eq!(err.error_code(), "SCORING_REJECTED");
}

#[test]
fn subsystem_errors_convert_to_ratrack_error() {
    let err: RatrackError = StoreError::Sqlite {
        message: "disk full".into(),
    }
    .into();
    assert!(matches!(err, RatrackError::Store(_)));
    assert_eq!(err.error_code(), "STORAGE_ERROR");

    let err: RatrackError = SessionError::NotSignedIn.into();
    assert!(matches!(err, RatrackError::Session(_)));
    assert_eq!(err.coded_string(), "[NOT_SIGNED_IN] session error: no user is signed in");

    let err: RatrackError = ConfigError::FileNotFound { path: "x".into() }.into();
    assert_eq!(err.error_code(), "CONFIG_ERROR");
}

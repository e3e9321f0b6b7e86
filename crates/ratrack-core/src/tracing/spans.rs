//! Span definitions per operation: guard, labs, scoring, tracking.

/// Create a route guard span.
#[macro_export]
macro_rules! guard_span {
    ($path:expr) => {
        tracing::info_span!("ratrack.guard", path = %$path)
    };
}

/// Create a lab lookup span.
#[macro_export]
macro_rules! labs_span {
    ($user_id:expr) => {
        tracing::info_span!("ratrack.labs", user_id = %$user_id)
    };
}

/// Create a scoring request span.
#[macro_export]
macro_rules! scoring_span {
    ($url:expr) => {
        tracing::info_span!("ratrack.scoring", url = %$url)
    };
}

/// Create a progress-tracking span.
#[macro_export]
macro_rules! tracking_span {
    ($operation:expr) => {
        tracing::info_span!("ratrack.tracking", operation = %$operation)
    };
}


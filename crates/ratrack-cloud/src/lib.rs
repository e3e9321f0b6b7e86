//! # ratrack-cloud
//!
//! Talks to the remote scoring service. The transport retries transient
//! failures with exponential backoff; the scoring client turns whatever the
//! service answers into a [`ComparisonResult`](ratrack_core::ComparisonResult)
//! or a precise [`ScoringError`](ratrack_core::errors::ScoringError).

pub mod scoring;
pub mod transport;

pub use scoring::{classify_response, ScoringClient};
pub use transport::{HttpClient, HttpClientConfig, RawResponse};

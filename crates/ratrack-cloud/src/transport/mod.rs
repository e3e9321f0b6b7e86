//! Transport layer: blocking HTTP client with retry and backoff.

pub mod http_client;

pub use http_client::{HttpClient, HttpClientConfig, RawResponse};

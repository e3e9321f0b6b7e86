//! Seams to external collaborators: document store, browser-style storage, scoring.

pub mod document_store;
pub mod key_value_store;
pub mod risk_scorer;

pub use document_store::DocumentStore;
pub use key_value_store::KeyValueStore;
pub use risk_scorer::RiskScorer;

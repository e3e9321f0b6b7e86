//! LabRecordLocator: probes the configured collections for a user's latest entry.

use std::cmp::Reverse;
use std::sync::Arc;

use serde_json::Value;

use ratrack_core::config::LabsConfig;
use ratrack_core::errors::{RatrackResult, SessionError};
use ratrack_core::labs_span;
use ratrack_core::models::{Document, DocumentQuery, LabRecord, SortDirection};
use ratrack_core::traits::DocumentStore;

use crate::normalize::{normalize_with, parse_created_at};

pub struct LabRecordLocator {
    store: Arc<dyn DocumentStore>,
    config: LabsConfig,
}

impl LabRecordLocator {
    pub fn new(store: Arc<dyn DocumentStore>, config: LabsConfig) -> Self {
        Self { store, config }
    }

    pub fn collections(&self) -> &[String] {
        &self.config.collections
    }

    /// Latest lab entry for `user_id`, normalized.
    ///
    /// Collections are tried in configured order and the first one holding
    /// any dated entry for the user wins, even if another collection has a
    /// newer one. Entries are ranked by their parsed `createdAt` instant, so
    /// offsets, epoch milliseconds and `{seconds, nanoseconds}` objects
    /// compare correctly. Entries without a readable timestamp are ignored.
    /// A failing collection is logged and skipped.
    pub fn latest_for_user(&self, user_id: &str) -> RatrackResult<Option<LabRecord>> {
        if user_id.is_empty() {
            return Err(SessionError::MissingUid.into());
        }
        let _span = labs_span!(user_id).entered();

        for collection in &self.config.collections {
            let query = DocumentQuery::collection(collection.as_str())
                .where_eq(
                    self.config.user_field.as_str(),
                    Value::String(user_id.to_string()),
                )
                .order_by(
                    self.config.created_at_field.as_str(),
                    SortDirection::Descending,
                );

            let docs = match self.store.query(&query) {
                Ok(docs) => docs,
                Err(e) => {
                    tracing::warn!(collection = %collection, error = %e, "labs: query failed, skipping collection");
                    continue;
                }
            };

            if let Some(doc) = newest(&docs, &self.config.created_at_field) {
                tracing::debug!(collection = %collection, id = %doc.id, "labs: found latest entry");
                return Ok(Some(normalize_with(
                    doc,
                    collection,
                    &self.config.created_at_field,
                )));
            }
            if !docs.is_empty() {
                tracing::debug!(collection = %collection, count = docs.len(), "labs: entries have no readable timestamp");
            }
        }

        tracing::debug!("labs: no entry in any collection");
        Ok(None)
    }
}

/// The document with the greatest `created_at_field` instant. Ties keep the
/// store's order.
fn newest<'a>(docs: &'a [Document], created_at_field: &str) -> Option<&'a Document> {
    docs.iter()
        .filter_map(|doc| {
            doc.field(created_at_field)
                .and_then(parse_created_at)
                .map(|at| (at, doc))
        })
        .min_by_key(|(at, _)| Reverse(*at))
        .map(|(_, doc)| doc)
}

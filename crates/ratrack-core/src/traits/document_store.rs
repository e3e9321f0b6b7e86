use crate::errors::RatrackResult;
use crate::models::{Document, DocumentQuery};

/// Collection-oriented document store (lab entries, admin flags).
pub trait DocumentStore: Send + Sync {
    /// Fetch one document by id. `Ok(None)` when it does not exist.
    fn get(&self, collection: &str, id: &str) -> RatrackResult<Option<Document>>;

    /// Run a single-collection query. An ordered query only returns
    /// documents that have the ordered field.
    fn query(&self, query: &DocumentQuery) -> RatrackResult<Vec<Document>>;

    /// Create or replace a document.
    fn put(&self, collection: &str, id: &str, data: &serde_json::Value) -> RatrackResult<()>;

    /// Delete a document. Deleting a missing document is not an error.
    fn delete(&self, collection: &str, id: &str) -> RatrackResult<()>;
}

//! Writes a new lab entry in canonical field names.

use chrono::{SecondsFormat, Utc};
use serde_json::json;

use ratrack_core::constants::{LAB_CREATED_AT_FIELD, LAB_USER_FIELD};
use ratrack_core::errors::{RatrackResult, SessionError, ValidationError};
use ratrack_core::models::{Document, LabValues};
use ratrack_core::traits::DocumentStore;

/// Store `values` as a new entry for `user_id` in `collection`, stamped now.
pub fn record_lab_entry(
    store: &dyn DocumentStore,
    collection: &str,
    user_id: &str,
    values: &LabValues,
) -> RatrackResult<Document> {
    if user_id.is_empty() {
        return Err(SessionError::MissingUid.into());
    }
    for (field, value) in [
        ("age", values.age),
        ("ESR", values.esr),
        ("CRP", values.crp),
        ("RF", values.rf),
        ("antiCCP", values.anti_ccp),
    ] {
        if !value.is_finite() {
            return Err(ValidationError::InvalidNumber {
                field: field.to_string(),
                value: value.to_string(),
            }
            .into());
        }
    }

    let id = uuid::Uuid::new_v4().to_string();
    let mut data = json!({
        "age": values.age,
        "gender": values.gender.code(),
        "ESR": values.esr,
        "CRP": values.crp,
        "RF": values.rf,
        "antiCCP": values.anti_ccp,
    });
    data[LAB_USER_FIELD] = json!(user_id);
    // Fixed-width UTC so entries sort by text.
    data[LAB_CREATED_AT_FIELD] = json!(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));

    store.put(collection, &id, &data)?;
    tracing::info!(collection, id = %id, user_id, "labs: recorded entry");
    Ok(Document::new(id, data))
}

//! Field-variant normalization for lab documents.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use ratrack_core::constants::LAB_CREATED_AT_FIELD;
use ratrack_core::models::lenient::{as_f64, as_text};
use ratrack_core::models::{Document, LabRecord};

/// Accepted spellings per canonical field, in priority order.
pub const AGE_FIELDS: &[&str] = &["userAge", "age"];
pub const GENDER_FIELDS: &[&str] = &["userGender", "gender"];
pub const ESR_FIELDS: &[&str] = &["erythrocyteSedimentationRate", "ESR"];
pub const CRP_FIELDS: &[&str] = &["cReactiveProtein", "CRP"];
pub const RF_FIELDS: &[&str] = &["rheumatoidFactor", "RF"];
pub const ANTI_CCP_FIELDS: &[&str] = &["antiCCP", "antiCcp", "antiCyclicCitrullinatedPeptide"];

/// Map a stored lab document onto the canonical record.
///
/// For numbers, the first variant holding a finite number (or numeric
/// string) wins; a present but unusable variant does not block later ones.
pub fn normalize_lab_document(doc: &Document, collection: &str) -> LabRecord {
    normalize_with(doc, collection, LAB_CREATED_AT_FIELD)
}

pub(crate) fn normalize_with(doc: &Document, collection: &str, created_at_field: &str) -> LabRecord {
    LabRecord {
        age: first_number(doc, AGE_FIELDS),
        gender: GENDER_FIELDS
            .iter()
            .find_map(|f| doc.field(f).and_then(as_text)),
        esr: first_number(doc, ESR_FIELDS),
        crp: first_number(doc, CRP_FIELDS),
        rf: first_number(doc, RF_FIELDS),
        anti_ccp: first_number(doc, ANTI_CCP_FIELDS),
        created_at: doc.field(created_at_field).and_then(parse_created_at),
        document_id: doc.id.clone(),
        collection: collection.to_string(),
    }
}

fn first_number(doc: &Document, variants: &[&str]) -> Option<f64> {
    variants.iter().find_map(|f| doc.field(f).and_then(as_f64))
}

/// Entry timestamp from an RFC 3339 string, epoch milliseconds, or a
/// `{seconds, nanoseconds}` object.
pub fn parse_created_at(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|t| t.with_timezone(&Utc)),
        Value::Number(n) => {
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            Utc.timestamp_millis_opt(millis).single()
        }
        Value::Object(map) => {
            let seconds = map
                .get("seconds")
                .or_else(|| map.get("_seconds"))
                .and_then(Value::as_i64)?;
            let nanos = map
                .get("nanoseconds")
                .or_else(|| map.get("_nanoseconds"))
                .and_then(Value::as_u64)
                .unwrap_or(0);
            Utc.timestamp_opt(seconds, u32::try_from(nanos).ok()?).single()
        }
        _ => None,
    }
}

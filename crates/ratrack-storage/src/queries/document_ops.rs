//! Document CRUD and single-collection queries over JSON bodies.

use rusqlite::types::Value as SqlValue;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;

use ratrack_core::errors::{RatrackResult, StoreError};
use ratrack_core::models::{Document, DocumentQuery, SortDirection};

use crate::to_storage_err;

/// JSON path for a top-level field. The label is quoted so dots and other
/// punctuation stay part of the name; double quotes cannot be expressed.
fn field_path(collection: &str, field: &str) -> RatrackResult<String> {
    if field.is_empty() || field.contains('"') {
        return Err(StoreError::QueryFailed {
            collection: collection.to_string(),
            reason: format!("unsupported field name {field:?}"),
        }
        .into());
    }
    Ok(format!("$.\"{field}\""))
}

/// Translate a JSON scalar into the SQL value `json_extract` yields for it.
fn scalar_to_sql(collection: &str, value: &Value) -> RatrackResult<Option<SqlValue>> {
    let sql = match value {
        Value::Null => return Ok(None),
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => SqlValue::Real(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => SqlValue::Text(s.clone()),
        Value::Array(_) | Value::Object(_) => {
            return Err(StoreError::QueryFailed {
                collection: collection.to_string(),
                reason: "filters support scalar values only".to_string(),
            }
            .into())
        }
    };
    Ok(Some(sql))
}

fn parse_body(collection: &str, id: &str, raw: &str) -> RatrackResult<Value> {
    serde_json::from_str(raw).map_err(|e| {
        StoreError::InvalidDocument {
            collection: collection.to_string(),
            id: id.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

/// Fetch a document by collection and id.
pub fn get_document(conn: &Connection, collection: &str, id: &str) -> RatrackResult<Option<Document>> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT data FROM documents WHERE collection = ?1 AND id = ?2",
            params![collection, id],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    match raw {
        Some(raw) => Ok(Some(Document::new(id, parse_body(collection, id, &raw)?))),
        None => Ok(None),
    }
}

/// Insert or replace a document. Bodies must be JSON objects.
pub fn put_document(conn: &Connection, collection: &str, id: &str, data: &Value) -> RatrackResult<()> {
    if !data.is_object() {
        return Err(StoreError::InvalidDocument {
            collection: collection.to_string(),
            id: id.to_string(),
            reason: "document body must be a JSON object".to_string(),
        }
        .into());
    }
    conn.execute(
        "INSERT INTO documents (collection, id, data) VALUES (?1, ?2, ?3)
         ON CONFLICT(collection, id) DO UPDATE SET
            data = excluded.data,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
        params![collection, id, data.to_string()],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Delete a document; missing documents are ignored.
pub fn delete_document(conn: &Connection, collection: &str, id: &str) -> RatrackResult<()> {
    conn.execute(
        "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
        params![collection, id],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Run a single-collection query.
pub fn query_documents(conn: &Connection, query: &DocumentQuery) -> RatrackResult<Vec<Document>> {
    let mut sql = String::from("SELECT id, data FROM documents WHERE collection = ?");
    let mut bound: Vec<SqlValue> = vec![SqlValue::Text(query.collection.clone())];

    if let Some(filter) = &query.filter {
        bound.push(SqlValue::Text(field_path(&query.collection, &filter.field)?));
        match scalar_to_sql(&query.collection, &filter.value)? {
            Some(value) => {
                sql.push_str(" AND json_extract(data, ?) = ?");
                bound.push(value);
            }
            None => sql.push_str(" AND json_extract(data, ?) IS NULL"),
        }
    }

    // Documents without the ordered field are left out of ordered queries.
    if let Some(order) = &query.order_by {
        let path = field_path(&query.collection, &order.field)?;
        let direction = match order.direction {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        };
        sql.push_str(&format!(
            " AND json_extract(data, ?) IS NOT NULL \
             ORDER BY json_extract(data, ?) {direction}, rowid {direction}"
        ));
        bound.push(SqlValue::Text(path.clone()));
        bound.push(SqlValue::Text(path));
    }

    if let Some(limit) = query.limit {
        sql.push_str(" LIMIT ?");
        bound.push(SqlValue::Integer(i64::try_from(limit).unwrap_or(i64::MAX)));
    }

    let query_err = |e: rusqlite::Error| StoreError::QueryFailed {
        collection: query.collection.clone(),
        reason: e.to_string(),
    };

    let mut stmt = conn.prepare(&sql).map_err(query_err)?;
    let rows = stmt
        .query_map(rusqlite::params_from_iter(bound.iter()), |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })
        .map_err(query_err)?;

    let mut documents = Vec::new();
    for row in rows {
        let (id, raw) = row.map_err(query_err)?;
        let data = parse_body(&query.collection, &id, &raw)?;
        documents.push(Document::new(id, data));
    }
    Ok(documents)
}

/// Number of documents in a collection.
pub fn count_documents(conn: &Connection, collection: &str) -> RatrackResult<usize> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM documents WHERE collection = ?1",
            params![collection],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(usize::try_from(count).unwrap_or(0))
}

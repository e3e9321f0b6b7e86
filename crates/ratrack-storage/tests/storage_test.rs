use proptest::prelude::*;
use serde_json::json;

use ratrack_core::config::StorageConfig;
use ratrack_core::errors::{RatrackError, StoreError};
use ratrack_core::models::{DocumentQuery, SortDirection};
use ratrack_core::traits::{DocumentStore, KeyValueStore};
use ratrack_storage::StorageEngine;

fn engine() -> StorageEngine {
    StorageEngine::open_in_memory().unwrap()
}

#[test]
fn put_then_get_returns_body() {
    let store = engine();
    store
        .put("adminUsers", "u1", &json!({"isAdmin": true}))
        .unwrap();
    let doc = store.get("adminUsers", "u1").unwrap().unwrap();
    assert_eq!(doc.id, "u1");
    assert_eq!(doc.field("isAdmin"), Some(&json!(true)));
    assert!(store.get("adminUsers", "u2").unwrap().is_none());
    assert!(store.get("otherCollection", "u1").unwrap().is_none());
}

#[test]
fn put_replaces_existing_document() {
    let store = engine();
    store.put("c", "d", &json!({"v": 1})).unwrap();
    store.put("c", "d", &json!({"v": 2})).unwrap();
    assert_eq!(store.get("c", "d").unwrap().unwrap().data, json!({"v": 2}));
    assert_eq!(store.count("c").unwrap(), 1);
}

#[test]
fn non_object_bodies_are_rejected() {
    let store = engine();
    let err = store.put("c", "d", &json!([1, 2])).unwrap_err();
    assert!(matches!(
        err,
        RatrackError::Store(StoreError::InvalidDocument { .. })
    ));
}

#[test]
fn delete_is_idempotent() {
    let store = engine();
    store.put("c", "d", &json!({})).unwrap();
    store.delete("c", "d").unwrap();
    store.delete("c", "d").unwrap();
    assert!(store.get("c", "d").unwrap().is_none());
}

#[test]
fn query_filters_orders_and_limits() {
    let store = engine();
    store
        .put("labResults", "a", &json!({"userId": "u1", "createdAt": "2024-01-01T00:00:00Z"}))
        .unwrap();
    store
        .put("labResults", "b", &json!({"userId": "u1", "createdAt": "2024-06-01T00:00:00Z"}))
        .unwrap();
    store
        .put("labResults", "c", &json!({"userId": "u2", "createdAt": "2025-01-01T00:00:00Z"}))
        .unwrap();
    store
        .put("userLabs", "d", &json!({"userId": "u1", "createdAt": "2026-01-01T00:00:00Z"}))
        .unwrap();

    let latest = store
        .query(
            &DocumentQuery::collection("labResults")
                .where_eq("userId", json!("u1"))
                .order_by("createdAt", SortDirection::Descending)
                .limit(1),
        )
        .unwrap();
    assert_eq!(latest.len(), 1);
    assert_eq!(latest[0].id, "b");

    let ascending = store
        .query(
            &DocumentQuery::collection("labResults")
                .where_eq("userId", json!("u1"))
                .order_by("createdAt", SortDirection::Ascending),
        )
        .unwrap();
    let ids: Vec<_> = ascending.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[test]
fn ordered_query_skips_documents_without_the_field() {
    let store = engine();
    store
        .put("labResults", "dated", &json!({"userId": "u1", "createdAt": 1_700_000_000_000_i64}))
        .unwrap();
    store.put("labResults", "undated", &json!({"userId": "u1"})).unwrap();
    store
        .put("labResults", "null", &json!({"userId": "u1", "createdAt": null}))
        .unwrap();

    let ordered = store
        .query(
            &DocumentQuery::collection("labResults")
                .where_eq("userId", json!("u1"))
                .order_by("createdAt", SortDirection::Descending),
        )
        .unwrap();
    let ids: Vec<_> = ordered.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["dated"]);

    let unordered = store
        .query(&DocumentQuery::collection("labResults").where_eq("userId", json!("u1")))
        .unwrap();
    assert_eq!(unordered.len(), 3);
}

#[test]
fn query_filters_on_numbers_bools_and_null() {
    let store = engine();
    store.put("c", "n", &json!({"k": 5})).unwrap();
    store.put("c", "b", &json!({"k": true})).unwrap();
    store.put("c", "z", &json!({"other": 1})).unwrap();

    let by_number = store
        .query(&DocumentQuery::collection("c").where_eq("k", json!(5)))
        .unwrap();
    assert_eq!(by_number.len(), 1);
    assert_eq!(by_number[0].id, "n");

    let by_null = store
        .query(&DocumentQuery::collection("c").where_eq("k", json!(null)))
        .unwrap();
    assert_eq!(by_null.len(), 1);
    assert_eq!(by_null[0].id, "z");
}

#[test]
fn object_filters_are_a_query_error() {
    let store = engine();
    let err = store
        .query(&DocumentQuery::collection("c").where_eq("k", json!({"a": 1})))
        .unwrap_err();
    assert!(matches!(err, RatrackError::Store(StoreError::QueryFailed { .. })));
}

#[test]
fn quoted_field_names_are_rejected() {
    let store = engine();
    let err = store
        .query(&DocumentQuery::collection("c").where_eq("a\"b", json!(1)))
        .unwrap_err();
    assert!(matches!(err, RatrackError::Store(StoreError::QueryFailed { .. })));
}

#[test]
fn file_backed_engine_persists_documents_and_key_values() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("ratrack.db");
    let config = StorageConfig::default();

    {
        let engine = StorageEngine::open(&path, &config).unwrap();
        engine.put("c", "d", &json!({"v": 1})).unwrap();
        engine
            .key_value_store()
            .set_item("currentUser", r#"{"uid":"u1"}"#)
            .unwrap();
    }

    let engine = StorageEngine::open(&path, &config).unwrap();
    assert_eq!(engine.schema_version().unwrap(), 2);
    assert!(engine.get("c", "d").unwrap().is_some());
    let kv = engine.key_value_store();
    assert_eq!(
        kv.get_item("currentUser").unwrap().as_deref(),
        Some(r#"{"uid":"u1"}"#)
    );
    kv.remove_item("currentUser").unwrap();
    assert!(kv.get_item("currentUser").unwrap().is_none());
}

proptest! {
    #[test]
    fn any_field_name_is_filterable(field in "[a-zA-Z' .$]{1,12}", value in "[a-z0-9]{0,8}") {
        let store = engine();
        let mut body = serde_json::Map::new();
        body.insert(field.clone(), json!(value.clone()));
        store.put("c", "d", &serde_json::Value::Object(body)).unwrap();

        let found = store
            .query(&DocumentQuery::collection("c").where_eq(field.clone(), json!(value)))
            .unwrap();
        prop_assert_eq!(found.len(), 1);
    }
}

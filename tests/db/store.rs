//! Gateway-level tests against raw documents, independent of the typed
//! models.

#[path = "../common/mod.rs"]
mod common;

use common::*;

use serde_json::{json, Map, Value};
use storefront::db::store::{Collection, Direction};

fn fields(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {:?}", other),
    }
}

#[test]
fn test_insert_assigns_prefixed_id() {
    let conn = setup_test_db();

    let product_id = store::insert(
        &conn,
        Collection::Products,
        fields(json!({ "title": "Landing Kit" })),
    )
    .expect("insert failed");
    let order_id = store::insert(&conn, Collection::Orders, fields(json!({ "price": 10.0 })))
        .expect("insert failed");

    assert!(product_id.starts_with("sf_prod_"));
    assert!(order_id.starts_with("sf_ord_"));
    assert_ne!(
        store::insert(&conn, Collection::Products, Map::new()).unwrap(),
        product_id,
        "ids should never repeat"
    );
}

#[test]
fn test_get_by_id_missing_returns_none() {
    let conn = setup_test_db();

    let result = store::get_by_id(&conn, Collection::Products, "sf_prod_missing").unwrap();
    assert!(result.is_none());
}

#[test]
fn test_list_orders_by_field() {
    let conn = setup_test_db();

    for title in ["Beta", "Alpha", "Gamma"] {
        store::insert(
            &conn,
            Collection::Products,
            fields(json!({ "title": title })),
        )
        .unwrap();
    }

    let ascending = store::list(&conn, Collection::Products, "title", Direction::Asc).unwrap();
    let titles: Vec<&str> = ascending
        .iter()
        .map(|d| d.fields["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Alpha", "Beta", "Gamma"]);

    let descending = store::list(&conn, Collection::Products, "title", Direction::Desc).unwrap();
    let titles: Vec<&str> = descending
        .iter()
        .map(|d| d.fields["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Gamma", "Beta", "Alpha"]);
}

#[test]
fn test_list_empty_collection_returns_empty() {
    let conn = setup_test_db();

    let docs = store::list(&conn, Collection::SellRequests, "submission_date", Direction::Desc)
        .unwrap();
    assert!(docs.is_empty());
}

#[test]
fn test_collections_are_isolated() {
    let conn = setup_test_db();

    store::insert(&conn, Collection::Products, fields(json!({ "title": "X" }))).unwrap();

    let orders = store::list(&conn, Collection::Orders, "order_date", Direction::Desc).unwrap();
    assert!(orders.is_empty());
}

#[test]
fn test_upsert_merge_touches_only_supplied_fields() {
    let conn = setup_test_db();

    let id = store::insert(
        &conn,
        Collection::Products,
        fields(json!({ "title": "Landing Kit", "price": 100.0, "units_sold": 7 })),
    )
    .unwrap();

    store::upsert_merge(
        &conn,
        Collection::Products,
        &id,
        fields(json!({ "price": 80.0 })),
    )
    .unwrap();

    let doc = store::get_by_id(&conn, Collection::Products, &id)
        .unwrap()
        .expect("document should exist");
    assert_eq!(doc.fields["price"], json!(80.0));
    assert_eq!(doc.fields["title"], json!("Landing Kit"));
    assert_eq!(doc.fields["units_sold"], json!(7));
}

#[test]
fn test_upsert_merge_null_clears_field() {
    let conn = setup_test_db();

    let id = store::insert(
        &conn,
        Collection::Products,
        fields(json!({ "title": "Landing Kit", "discount": 0.2 })),
    )
    .unwrap();

    store::upsert_merge(
        &conn,
        Collection::Products,
        &id,
        fields(json!({ "discount": null })),
    )
    .unwrap();

    let doc = store::get_by_id(&conn, Collection::Products, &id)
        .unwrap()
        .expect("document should exist");
    assert!(!doc.fields.contains_key("discount"));
    assert_eq!(doc.fields["title"], json!("Landing Kit"));
}

#[test]
fn test_upsert_merge_creates_missing_record() {
    let conn = setup_test_db();

    store::upsert_merge(
        &conn,
        Collection::MyApps,
        "sf_app_adhoc",
        fields(json!({ "name": "Task Timer", "legacy": null })),
    )
    .unwrap();

    let doc = store::get_by_id(&conn, Collection::MyApps, "sf_app_adhoc")
        .unwrap()
        .expect("document should have been created");
    assert_eq!(doc.fields["name"], json!("Task Timer"));
    assert!(!doc.fields.contains_key("legacy"), "null fields are dropped");
}

#[test]
fn test_delete_is_idempotent() {
    let conn = setup_test_db();

    let id = store::insert(&conn, Collection::MyApps, fields(json!({ "name": "X" }))).unwrap();

    store::delete(&conn, Collection::MyApps, &id).unwrap();
    assert!(store::get_by_id(&conn, Collection::MyApps, &id).unwrap().is_none());

    // Deleting again, or deleting something that never existed, is fine.
    store::delete(&conn, Collection::MyApps, &id).unwrap();
    store::delete(&conn, Collection::MyApps, "sf_app_never_existed").unwrap();
}

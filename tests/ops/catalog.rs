#[path = "../common/mod.rs"]
mod common;

use common::*;

use serde_json::{json, Map, Value};
use storefront::db::store::Collection;

fn fields(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {:?}", other),
    }
}

#[test]
fn test_insert_applies_zero_defaults() {
    let conn = setup_test_db();
    let views = ViewTracker::new();

    let product = ops::save_product(&conn, &views, &full_save_product("Landing Kit", 100.0))
        .unwrap();

    assert!(product.id.starts_with("sf_prod_"));
    assert_eq!(product.units_sold, 0);
    assert_eq!(product.rating, 0.0);
    assert!(views.is_stale(View::AdminProducts));
    assert!(views.is_stale(View::PublicCatalog));
    assert!(views.is_stale(View::AdminDashboard));
}

#[test]
fn test_insert_reports_every_missing_field() {
    let conn = setup_test_db();
    let views = ViewTracker::new();

    let input = SaveProduct {
        id: None,
        title: Some("Landing Kit".to_string()),
        category: None,
        description: None,
        price: None,
        discount: None,
        image: None,
        live_preview_link: None,
    };

    let err = ops::save_product(&conn, &views, &input).unwrap_err();
    match err {
        AppError::Validation(fields) => {
            assert!(!fields.contains_key("title"));
            for field in ["category", "description", "price", "image", "live_preview_link"] {
                assert!(fields.contains_key(field), "missing field error for {}", field);
            }
        }
        other => panic!("expected validation error, got {:?}", other),
    }

    assert!(queries::list_products(&conn).unwrap().is_empty());
    assert!(!views.is_stale(View::AdminProducts));
}

#[test]
fn test_partial_update_leaves_other_fields_untouched() {
    let conn = setup_test_db();
    let views = ViewTracker::new();
    let product = create_test_product(&conn, "Landing Kit", 100.0, Some(0.2));

    // Simulate store-side activity on a field no upsert ever carries.
    store::upsert_merge(
        &conn,
        Collection::Products,
        &product.id,
        fields(json!({ "units_sold": 7 })),
    )
    .unwrap();

    let input = SaveProduct {
        id: Some(product.id.clone()),
        price: Some(49.0),
        title: None,
        category: None,
        description: None,
        discount: None,
        image: None,
        live_preview_link: None,
    };
    let updated = ops::save_product(&conn, &views, &input).unwrap();

    assert_eq!(updated.id, product.id, "update never changes the id");
    assert!((updated.price - 49.0).abs() < 1e-9);
    assert_eq!(updated.title, "Landing Kit");
    assert_eq!(updated.description, product.description);
    assert_eq!(updated.discount, Some(0.2));
    assert_eq!(updated.units_sold, 7, "merge must not clobber omitted fields");
}

#[test]
fn test_discount_boundary_values() {
    let conn = setup_test_db();
    let views = ViewTracker::new();

    let mut input = full_save_product("Free Kit", 100.0);
    input.discount = Some(1.0);
    let product = ops::save_product(&conn, &views, &input).unwrap();
    assert!((product.sale_price() - 0.0).abs() < 1e-9);

    let mut input = full_save_product("Overdone Kit", 100.0);
    input.discount = Some(1.01);
    let err = ops::save_product(&conn, &views, &input).unwrap_err();
    match err {
        AppError::Validation(fields) => assert!(fields.contains_key("discount")),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn test_unknown_category_is_a_field_error() {
    let conn = setup_test_db();
    let views = ViewTracker::new();

    let mut input = full_save_product("Gadget", 10.0);
    input.category = Some("Gadgets".to_string());

    let err = ops::save_product(&conn, &views, &input).unwrap_err();
    match err {
        AppError::Validation(fields) => assert!(fields.contains_key("category")),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn test_negative_price_rejected() {
    let conn = setup_test_db();
    let views = ViewTracker::new();

    let mut input = full_save_product("Refund Kit", 10.0);
    input.price = Some(-1.0);

    let err = ops::save_product(&conn, &views, &input).unwrap_err();
    match err {
        AppError::Validation(fields) => assert!(fields.contains_key("price")),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn test_delete_product_is_idempotent() {
    let conn = setup_test_db();
    let views = ViewTracker::new();
    let product = create_test_product(&conn, "Landing Kit", 100.0, None);

    ops::delete_product(&conn, &views, &product.id).unwrap();
    assert!(queries::get_product_by_id(&conn, &product.id).unwrap().is_none());

    ops::delete_product(&conn, &views, &product.id).unwrap();
    ops::delete_product(&conn, &views, "sf_prod_never_existed").unwrap();
}

#[test]
fn test_delete_product_keeps_existing_orders() {
    let conn = setup_test_db();
    let views = ViewTracker::new();
    let product = create_test_product(&conn, "Landing Kit", 100.0, None);
    let order = create_test_order(&conn, &product, OrderStatus::Completed, 1_700_000_000);

    ops::delete_product(&conn, &views, &product.id).unwrap();

    let reloaded = queries::get_order_by_id(&conn, &order.id).unwrap().unwrap();
    assert_eq!(reloaded.product_title, "Landing Kit");
    assert!((reloaded.price - 100.0).abs() < 1e-9);
}

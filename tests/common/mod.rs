//! Test utilities and fixtures for storefront integration tests

#![allow(dead_code)]

use axum::Router;
use chrono::{TimeZone, Utc};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::sync::Arc;

pub use storefront::db::{init_db, queries, store, AppState};
pub use storefront::error::AppError;
pub use storefront::models::*;
pub use storefront::ops;
pub use storefront::views::{View, ViewTracker};

use storefront::describe::TemplateGenerator;
use storefront::handlers;

pub const TEST_ADMIN_KEY: &str = "sf_key_test_0000000000000000000000000000";

/// Create an in-memory test database with schema initialized
pub fn setup_test_db() -> Connection {
    let conn = Connection::open_in_memory().expect("Failed to create in-memory database");
    init_db(&conn).expect("Failed to initialize schema");
    conn
}

/// Create a test product with the given price and discount
pub fn create_test_product(
    conn: &Connection,
    title: &str,
    price: f64,
    discount: Option<f64>,
) -> Product {
    queries::insert_product(
        conn,
        &NewProduct {
            title: title.to_string(),
            description: format!("{} description", title),
            price,
            discount,
            units_sold: 0,
            rating: 0.0,
            image: "https://cdn.example.com/test.png".to_string(),
            live_preview_link: "https://demo.example.com/test".to_string(),
            category: Category::Websites,
        },
    )
    .expect("Failed to create test product")
}

/// Create a test order directly through the store, bypassing the purchase
/// flow, with an explicit order date
pub fn create_test_order(
    conn: &Connection,
    product: &Product,
    status: OrderStatus,
    order_ts: i64,
) -> Order {
    queries::insert_order(
        conn,
        &NewOrder {
            product_id: product.id.clone(),
            product_title: product.title.clone(),
            price: product.sale_price(),
            customer_name: "Test Customer".to_string(),
            customer_email: "customer@example.com".to_string(),
            payment_id: "TXREF-1234567890".to_string(),
            order_date: Utc.timestamp_opt(order_ts, 0).unwrap(),
            status,
        },
    )
    .expect("Failed to create test order")
}

/// A purchase input that passes validation
pub fn valid_purchase(product_id: &str) -> PurchaseRequest {
    PurchaseRequest {
        product_id: product_id.to_string(),
        customer_name: "Ada Lovelace".to_string(),
        customer_email: "ada@example.com".to_string(),
        payment_id: "TX-1234567890".to_string(),
    }
}

/// A sell-request input that passes validation
pub fn valid_sell_request() -> SubmitSellRequest {
    SubmitSellRequest {
        product_name: "Inventory Tracker".to_string(),
        product_link: "https://apps.example.com/inventory-tracker".to_string(),
        price: 250.0,
        email: "seller@example.com".to_string(),
        phone: "+15550100".to_string(),
        message: "A polished inventory tool with an existing user base.".to_string(),
    }
}

/// A complete product upsert input for the insert path
pub fn full_save_product(title: &str, price: f64) -> SaveProduct {
    SaveProduct {
        id: None,
        title: Some(title.to_string()),
        category: Some("Websites".to_string()),
        description: Some(format!("{} description", title)),
        price: Some(price),
        discount: None,
        image: Some("https://cdn.example.com/test.png".to_string()),
        live_preview_link: Some("https://demo.example.com/test".to_string()),
    }
}

/// A complete app upsert input for the insert path
pub fn full_save_app(name: &str) -> SaveMyApp {
    SaveMyApp {
        id: None,
        name: Some(name.to_string()),
        image: Some("https://cdn.example.com/app.png".to_string()),
        install_link: Some("https://apps.example.com/install".to_string()),
    }
}

/// Create an AppState backed by a single shared in-memory connection
pub fn create_test_app_state() -> AppState {
    let manager = SqliteConnectionManager::memory();
    let pool = Pool::builder().max_size(1).build(manager).unwrap();
    {
        let conn = pool.get().unwrap();
        init_db(&conn).unwrap();
    }

    AppState {
        db: pool,
        views: Arc::new(ViewTracker::new()),
        admin_api_key: TEST_ADMIN_KEY.to_string(),
        describer: Arc::new(TemplateGenerator),
    }
}

/// Build the full router (public + admin) over a fresh test state
pub fn test_app() -> (Router, AppState) {
    let state = create_test_app_state();
    let app = Router::new()
        .merge(handlers::public::router())
        .merge(handlers::admin::router(state.clone()))
        .with_state(state.clone());
    (app, state)
}

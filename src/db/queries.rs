//! Typed access to the document-store collections.
//!
//! Each function targets exactly one collection and hides the document
//! conversion; listing order matches what the storefront and admin pages
//! display (products and apps alphabetical, orders and sell requests
//! newest first).

use rusqlite::Connection;
use serde::de::DeserializeOwned;

use crate::error::{AppError, Result};
use crate::models::{
    MyApp, NewMyApp, NewOrder, NewProduct, NewSellRequest, Order, OrderStatus, Product,
    SellRequest, SellRequestStatus,
};

use super::store::{self, Collection, Direction, Document, Patch};

fn list_records<T: DeserializeOwned>(
    conn: &Connection,
    collection: Collection,
    order_by: &str,
    direction: Direction,
) -> Result<Vec<T>> {
    store::list(conn, collection, order_by, direction)?
        .into_iter()
        .map(Document::into_record)
        .collect()
}

fn get_record<T: DeserializeOwned>(
    conn: &Connection,
    collection: Collection,
    id: &str,
) -> Result<Option<T>> {
    match store::get_by_id(conn, collection, id)? {
        Some(doc) => Ok(Some(doc.into_record()?)),
        None => Ok(None),
    }
}

/// Read a record back after a write. Absence at this point is a store
/// fault, not a caller error.
fn read_back<T: DeserializeOwned>(
    conn: &Connection,
    collection: Collection,
    id: &str,
) -> Result<T> {
    store::get_by_id(conn, collection, id)?
        .ok_or_else(|| {
            AppError::Internal(format!(
                "{} record {} missing after write",
                collection.as_str(),
                id
            ))
        })?
        .into_record()
}

// ============ Products ============

pub fn list_products(conn: &Connection) -> Result<Vec<Product>> {
    list_records(conn, Collection::Products, "title", Direction::Asc)
}

pub fn get_product_by_id(conn: &Connection, id: &str) -> Result<Option<Product>> {
    get_record(conn, Collection::Products, id)
}

pub fn insert_product(conn: &Connection, new: &NewProduct) -> Result<Product> {
    let id = store::insert(conn, Collection::Products, store::to_fields(new)?)?;
    read_back(conn, Collection::Products, &id)
}

pub fn merge_product(conn: &Connection, id: &str, patch: Patch) -> Result<()> {
    store::upsert_merge(conn, Collection::Products, id, patch.into_fields())
}

pub fn delete_product(conn: &Connection, id: &str) -> Result<()> {
    store::delete(conn, Collection::Products, id)
}

// ============ Orders ============

pub fn list_orders(conn: &Connection) -> Result<Vec<Order>> {
    list_records(conn, Collection::Orders, "order_date", Direction::Desc)
}

pub fn get_order_by_id(conn: &Connection, id: &str) -> Result<Option<Order>> {
    get_record(conn, Collection::Orders, id)
}

pub fn insert_order(conn: &Connection, new: &NewOrder) -> Result<Order> {
    let id = store::insert(conn, Collection::Orders, store::to_fields(new)?)?;
    read_back(conn, Collection::Orders, &id)
}

pub fn set_order_status(conn: &Connection, id: &str, status: OrderStatus) -> Result<()> {
    let patch = Patch::new().set("status", status.as_str());
    store::upsert_merge(conn, Collection::Orders, id, patch.into_fields())
}

// ============ Sell requests ============

pub fn list_sell_requests(conn: &Connection) -> Result<Vec<SellRequest>> {
    list_records(
        conn,
        Collection::SellRequests,
        "submission_date",
        Direction::Desc,
    )
}

pub fn get_sell_request_by_id(conn: &Connection, id: &str) -> Result<Option<SellRequest>> {
    get_record(conn, Collection::SellRequests, id)
}

pub fn insert_sell_request(conn: &Connection, new: &NewSellRequest) -> Result<SellRequest> {
    let id = store::insert(conn, Collection::SellRequests, store::to_fields(new)?)?;
    read_back(conn, Collection::SellRequests, &id)
}

pub fn set_sell_request_status(
    conn: &Connection,
    id: &str,
    status: SellRequestStatus,
) -> Result<()> {
    let patch = Patch::new().set("status", status.as_str());
    store::upsert_merge(conn, Collection::SellRequests, id, patch.into_fields())
}

// ============ My apps ============

pub fn list_my_apps(conn: &Connection) -> Result<Vec<MyApp>> {
    list_records(conn, Collection::MyApps, "name", Direction::Asc)
}

pub fn get_my_app_by_id(conn: &Connection, id: &str) -> Result<Option<MyApp>> {
    get_record(conn, Collection::MyApps, id)
}

pub fn insert_my_app(conn: &Connection, new: &NewMyApp) -> Result<MyApp> {
    let id = store::insert(conn, Collection::MyApps, store::to_fields(new)?)?;
    read_back(conn, Collection::MyApps, &id)
}

pub fn merge_my_app(conn: &Connection, id: &str, patch: Patch) -> Result<()> {
    store::upsert_merge(conn, Collection::MyApps, id, patch.into_fields())
}

pub fn delete_my_app(conn: &Connection, id: &str) -> Result<()> {
    store::delete(conn, Collection::MyApps, id)
}

use chrono::Utc;
use rusqlite::Connection;
use validator::Validate;

use crate::db::queries;
use crate::error::{msg, OptionExt, Result};
use crate::models::{NewOrder, Order, OrderStatus, PurchaseRequest};
use crate::views::{View, ViewTracker};

/// Create a Pending order for a product, snapshotting its discounted
/// price.
///
/// Validation and the product lookup both happen before any write. A
/// missing product is a not-found failure, distinct from the field-level
/// validation failure.
pub fn initiate_purchase(
    conn: &Connection,
    views: &ViewTracker,
    input: &PurchaseRequest,
) -> Result<Order> {
    input.validate()?;

    let product = queries::get_product_by_id(conn, &input.product_id)?
        .or_not_found(msg::PRODUCT_NOT_FOUND)?;
    let price = product.sale_price();

    let order = queries::insert_order(
        conn,
        &NewOrder {
            product_id: product.id,
            product_title: product.title,
            price,
            customer_name: input.customer_name.clone(),
            customer_email: input.customer_email.clone(),
            payment_id: input.payment_id.clone(),
            order_date: Utc::now(),
            status: OrderStatus::Pending,
        },
    )?;

    views.invalidate(&[View::AdminOrders, View::AdminDashboard]);
    Ok(order)
}

/// Unconditional status transition: any status may move to any of the
/// three, including re-setting the current value.
pub fn update_order_status(
    conn: &Connection,
    views: &ViewTracker,
    order_id: &str,
    status: OrderStatus,
) -> Result<Order> {
    queries::get_order_by_id(conn, order_id)?.or_not_found(msg::ORDER_NOT_FOUND)?;
    queries::set_order_status(conn, order_id, status)?;
    let order = queries::get_order_by_id(conn, order_id)?.or_not_found(msg::ORDER_NOT_FOUND)?;

    views.invalidate(&[View::AdminOrders, View::AdminDashboard]);
    Ok(order)
}

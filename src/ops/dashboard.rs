use rusqlite::Connection;
use serde::Serialize;

use crate::db::queries;
use crate::error::Result;
use crate::models::{Order, OrderStatus, Product};

/// Number of orders shown in the dashboard's recent-orders window.
const RECENT_ORDERS_LIMIT: usize = 5;

/// Read-time dashboard aggregation. Nothing here is stored or maintained
/// incrementally.
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    /// Revenue across Completed orders, priced from the *current* product
    /// records rather than the orders' own snapshots, so it moves
    /// retroactively when a product is edited. Orders whose product no
    /// longer exists contribute nothing.
    pub total_revenue: f64,
    pub product_count: usize,
    pub pending_orders: usize,
    pub recent_orders: Vec<Order>,
}

/// Fold the full product and order sets into the dashboard read model.
pub fn dashboard_stats(conn: &Connection) -> Result<DashboardStats> {
    let products = queries::list_products(conn)?;
    let orders = queries::list_orders(conn)?;

    let total_revenue = orders
        .iter()
        .filter(|o| o.status == OrderStatus::Completed)
        .filter_map(|o| products.iter().find(|p| p.id == o.product_id))
        .map(Product::sale_price)
        .sum();

    let pending_orders = orders
        .iter()
        .filter(|o| o.status == OrderStatus::Pending)
        .count();

    // list_orders returns newest first
    let recent_orders = orders.iter().take(RECENT_ORDERS_LIMIT).cloned().collect();

    Ok(DashboardStats {
        total_revenue,
        product_count: products.len(),
        pending_orders,
        recent_orders,
    })
}

//! Admin back office: dashboard, order and sell-request status management,
//! and catalog CRUD. Every route sits behind the bearer-key middleware.

use axum::{
    extract::{Extension, State},
    middleware::from_fn_with_state,
    routing::{delete, get, patch, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::db::{queries, AppState};
use crate::error::Result;
use crate::extractors::{Json, Path};
use crate::middleware::{admin_auth, AdminContext};
use crate::models::{
    Category, MyApp, Order, Product, SaveMyApp, SaveProduct, SellRequest, UpdateOrderStatus,
    UpdateSellRequestStatus,
};
use crate::ops;
use crate::ops::DashboardStats;

pub async fn dashboard(State(state): State<AppState>) -> Result<Json<DashboardStats>> {
    let conn = state.db.get()?;
    Ok(Json(ops::dashboard_stats(&conn)?))
}

// ============ Orders ============

pub async fn list_orders(State(state): State<AppState>) -> Result<Json<Vec<Order>>> {
    let conn = state.db.get()?;
    Ok(Json(queries::list_orders(&conn)?))
}

pub async fn update_order_status(
    State(state): State<AppState>,
    Extension(ctx): Extension<AdminContext>,
    Path(id): Path<String>,
    Json(input): Json<UpdateOrderStatus>,
) -> Result<Json<serde_json::Value>> {
    let conn = state.db.get()?;
    let order = ops::update_order_status(&conn, &state.views, &id, input.status)?;

    tracing::info!(
        "admin {} set order {} status to {}",
        ctx.key_prefix,
        order.id,
        order.status
    );
    Ok(Json(json!({ "success": true, "order": order })))
}

// ============ Products ============

pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let conn = state.db.get()?;
    Ok(Json(queries::list_products(&conn)?))
}

pub async fn save_product(
    State(state): State<AppState>,
    Extension(ctx): Extension<AdminContext>,
    Json(input): Json<SaveProduct>,
) -> Result<Json<serde_json::Value>> {
    let conn = state.db.get()?;
    let product = ops::save_product(&conn, &state.views, &input)?;

    tracing::info!("admin {} saved product {}", ctx.key_prefix, product.id);
    Ok(Json(json!({ "success": true, "product": product })))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Extension(ctx): Extension<AdminContext>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    let conn = state.db.get()?;
    ops::delete_product(&conn, &state.views, &id)?;

    tracing::info!("admin {} deleted product {}", ctx.key_prefix, id);
    Ok(Json(json!({ "success": true })))
}

// ============ Sell requests ============

pub async fn list_sell_requests(State(state): State<AppState>) -> Result<Json<Vec<SellRequest>>> {
    let conn = state.db.get()?;
    Ok(Json(queries::list_sell_requests(&conn)?))
}

pub async fn update_sell_request_status(
    State(state): State<AppState>,
    Extension(ctx): Extension<AdminContext>,
    Path(id): Path<String>,
    Json(input): Json<UpdateSellRequestStatus>,
) -> Result<Json<serde_json::Value>> {
    let conn = state.db.get()?;
    let request = ops::update_sell_request_status(&conn, &state.views, &id, input.status)?;

    tracing::info!(
        "admin {} set sell request {} status to {}",
        ctx.key_prefix,
        request.id,
        request.status
    );
    Ok(Json(json!({ "success": true, "request": request })))
}

// ============ Apps ============

pub async fn list_apps(State(state): State<AppState>) -> Result<Json<Vec<MyApp>>> {
    let conn = state.db.get()?;
    Ok(Json(queries::list_my_apps(&conn)?))
}

pub async fn save_app(
    State(state): State<AppState>,
    Extension(ctx): Extension<AdminContext>,
    Json(input): Json<SaveMyApp>,
) -> Result<Json<serde_json::Value>> {
    let conn = state.db.get()?;
    let app = ops::save_my_app(&conn, &state.views, &input)?;

    tracing::info!("admin {} saved app {}", ctx.key_prefix, app.id);
    Ok(Json(json!({ "success": true, "app": app })))
}

pub async fn delete_app(
    State(state): State<AppState>,
    Extension(ctx): Extension<AdminContext>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    let conn = state.db.get()?;
    ops::delete_my_app(&conn, &state.views, &id)?;

    tracing::info!("admin {} deleted app {}", ctx.key_prefix, id);
    Ok(Json(json!({ "success": true })))
}

// ============ Description generation ============

#[derive(Debug, Deserialize)]
pub struct DescribeRequest {
    pub title: String,
    pub category: Category,
}

pub async fn describe_product(
    State(state): State<AppState>,
    Json(input): Json<DescribeRequest>,
) -> Result<Json<serde_json::Value>> {
    let description = state.describer.generate(&input.title, input.category);
    Ok(Json(json!({ "description": description })))
}

// ============ View invalidation ============

/// Drain the stale-view set. The caller refetches each returned view.
pub async fn stale_views(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    let views: Vec<&'static str> = state.views.drain().iter().map(|v| v.as_str()).collect();
    Ok(Json(json!({ "views": views })))
}

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admin/dashboard", get(dashboard))
        .route("/admin/orders", get(list_orders))
        .route("/admin/orders/{id}/status", patch(update_order_status))
        .route("/admin/products", get(list_products))
        .route("/admin/products", post(save_product))
        .route("/admin/products/{id}", delete(delete_product))
        .route("/admin/sell-requests", get(list_sell_requests))
        .route(
            "/admin/sell-requests/{id}/status",
            patch(update_sell_request_status),
        )
        .route("/admin/apps", get(list_apps))
        .route("/admin/apps", post(save_app))
        .route("/admin/apps/{id}", delete(delete_app))
        .route("/admin/describe", post(describe_product))
        .route("/admin/views/stale", get(stale_views))
        .route_layer(from_fn_with_state(state, admin_auth))
}

//! Public endpoints: storefront catalog, checkout, sell-request
//! submission, and the app listing. No authentication.

use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::json;

use crate::db::{queries, AppState};
use crate::error::{msg, OptionExt, Result};
use crate::extractors::{Json, Path};
use crate::models::{MyApp, Product, PurchaseRequest, SubmitSellRequest};
use crate::ops;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let conn = state.db.get()?;
    Ok(Json(queries::list_products(&conn)?))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    let conn = state.db.get()?;
    let product =
        queries::get_product_by_id(&conn, &id)?.or_not_found(msg::PRODUCT_NOT_FOUND)?;
    Ok(Json(product))
}

pub async fn initiate_purchase(
    State(state): State<AppState>,
    Json(input): Json<PurchaseRequest>,
) -> Result<Json<serde_json::Value>> {
    let conn = state.db.get()?;
    let order = ops::initiate_purchase(&conn, &state.views, &input)?;
    Ok(Json(json!({ "success": true, "order_id": order.id })))
}

pub async fn submit_sell_request(
    State(state): State<AppState>,
    Json(input): Json<SubmitSellRequest>,
) -> Result<Json<serde_json::Value>> {
    let conn = state.db.get()?;
    let request = ops::submit_sell_request(&conn, &state.views, &input)?;
    Ok(Json(json!({
        "success": true,
        "message": msg::SELL_REQUEST_RECEIVED,
        "request_id": request.id,
    })))
}

pub async fn list_apps(State(state): State<AppState>) -> Result<Json<Vec<MyApp>>> {
    let conn = state.db.get()?;
    Ok(Json(queries::list_my_apps(&conn)?))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/products", get(list_products))
        .route("/products/{id}", get(get_product))
        .route("/orders", post(initiate_purchase))
        .route("/sell-requests", post(submit_sell_request))
        .route("/apps", get(list_apps))
}

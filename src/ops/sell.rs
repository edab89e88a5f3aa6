use chrono::Utc;
use rusqlite::Connection;
use validator::Validate;

use crate::db::queries;
use crate::error::{msg, OptionExt, Result};
use crate::models::{NewSellRequest, SellRequest, SellRequestStatus, SubmitSellRequest};
use crate::views::{View, ViewTracker};

/// Persist a public "sell your product" submission as Pending.
pub fn submit_sell_request(
    conn: &Connection,
    views: &ViewTracker,
    input: &SubmitSellRequest,
) -> Result<SellRequest> {
    input.validate()?;

    let request = queries::insert_sell_request(
        conn,
        &NewSellRequest {
            product_name: input.product_name.clone(),
            product_link: input.product_link.clone(),
            price: input.price,
            email: input.email.clone(),
            phone: input.phone.clone(),
            message: input.message.clone(),
            submission_date: Utc::now(),
            status: SellRequestStatus::Pending,
        },
    )?;

    views.invalidate(&[View::AdminSellRequests]);
    Ok(request)
}

/// Unconditional status transition, same no-guard policy as orders.
pub fn update_sell_request_status(
    conn: &Connection,
    views: &ViewTracker,
    request_id: &str,
    status: SellRequestStatus,
) -> Result<SellRequest> {
    queries::get_sell_request_by_id(conn, request_id)?
        .or_not_found(msg::SELL_REQUEST_NOT_FOUND)?;
    queries::set_sell_request_status(conn, request_id, status)?;
    let request = queries::get_sell_request_by_id(conn, request_id)?
        .or_not_found(msg::SELL_REQUEST_NOT_FOUND)?;

    views.invalidate(&[View::AdminSellRequests]);
    Ok(request)
}

//! Admin authentication boundary.
//!
//! The identity check happens here, once, at the edge; handlers receive an
//! explicit `AdminContext` extension instead of reading ambient state, and
//! the domain operations themselves perform no authorization.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::db::AppState;

/// Identity handed to admin handlers once the bearer check has passed.
#[derive(Debug, Clone)]
pub struct AdminContext {
    /// Prefix of the presented key, for log correlation.
    pub key_prefix: String,
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

pub async fn admin_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(token) = extract_bearer_token(request.headers()) else {
        return Err(StatusCode::UNAUTHORIZED);
    };
    if token != state.admin_api_key {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let key_prefix = token.chars().take(10).collect();
    request
        .extensions_mut()
        .insert(AdminContext { key_prefix });
    Ok(next.run(request).await)
}

use axum::{body::Bytes, extract::State};
use serde_json::{Map, Value};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, PathParam, SessionToken};
use crate::proxy::input::parse_json_body;
use crate::proxy::ProxyRequest;

/// GET /api/merchant/tables - Dining tables of the merchant
pub async fn tables_get(State(state): State<AppState>, session: SessionToken) -> ApiResult<Option<Value>> {
    const OPERATION: &str = "Fetch tables";
    let token = session.require()?;

    let data = state
        .proxy
        .execute(ProxyRequest::get(OPERATION, "/merchant/tables").bearer(&token))
        .await?;

    Ok(ApiResponse::success(data))
}

/// PUT /api/merchant/tables/:id - Update one table
///
/// The body is a non-empty JSON object of the fields to change
/// (`tableNumber`, `capacity`, ...), forwarded unchanged.
pub async fn table_put(
    State(state): State<AppState>,
    session: SessionToken,
    PathParam(table_id): PathParam<String>,
    body: Bytes,
) -> ApiResult<Option<Value>> {
    const OPERATION: &str = "Update table";

    if table_id.trim().is_empty() {
        return Err(ApiError::missing_field("tableId"));
    }
    let changes: Map<String, Value> = parse_json_body(OPERATION, &body)?;
    if changes.is_empty() {
        return Err(ApiError::validation("At least one table field is required"));
    }
    let token = session.require()?;

    let data = state
        .proxy
        .execute(
            ProxyRequest::put(OPERATION, "/merchant/tables")
                .segment(table_id.trim())
                .bearer(&token)
                .json(Value::Object(changes)),
        )
        .await?;

    Ok(ApiResponse::success(data))
}

// handlers/public/auth/check_id.rs - GET /api/auth/check-id handler

use axum::extract::State;
use serde_json::Value;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, QueryParams};
use crate::proxy::input::require_field;
use crate::proxy::ProxyRequest;
use crate::types::{AccountAvailability, CheckIdQuery};

const OPERATION: &str = "Check account id";

/// GET /api/auth/check-id?accountId=... - Is this account id still free?
///
/// Read-only: asking twice without a registration in between gives the same
/// answer. Responds `{ "success": true, "data": { "available": bool } }`.
pub async fn check_id_get(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<CheckIdQuery>,
) -> ApiResult<AccountAvailability> {
    let account_id = require_field(&query.account_id, "accountId")?;

    let data: Option<Value> = state
        .proxy
        .execute(
            ProxyRequest::get(OPERATION, "/auth/checkAccountId")
                .query([("accountId", account_id)]),
        )
        .await?;

    let availability = AccountAvailability::from_backend(data.as_ref())
        .ok_or_else(|| ApiError::unexpected(OPERATION, "backend did not report availability"))?;

    Ok(ApiResponse::success(availability))
}

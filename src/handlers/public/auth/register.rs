// handlers/public/auth/register.rs - POST /api/auth/signup handler

use axum::{body::Bytes, extract::State};
use serde_json::Value;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::proxy::input::{parse_json_body, require_field};
use crate::proxy::ProxyRequest;
use crate::types::SignupRequest;

const OPERATION: &str = "Signup";

/// POST /api/auth/signup - Register a merchant account
///
/// Expected Input:
/// ```json
/// {
///   "accountId": "string",       // Required
///   "password": "string",        // Required
///   "businessNumber": "string",  // Required: from the OCR step
///   "storeName": "string",       // Required
///   "ownerName": "string",       // Required
///   "...": "any other field is forwarded as-is"
/// }
/// ```
///
/// Error Responses:
/// - 400: a required field is missing
/// - 409 (from the backend): account id already taken
pub async fn register_post(State(state): State<AppState>, body: Bytes) -> ApiResult<Option<Value>> {
    let request: SignupRequest = parse_json_body(OPERATION, &body)?;

    let required = [
        &request.account_id,
        &request.password,
        &request.business_number,
        &request.store_name,
        &request.owner_name,
    ];
    for (value, name) in required.into_iter().zip(SignupRequest::REQUIRED) {
        require_field(value, name)?;
    }

    let payload = serde_json::to_value(&request).map_err(|e| ApiError::unexpected(OPERATION, e))?;

    let data = state
        .proxy
        .execute(ProxyRequest::post(OPERATION, "/auth/register").json(payload))
        .await?;

    Ok(ApiResponse::success(data))
}

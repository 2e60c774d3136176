// handlers/public/auth/login.rs - POST /api/auth/login handler

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::{session_cookie, ApiResponse};
use crate::proxy::input::{parse_json_body, require_field};
use crate::proxy::{AuthToken, ProxyRequest};
use crate::types::LoginRequest;

const OPERATION: &str = "Login";

/// POST /api/auth/login - Exchange credentials for a backend token
///
/// Expected Input:
/// ```json
/// { "accountId": "string", "password": "string" }
/// ```
///
/// Expected Output (Success):
/// ```json
/// { "success": true, "data": { "accessToken": "...", "tokenType": "Bearer" } }
/// ```
///
/// On success the token is also stored in the auth cookie so later dashboard
/// calls are authenticated.
pub async fn login_post(State(state): State<AppState>, body: Bytes) -> Result<Response, ApiError> {
    let request: LoginRequest = parse_json_body(OPERATION, &body)?;
    let account_id = require_field(&request.account_id, "accountId")?;
    let password = require_field(&request.password, "password")?;

    let data: Option<Value> = state
        .proxy
        .execute(
            ProxyRequest::post(OPERATION, "/auth/login")
                .json(json!({ "accountId": account_id, "password": password })),
        )
        .await?;

    let token = data
        .as_ref()
        .and_then(|d| d.get("accessToken"))
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .map(AuthToken::new);

    tracing::info!("Login succeeded for account '{}'", account_id);

    let mut response = ApiResponse::success(data).into_response();
    if let Some(token) = token {
        let auth = &state.config.auth;
        match HeaderValue::from_str(&session_cookie(&auth.cookie_name, &token, auth.secure_cookie)) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => tracing::warn!("{}: token is not a valid cookie value: {}", OPERATION, e),
        }
    }

    Ok(response)
}

// handlers/public/auth/logout.rs - POST /api/auth/logout handler

use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::app::AppState;
use crate::middleware::{expired_session_cookie, ApiResponse};

/// POST /api/auth/logout - Drop the auth cookie
///
/// Purely local: the backend owns token lifetime, so nothing is sent upstream.
pub async fn logout_post(State(state): State<AppState>) -> Response {
    let auth = &state.config.auth;
    let mut response = ApiResponse::success(Value::Null)
        .with_message("Logged out")
        .into_response();

    if let Ok(value) = HeaderValue::from_str(&expired_session_cookie(&auth.cookie_name, auth.secure_cookie)) {
        response.headers_mut().append(header::SET_COOKIE, value);
    }

    response
}

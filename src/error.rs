// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

/// Every way a gateway route can fail, each mapped to a status code and a
/// single client-facing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    // 400 Bad Request - required input missing or malformed, detected locally
    ValidationError(String),

    // 401 Unauthorized - auth cookie absent on a protected route
    Unauthenticated(String),

    // Backend answered with a non-2xx status; the status is passed through verbatim
    Upstream { status: u16, message: String },

    // 504 Gateway Timeout - backend did not answer within the deadline
    UpstreamTimeout(String),

    // 500 Internal Server Error - network failures, unparsable success bodies
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::ValidationError(_) => 400,
            ApiError::Unauthenticated(_) => 401,
            ApiError::Upstream { status, .. } => *status,
            ApiError::UpstreamTimeout(_) => 504,
            ApiError::Internal(_) => 500,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::ValidationError(msg) => msg,
            ApiError::Unauthenticated(msg) => msg,
            ApiError::Upstream { message, .. } => message,
            ApiError::UpstreamTimeout(msg) => msg,
            ApiError::Internal(msg) => msg,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::ValidationError(_) => "VALIDATION_ERROR",
            ApiError::Unauthenticated(_) => "UNAUTHENTICATED",
            ApiError::Upstream { .. } => "UPSTREAM_ERROR",
            ApiError::UpstreamTimeout(_) => "UPSTREAM_TIMEOUT",
            ApiError::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "success": false,
            "message": self.message(),
            "code": self.error_code()
        })
    }
}

// Static constructor methods
impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::ValidationError(message.into())
    }

    /// A required field was missing or blank
    pub fn missing_field(field: &str) -> Self {
        ApiError::ValidationError(format!("{} is required", field))
    }

    pub fn unauthenticated() -> Self {
        ApiError::Unauthenticated("Authentication required".to_string())
    }

    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        ApiError::Upstream {
            status,
            message: message.into(),
        }
    }

    pub fn timeout(operation: &str) -> Self {
        ApiError::UpstreamTimeout(format!("{} timed out", operation))
    }

    /// Catch-all for anything unexpected during `operation`
    pub fn unexpected(operation: &str, err: impl std::fmt::Display) -> Self {
        ApiError::Internal(format!("{} error: {}", operation, err))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

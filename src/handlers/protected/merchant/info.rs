use axum::extract::State;
use serde_json::Value;

use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult, SessionToken};
use crate::proxy::ProxyRequest;

const OPERATION: &str = "Fetch merchant info";

/// GET /api/merchant/info - Profile of the logged-in merchant
pub async fn info_get(State(state): State<AppState>, session: SessionToken) -> ApiResult<Option<Value>> {
    let token = session.require()?;

    let data = state
        .proxy
        .execute(ProxyRequest::get(OPERATION, "/merchant/info").bearer(&token))
        .await?;

    Ok(ApiResponse::success(data))
}

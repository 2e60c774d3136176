// handlers/protected/dashboard/mod.rs - Paginated dashboard views
//
// Both routes accept `page` (default "0"), `size` (default "20") and `sort`
// ("field,direction") and pass them straight to the backend.

use axum::extract::State;
use serde_json::Value;

use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult, QueryParams, SessionToken};
use crate::proxy::{Page, PageQuery, ProxyRequest};

pub const LOGIN_HISTORY_SORT: &str = "loginAt,desc";
pub const ORDERS_SORT: &str = "createdAt,desc";

/// GET /api/dashboard/login-history - Recent logins of the merchant account
pub async fn login_history_get(
    State(state): State<AppState>,
    session: SessionToken,
    QueryParams(query): QueryParams<PageQuery>,
) -> ApiResult<Option<Page<Value>>> {
    fetch_page(&state, session, &query, "Fetch login history", "/auth/login/history", LOGIN_HISTORY_SORT).await
}

/// GET /api/dashboard/orders - Order list for the sales view
pub async fn orders_get(
    State(state): State<AppState>,
    session: SessionToken,
    QueryParams(query): QueryParams<PageQuery>,
) -> ApiResult<Option<Page<Value>>> {
    fetch_page(&state, session, &query, "Fetch orders", "/merchant/orders", ORDERS_SORT).await
}

async fn fetch_page(
    state: &AppState,
    session: SessionToken,
    query: &PageQuery,
    operation: &'static str,
    path: &str,
    default_sort: &str,
) -> ApiResult<Option<Page<Value>>> {
    let token = session.require()?;

    let page = state
        .proxy
        .execute::<Page<Value>>(
            ProxyRequest::get(operation, path)
                .bearer(&token)
                .query(query.resolve(default_sort)),
        )
        .await?;

    Ok(ApiResponse::success(page))
}

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::app::AppState;
use crate::proxy::auth_token;

/// Page-navigation guard.
///
/// Browser navigations to the dashboard without the auth cookie are sent to
/// the login page with a `redirect` parameter pointing back; navigations to
/// the login page with the cookie are sent to the dashboard. API routes are
/// left alone since they answer 401 themselves.
pub async fn navigation_guard(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path();
    if path == "/api" || path.starts_with("/api/") {
        return next.run(request).await;
    }

    let auth = &state.config.auth;
    let authenticated = auth_token(request.headers(), &auth.cookie_name).is_some();

    if !authenticated && is_under(path, &auth.dashboard_path) {
        let original = request
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or(path);
        let target = format!(
            "{}?redirect={}",
            auth.login_path,
            url::form_urlencoded::byte_serialize(original.as_bytes()).collect::<String>()
        );
        tracing::debug!("Redirecting unauthenticated navigation {} to {}", original, target);
        return Redirect::temporary(&target).into_response();
    }

    if authenticated && path == auth.login_path {
        return Redirect::temporary(&auth.dashboard_path).into_response();
    }

    next.run(request).await
}

fn is_under(path: &str, prefix: &str) -> bool {
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

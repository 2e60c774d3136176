use std::sync::Arc;

use axum::{
    http::{HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Json},
    routing::{get, post, put},
    Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::{AppConfig, ConfigError};
use crate::handlers;
use crate::middleware::navigation_guard;
use crate::proxy::BackendProxy;

/// Shared, read-only state handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub proxy: BackendProxy,
}

impl AppState {
    /// Validate the configuration and build the backend client once
    pub fn new(config: AppConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let proxy = BackendProxy::from_config(&config)?;
        Ok(Self {
            config: Arc::new(config),
            proxy,
        })
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_routes())
        // Protected
        .merge(merchant_routes())
        .merge(dashboard_routes())
        .fallback(not_found)
        // Global middleware
        .layer(middleware::from_fn_with_state(state.clone(), navigation_guard))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&state.config)),
        )
        .with_state(state)
}

/// Serve the gateway on an already-bound listener
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    axum::serve(listener, app(state)).await
}

fn auth_routes() -> Router<AppState> {
    use handlers::public::auth;

    Router::new()
        .route("/api/auth/login", post(auth::login_post))
        .route("/api/auth/signup", post(auth::register_post))
        .route("/api/auth/ocr", post(auth::ocr_post))
        .route("/api/auth/check-id", get(auth::check_id_get))
        .route("/api/auth/logout", post(auth::logout_post))
}

fn merchant_routes() -> Router<AppState> {
    use handlers::protected::merchant;

    Router::new()
        .route("/api/merchant/info", get(merchant::info_get))
        .route("/api/merchant/image", post(merchant::image_post))
        .route("/api/merchant/tables", get(merchant::tables_get))
        .route("/api/merchant/tables/:id", put(merchant::table_put))
        .route("/api/merchant/qr", get(merchant::qr_get).post(merchant::qr_post))
}

fn dashboard_routes() -> Router<AppState> {
    use handlers::protected::dashboard;

    Router::new()
        .route("/api/dashboard/login-history", get(dashboard::login_history_get))
        .route("/api/dashboard/orders", get(dashboard::orders_get))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    if !config.security.enable_cors {
        return CorsLayer::new();
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
        ])
        .allow_headers([axum::http::header::CONTENT_TYPE])
        .allow_credentials(true)
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Merchant Dashboard API",
            "version": version,
            "description": "Gateway between the merchant dashboard and the merchant backend",
            "endpoints": {
                "auth": "/api/auth/login, /api/auth/signup, /api/auth/ocr, /api/auth/check-id, /api/auth/logout (public)",
                "merchant": "/api/merchant/info, /api/merchant/image, /api/merchant/tables[/:id], /api/merchant/qr (auth cookie)",
                "dashboard": "/api/dashboard/login-history, /api/dashboard/orders (auth cookie)",
                "health": "/health (public)",
            }
        }
    }))
}

/// Liveness only: the backend is not contacted
async fn health() -> impl IntoResponse {
    let now = chrono::Utc::now();

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": {
                "status": "ok",
                "timestamp": now,
            }
        })),
    )
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "message": "Not found",
            "code": "NOT_FOUND"
        })),
    )
}

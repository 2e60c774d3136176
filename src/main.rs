use anyhow::Context;
use merchant_dashboard_api::{config::AppConfig, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up BACKEND_API_URL, AUTH_COOKIE_NAME, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Built once here and threaded through AppState; handlers never read the environment
    let config = AppConfig::from_env();
    tracing::info!(
        "Starting Merchant Dashboard API in {:?} mode, backend {}",
        config.environment,
        config.backend.base_url
    );

    let bind_addr = format!("{}:{}", config.server.bind_address, config.server.port);
    let state = AppState::new(config).context("invalid configuration")?;

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Merchant Dashboard API listening on http://{}", bind_addr);

    merchant_dashboard_api::serve(listener, state).await.context("server")?;
    Ok(())
}

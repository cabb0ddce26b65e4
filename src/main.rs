use hubspot_middleware::{app, config, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up HUBSPOT_TOKEN, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::config().clone();
    tracing::info!("Starting HubSpot middleware in {:?} mode", config.environment);
    tracing::info!("HubSpot base URL: {}", config.hubspot.base_url);

    if config.hubspot.token.is_empty() {
        tracing::warn!("HUBSPOT_TOKEN is not set; every HubSpot call will be rejected upstream");
    }
    if !config.security.require_auth {
        tracing::warn!("Bearer token verification is disabled (AUTH_REQUIRED=false)");
    } else if config.security.jwt_secret.is_none() {
        tracing::error!("JWT_SECRET is not set; every /api request will fail until it is configured");
    }

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let state = AppState::from_config(config)?;

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await?;
    Ok(())
}

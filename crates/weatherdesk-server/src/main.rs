mod auth;
mod config;
mod error;
mod models;
mod routes;
mod services;
mod store;
mod views;

use anyhow::Context;
use config::Config;
use routes::{create_router, AppState};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file (from repo root)
    dotenvy::from_filename("../../.env").ok();
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("weatherdesk_server=debug,tower_http=debug")),
        )
        .init();

    let config = Config::from_env()?;
    let port = config.server_port;

    if config.weather_api_key.is_none() {
        tracing::warn!("WEATHER_API_KEY not set, weather lookups will be rejected");
    }
    match (&config.google_cloud_project, &config.firestore_credentials_file) {
        (Some(project), Some(path)) => {
            tracing::info!("Document store configured for project {project} (credentials at {path})");
        }
        (Some(project), None) => {
            tracing::info!("Document store configured for project {project} (default credentials)");
        }
        _ => tracing::debug!("No document store configured"),
    }
    tracing::info!(
        "Sessions {}",
        if config.sessions_enabled { "enabled" } else { "disabled" }
    );

    let state = AppState::new(config);
    let app = create_router(state).layer(TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{port}");
    tracing::info!("weatherdesk-server listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    axum::serve(listener, app).await.context("Server failed")?;
    Ok(())
}

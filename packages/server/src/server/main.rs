// Main entry point for the SATYA-VERIFY API server

use anyhow::{Context, Result};
use server_core::{kernel::ServerDeps, server::build_app, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,verification=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting SATYA-VERIFY API");

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        port = config.port,
        model = %config.openai_model,
        pacing_ms = config.pacing_ms,
        "Configuration loaded"
    );

    let deps = ServerDeps::from_config(&config).context("Failed to build server dependencies")?;
    let app = build_app(deps, &config.cors_origins);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

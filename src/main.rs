use anyhow::Context;
use tracing_subscriber::EnvFilter;

use devteams_api::auth::TokenIssuer;
use devteams_api::config::AppConfig;
use devteams_api::database::open_store;
use devteams_api::{app, AppState};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        tracing::error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_KEY, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("devteams_api=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::load().context("loading configuration")?;
    tracing::info!("Starting DevTeams API in {:?} mode", config.environment);

    let tokens = TokenIssuer::from_config(&config.security).context("configuring token issuer")?;
    let store = open_store(&config.database)
        .await
        .context("opening data store")?;

    let bind_addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("DevTeams API listening on http://{}", bind_addr);

    axum::serve(listener, app(AppState::new(store, tokens)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

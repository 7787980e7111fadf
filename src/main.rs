mod app;
mod config;
mod errors;
mod extract;
mod handlers;
mod middleware;
mod models;
mod services;

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use crate::{
    app::AppState,
    config::{Config, DEV_SECRET_KEY},
    services::DbService,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if config.auth.secret_key == DEV_SECRET_KEY {
        tracing::warn!("Using the built-in development secret key, set APP_AUTH__SECRET_KEY");
    }

    // Open the database pool and create tables
    let db = DbService::open(&config.database).context("Failed to open database")?;
    let state = AppState::new(db, &config.auth).context("Failed to initialize auth")?;

    let app = app::build_router(state, &config.server);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind server on {}", addr))?;

    tracing::info!("Server running on {}", addr);
    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}

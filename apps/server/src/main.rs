//! # Bookstore POS API Server
//!
//! HTTP backend for the school bookstore point of sale.
//!
//! ## Architecture
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                      API Server                            │
//! │                                                            │
//! │  POS Till ───► HTTP (3000) ───► Routes ───► SQLite         │
//! │  Dashboard ──►                  (axum)      (sqlx pool)    │
//! └────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bookpos_db::{Database, DbConfig};
use bookpos_server::config::ServerConfig;
use bookpos_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("starting bookstore POS API server");

    let config = ServerConfig::load().context("failed to load configuration")?;
    info!(
        port = config.http_port,
        database = %config.database_path,
        policy = ?config.rfid_conflict_policy,
        "configuration loaded"
    );

    if let Some(parent) = std::path::Path::new(&config.database_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }

    let db = Database::new(DbConfig::new(&config.database_path))
        .await
        .context("failed to open database")?;
    info!("database ready, migrations applied");

    let state = AppState::new(db, config.rfid_conflict_policy);
    let app = bookpos_server::app(state);

    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "listening");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

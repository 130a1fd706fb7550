//! qr-ledger server entry point.
//!
//! Connects to PostgreSQL, ensures the schema, and serves the record
//! endpoints over HTTP.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use qr_ledger::api;
use qr_ledger::app_state::AppState;
use qr_ledger::config::ServerConfig;
use qr_ledger::persistence::PostgresStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    // Load configuration
    let config = ServerConfig::from_env().context("invalid configuration")?;
    tracing::info!(addr = %config.listen_addr, "starting qr-ledger");

    // Connect storage; any failure here ends the process
    let store = PostgresStore::connect(&config.database)
        .await
        .with_context(|| {
            format!(
                "failed to connect to database {}",
                config.database.redacted_target()
            )
        })?;
    tracing::info!(database = %config.database.redacted_target(), "database ready");

    // Build application
    let app = api::app(AppState::new(Arc::new(store)));

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Installs the global subscriber. `RUST_LOG` selects the filter
/// (default `info`); `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match std::env::var("LOG_FORMAT").ok().as_deref() {
        Some("json") | Some("JSON") => builder.json().init(),
        _ => builder.init(),
    }
}

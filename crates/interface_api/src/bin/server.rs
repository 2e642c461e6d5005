//! Studio Portal - Billing API Server Binary
//!
//! This binary starts the HTTP API server for the billing system.
//!
//! # Usage
//!
//! ```bash
//! # Defaults
//! cargo run --bin portal-api
//!
//! # Overriding through the environment
//! PORTAL_HOST=0.0.0.0 PORTAL_PORT=8080 DATABASE_URL=postgres://... cargo run --bin portal-api
//! ```
//!
//! # Environment
//!
//! * `PORTAL_HOST` - Server host (default: 0.0.0.0)
//! * `PORTAL_PORT` - Server port (default: 8080)
//! * `PORTAL_DATABASE_URL` / `DATABASE_URL` - PostgreSQL connection string
//! * `PORTAL_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `PORTAL_INVOICE_PREFIX` - Prefix for invoice numbers (default: SP)
//! * `PORTAL_TIMEZONE` - IANA name of the billing timezone (default: Asia/Kolkata)
//! * `PORTAL_DAY_CUTOFF` - Local time the working day starts, HH:MM:SS (default: 10:00:00)
//! * `PORTAL_IGST_RATE` - IGST fraction applied to domestic clients (default: 0.18)

use anyhow::Context;
use infra_db::{create_pool, DatabaseConfig};
use interface_api::{config::ApiConfig, create_router};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional; deployments set the environment directly
    dotenvy::dotenv().ok();

    let config = load_config();

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "Starting Studio Portal billing API server"
    );

    let pool = create_pool(DatabaseConfig::new(config.database_url.clone()))
        .await
        .context("Failed to connect to the database")?;

    // Verify connectivity before accepting traffic
    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .context("Database connectivity check failed")?;

    let app = create_router(pool, config.clone());

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .context("Invalid server address")?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind server address")?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Builds the runtime configuration.
///
/// Tries the PORTAL_-prefixed environment first; when that does not
/// deserialize, falls back to individual variables over the defaults.
fn load_config() -> ApiConfig {
    ApiConfig::from_env().unwrap_or_else(|_| {
        let defaults = ApiConfig::default();
        ApiConfig {
            host: std::env::var("PORTAL_HOST").unwrap_or(defaults.host),
            port: std::env::var("PORTAL_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            database_url: std::env::var("DATABASE_URL")
                .or_else(|_| std::env::var("PORTAL_DATABASE_URL"))
                .unwrap_or(defaults.database_url),
            log_level: std::env::var("PORTAL_LOG_LEVEL")
                .or_else(|_| std::env::var("RUST_LOG"))
                .unwrap_or(defaults.log_level),
            invoice_prefix: std::env::var("PORTAL_INVOICE_PREFIX")
                .unwrap_or(defaults.invoice_prefix),
            timezone: std::env::var("PORTAL_TIMEZONE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.timezone),
            day_cutoff: std::env::var("PORTAL_DAY_CUTOFF")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.day_cutoff),
            igst_rate: std::env::var("PORTAL_IGST_RATE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.igst_rate),
        }
    })
}

/// Wires the fmt subscriber behind an env filter; RUST_LOG wins over config.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Resolves when Ctrl+C or SIGTERM arrives, letting in-flight requests
/// finish before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

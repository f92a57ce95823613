//! Sales Insight - API Server Binary
//!
//! Starts the HTTP API server for the sales insight dashboards.
//!
//! # Usage
//!
//! ```bash
//! # Run against the built-in sample ledger
//! cargo run --bin sales-insight-api
//!
//! # Run against a JSON ledger fixture
//! API_LEDGER_PATH=./ledger.json cargo run --bin sales-insight-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_CURRENCY` - Ledger currency code (default: USD)
//! * `API_LEDGER_PATH` - JSON ledger fixture path (built-in sample when unset)
//! * `API_VIEW_CACHE_CAPACITY` - Max memoized panel responses (default: 256)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)

use interface_api::{
    config::ApiConfig,
    create_router,
    source::FixtureLedgerSource,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = load_config();

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        currency = %config.currency,
        "Starting Sales Insight API Server"
    );

    let source = match &config.ledger_path {
        Some(path) => {
            tracing::info!(%path, "Serving ledger fixture from file");
            Arc::new(FixtureLedgerSource::from_path(path))
        }
        None => {
            tracing::info!("No ledger path configured, serving built-in sample");
            Arc::new(FixtureLedgerSource::sample())
        }
    };

    let app = create_router(source, config.clone());

    let addr: SocketAddr = config.server_addr().parse()?;
    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Loads API configuration from environment variables.
///
/// Falls back to individual env vars or defaults when the prefixed source
/// cannot be deserialized as a whole.
fn load_config() -> ApiConfig {
    ApiConfig::from_env().unwrap_or_else(|_| {
        let defaults = ApiConfig::default();
        ApiConfig {
            host: std::env::var("API_HOST").unwrap_or(defaults.host),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            currency: std::env::var("API_CURRENCY")
                .ok()
                .and_then(|c| serde_json::from_value(serde_json::Value::String(c)).ok())
                .unwrap_or(defaults.currency),
            ledger_path: std::env::var("API_LEDGER_PATH").ok(),
            view_cache_capacity: std::env::var("API_VIEW_CACHE_CAPACITY")
                .ok()
                .and_then(|c| c.parse().ok())
                .unwrap_or(defaults.view_cache_capacity),
            log_level: std::env::var("API_LOG_LEVEL")
                .or_else(|_| std::env::var("RUST_LOG"))
                .unwrap_or(defaults.log_level),
        }
    })
}

/// Initializes the tracing subscriber for structured logging.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// This enables graceful shutdown of the server, allowing in-flight
/// requests to complete before the process exits.
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

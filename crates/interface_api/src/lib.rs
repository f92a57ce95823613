//! HTTP API Layer
//!
//! This crate serves the aggregated dashboard views over REST using Axum.
//!
//! # Architecture
//!
//! - **Source**: boundary trait fetching raw ledger payloads
//! - **Handlers**: one request handler per dashboard panel
//! - **DTOs**: response shapes matching the dashboard frontend
//! - **Cache**: memoized panel responses keyed by snapshot version
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, config::ApiConfig, source::FixtureLedgerSource};
//!
//! let source = std::sync::Arc::new(FixtureLedgerSource::sample());
//! let app = create_router(source, ApiConfig::default());
//! axum::serve(listener, app).await?;
//! ```

pub mod cache;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod source;

use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use core_kernel::DateRange;
use domain_analytics::{normalize, NormalizedLedger};

use crate::cache::ViewCache;
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::handlers::{clients, dashboard, forecast, funds, health, sales};
use crate::source::LedgerSource;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn LedgerSource>,
    pub config: ApiConfig,
    pub views: ViewCache,
    current: Arc<RwLock<Option<Arc<NormalizedLedger>>>>,
}

impl AppState {
    pub fn new(source: Arc<dyn LedgerSource>, config: ApiConfig) -> Self {
        let views = ViewCache::new(config.view_cache_capacity);
        Self {
            source,
            config,
            views,
            current: Arc::new(RwLock::new(None)),
        }
    }

    /// Returns the normalized ledger, fetching and normalizing on demand
    ///
    /// The unscoped snapshot is built once and reused so panel responses
    /// can be memoized against its version. A date-scoped request always
    /// builds a fresh snapshot.
    pub async fn ledger(&self, scope: Option<DateRange>) -> Result<Arc<NormalizedLedger>, ApiError> {
        if scope.is_none() {
            if let Some(ledger) = self.current.read().await.as_ref() {
                return Ok(ledger.clone());
            }
        }

        let raw = self.source.fetch_ledger().await?;
        let references = self.source.fetch_references().await?;
        let normalized = Arc::new(normalize(
            &raw,
            &references,
            self.config.currency,
            scope,
        )?);

        if scope.is_none() {
            *self.current.write().await = Some(normalized.clone());
        }
        Ok(normalized)
    }
}

/// Creates the main API router
pub fn create_router(source: Arc<dyn LedgerSource>, config: ApiConfig) -> Router {
    let state = AppState::new(source, config);

    let api_routes = Router::new()
        .route("/dashboard", get(dashboard::get_dashboard))
        .route("/sales", get(sales::get_sales))
        .route("/clients", get(clients::get_clients))
        .route("/funds", get(funds::get_funds))
        .route("/forecast", get(forecast::get_forecast));

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

//! API configuration

use core_kernel::Currency;
use serde::Deserialize;

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Currency all ledger amounts are denominated in
    pub currency: Currency,
    /// Path to a JSON ledger fixture; the built-in sample is served when unset
    pub ledger_path: Option<String>,
    /// Maximum number of memoized view responses
    pub view_cache_capacity: usize,
    /// Log level
    pub log_level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            currency: Currency::USD,
            ledger_path: None,
            view_cache_capacity: 256,
            log_level: "info".to_string(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

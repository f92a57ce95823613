//! Ledger data sources
//!
//! The engine itself performs no I/O; this module is the boundary that
//! fetches raw payloads on its behalf. The fixture source reads a JSON
//! file on every fetch; whether a replaced file is observed is the
//! caller's decision — the app state pins the unscoped snapshot after
//! its first load, while date-scoped requests fetch fresh every time.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use domain_analytics::{RawLedger, ReferenceTables};

/// Errors from fetching raw ledger data
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read ledger data: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse ledger data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Provider of raw ledger payloads and reference tables
#[async_trait]
pub trait LedgerSource: Send + Sync {
    async fn fetch_ledger(&self) -> Result<RawLedger, SourceError>;
    async fn fetch_references(&self) -> Result<ReferenceTables, SourceError>;
}

/// On-disk fixture file: a raw ledger with optional reference tables
#[derive(Debug, Clone, Deserialize)]
struct FixtureFile {
    ledger: RawLedger,
    #[serde(default)]
    references: ReferenceTables,
}

/// A [`LedgerSource`] backed by a JSON file or an in-memory payload
///
/// The file may carry `{ "ledger": ..., "references": ... }` or a bare
/// raw ledger payload.
pub struct FixtureLedgerSource {
    path: Option<PathBuf>,
    inline: Option<FixtureFile>,
}

impl FixtureLedgerSource {
    /// Serves fixtures from a JSON file, re-read on every fetch
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self {
            path: Some(path.as_ref().to_path_buf()),
            inline: None,
        }
    }

    /// Serves a fixed in-memory payload
    pub fn from_parts(ledger: RawLedger, references: ReferenceTables) -> Self {
        Self {
            path: None,
            inline: Some(FixtureFile { ledger, references }),
        }
    }

    /// Serves the built-in deterministic sample ledger
    pub fn sample() -> Self {
        let file: FixtureFile = serde_json::from_str(SAMPLE_FIXTURE)
            .unwrap_or_else(|_| FixtureFile {
                ledger: RawLedger::Flat(Vec::new()),
                references: ReferenceTables::default(),
            });
        Self {
            path: None,
            inline: Some(file),
        }
    }

    async fn load(&self) -> Result<FixtureFile, SourceError> {
        if let Some(file) = &self.inline {
            return Ok(file.clone());
        }
        // path and inline are mutually exclusive by construction
        let path = self.path.as_ref().expect("fixture source without payload");
        let bytes = tokio::fs::read(path).await?;
        match serde_json::from_slice::<FixtureFile>(&bytes) {
            Ok(file) => Ok(file),
            Err(_) => Ok(FixtureFile {
                ledger: serde_json::from_slice(&bytes)?,
                references: ReferenceTables::default(),
            }),
        }
    }
}

#[async_trait]
impl LedgerSource for FixtureLedgerSource {
    async fn fetch_ledger(&self) -> Result<RawLedger, SourceError> {
        Ok(self.load().await?.ledger)
    }

    async fn fetch_references(&self) -> Result<ReferenceTables, SourceError> {
        Ok(self.load().await?.references)
    }
}

/// Small deterministic dataset for demos and smoke tests
const SAMPLE_FIXTURE: &str = r#"{
    "ledger": {
        "2024-03-01": {
            "Zhang Wei": {
                "Acme Trading": { "Growth Fund": 1200.50, "Income Fund": 300 },
                "Blue Harbor": { "Growth Fund": 450 }
            },
            "Li Na": {
                "Crestview Ltd": { "Balanced Fund": 800 }
            }
        },
        "2024-03-04": {
            "Zhang Wei": {
                "Acme Trading": { "Growth Fund": -150 }
            },
            "Li Na": {
                "Crestview Ltd": { "Balanced Fund": 250 },
                "Delta Partners": { "Income Fund": 600 }
            }
        },
        "2024-03-05": {
            "Li Na": {
                "Delta Partners": { "Growth Fund": 75.25 }
            }
        }
    },
    "references": {
        "clients": {
            "Acme Trading": { "province": "Guangdong", "phone": "555-0101" },
            "Blue Harbor": { "province": "Zhejiang" },
            "Crestview Ltd": { "province": "Guangdong" }
        }
    }
}"#;

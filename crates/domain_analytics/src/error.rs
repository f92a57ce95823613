//! Engine errors
//!
//! Only structurally unrecognizable input is surfaced as a failure. An
//! empty ledger is a valid terminal state ([`crate::NormalizedLedger::Empty`]),
//! and unknown entity references are recovered locally with sentinel
//! values, never reported.

use thiserror::Error;

/// Errors that can occur in the aggregation engine
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalyticsError {
    /// The raw payload is not date-keyed and not a record list
    #[error("Malformed ledger: {0}")]
    MalformedLedger(String),
}

impl AnalyticsError {
    pub fn malformed(message: impl Into<String>) -> Self {
        AnalyticsError::MalformedLedger(message.into())
    }
}

//! Request handlers

pub mod clients;
pub mod dashboard;
pub mod forecast;
pub mod funds;
pub mod health;
pub mod sales;

use chrono::NaiveDate;
use serde::Deserialize;

use core_kernel::DateRange;
use domain_analytics::SeriesMode;

use crate::error::ApiError;

/// Query parameters shared by the panel endpoints
#[derive(Debug, Default, Deserialize)]
pub struct PanelQuery {
    /// Case-insensitive substring filter
    #[serde(default)]
    pub search: String,
    /// Series mode for contribution charts (daily when omitted)
    pub mode: Option<SeriesMode>,
    /// Inclusive start of the reporting window
    pub from: Option<NaiveDate>,
    /// Inclusive end of the reporting window
    pub to: Option<NaiveDate>,
}

impl PanelQuery {
    /// The requested date scope, if any bound was given
    pub fn scope(&self) -> Result<Option<DateRange>, ApiError> {
        match (self.from, self.to) {
            (None, None) => Ok(None),
            (from, to) => DateRange::new(
                from.unwrap_or(NaiveDate::MIN),
                to.unwrap_or(NaiveDate::MAX),
            )
            .map(Some)
            .map_err(|err| ApiError::BadRequest(err.to_string())),
        }
    }

    pub fn mode(&self) -> SeriesMode {
        self.mode.unwrap_or(SeriesMode::Daily)
    }
}

pub(crate) fn to_value<T: serde::Serialize>(response: T) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(response).map_err(|err| ApiError::Internal(err.to_string()))
}

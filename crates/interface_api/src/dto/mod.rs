//! Response data transfer objects
//!
//! Field names are camelCase to match the dashboard frontend. Amounts are
//! emitted as plain decimals; the currency is uniform per deployment.

pub mod clients;
pub mod dashboard;
pub mod forecast;
pub mod funds;
pub mod sales;

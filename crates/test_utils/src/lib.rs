//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! Sales Insight test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built ledgers with known aggregation results
//! - `builders`: Builder patterns for raw ledger construction
//! - `generators`: Property-based and fake data generators

pub mod builders;
pub mod fixtures;
pub mod generators;

pub use builders::*;
pub use fixtures::*;
pub use generators::*;

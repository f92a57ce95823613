//! Core Kernel - Foundational types for the sales analytics system
//!
//! This crate provides the building blocks shared by the aggregation engine
//! and the API layer:
//! - Money types with precise decimal arithmetic
//! - The shared date axis every series in one ledger snapshot is plotted on
//! - Strongly-typed entity keys and the snapshot version identifier

pub mod money;
pub mod temporal;
pub mod identifiers;

pub use money::{Money, Currency, MoneyError};
pub use temporal::{DateAxis, DateRange, TemporalError};
pub use identifiers::{SalesPersonId, ClientId, FundId, Province, LedgerVersion};

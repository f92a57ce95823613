//! Income Attribution Aggregation Engine
//!
//! This crate turns a raw, hierarchically-keyed time series of income
//! events into the derived projections each dashboard panel needs. It is a
//! pure, read-oriented transformation layer over an immutable ledger
//! snapshot; it performs no I/O and never mutates source data.
//!
//! # Stages
//!
//! Data flows one-way through four stages, each depending only on the one
//! before it:
//!
//! 1. [`normalize`] - validates and flattens the raw nested record set into
//!    a uniform list of income events
//! 2. [`series`] - produces, per grouping key, an ordered daily series and
//!    its cumulative (prefix-sum) counterpart on one shared date axis
//! 3. [`ranking`] - computes top-N breakdowns and reference-joined rollups
//! 4. [`view`] - applies the search predicate over the hierarchy and
//!    assembles the final view models consumed by presentation
//!
//! # Numeric semantics
//!
//! All summation uses [`core_kernel::Money`] (decimal arithmetic), so the
//! cumulative value of any key at the last axis date equals the sum of its
//! daily values exactly. Negative amounts (reversals) are permitted and
//! decrease cumulative totals.

pub mod error;
pub mod ledger;
pub mod normalize;
pub mod ranking;
pub mod series;
pub mod view;

pub use error::AnalyticsError;
pub use ledger::{
    ClientProfile, ClientRecord, FundProfile, FundRecord, IncomeEvent, LedgerSnapshot,
    NormalizedLedger, RawLedger, RawRecord, ReferenceTables, SalesPersonProfile,
    SalesPersonRecord, MISSING_PHONE, UNKNOWN_PROVINCE,
};
pub use normalize::normalize;
pub use ranking::{
    breakdown_per_entity, rollup, top_n, totals_by, BreakdownDay, OwnerBreakdown, RankedEntity,
    RollupRow, RollupTable,
};
pub use series::{build_series, income_trend, GroupBy, KeySeries, SeriesMode, SeriesPoint};
pub use view::{
    compose_clients_view, compose_dashboard_view, compose_forecast_view, compose_funds_view,
    compose_province_rollup, compose_sales_view, filter_hierarchy, ClientSlice, ClientsView,
    ContributionDay, CoverageNode, DashboardView, ForecastPoint, ForecastView, FundRow, FundsView,
    IndividualPerformance, SalesPersonSummary, SalesView, FORECAST_HORIZON_DAYS,
};

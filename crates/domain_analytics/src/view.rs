//! Filter/View Composer
//!
//! Applies the search predicate over the hierarchical structure without
//! flattening it, and assembles the final view models consumed by
//! presentation. Every compose function here is a pure function of its
//! inputs, so results are safe to memoize by
//! `(ledger_version, grouping, mode, search_term)`.

use serde::Serialize;
use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use core_kernel::Money;
use rust_decimal::Decimal;

use crate::ledger::LedgerSnapshot;
use crate::ranking::{
    breakdown_per_entity, rollup, top_n, totals_by, BreakdownDay, RankedEntity, RollupTable,
};
use crate::series::{build_series, income_trend, GroupBy, SeriesMode, SeriesPoint};

/// Panel rankings show at most this many entries per breakdown
pub const DEFAULT_BREAKDOWN_N: usize = 10;

// ----------------------------------------------------------------------------
// Hierarchy filtering
// ----------------------------------------------------------------------------

/// A client's share under one owner
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientSlice {
    pub name: String,
    pub value: Money,
}

/// One owner (salesperson) with the clients it covers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageNode {
    pub name: String,
    pub clients: Vec<ClientSlice>,
}

/// Case-insensitive substring filter over the owner/client hierarchy
///
/// An owner is retained if its own name matches or any of its client
/// names match. A matched owner keeps its full client list; descendants
/// are never pruned. Order and structure are preserved, and an empty term
/// matches everything.
pub fn filter_hierarchy(nodes: &[CoverageNode], term: &str) -> Vec<CoverageNode> {
    if term.is_empty() {
        return nodes.to_vec();
    }
    let needle = term.to_lowercase();
    nodes
        .iter()
        .filter(|node| {
            node.name.to_lowercase().contains(&needle)
                || node
                    .clients
                    .iter()
                    .any(|client| client.name.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

fn name_matches(name: &str, term: &str) -> bool {
    term.is_empty() || name.to_lowercase().contains(&term.to_lowercase())
}

// ----------------------------------------------------------------------------
// Dashboard panel
// ----------------------------------------------------------------------------

/// Headline totals, top performers, and the income trend
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub total_income: Money,
    pub total_sales_people: usize,
    pub total_clients: usize,
    pub total_funds: usize,
    pub top_sales_person: Option<RankedEntity>,
    pub top_client: Option<RankedEntity>,
    pub top_fund: Option<RankedEntity>,
    pub income_trend: Vec<SeriesPoint>,
    /// Province totals; tabular keeps every row, geographic drops <= 0
    pub provinces: RollupTable,
}

/// Composes the dashboard panel from one snapshot
pub fn compose_dashboard_view(snapshot: &LedgerSnapshot) -> DashboardView {
    let zero = Money::zero(snapshot.currency());
    let total_income = snapshot
        .events()
        .iter()
        .fold(zero, |acc, event| acc + event.amount);

    DashboardView {
        total_income,
        total_sales_people: snapshot.sales_people().len(),
        total_clients: snapshot.clients().len(),
        total_funds: snapshot.funds().len(),
        top_sales_person: leader(snapshot, GroupBy::SalesPerson),
        top_client: leader(snapshot, GroupBy::Client),
        top_fund: leader(snapshot, GroupBy::Fund),
        income_trend: income_trend(snapshot),
        provinces: compose_province_rollup(snapshot),
    }
}

/// Province totals for the geographic panel
///
/// Provinces resolve through the client reference join; clients without a
/// recorded province land under the sentinel key.
pub fn compose_province_rollup(snapshot: &LedgerSnapshot) -> RollupTable {
    rollup(snapshot, GroupBy::Province)
}

fn leader(snapshot: &LedgerSnapshot, group_by: GroupBy) -> Option<RankedEntity> {
    top_n(totals_by(snapshot, group_by), 1).into_iter().next()
}

// ----------------------------------------------------------------------------
// Sales panel
// ----------------------------------------------------------------------------

/// Summary row for one salesperson
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesPersonSummary {
    pub name: String,
    pub total_clients: usize,
    pub cumulative_income: Money,
    pub top_clients: Vec<RankedEntity>,
}

/// Per-date contribution of every salesperson (daily or cumulative)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContributionDay {
    pub date: NaiveDate,
    pub values: BTreeMap<String, Money>,
}

/// Per-owner client and fund breakdowns for the stacked-area panels
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndividualPerformance {
    pub clients: Vec<BreakdownDay>,
    pub funds: Vec<BreakdownDay>,
}

/// The sales dashboard panel
#[derive(Debug, Clone, Serialize)]
pub struct SalesView {
    pub mode: SeriesMode,
    /// Summary rows, narrowed by the search term (name match only)
    pub sales_persons: Vec<SalesPersonSummary>,
    /// Contribution series over the shared axis, all salespeople
    pub contribution: Vec<ContributionDay>,
    /// Keyed by salesperson name
    pub individual_performance: BTreeMap<String, IndividualPerformance>,
}

/// Composes the sales panel from one snapshot
///
/// The search term narrows the summary table only; the contribution chart
/// keeps every salesperson so the shared axis stays comparable.
pub fn compose_sales_view(snapshot: &LedgerSnapshot, mode: SeriesMode, search: &str) -> SalesView {
    let client_breakdowns =
        breakdown_per_entity(snapshot, GroupBy::SalesPerson, GroupBy::Client, DEFAULT_BREAKDOWN_N);
    let fund_breakdowns =
        breakdown_per_entity(snapshot, GroupBy::SalesPerson, GroupBy::Fund, DEFAULT_BREAKDOWN_N);
    let totals = totals_by(snapshot, GroupBy::SalesPerson);

    let sales_persons = snapshot
        .sales_people()
        .iter()
        .filter(|person| name_matches(&person.name, search))
        .map(|person| {
            let owned_clients = client_counts(snapshot, person.id.as_str());
            let cumulative_income = totals
                .iter()
                .find(|entity| entity.id == person.id.as_str())
                .map(|entity| entity.total)
                .unwrap_or_else(|| Money::zero(snapshot.currency()));
            let top_clients = client_breakdowns
                .iter()
                .find(|b| b.owner_id == person.id.as_str())
                .map(|b| b.top.clone())
                .unwrap_or_default();
            SalesPersonSummary {
                name: person.name.clone(),
                total_clients: owned_clients,
                cumulative_income,
                top_clients,
            }
        })
        .collect();

    let series = build_series(snapshot, GroupBy::SalesPerson, mode);
    let contribution = snapshot
        .axis()
        .dates()
        .iter()
        .enumerate()
        .map(|(index, date)| ContributionDay {
            date: *date,
            values: series
                .iter()
                .map(|key_series| (key_series.name.clone(), key_series.points[index].value))
                .collect(),
        })
        .collect();

    let individual_performance = client_breakdowns
        .into_iter()
        .zip(fund_breakdowns)
        .map(|(clients, funds)| {
            (
                clients.owner_name.clone(),
                IndividualPerformance {
                    clients: clients.daily,
                    funds: funds.daily,
                },
            )
        })
        .collect();

    SalesView {
        mode,
        sales_persons,
        contribution,
        individual_performance,
    }
}

/// Distinct clients with at least one event under the given owner
fn client_counts(snapshot: &LedgerSnapshot, owner_id: &str) -> usize {
    let mut seen = std::collections::HashSet::new();
    for event in snapshot.events() {
        if event.sales_person.as_str() == owner_id {
            seen.insert(&event.client);
        }
    }
    seen.len()
}

// ----------------------------------------------------------------------------
// Clients panel
// ----------------------------------------------------------------------------

/// The clients coverage panel: one group per salesperson
#[derive(Debug, Clone, Serialize)]
pub struct ClientsView {
    pub groups: Vec<CoverageNode>,
}

/// Composes the clients panel, narrowed by the hierarchy filter
pub fn compose_clients_view(snapshot: &LedgerSnapshot, search: &str) -> ClientsView {
    let breakdowns = breakdown_per_entity(
        snapshot,
        GroupBy::SalesPerson,
        GroupBy::Client,
        usize::MAX,
    );

    let groups: Vec<CoverageNode> = breakdowns
        .into_iter()
        .map(|breakdown| CoverageNode {
            name: breakdown.owner_name,
            clients: breakdown
                .top
                .into_iter()
                .map(|entity| ClientSlice {
                    name: entity.name,
                    value: entity.total,
                })
                .collect(),
        })
        .collect();

    ClientsView {
        groups: filter_hierarchy(&groups, search),
    }
}

// ----------------------------------------------------------------------------
// Funds panel
// ----------------------------------------------------------------------------

/// One row of the funds table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FundRow {
    pub name: String,
    pub income: Money,
}

/// The funds overview panel
#[derive(Debug, Clone, Serialize)]
pub struct FundsView {
    pub funds: Vec<FundRow>,
}

/// Composes the funds panel: every fund ranked by total income
pub fn compose_funds_view(snapshot: &LedgerSnapshot, search: &str) -> FundsView {
    let ranked = top_n(totals_by(snapshot, GroupBy::Fund), usize::MAX);
    FundsView {
        funds: ranked
            .into_iter()
            .filter(|entity| name_matches(&entity.name, search))
            .map(|entity| FundRow {
                name: entity.name,
                income: entity.total,
            })
            .collect(),
    }
}

// ----------------------------------------------------------------------------
// Forecast panel
// ----------------------------------------------------------------------------

/// Projection horizon for the forecast panel, in calendar days
pub const FORECAST_HORIZON_DAYS: usize = 30;

/// Trailing axis dates that weight the short-term projection
const FORECAST_TREND_WINDOW: usize = 7;

/// One projected day past the end of the ledger
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    /// Cumulative income extended at the ledger-wide mean daily rate
    pub baseline: Money,
    /// Cumulative income extended at the trailing-window mean daily rate
    pub trend: Money,
}

/// The forecast panel: cumulative income projected past the last ledger date
#[derive(Debug, Clone, Serialize)]
pub struct ForecastView {
    pub points: Vec<ForecastPoint>,
}

/// Composes the forecast panel from one snapshot
///
/// Projects the cumulative income total over `horizon_days` consecutive
/// calendar days starting the day after the last ledger date. The baseline
/// projection grows at the mean daily income over the whole axis; the
/// trend projection grows at the mean over the trailing window of axis
/// dates, so a recent surge or slowdown bends it away from the baseline.
/// Both projections are pure functions of the snapshot.
pub fn compose_forecast_view(snapshot: &LedgerSnapshot, horizon_days: usize) -> ForecastView {
    let daily = income_trend(snapshot);
    let currency = snapshot.currency();
    let Some(last_date) = snapshot.axis().last() else {
        return ForecastView { points: Vec::new() };
    };

    let total = daily
        .iter()
        .fold(Money::zero(currency), |acc, point| acc + point.value);
    let mean_rate = total.amount() / Decimal::from(daily.len());

    let window = daily.len().min(FORECAST_TREND_WINDOW);
    let recent: Decimal = daily[daily.len() - window..]
        .iter()
        .map(|point| point.value.amount())
        .sum();
    let recent_rate = recent / Decimal::from(window);

    let points = (1..=horizon_days)
        .filter_map(|step| {
            let date = last_date.checked_add_days(Days::new(step as u64))?;
            let steps = Decimal::from(step);
            Some(ForecastPoint {
                date,
                baseline: Money::new(total.amount() + mean_rate * steps, currency),
                trend: Money::new(total.amount() + recent_rate * steps, currency),
            })
        })
        .collect();

    ForecastView { points }
}

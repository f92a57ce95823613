//! Ledger Normalizer
//!
//! Flattens the raw payload into a date-sorted event list, joins the
//! reference tables (substituting sentinels for missing attributes), and
//! builds the shared date axis. Runs exactly once per fetched snapshot;
//! every later stage reads the resulting [`LedgerSnapshot`] unchanged.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashSet;

use core_kernel::{
    ClientId, Currency, DateAxis, DateRange, FundId, LedgerVersion, Money, Province,
    SalesPersonId,
};

use crate::error::AnalyticsError;
use crate::ledger::{
    ClientProfile, FundProfile, IncomeEvent, LedgerSnapshot, NormalizedLedger, RawLedger,
    ReferenceTables, SalesPersonProfile, MISSING_PHONE, UNKNOWN_PROVINCE,
};

/// Normalizes a raw ledger payload into an immutable snapshot
///
/// Accepts both raw shapes (nested maps or flat records), treats missing
/// numeric leaves as zero, and substitutes sentinel values for missing
/// reference attributes. Events outside `scope` (inclusive) are dropped
/// before the date axis is built.
///
/// # Errors
///
/// Returns [`AnalyticsError::MalformedLedger`] only when the payload is
/// structurally unrecognizable (a date key that is not a date). An empty
/// payload is not an error: it yields [`NormalizedLedger::Empty`].
pub fn normalize(
    raw: &RawLedger,
    references: &ReferenceTables,
    currency: Currency,
    scope: Option<DateRange>,
) -> Result<NormalizedLedger, AnalyticsError> {
    let mut events = flatten(raw, currency)?;

    if let Some(range) = scope {
        events.retain(|event| range.contains(event.date));
    }

    if events.is_empty() {
        tracing::debug!("ledger normalized to empty state");
        return Ok(NormalizedLedger::Empty);
    }

    // Stable sort keeps same-day events in arrival order, which in turn
    // fixes the first-appearance order of the entity catalogs.
    events.sort_by_key(|event| event.date);

    let axis = DateAxis::from_dates(events.iter().map(|e| e.date));
    let (sales_people, clients, funds) = build_catalogs(&events, references);

    tracing::debug!(
        events = events.len(),
        dates = axis.len(),
        sales_people = sales_people.len(),
        clients = clients.len(),
        funds = funds.len(),
        "normalized ledger snapshot"
    );

    Ok(NormalizedLedger::Loaded(LedgerSnapshot::new(
        LedgerVersion::new_v7(),
        currency,
        events,
        axis,
        sales_people,
        clients,
        funds,
    )))
}

/// Flattens either raw shape into unsorted events
fn flatten(raw: &RawLedger, currency: Currency) -> Result<Vec<IncomeEvent>, AnalyticsError> {
    let mut events = Vec::new();

    match raw {
        RawLedger::Nested(days) => {
            for (date_key, day) in days {
                let date = parse_event_date(date_key)?;
                for (sales_person, clients) in day {
                    for (client, funds) in clients {
                        for (fund, amount) in funds {
                            events.push(IncomeEvent {
                                date,
                                sales_person: SalesPersonId::new(sales_person.clone()),
                                client: ClientId::new(client.clone()),
                                fund: FundId::new(fund.clone()),
                                amount: Money::new(amount.unwrap_or(Decimal::ZERO), currency),
                            });
                        }
                    }
                }
            }
        }
        RawLedger::Flat(records) => {
            for record in records {
                let date = parse_event_date(&record.date)?;
                events.push(IncomeEvent {
                    date,
                    sales_person: SalesPersonId::new(record.sales_person.clone()),
                    client: ClientId::new(record.client.clone()),
                    fund: FundId::new(record.fund.clone()),
                    amount: Money::new(record.income.unwrap_or(Decimal::ZERO), currency),
                });
            }
        }
    }

    Ok(events)
}

/// Parses a raw date key
///
/// Accepts plain ISO dates and RFC 3339 timestamps (some source variants
/// emit midnight timestamps for day keys).
fn parse_event_date(raw: &str) -> Result<NaiveDate, AnalyticsError> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(timestamp) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.date_naive());
    }
    Err(AnalyticsError::malformed(format!(
        "unrecognized date key: {raw}"
    )))
}

/// Builds the entity catalogs in first-appearance order, resolving each
/// reference against the lookup tables
fn build_catalogs(
    events: &[IncomeEvent],
    references: &ReferenceTables,
) -> (
    Vec<SalesPersonProfile>,
    Vec<ClientProfile>,
    Vec<FundProfile>,
) {
    let mut sales_people = Vec::new();
    let mut clients = Vec::new();
    let mut funds = Vec::new();
    let mut seen_sales: HashSet<&SalesPersonId> = HashSet::new();
    let mut seen_clients: HashSet<&ClientId> = HashSet::new();
    let mut seen_funds: HashSet<&FundId> = HashSet::new();

    for event in events {
        if seen_sales.insert(&event.sales_person) {
            sales_people.push(resolve_sales_person(&event.sales_person, references));
        }
        if seen_clients.insert(&event.client) {
            clients.push(resolve_client(&event.client, references));
        }
        if seen_funds.insert(&event.fund) {
            funds.push(resolve_fund(&event.fund, references));
        }
    }

    (sales_people, clients, funds)
}

fn resolve_sales_person(id: &SalesPersonId, references: &ReferenceTables) -> SalesPersonProfile {
    let name = references
        .sales_people
        .get(id)
        .and_then(|record| record.name.clone())
        .unwrap_or_else(|| id.to_string());
    SalesPersonProfile {
        id: id.clone(),
        name,
    }
}

fn resolve_client(id: &ClientId, references: &ReferenceTables) -> ClientProfile {
    let record = references.clients.get(id);
    ClientProfile {
        id: id.clone(),
        name: record
            .and_then(|r| r.name.clone())
            .unwrap_or_else(|| id.to_string()),
        province: record
            .and_then(|r| r.province.clone())
            .map(Province::new)
            .unwrap_or_else(|| Province::new(UNKNOWN_PROVINCE)),
        phone: record
            .and_then(|r| r.phone.clone())
            .unwrap_or_else(|| MISSING_PHONE.to_string()),
    }
}

fn resolve_fund(id: &FundId, references: &ReferenceTables) -> FundProfile {
    let name = references
        .funds
        .get(id)
        .and_then(|record| record.name.clone())
        .unwrap_or_else(|| id.to_string());
    FundProfile {
        id: id.clone(),
        name,
    }
}

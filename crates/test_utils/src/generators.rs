//! Property-based and fake data generators

use chrono::NaiveDate;
use fake::faker::company::en::CompanyName;
use fake::faker::name::en::Name;
use fake::Fake;
use proptest::prelude::*;
use rust_decimal::Decimal;

use domain_analytics::{RawLedger, RawRecord};

/// Strategy for event dates within one reporting year
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (1u32..=12, 1u32..=28).prop_map(|(month, day)| {
        NaiveDate::from_ymd_opt(2024, month, day).expect("valid date")
    })
}

/// Strategy for signed income amounts with two decimal places
pub fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (-1_000_000i64..1_000_000i64).prop_map(|minor| Decimal::new(minor, 2))
}

/// Strategy for flat raw ledgers with a small entity universe
///
/// Keys are drawn from fixed pools so generated ledgers exercise
/// aggregation across shared keys rather than one event per key.
pub fn flat_ledger_strategy(max_records: usize) -> impl Strategy<Value = RawLedger> {
    let record = (
        date_strategy(),
        0usize..4,
        0usize..6,
        0usize..3,
        amount_strategy(),
    )
        .prop_map(|(date, person, client, fund, amount)| RawRecord {
            date: date.to_string(),
            sales_person: format!("Person {person}"),
            client: format!("Client {client}"),
            fund: format!("Fund {fund}"),
            income: Some(amount),
        });
    proptest::collection::vec(record, 0..=max_records).prop_map(RawLedger::Flat)
}

/// A random person name for display-oriented tests
pub fn fake_person_name() -> String {
    Name().fake()
}

/// A random company name for display-oriented tests
pub fn fake_company_name() -> String {
    CompanyName().fake()
}

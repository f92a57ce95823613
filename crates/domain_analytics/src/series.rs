//! Series Builder
//!
//! Produces, per grouping key, an ordered daily series and its cumulative
//! (prefix-sum) counterpart. Every series from one snapshot shares the
//! snapshot's date axis so panels stay comparable across keys; a key with
//! no activity on an axis date contributes an explicit zero (daily) or
//! carries its running total forward (cumulative).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use core_kernel::Money;

use crate::ledger::{IncomeEvent, LedgerSnapshot};

/// The dimension by which totals are bucketed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    SalesPerson,
    Client,
    Fund,
    Province,
}

impl GroupBy {
    /// Stable name used in cache keys and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupBy::SalesPerson => "sales_person",
            GroupBy::Client => "client",
            GroupBy::Fund => "fund",
            GroupBy::Province => "province",
        }
    }
}

/// Daily values or their prefix sums
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesMode {
    Daily,
    Cumulative,
}

impl SeriesMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeriesMode::Daily => "daily",
            SeriesMode::Cumulative => "cumulative",
        }
    }
}

/// One value on the shared date axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: Money,
}

/// The full series for one grouping key
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeySeries {
    pub id: String,
    pub name: String,
    pub points: Vec<SeriesPoint>,
}

impl KeySeries {
    /// Value at the last axis date (total income for cumulative series)
    pub fn last_value(&self) -> Option<Money> {
        self.points.last().map(|p| p.value)
    }
}

/// Builds one series per grouping key over the snapshot's shared axis
///
/// Key order is first-appearance order in the date-sorted event stream;
/// ranking stages may reorder afterwards. Daily mode emits the per-date
/// sum (zero when the key is inactive); cumulative mode emits the prefix
/// sum over all axis dates up to and including each date, carrying the
/// total forward through inactive dates.
pub fn build_series(
    snapshot: &LedgerSnapshot,
    group_by: GroupBy,
    mode: SeriesMode,
) -> Vec<KeySeries> {
    let axis = snapshot.axis();
    let zero = Money::zero(snapshot.currency());

    // Daily buckets per key, axis-aligned.
    let mut order: Vec<(String, String)> = Vec::new();
    let mut buckets: HashMap<String, Vec<Money>> = HashMap::new();

    for event in snapshot.events() {
        let (id, name) = event_key(snapshot, event, group_by);
        let Some(index) = axis.position(event.date) else {
            continue;
        };
        let bucket = buckets.entry(id.clone()).or_insert_with(|| {
            order.push((id.clone(), name.clone()));
            vec![zero; axis.len()]
        });
        bucket[index] += event.amount;
    }

    order
        .into_iter()
        .map(|(id, name)| {
            let daily = &buckets[&id];
            let mut points = Vec::with_capacity(axis.len());
            let mut running = zero;
            for (date, value) in axis.dates().iter().zip(daily) {
                let point_value = match mode {
                    SeriesMode::Daily => *value,
                    SeriesMode::Cumulative => {
                        running += *value;
                        running
                    }
                };
                points.push(SeriesPoint {
                    date: *date,
                    value: point_value,
                });
            }
            KeySeries { id, name, points }
        })
        .collect()
}

/// Daily total income across all keys, one point per axis date
///
/// This is the dashboard's headline income trend.
pub fn income_trend(snapshot: &LedgerSnapshot) -> Vec<SeriesPoint> {
    let axis = snapshot.axis();
    let zero = Money::zero(snapshot.currency());
    let mut totals = vec![zero; axis.len()];

    for event in snapshot.events() {
        let Some(index) = axis.position(event.date) else {
            continue;
        };
        totals[index] += event.amount;
    }

    axis.dates()
        .iter()
        .zip(totals)
        .map(|(date, value)| SeriesPoint {
            date: *date,
            value,
        })
        .collect()
}

/// Resolves an event's key and display name for a grouping dimension
pub(crate) fn event_key(
    snapshot: &LedgerSnapshot,
    event: &IncomeEvent,
    group_by: GroupBy,
) -> (String, String) {
    match group_by {
        GroupBy::SalesPerson => {
            let id = event.sales_person.as_str().to_string();
            let name = snapshot
                .sales_people()
                .iter()
                .find(|p| p.id == event.sales_person)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| id.clone());
            (id, name)
        }
        GroupBy::Client => {
            let id = event.client.as_str().to_string();
            let name = snapshot
                .client(&event.client)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| id.clone());
            (id, name)
        }
        GroupBy::Fund => {
            let id = event.fund.as_str().to_string();
            let name = snapshot
                .funds()
                .iter()
                .find(|f| f.id == event.fund)
                .map(|f| f.name.clone())
                .unwrap_or_else(|| id.clone());
            (id, name)
        }
        GroupBy::Province => {
            let province = snapshot.event_province(event).into_string();
            (province.clone(), province)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{RawLedger, ReferenceTables};
    use crate::normalize::normalize;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    fn snapshot_from(value: serde_json::Value) -> LedgerSnapshot {
        let raw: RawLedger = serde_json::from_value(value).unwrap();
        match normalize(&raw, &ReferenceTables::default(), Currency::USD, None).unwrap() {
            crate::ledger::NormalizedLedger::Loaded(snapshot) => snapshot,
            crate::ledger::NormalizedLedger::Empty => panic!("expected loaded snapshot"),
        }
    }

    fn two_person_ledger() -> LedgerSnapshot {
        snapshot_from(serde_json::json!({
            "2024-01-01": {
                "Alice": { "Client A": { "Fund X": 100 } },
                "Bob": { "Client B": { "Fund Y": 40 } }
            },
            "2024-01-02": {
                "Bob": { "Client B": { "Fund Y": 10 } }
            },
            "2024-01-03": {
                "Alice": { "Client A": { "Fund X": -20 } }
            }
        }))
    }

    #[test]
    fn test_daily_series_fills_inactive_dates_with_zero() {
        let snapshot = two_person_ledger();
        let series = build_series(&snapshot, GroupBy::SalesPerson, SeriesMode::Daily);

        let alice = series.iter().find(|s| s.name == "Alice").unwrap();
        let values: Vec<_> = alice.points.iter().map(|p| p.value.amount()).collect();
        assert_eq!(values, vec![dec!(100), dec!(0), dec!(-20)]);
    }

    #[test]
    fn test_cumulative_carries_forward_through_inactive_dates() {
        let snapshot = two_person_ledger();
        let series = build_series(&snapshot, GroupBy::SalesPerson, SeriesMode::Cumulative);

        let alice = series.iter().find(|s| s.name == "Alice").unwrap();
        let values: Vec<_> = alice.points.iter().map(|p| p.value.amount()).collect();
        assert_eq!(values, vec![dec!(100), dec!(100), dec!(80)]);

        let bob = series.iter().find(|s| s.name == "Bob").unwrap();
        let values: Vec<_> = bob.points.iter().map(|p| p.value.amount()).collect();
        assert_eq!(values, vec![dec!(40), dec!(50), dec!(50)]);
    }

    #[test]
    fn test_all_series_share_the_axis() {
        let snapshot = two_person_ledger();
        let series = build_series(&snapshot, GroupBy::Fund, SeriesMode::Daily);

        for key_series in &series {
            assert_eq!(key_series.points.len(), snapshot.axis().len());
            let dates: Vec<_> = key_series.points.iter().map(|p| p.date).collect();
            assert_eq!(dates.as_slice(), snapshot.axis().dates());
        }
    }

    #[test]
    fn test_key_order_is_first_appearance() {
        let snapshot = two_person_ledger();
        let series = build_series(&snapshot, GroupBy::SalesPerson, SeriesMode::Daily);
        let names: Vec<_> = series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_cumulative_last_equals_daily_sum() {
        let snapshot = two_person_ledger();
        let daily = build_series(&snapshot, GroupBy::Client, SeriesMode::Daily);
        let cumulative = build_series(&snapshot, GroupBy::Client, SeriesMode::Cumulative);

        for (d, c) in daily.iter().zip(&cumulative) {
            let sum = Money::sum(
                snapshot.currency(),
                d.points.iter().map(|p| &p.value).collect::<Vec<_>>(),
            )
            .unwrap();
            assert_eq!(c.last_value().unwrap(), sum);
        }
    }

    #[test]
    fn test_province_grouping_uses_client_reference() {
        let raw: RawLedger = serde_json::from_value(serde_json::json!({
            "2024-01-01": {
                "Alice": {
                    "Client A": { "Fund X": 70 },
                    "Client B": { "Fund X": 30 }
                }
            }
        }))
        .unwrap();
        let mut references = ReferenceTables::default();
        references.clients.insert(
            core_kernel::ClientId::new("Client A"),
            crate::ledger::ClientRecord {
                name: None,
                province: Some("Zhejiang".to_string()),
                phone: None,
            },
        );

        let normalized = normalize(&raw, &references, Currency::USD, None).unwrap();
        let snapshot = normalized.snapshot().unwrap();
        let series = build_series(snapshot, GroupBy::Province, SeriesMode::Daily);

        let names: Vec<_> = series.iter().map(|s| s.name.as_str()).collect();
        assert!(names.contains(&"Zhejiang"));
        assert!(names.contains(&"Unknown"));
    }

    #[test]
    fn test_income_trend_sums_all_keys() {
        let snapshot = two_person_ledger();
        let trend = income_trend(&snapshot);
        let values: Vec<_> = trend.iter().map(|p| p.value.amount()).collect();
        assert_eq!(values, vec![dec!(140), dec!(10), dec!(-20)]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::ledger::{RawLedger, RawRecord, ReferenceTables};
    use crate::normalize::normalize;
    use chrono::NaiveDate;
    use core_kernel::Currency;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn flat_ledger(signed: bool) -> impl Strategy<Value = RawLedger> {
        let low = if signed { -100_000i64 } else { 0i64 };
        let record = (1u32..=12, 1u32..=28, 0usize..4, 0usize..4, low..100_000i64).prop_map(
            |(month, day, person, fund, minor)| RawRecord {
                date: NaiveDate::from_ymd_opt(2024, month, day)
                    .expect("valid date")
                    .to_string(),
                sales_person: format!("Person {person}"),
                client: format!("Client {person}"),
                fund: format!("Fund {fund}"),
                income: Some(Decimal::new(minor, 2)),
            },
        );
        proptest::collection::vec(record, 1..40).prop_map(RawLedger::Flat)
    }

    proptest! {
        #[test]
        fn cumulative_is_monotone_for_non_negative_ledgers(raw in flat_ledger(false)) {
            let normalized =
                normalize(&raw, &ReferenceTables::default(), Currency::USD, None).unwrap();
            let snapshot = normalized.snapshot().expect("non-empty ledger");
            for series in build_series(snapshot, GroupBy::SalesPerson, SeriesMode::Cumulative) {
                for pair in series.points.windows(2) {
                    prop_assert!(pair[0].value.amount() <= pair[1].value.amount());
                }
            }
        }

        #[test]
        fn cumulative_last_matches_daily_sum(raw in flat_ledger(true)) {
            let normalized =
                normalize(&raw, &ReferenceTables::default(), Currency::USD, None).unwrap();
            let snapshot = normalized.snapshot().expect("non-empty ledger");
            let daily = build_series(snapshot, GroupBy::Fund, SeriesMode::Daily);
            let cumulative = build_series(snapshot, GroupBy::Fund, SeriesMode::Cumulative);
            for (d, c) in daily.iter().zip(&cumulative) {
                let mut sum = Money::zero(snapshot.currency());
                for point in &d.points {
                    sum += point.value;
                }
                prop_assert_eq!(c.last_value().expect("non-empty axis"), sum);
            }
        }
    }
}

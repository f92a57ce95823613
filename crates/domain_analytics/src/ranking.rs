//! Ranking & Rollup Engine
//!
//! Top-N rankings, reference-joined rollups, and per-owner breakdowns.
//! Ordering is always total descending with ties broken by name ascending,
//! so re-running a ranking on the same input yields the same result and
//! sharded computations can be merged deterministically.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use core_kernel::Money;

use crate::ledger::LedgerSnapshot;
use crate::series::{event_key, GroupBy};

/// One entity with its total, as used by rankings and summary rows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntity {
    pub id: String,
    pub name: String,
    pub total: Money,
}

/// Totals per key of a dimension, in first-appearance order (unranked)
pub fn totals_by(snapshot: &LedgerSnapshot, group_by: GroupBy) -> Vec<RankedEntity> {
    let zero = Money::zero(snapshot.currency());
    let mut order: Vec<(String, String)> = Vec::new();
    let mut totals: HashMap<String, Money> = HashMap::new();

    for event in snapshot.events() {
        let (id, name) = event_key(snapshot, event, group_by);
        let total = totals.entry(id.clone()).or_insert_with(|| {
            order.push((id.clone(), name.clone()));
            zero
        });
        *total += event.amount;
    }

    order
        .into_iter()
        .map(|(id, name)| RankedEntity {
            total: totals[&id],
            id,
            name,
        })
        .collect()
}

/// Sorts by total descending (ties by name ascending) and keeps the first n
///
/// Returns all entities when fewer than n exist; never pads and never
/// fails.
pub fn top_n(mut entities: Vec<RankedEntity>, n: usize) -> Vec<RankedEntity> {
    entities.sort_by(|a, b| {
        b.total
            .amount()
            .cmp(&a.total.amount())
            .then_with(|| a.name.cmp(&b.name))
    });
    entities.truncate(n);
    entities
}

/// One row of a rollup table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollupRow {
    pub key: String,
    pub total: Money,
}

/// Totals re-grouped into a target dimension via the reference join
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollupTable {
    pub dimension: GroupBy,
    rows: Vec<RollupRow>,
}

impl RollupTable {
    /// All rows, including zero and negative totals (tabular views)
    pub fn tabular(&self) -> &[RollupRow] {
        &self.rows
    }

    /// Rows with strictly positive totals (area-proportional views)
    ///
    /// Zero/negative slices are degenerate in geographic or pie-style
    /// renderings and are excluded here but retained in [`Self::tabular`].
    pub fn geographic(&self) -> Vec<RollupRow> {
        self.rows
            .iter()
            .filter(|row| row.total.is_positive())
            .cloned()
            .collect()
    }

    /// Sum over all rows (conserved across the rollup)
    pub fn grand_total(&self, zero: Money) -> Money {
        self.rows.iter().fold(zero, |acc, row| acc + row.total)
    }
}

/// Groups event totals by the target dimension
///
/// The target key is derived by following each event's associated
/// reference record (e.g., client -> province), so the sum over all
/// target keys equals the sum over the source dimension.
pub fn rollup(snapshot: &LedgerSnapshot, to: GroupBy) -> RollupTable {
    let rows = totals_by(snapshot, to)
        .into_iter()
        .map(|entity| RollupRow {
            key: entity.name,
            total: entity.total,
        })
        .collect();
    RollupTable {
        dimension: to,
        rows,
    }
}

/// Per-date values of a breakdown dimension within one owner
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownDay {
    pub date: NaiveDate,
    pub values: BTreeMap<String, Money>,
}

/// Top-N breakdown of a secondary dimension for one owner
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnerBreakdown {
    pub owner_id: String,
    pub owner_name: String,
    /// Top-N entities of the breakdown dimension, restricted to the
    /// owner's events
    pub top: Vec<RankedEntity>,
    /// Daily values for the top entities, one entry per axis date
    pub daily: Vec<BreakdownDay>,
}

/// For each owner, the top-N ranking of a breakdown dimension restricted
/// to that owner's events
///
/// Owners appear in first-appearance order; this is the "individual
/// performance" panel data (e.g., each salesperson's top clients).
pub fn breakdown_per_entity(
    snapshot: &LedgerSnapshot,
    owner: GroupBy,
    breakdown: GroupBy,
    n: usize,
) -> Vec<OwnerBreakdown> {
    let zero = Money::zero(snapshot.currency());
    let axis = snapshot.axis();

    let mut owner_order: Vec<(String, String)> = Vec::new();
    // owner id -> breakdown name -> (total, per-date values)
    let mut grouped: HashMap<String, HashMap<String, (Money, Vec<Money>)>> = HashMap::new();

    for event in snapshot.events() {
        let (owner_id, owner_name) = event_key(snapshot, event, owner);
        let (_, breakdown_name) = event_key(snapshot, event, breakdown);
        let Some(index) = axis.position(event.date) else {
            continue;
        };

        let per_owner = match grouped.entry(owner_id.clone()) {
            std::collections::hash_map::Entry::Occupied(entry) => entry.into_mut(),
            std::collections::hash_map::Entry::Vacant(entry) => {
                owner_order.push((owner_id.clone(), owner_name.clone()));
                entry.insert(HashMap::new())
            }
        };
        let (total, days) = per_owner
            .entry(breakdown_name)
            .or_insert_with(|| (zero, vec![zero; axis.len()]));
        *total += event.amount;
        days[index] += event.amount;
    }

    owner_order
        .into_iter()
        .map(|(owner_id, owner_name)| {
            let per_owner = &grouped[&owner_id];

            let ranked = top_n(
                per_owner
                    .iter()
                    .map(|(name, (total, _))| RankedEntity {
                        id: name.clone(),
                        name: name.clone(),
                        total: *total,
                    })
                    .collect(),
                n,
            );

            let daily = axis
                .dates()
                .iter()
                .enumerate()
                .map(|(index, date)| {
                    let values = ranked
                        .iter()
                        .map(|entity| {
                            let (_, days) = &per_owner[&entity.name];
                            (entity.name.clone(), days[index])
                        })
                        .collect();
                    BreakdownDay {
                        date: *date,
                        values,
                    }
                })
                .collect();

            OwnerBreakdown {
                owner_id,
                owner_name,
                top: ranked,
                daily,
            }
        })
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use core_kernel::Currency;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn arbitrary_entities() -> impl Strategy<Value = Vec<RankedEntity>> {
        proptest::collection::vec(
            ("[a-z]{1,8}", -1_000_000i64..1_000_000i64),
            0..40,
        )
        .prop_map(|pairs| {
            pairs
                .into_iter()
                .map(|(name, minor)| RankedEntity {
                    id: name.clone(),
                    name,
                    total: Money::new(Decimal::new(minor, 2), Currency::USD),
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn top_n_never_pads(entities in arbitrary_entities(), n in 0usize..50) {
            let ranked = top_n(entities.clone(), n);
            prop_assert_eq!(ranked.len(), entities.len().min(n));
        }

        #[test]
        fn top_n_is_sorted(entities in arbitrary_entities(), n in 0usize..50) {
            let ranked = top_n(entities, n);
            for pair in ranked.windows(2) {
                let ordered = pair[0].total.amount() > pair[1].total.amount()
                    || (pair[0].total.amount() == pair[1].total.amount()
                        && pair[0].name <= pair[1].name);
                prop_assert!(ordered);
            }
        }

        #[test]
        fn top_n_idempotent(entities in arbitrary_entities(), n in 0usize..50) {
            let once = top_n(entities, n);
            let twice = top_n(once.clone(), n);
            prop_assert_eq!(once, twice);
        }
    }
}

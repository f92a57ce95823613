//! Ledger data model
//!
//! The raw payload arrives from the external data service in one of two
//! shapes: a nested mapping of date -> salesperson -> client -> fund ->
//! amount, or a flat list of records. Both are modeled as one tagged union
//! resolved once at the boundary; nothing downstream branches on the shape
//! again. The normalized form is an immutable, date-sorted snapshot that
//! every aggregation request reads without copying.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use core_kernel::{
    ClientId, Currency, DateAxis, FundId, LedgerVersion, Money, Province, SalesPersonId,
};

/// Sentinel province for clients with no recorded province
pub const UNKNOWN_PROVINCE: &str = "Unknown";

/// Sentinel phone for clients with no recorded phone number
pub const MISSING_PHONE: &str = "Not provided";

/// One normalized income attribution event
///
/// Immutable once ingested. The amount may be negative (reversal or
/// adjustment).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncomeEvent {
    pub date: NaiveDate,
    pub sales_person: SalesPersonId,
    pub client: ClientId,
    pub fund: FundId,
    pub amount: Money,
}

/// Nested raw shape: salesperson -> client -> fund -> amount
///
/// A `null` amount leaf is treated as zero, never as an error.
pub type RawDay = BTreeMap<String, BTreeMap<String, BTreeMap<String, Option<Decimal>>>>;

/// One record of the flat raw shape
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    pub date: String,
    #[serde(alias = "salesPerson")]
    pub sales_person: String,
    pub client: String,
    pub fund: String,
    /// Missing or null income is treated as zero
    #[serde(default, alias = "amount")]
    pub income: Option<Decimal>,
}

/// Raw ledger payload as received from the data source
///
/// Untrusted and possibly partial; resolved exactly once by
/// [`crate::normalize`].
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawLedger {
    /// Mapping of date string to the nested per-day hierarchy
    Nested(BTreeMap<String, RawDay>),
    /// Flat list of records
    Flat(Vec<RawRecord>),
}

impl RawLedger {
    /// Returns true when the payload carries no entries at all
    pub fn is_empty(&self) -> bool {
        match self {
            RawLedger::Nested(days) => days.is_empty(),
            RawLedger::Flat(records) => records.is_empty(),
        }
    }
}

/// Reference record for a salesperson
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalesPersonRecord {
    pub name: Option<String>,
}

/// Reference record for a client; attributes may be absent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientRecord {
    pub name: Option<String>,
    pub province: Option<String>,
    pub phone: Option<String>,
}

/// Reference record for a fund
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FundRecord {
    pub name: Option<String>,
}

/// Lookup tables merged in by the normalizer
///
/// Absence of an entry never fails a request; the normalizer substitutes
/// sentinels instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceTables {
    pub sales_people: BTreeMap<SalesPersonId, SalesPersonRecord>,
    pub clients: BTreeMap<ClientId, ClientRecord>,
    pub funds: BTreeMap<FundId, FundRecord>,
}

/// A salesperson as resolved against the reference tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalesPersonProfile {
    pub id: SalesPersonId,
    pub name: String,
}

/// A client as resolved against the reference tables
///
/// Province and phone always carry a value: the recorded one or the
/// defined sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientProfile {
    pub id: ClientId,
    pub name: String,
    pub province: Province,
    pub phone: String,
}

/// A fund as resolved against the reference tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FundProfile {
    pub id: FundId,
    pub name: String,
}

/// An immutable, normalized ledger snapshot
///
/// Events are sorted by date, the axis is the shared x-axis for every
/// series derived from this snapshot, and the entity catalogs are ordered
/// by first appearance in the date-sorted event stream.
#[derive(Debug, Clone)]
pub struct LedgerSnapshot {
    version: LedgerVersion,
    currency: Currency,
    events: Vec<IncomeEvent>,
    axis: DateAxis,
    sales_people: Vec<SalesPersonProfile>,
    clients: Vec<ClientProfile>,
    funds: Vec<FundProfile>,
    client_index: HashMap<ClientId, usize>,
}

impl LedgerSnapshot {
    /// Assembles a snapshot from normalized parts
    ///
    /// Callers are expected to pass date-sorted events and catalogs in
    /// first-appearance order; [`crate::normalize`] is the only producer.
    pub(crate) fn new(
        version: LedgerVersion,
        currency: Currency,
        events: Vec<IncomeEvent>,
        axis: DateAxis,
        sales_people: Vec<SalesPersonProfile>,
        clients: Vec<ClientProfile>,
        funds: Vec<FundProfile>,
    ) -> Self {
        let client_index = clients
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id.clone(), i))
            .collect();
        Self {
            version,
            currency,
            events,
            axis,
            sales_people,
            clients,
            funds,
            client_index,
        }
    }

    pub fn version(&self) -> LedgerVersion {
        self.version
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Date-sorted income events
    pub fn events(&self) -> &[IncomeEvent] {
        &self.events
    }

    /// The shared date axis for all series from this snapshot
    pub fn axis(&self) -> &DateAxis {
        &self.axis
    }

    /// Salespeople in first-appearance order
    pub fn sales_people(&self) -> &[SalesPersonProfile] {
        &self.sales_people
    }

    /// Clients in first-appearance order
    pub fn clients(&self) -> &[ClientProfile] {
        &self.clients
    }

    /// Funds in first-appearance order
    pub fn funds(&self) -> &[FundProfile] {
        &self.funds
    }

    /// Looks up a client profile by id
    pub fn client(&self, id: &ClientId) -> Option<&ClientProfile> {
        self.client_index.get(id).map(|&i| &self.clients[i])
    }

    /// Province of the client attached to an event
    ///
    /// Every catalog client carries a province (sentinel-substituted), so
    /// an event referencing an unknown client resolves to the sentinel too.
    pub fn event_province(&self, event: &IncomeEvent) -> Province {
        self.client(&event.client)
            .map(|c| c.province.clone())
            .unwrap_or_else(|| Province::new(UNKNOWN_PROVINCE))
    }
}

/// Outcome of normalization: either a usable snapshot or the explicit
/// "no data" state
///
/// `Empty` is not an error; it lets downstream render a no-data panel.
#[derive(Debug, Clone)]
pub enum NormalizedLedger {
    Empty,
    Loaded(LedgerSnapshot),
}

impl NormalizedLedger {
    pub fn is_empty(&self) -> bool {
        matches!(self, NormalizedLedger::Empty)
    }

    /// The snapshot, if any data was present
    pub fn snapshot(&self) -> Option<&LedgerSnapshot> {
        match self {
            NormalizedLedger::Empty => None,
            NormalizedLedger::Loaded(snapshot) => Some(snapshot),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_ledger_parses_nested_shape() {
        let payload = serde_json::json!({
            "2024-01-01": {
                "Alice": { "Client A": { "Fund X": 100 } }
            }
        });

        let raw: RawLedger = serde_json::from_value(payload).unwrap();
        assert!(matches!(raw, RawLedger::Nested(_)));
        assert!(!raw.is_empty());
    }

    #[test]
    fn test_raw_ledger_parses_flat_shape() {
        let payload = serde_json::json!([
            { "date": "2024-01-01", "sales_person": "Alice", "client": "Client A", "fund": "Fund X", "income": 100 }
        ]);

        let raw: RawLedger = serde_json::from_value(payload).unwrap();
        assert!(matches!(raw, RawLedger::Flat(_)));
    }

    #[test]
    fn test_flat_record_accepts_camel_case_and_missing_income() {
        let payload = serde_json::json!([
            { "date": "2024-01-01", "salesPerson": "Alice", "client": "Client A", "fund": "Fund X" }
        ]);

        let raw: RawLedger = serde_json::from_value(payload).unwrap();
        let RawLedger::Flat(records) = raw else {
            panic!("expected flat shape");
        };
        assert_eq!(records[0].sales_person, "Alice");
        assert_eq!(records[0].income, None);
    }

    #[test]
    fn test_raw_ledger_rejects_scalar_payload() {
        let result: Result<RawLedger, _> = serde_json::from_value(serde_json::json!(42));
        assert!(result.is_err());
    }

    #[test]
    fn test_null_amount_leaf_parses() {
        let payload = serde_json::json!({
            "2024-01-01": {
                "Alice": { "Client A": { "Fund X": null } }
            }
        });

        let raw: RawLedger = serde_json::from_value(payload).unwrap();
        assert!(matches!(raw, RawLedger::Nested(_)));
    }
}

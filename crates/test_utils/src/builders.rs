//! Test Data Builders
//!
//! Builder patterns for constructing raw ledger payloads and reference
//! tables with only the fields a test cares about.

use rust_decimal::Decimal;
use std::collections::BTreeMap;

use core_kernel::{ClientId, FundId, SalesPersonId};
use domain_analytics::{
    ClientRecord, FundRecord, RawLedger, RawRecord, ReferenceTables, SalesPersonRecord,
};

/// Builder for raw ledger payloads
///
/// Entries accumulate in insertion order; `build` emits the nested shape
/// and `build_flat` emits the same data as a flat record list.
#[derive(Debug, Default)]
pub struct RawLedgerBuilder {
    entries: Vec<(String, String, String, String, Option<Decimal>)>,
}

impl RawLedgerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one income entry
    pub fn with_entry(
        mut self,
        date: &str,
        sales_person: &str,
        client: &str,
        fund: &str,
        amount: Decimal,
    ) -> Self {
        self.entries.push((
            date.to_string(),
            sales_person.to_string(),
            client.to_string(),
            fund.to_string(),
            Some(amount),
        ));
        self
    }

    /// Adds an entry whose amount is missing (normalizes to zero)
    pub fn with_null_entry(
        mut self,
        date: &str,
        sales_person: &str,
        client: &str,
        fund: &str,
    ) -> Self {
        self.entries.push((
            date.to_string(),
            sales_person.to_string(),
            client.to_string(),
            fund.to_string(),
            None,
        ));
        self
    }

    /// Builds the nested shape: date -> salesperson -> client -> fund
    pub fn build(self) -> RawLedger {
        let mut days: BTreeMap<String, _> = BTreeMap::new();
        for (date, sales_person, client, fund, amount) in self.entries {
            let day: &mut BTreeMap<String, BTreeMap<String, BTreeMap<String, Option<Decimal>>>> =
                days.entry(date).or_default();
            day.entry(sales_person)
                .or_default()
                .entry(client)
                .or_default()
                .insert(fund, amount);
        }
        RawLedger::Nested(days)
    }

    /// Builds the flat shape with the same entries
    pub fn build_flat(self) -> RawLedger {
        RawLedger::Flat(
            self.entries
                .into_iter()
                .map(|(date, sales_person, client, fund, income)| RawRecord {
                    date,
                    sales_person,
                    client,
                    fund,
                    income,
                })
                .collect(),
        )
    }
}

/// Builder for reference lookup tables
#[derive(Debug, Default)]
pub struct ReferenceTablesBuilder {
    tables: ReferenceTables,
}

impl ReferenceTablesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sales_person(mut self, id: &str, name: &str) -> Self {
        self.tables.sales_people.insert(
            SalesPersonId::new(id),
            SalesPersonRecord {
                name: Some(name.to_string()),
            },
        );
        self
    }

    pub fn with_client(mut self, id: &str, record: ClientRecord) -> Self {
        self.tables.clients.insert(ClientId::new(id), record);
        self
    }

    /// Client record carrying only a province
    pub fn with_client_province(self, id: &str, province: &str) -> Self {
        self.with_client(
            id,
            ClientRecord {
                name: None,
                province: Some(province.to_string()),
                phone: None,
            },
        )
    }

    pub fn with_fund(mut self, id: &str, name: &str) -> Self {
        self.tables.funds.insert(
            FundId::new(id),
            FundRecord {
                name: Some(name.to_string()),
            },
        );
        self
    }

    pub fn build(self) -> ReferenceTables {
        self.tables
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_nested_and_flat_builds_carry_same_entries() {
        let builder = || {
            RawLedgerBuilder::new()
                .with_entry("2024-01-01", "Alice", "Client A", "Fund X", dec!(100))
                .with_null_entry("2024-01-02", "Bob", "Client B", "Fund Y")
        };

        let RawLedger::Nested(days) = builder().build() else {
            panic!("expected nested shape");
        };
        assert_eq!(days.len(), 2);

        let RawLedger::Flat(records) = builder().build_flat() else {
            panic!("expected flat shape");
        };
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].income, None);
    }

    #[test]
    fn test_reference_builder_fills_tables() {
        let tables = ReferenceTablesBuilder::new()
            .with_sales_person("Alice", "Alice Zhang")
            .with_client_province("Client A", "Guangdong")
            .with_fund("Fund X", "Growth Fund")
            .build();

        assert_eq!(tables.sales_people.len(), 1);
        assert_eq!(
            tables.clients[&ClientId::new("Client A")].province.as_deref(),
            Some("Guangdong")
        );
        assert_eq!(tables.funds.len(), 1);
    }
}

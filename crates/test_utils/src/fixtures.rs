//! Pre-built ledgers with known aggregation results

use once_cell::sync::Lazy;
use rust_decimal_macros::dec;

use domain_analytics::{RawLedger, ReferenceTables};

use crate::builders::{RawLedgerBuilder, ReferenceTablesBuilder};

/// Ledger fixtures with hand-checked expected values
pub struct LedgerFixtures;

impl LedgerFixtures {
    /// Two salespeople over three dates, including a reversal
    ///
    /// Expected: Alice totals 80 (100 then -20 with an inactive day in
    /// between), Bob totals 75, grand total 155.
    pub fn with_reversal() -> RawLedger {
        RawLedgerBuilder::new()
            .with_entry("2024-01-01", "Alice", "ClientX", "FundA", dec!(100))
            .with_entry("2024-01-01", "Bob", "ClientY", "FundB", dec!(60))
            .with_entry("2024-01-02", "Bob", "ClientY", "FundB", dec!(15))
            .with_entry("2024-01-03", "Alice", "ClientX", "FundA", dec!(-20))
            .build()
    }

    /// Reference tables matching [`Self::with_reversal`]
    pub fn with_reversal_references() -> ReferenceTables {
        ReferenceTablesBuilder::new()
            .with_client_province("ClientX", "Guangdong")
            .with_fund("FundA", "Growth Fund")
            .build()
    }

    /// An empty nested payload
    pub fn empty() -> RawLedger {
        RawLedgerBuilder::new().build()
    }

    /// A month of activity across three salespeople
    pub fn month_of_activity() -> RawLedger {
        MONTH_OF_ACTIVITY.clone()
    }
}

static MONTH_OF_ACTIVITY: Lazy<RawLedger> = Lazy::new(|| {
    let people = ["Zhang Wei", "Li Na", "Wang Fang"];
    let clients = ["Acme Trading", "Blue Harbor", "Crestview Ltd", "Delta Partners"];
    let funds = ["Growth Fund", "Income Fund", "Balanced Fund"];

    let mut builder = RawLedgerBuilder::new();
    for day in 1..=30u32 {
        // Deterministic rotation so every entity appears with an uneven
        // but reproducible cadence.
        let person = people[(day as usize) % people.len()];
        let client = clients[(day as usize) % clients.len()];
        let fund = funds[(day as usize) % funds.len()];
        let amount = rust_decimal::Decimal::from(50 + (day as i64 * 7) % 400);
        builder = builder.with_entry(&format!("2024-04-{day:02}"), person, client, fund, amount);
    }
    builder.build()
});

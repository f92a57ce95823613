//! Funds panel DTOs

use rust_decimal::Decimal;
use serde::Serialize;

use domain_analytics::FundsView;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundsResponse {
    pub funds: Vec<FundRowDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundRowDto {
    pub name: String,
    pub income: Decimal,
}

impl FundsResponse {
    /// The no-data panel
    pub fn empty() -> Self {
        Self { funds: Vec::new() }
    }
}

impl From<FundsView> for FundsResponse {
    fn from(view: FundsView) -> Self {
        Self {
            funds: view
                .funds
                .into_iter()
                .map(|row| FundRowDto {
                    name: row.name,
                    income: row.income.amount(),
                })
                .collect(),
        }
    }
}

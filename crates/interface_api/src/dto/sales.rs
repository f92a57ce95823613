//! Sales panel DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use domain_analytics::{BreakdownDay, ContributionDay, SalesView};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesResponse {
    pub mode: String,
    pub sales_persons: Vec<SalesPersonDto>,
    pub daily_contribution: Vec<ContributionDayDto>,
    pub individual_performance: BTreeMap<String, IndividualPerformanceDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesPersonDto {
    pub name: String,
    pub total_clients: usize,
    pub cumulative_income: Decimal,
    pub top_clients: Vec<RankedRowDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedRowDto {
    pub name: String,
    pub income: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionDayDto {
    pub date: NaiveDate,
    pub values: BTreeMap<String, Decimal>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndividualPerformanceDto {
    pub clients: Vec<ContributionDayDto>,
    pub funds: Vec<ContributionDayDto>,
}

impl SalesResponse {
    /// The no-data panel
    pub fn empty(mode: &str) -> Self {
        Self {
            mode: mode.to_string(),
            sales_persons: Vec::new(),
            daily_contribution: Vec::new(),
            individual_performance: BTreeMap::new(),
        }
    }
}

impl From<SalesView> for SalesResponse {
    fn from(view: SalesView) -> Self {
        Self {
            mode: view.mode.as_str().to_string(),
            sales_persons: view
                .sales_persons
                .into_iter()
                .map(|summary| SalesPersonDto {
                    name: summary.name,
                    total_clients: summary.total_clients,
                    cumulative_income: summary.cumulative_income.amount(),
                    top_clients: summary
                        .top_clients
                        .into_iter()
                        .map(|entity| RankedRowDto {
                            name: entity.name,
                            income: entity.total.amount(),
                        })
                        .collect(),
                })
                .collect(),
            daily_contribution: view
                .contribution
                .iter()
                .map(ContributionDayDto::from)
                .collect(),
            individual_performance: view
                .individual_performance
                .into_iter()
                .map(|(name, perf)| {
                    (
                        name,
                        IndividualPerformanceDto {
                            clients: perf.clients.iter().map(ContributionDayDto::from).collect(),
                            funds: perf.funds.iter().map(ContributionDayDto::from).collect(),
                        },
                    )
                })
                .collect(),
        }
    }
}

impl From<&ContributionDay> for ContributionDayDto {
    fn from(day: &ContributionDay) -> Self {
        Self {
            date: day.date,
            values: day
                .values
                .iter()
                .map(|(name, value)| (name.clone(), value.amount()))
                .collect(),
        }
    }
}

impl From<&BreakdownDay> for ContributionDayDto {
    fn from(day: &BreakdownDay) -> Self {
        Self {
            date: day.date,
            values: day
                .values
                .iter()
                .map(|(name, value)| (name.clone(), value.amount()))
                .collect(),
        }
    }
}

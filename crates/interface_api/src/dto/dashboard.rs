//! Dashboard panel DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use domain_analytics::{DashboardView, RankedEntity, SeriesPoint};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub total_income: Decimal,
    pub total_sales_persons: usize,
    pub total_clients: usize,
    pub total_funds: usize,
    pub top_sales_person: Option<LeaderDto>,
    pub top_client: Option<LeaderDto>,
    pub top_fund: Option<LeaderDto>,
    pub income_trend: Vec<TrendPointDto>,
    /// Positive-total provinces only, for the map rendering
    pub provinces: Vec<ProvinceSliceDto>,
    /// Every province row, including zero and negative totals
    pub province_table: Vec<ProvinceSliceDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderDto {
    pub name: String,
    pub total: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPointDto {
    pub date: NaiveDate,
    pub value: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvinceSliceDto {
    pub name: String,
    pub value: Decimal,
}

impl DashboardResponse {
    /// The no-data panel
    pub fn empty() -> Self {
        Self {
            total_income: Decimal::ZERO,
            total_sales_persons: 0,
            total_clients: 0,
            total_funds: 0,
            top_sales_person: None,
            top_client: None,
            top_fund: None,
            income_trend: Vec::new(),
            provinces: Vec::new(),
            province_table: Vec::new(),
        }
    }
}

impl From<DashboardView> for DashboardResponse {
    fn from(view: DashboardView) -> Self {
        Self {
            total_income: view.total_income.amount(),
            total_sales_persons: view.total_sales_people,
            total_clients: view.total_clients,
            total_funds: view.total_funds,
            top_sales_person: view.top_sales_person.map(LeaderDto::from),
            top_client: view.top_client.map(LeaderDto::from),
            top_fund: view.top_fund.map(LeaderDto::from),
            income_trend: view.income_trend.iter().map(TrendPointDto::from).collect(),
            provinces: view
                .provinces
                .geographic()
                .into_iter()
                .map(|row| ProvinceSliceDto {
                    name: row.key,
                    value: row.total.amount(),
                })
                .collect(),
            province_table: view
                .provinces
                .tabular()
                .iter()
                .map(|row| ProvinceSliceDto {
                    name: row.key.clone(),
                    value: row.total.amount(),
                })
                .collect(),
        }
    }
}

impl From<RankedEntity> for LeaderDto {
    fn from(entity: RankedEntity) -> Self {
        Self {
            name: entity.name,
            total: entity.total.amount(),
        }
    }
}

impl From<&SeriesPoint> for TrendPointDto {
    fn from(point: &SeriesPoint) -> Self {
        Self {
            date: point.date,
            value: point.value.amount(),
        }
    }
}

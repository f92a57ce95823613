//! Forecast panel DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use domain_analytics::ForecastView;

/// Parallel arrays, one entry per projected day
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResponse {
    pub dates: Vec<NaiveDate>,
    pub baseline_forecast: Vec<Decimal>,
    pub trend_forecast: Vec<Decimal>,
}

impl ForecastResponse {
    /// The no-data panel
    pub fn empty() -> Self {
        Self {
            dates: Vec::new(),
            baseline_forecast: Vec::new(),
            trend_forecast: Vec::new(),
        }
    }
}

impl From<ForecastView> for ForecastResponse {
    fn from(view: ForecastView) -> Self {
        let mut dates = Vec::with_capacity(view.points.len());
        let mut baseline_forecast = Vec::with_capacity(view.points.len());
        let mut trend_forecast = Vec::with_capacity(view.points.len());
        for point in view.points {
            dates.push(point.date);
            baseline_forecast.push(point.baseline.amount());
            trend_forecast.push(point.trend.amount());
        }
        Self {
            dates,
            baseline_forecast,
            trend_forecast,
        }
    }
}

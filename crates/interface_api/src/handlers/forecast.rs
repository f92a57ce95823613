//! Forecast panel handler

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use domain_analytics::{compose_forecast_view, FORECAST_HORIZON_DAYS};

use crate::cache::ViewKey;
use crate::dto::forecast::ForecastResponse;
use crate::error::ApiError;
use crate::handlers::{to_value, PanelQuery};
use crate::AppState;

/// Cumulative income projected thirty days past the last ledger date
pub async fn get_forecast(
    State(state): State<AppState>,
    Query(query): Query<PanelQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let scope = query.scope()?;
    let ledger = state.ledger(scope).await?;

    let Some(snapshot) = ledger.snapshot() else {
        return Ok(Json(to_value(ForecastResponse::empty())?));
    };

    let key = ViewKey {
        version: snapshot.version(),
        panel: "forecast",
        mode: "-",
        search: String::new(),
    };
    if scope.is_none() {
        if let Some(hit) = state.views.get(&key) {
            return Ok(Json((*hit).clone()));
        }
    }

    let value = to_value(ForecastResponse::from(compose_forecast_view(
        snapshot,
        FORECAST_HORIZON_DAYS,
    )))?;
    if scope.is_none() {
        state.views.insert(key, Arc::new(value.clone()));
    }
    Ok(Json(value))
}

//! Dashboard panel handler

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use domain_analytics::compose_dashboard_view;

use crate::cache::ViewKey;
use crate::dto::dashboard::DashboardResponse;
use crate::error::ApiError;
use crate::handlers::{to_value, PanelQuery};
use crate::AppState;

/// Headline totals, top performers, income trend, and province rollup
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<PanelQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let scope = query.scope()?;
    let ledger = state.ledger(scope).await?;

    let Some(snapshot) = ledger.snapshot() else {
        return Ok(Json(to_value(DashboardResponse::empty())?));
    };

    let key = ViewKey {
        version: snapshot.version(),
        panel: "dashboard",
        mode: "-",
        search: String::new(),
    };
    if scope.is_none() {
        if let Some(hit) = state.views.get(&key) {
            return Ok(Json((*hit).clone()));
        }
    }

    let value = to_value(DashboardResponse::from(compose_dashboard_view(snapshot)))?;
    if scope.is_none() {
        state.views.insert(key, Arc::new(value.clone()));
    }
    Ok(Json(value))
}

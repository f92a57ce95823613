//! Sales panel handler

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use domain_analytics::compose_sales_view;

use crate::cache::ViewKey;
use crate::dto::sales::SalesResponse;
use crate::error::ApiError;
use crate::handlers::{to_value, PanelQuery};
use crate::AppState;

/// Per-salesperson summaries, contribution series, and breakdowns
pub async fn get_sales(
    State(state): State<AppState>,
    Query(query): Query<PanelQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let scope = query.scope()?;
    let mode = query.mode();
    let ledger = state.ledger(scope).await?;

    let Some(snapshot) = ledger.snapshot() else {
        return Ok(Json(to_value(SalesResponse::empty(mode.as_str()))?));
    };

    let key = ViewKey {
        version: snapshot.version(),
        panel: "sales",
        mode: mode.as_str(),
        search: query.search.clone(),
    };
    if scope.is_none() {
        if let Some(hit) = state.views.get(&key) {
            return Ok(Json((*hit).clone()));
        }
    }

    let view = compose_sales_view(snapshot, mode, &query.search);
    let value = to_value(SalesResponse::from(view))?;
    if scope.is_none() {
        state.views.insert(key, Arc::new(value.clone()));
    }
    Ok(Json(value))
}

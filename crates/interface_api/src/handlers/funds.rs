//! Funds panel handler

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use domain_analytics::compose_funds_view;

use crate::cache::ViewKey;
use crate::dto::funds::FundsResponse;
use crate::error::ApiError;
use crate::handlers::{to_value, PanelQuery};
use crate::AppState;

/// Funds ranked by total income, filtered by name
pub async fn get_funds(
    State(state): State<AppState>,
    Query(query): Query<PanelQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let scope = query.scope()?;
    let ledger = state.ledger(scope).await?;

    let Some(snapshot) = ledger.snapshot() else {
        return Ok(Json(to_value(FundsResponse::empty())?));
    };

    let key = ViewKey {
        version: snapshot.version(),
        panel: "funds",
        mode: "-",
        search: query.search.clone(),
    };
    if scope.is_none() {
        if let Some(hit) = state.views.get(&key) {
            return Ok(Json((*hit).clone()));
        }
    }

    let value = to_value(FundsResponse::from(compose_funds_view(
        snapshot,
        &query.search,
    )))?;
    if scope.is_none() {
        state.views.insert(key, Arc::new(value.clone()));
    }
    Ok(Json(value))
}

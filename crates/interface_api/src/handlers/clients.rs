//! Clients panel handler

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use domain_analytics::compose_clients_view;

use crate::cache::ViewKey;
use crate::dto::clients::ClientsResponse;
use crate::error::ApiError;
use crate::handlers::{to_value, PanelQuery};
use crate::AppState;

/// Client coverage grouped by salesperson, filtered by owner-or-client match
pub async fn get_clients(
    State(state): State<AppState>,
    Query(query): Query<PanelQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let scope = query.scope()?;
    let ledger = state.ledger(scope).await?;

    let Some(snapshot) = ledger.snapshot() else {
        return Ok(Json(to_value(ClientsResponse::empty())?));
    };

    let key = ViewKey {
        version: snapshot.version(),
        panel: "clients",
        mode: "-",
        search: query.search.clone(),
    };
    if scope.is_none() {
        if let Some(hit) = state.views.get(&key) {
            return Ok(Json((*hit).clone()));
        }
    }

    let value = to_value(ClientsResponse::from(compose_clients_view(
        snapshot,
        &query.search,
    )))?;
    if scope.is_none() {
        state.views.insert(key, Arc::new(value.clone()));
    }
    Ok(Json(value))
}

//! Shipment search handler.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::{Deserialize, Serialize};

use shipment_tracker_core::{Permission, SearchKind, Shipment};

use crate::db::shipments::normalize_query;
use crate::error::{AppError, Result};
use crate::middleware::RequireSession;
use crate::state::AppState;

const INVALID_SEARCH: &str = "Invalid search parameters";

/// Query string of `GET /api/shipments/search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipment: Option<Shipment>,
}

/// Look up a shipment by container, bill of lading or booking number.
///
/// A search that matches nothing is a successful `{"found": false}`.
///
/// # Errors
///
/// Returns 401 without a session, 403 without the `track` permission and
/// 400 for an unknown `type` or empty `value`.
pub async fn search(
    session: RequireSession,
    State(state): State<AppState>,
    params: std::result::Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResponse>> {
    session.require(Permission::Track)?;

    let Query(params) = params.map_err(|e| {
        tracing::debug!(error = %e, "Unparseable search query");
        AppError::BadRequest(INVALID_SEARCH.to_string())
    })?;

    let kind = params
        .kind
        .parse::<SearchKind>()
        .map_err(|_| AppError::BadRequest(INVALID_SEARCH.to_string()))?;
    if normalize_query(&params.value).is_empty() {
        return Err(AppError::BadRequest(INVALID_SEARCH.to_string()));
    }

    let shipment = state.shipments().find_by(kind, &params.value).cloned();
    tracing::info!(kind = %kind, found = shipment.is_some(), "Shipment search");

    Ok(Json(SearchResponse {
        found: shipment.is_some(),
        shipment,
    }))
}

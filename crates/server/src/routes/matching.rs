use crate::error::ServerResult;
use crate::state::ServerState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use reco::{FeatureItem, FeatureMap};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Match request
#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    /// Feature name to scalar value
    #[serde(default)]
    pub query: FeatureMap,

    /// Maximum results; the engine default applies when absent
    #[serde(default)]
    pub n: Option<usize>,
}

/// Match response; each entry is `[item_id, score]`
#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub matches: Vec<(String, f64)>,
}

/// Catalog upload
#[derive(Debug, Deserialize)]
pub struct AddItemsRequest {
    #[serde(default)]
    pub items: Vec<FeatureItem>,
}

#[derive(Debug, Serialize)]
pub struct AddItemsResponse {
    pub success: bool,
    /// Items in this request
    pub stored: usize,
    /// Items in the catalog afterwards
    pub total: usize,
}

/// Rank stored catalog items by feature overlap with the query.
///
/// Equal values contribute 1 per key; numeric pairs contribute
/// `1 / (1 + |a - b|)`. Keys missing from an item contribute nothing.
pub async fn match_routes(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<MatchRequest>, JsonRejection>,
) -> ServerResult<impl IntoResponse> {
    let Json(request) = payload?;
    let hits = state.registry.find_similar(&request.query, request.n);

    Ok(Json(MatchResponse {
        matches: hits.into_iter().map(Into::into).collect(),
    }))
}

/// Store or replace catalog items.
pub async fn add_items(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<AddItemsRequest>, JsonRejection>,
) -> ServerResult<impl IntoResponse> {
    let Json(request) = payload?;
    let stored = state.registry.add_items(request.items);
    let total = state.registry.matcher().len();

    tracing::debug!(stored, total, "catalog items stored");

    Ok(Json(AddItemsResponse {
        success: true,
        stored,
        total,
    }))
}

use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use reco::{InteractionRecord, ModelRegistry, RecommendationSource};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Identifier accepted as either a JSON string or an integer
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Text(String),
    Number(i64),
}

impl From<WireId> for String {
    fn from(id: WireId) -> Self {
        match id {
            WireId::Text(s) => s,
            WireId::Number(n) => n.to_string(),
        }
    }
}

/// One interaction in a training batch
#[derive(Debug, Deserialize)]
pub struct WireInteraction {
    pub user_id: WireId,
    pub item_id: WireId,
    #[serde(default)]
    pub rating: Option<f64>,
}

impl From<WireInteraction> for InteractionRecord {
    fn from(wire: WireInteraction) -> Self {
        let record = InteractionRecord::new(wire.user_id, wire.item_id);
        match wire.rating {
            Some(rating) => record.with_rating(rating),
            None => record,
        }
    }
}

/// Training request
#[derive(Debug, Deserialize)]
pub struct TrainRequest {
    #[serde(default)]
    pub interactions: Vec<WireInteraction>,
}

/// Training response
#[derive(Debug, Serialize)]
pub struct TrainResponse {
    pub success: bool,
    pub trained_on: usize,
}

/// Recommendation request
#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    /// Items the caller has already interacted with
    #[serde(rename = "orderHistory", default)]
    pub order_history: Vec<WireId>,

    /// Maximum results; the engine default applies when absent
    #[serde(default)]
    pub n: Option<usize>,
}

/// Recommendation response; each entry is `[item_id, score]`
#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub recommendations: Vec<(String, u64)>,
    pub source: RecommendationSource,
}

/// Refit the co-occurrence model from a batch of interactions.
///
/// The table is built on the blocking pool and installed only if the request
/// is still within its deadline, so a timed-out request leaves the previous
/// model in place. An empty batch also keeps the current model.
pub async fn train(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<TrainRequest>, JsonRejection>,
) -> ServerResult<impl IntoResponse> {
    let Json(request) = payload?;
    let interactions: Vec<InteractionRecord> =
        request.interactions.into_iter().map(Into::into).collect();

    let build =
        tokio::task::spawn_blocking(move || ModelRegistry::prepare_training(&interactions));
    let prepared = tokio::time::timeout(state.config.timeout(), build)
        .await
        .map_err(|_| ServerError::Timeout)??;

    let trained_on = state.registry.commit_training(prepared);

    tracing::info!(trained_on, "recommender trained");

    Ok(Json(TrainResponse {
        success: true,
        trained_on,
    }))
}

/// Recommend items for an order history.
///
/// An empty history is answered from the configured popular list.
pub async fn recommend_food(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> ServerResult<impl IntoResponse> {
    let Json(request) = payload?;
    let history: Vec<String> = request.order_history.into_iter().map(Into::into).collect();

    let outcome = state.registry.recommend(&history, request.n);

    Ok(Json(RecommendResponse {
        recommendations: outcome.recommendations.into_iter().map(Into::into).collect(),
        source: outcome.source,
    }))
}

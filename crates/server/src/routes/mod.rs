//! API route handlers
//!
//! - `health`: liveness, readiness, metrics and engine statistics
//! - `recommend`: co-occurrence training and food recommendations
//! - `matching`: route matching and catalog uploads

pub mod health;
pub mod matching;
pub mod recommend;

use crate::error::{ServerError, ServerResult};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// Service info and endpoint list (GET /)
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "Reco Server",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "POST /recommend/train",
            "POST /recommend/food",
            "POST /match/routes",
            "POST /match/items",
            "GET /health",
            "GET /ready",
            "GET /metrics",
            "GET /stats"
        ]
    })))
}

/// 404 Not Found handler
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}

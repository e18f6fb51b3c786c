//! Reco Server - HTTP REST API for co-occurrence recommendations and
//! feature matching
//!
//! Wraps a [`reco::ModelRegistry`] in an axum service:
//!
//! - **Recommendations**: train the co-occurrence model and rank items
//!   against an order history, with a popular-items fallback
//! - **Matching**: upload catalog items and rank them against a feature query
//! - **Health & Metrics**: liveness/readiness probes, engine statistics and
//!   Prometheus metrics
//!
//! # Features
//!
//! - **Authentication**: optional API key authentication with rate limiting
//! - **Middleware**: compression, CORS, request ID tracking, structured logging
//! - **Configuration**: `server.*` file overridden by `RECO_SERVER__*`
//!   environment variables
//! - **Graceful Shutdown**: SIGTERM and Ctrl+C
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! ## Public
//!
//! - `GET /` - service information
//! - `GET /health` - liveness probe
//! - `GET /ready` - readiness probe with per-model item counts
//! - `GET /metrics` - Prometheus metrics
//!
//! ## Protected (when API keys are configured)
//!
//! - `POST /recommend/train` - refit the co-occurrence model
//! - `POST /recommend/food` - recommendations for an order history
//! - `POST /match/routes` - rank catalog items against a feature query
//! - `POST /match/items` - store catalog items
//! - `GET /stats` - engine statistics

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;
pub mod telemetry;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
pub use telemetry::{install_prometheus, PrometheusMetrics};

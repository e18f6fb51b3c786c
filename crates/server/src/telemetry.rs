//! Bridges the engine metrics hooks onto the `metrics` facade.
//!
//! [`PrometheusMetrics`] is attached to both engines when the server state is
//! built. Nothing is exported until a recorder is installed with
//! [`install_prometheus`]; before that the facade calls are no-ops.

use std::time::Duration;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use reco::{MatchMetrics, RecommendMetrics};

/// Engine observer that reports through the global `metrics` recorder.
#[derive(Debug, Default, Clone, Copy)]
pub struct PrometheusMetrics;

impl RecommendMetrics for PrometheusMetrics {
    fn record_fit(&self, latency: Duration, interactions: usize, items: usize) {
        metrics::counter!("reco_fit_total").increment(1);
        metrics::histogram!("reco_fit_seconds").record(latency.as_secs_f64());
        metrics::gauge!("reco_fit_interactions").set(interactions as f64);
        metrics::gauge!("reco_model_items").set(items as f64);
    }

    fn record_recommend(&self, latency: Duration, history_len: usize, hit_count: usize) {
        metrics::counter!("reco_recommend_total").increment(1);
        metrics::histogram!("reco_recommend_seconds").record(latency.as_secs_f64());
        metrics::histogram!("reco_recommend_history_len").record(history_len as f64);
        if hit_count == 0 {
            metrics::counter!("reco_recommend_empty_total").increment(1);
        }
    }
}

impl MatchMetrics for PrometheusMetrics {
    fn record_add(&self, added: usize, total: usize) {
        metrics::counter!("reco_match_items_added_total").increment(added as u64);
        metrics::gauge!("reco_match_items").set(total as f64);
    }

    fn record_match(&self, latency: Duration, query_keys: usize, hit_count: usize) {
        metrics::counter!("reco_match_total").increment(1);
        metrics::histogram!("reco_match_seconds").record(latency.as_secs_f64());
        metrics::histogram!("reco_match_query_keys").record(query_keys as f64);
        if hit_count == 0 {
            metrics::counter!("reco_match_empty_total").increment(1);
        }
    }
}

/// Install the process-wide Prometheus recorder.
///
/// Fails if another recorder was installed first.
pub fn install_prometheus() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    Ok(handle)
}

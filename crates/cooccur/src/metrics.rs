// Metrics hooks for the `cooccur` crate.
//
// A `RecommendMetrics` implementation is attached per recommender through
// `CoOccurrenceRecommender::with_metrics`, keeping instrumentation decoupled
// from any specific metrics backend.
use std::time::Duration;

/// Metrics observer for recommender operations.
pub trait RecommendMetrics: Send + Sync {
    /// Record a completed fit: wall-clock `latency`, number of `interactions`
    /// consumed and number of distinct `items` registered.
    fn record_fit(&self, latency: Duration, interactions: usize, items: usize);

    /// Record a ranking call: `history_len` entries supplied by the caller and
    /// `hit_count` recommendations returned.
    fn record_recommend(&self, latency: Duration, history_len: usize, hit_count: usize);
}

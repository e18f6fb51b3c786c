// Metrics hooks for the `matcher` crate.
//
// Attach a `MatchMetrics` implementation through
// `FeatureSimilarityMatcher::with_metrics`; the matcher then reports store
// growth and per-query latency and hit counts.
use std::time::Duration;

/// Metrics observer for matcher operations.
pub trait MatchMetrics: Send + Sync {
    /// Record a stored batch of `added` items, after which the store holds
    /// `total` items.
    fn record_add(&self, added: usize, total: usize);

    /// Record the outcome of a query with `query_keys` features that returned
    /// `hit_count` items.
    fn record_match(&self, latency: Duration, query_keys: usize, hit_count: usize);
}

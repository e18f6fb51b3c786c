use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Instant;

use crate::metrics::MatchMetrics;
use crate::score::feature_overlap;
use crate::types::{FeatureItem, FeatureMap, SimilarityHit};


/// Insertion-ordered catalog of feature items.
///
/// Re-adding an id replaces its features in place, so an item keeps the
/// position of its first insertion.
#[derive(Debug, Clone, Default)]
pub struct FeatureStore {
    items: Vec<FeatureItem>,
    positions: HashMap<String, usize>,
}

impl FeatureStore {
    /// Insert or overwrite; returns `true` when the id was new.
    pub fn upsert(&mut self, item: FeatureItem) -> bool {
        match self.positions.get(item.item_id.as_str()) {
            Some(&position) => {
                self.items[position].features = item.features;
                false
            }
            None => {
                self.positions.insert(item.item_id.clone(), self.items.len());
                self.items.push(item);
                true
            }
        }
    }

    pub fn get(&self, item_id: &str) -> Option<&FeatureItem> {
        self.positions
            .get(item_id)
            .map(|&position| &self.items[position])
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeatureItem> {
        self.items.iter()
    }

    /// Score every stored item against `query` and return the top `n`.
    ///
    /// The sort is stable, so equal scores keep insertion order.
    pub fn rank(&self, query: &FeatureMap, n: usize) -> Vec<SimilarityHit> {
        if n == 0 {
            return Vec::new();
        }

        let mut scored: Vec<(usize, f64)> = self
            .items
            .iter()
            .enumerate()
            .map(|(position, item)| (position, feature_overlap(query, &item.features)))
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(n);

        scored
            .into_iter()
            .map(|(position, score)| SimilarityHit {
                item_id: self.items[position].item_id.clone(),
                score,
            })
            .collect()
    }
}

/// Content-based matcher over stored feature items.
///
/// Writers copy-on-write the [`FeatureStore`] under the lock; readers clone
/// the current `Arc` and score without holding it.
pub struct FeatureSimilarityMatcher {
    store: RwLock<Arc<FeatureStore>>,
    metrics: Option<Arc<dyn MatchMetrics>>,
}

impl FeatureSimilarityMatcher {
    /// Construct an empty matcher.
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Arc::new(FeatureStore::default())),
            metrics: None,
        }
    }

    /// Attach a metrics observer.
    pub fn with_metrics(mut self, recorder: Arc<dyn MatchMetrics>) -> Self {
        self.metrics = Some(recorder);
        self
    }

    /// Store `features` under `item_id`, replacing any previous entry.
    pub fn add_item(&self, item_id: impl Into<String>, features: FeatureMap) {
        self.add_items([FeatureItem::new(item_id, features)]);
    }

    /// Store a batch of items; readers observe either none or all of them.
    ///
    /// Returns the number of items in the batch.
    pub fn add_items<I>(&self, items: I) -> usize
    where
        I: IntoIterator<Item = FeatureItem>,
    {
        // Collected before locking; a panicking iterator must not leave a partial batch.
        let batch: Vec<FeatureItem> = items.into_iter().collect();
        let added = batch.len();
        let total = {
            let mut guard = self
                .store
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            let store = Arc::make_mut(&mut guard);
            for item in batch {
                store.upsert(item);
            }
            store.len()
        };

        tracing::debug!(added, total, "feature items stored");
        if let Some(recorder) = &self.metrics {
            recorder.record_add(added, total);
        }
        added
    }

    /// Top `n` stored items by feature overlap with `query`.
    pub fn find_similar(&self, query: &FeatureMap, n: usize) -> Vec<SimilarityHit> {
        let start = Instant::now();
        let hits = self.snapshot().rank(query, n);

        let latency = start.elapsed();
        tracing::debug!(
            query_keys = query.len(),
            n,
            hits = hits.len(),
            "feature similarity ranking complete"
        );
        if let Some(recorder) = &self.metrics {
            recorder.record_match(latency, query.len(), hits.len());
        }
        hits
    }

    pub fn get(&self, item_id: &str) -> Option<FeatureMap> {
        self.snapshot()
            .get(item_id)
            .map(|item| item.features.clone())
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// Consistent view of the current store.
    pub fn snapshot(&self) -> Arc<FeatureStore> {
        self.store
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Default for FeatureSimilarityMatcher {
    fn default() -> Self {
        Self::new()
    }
}

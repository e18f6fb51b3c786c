use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::metrics::RecommendMetrics;
use crate::table::CoOccurrenceTable;
use crate::types::{InteractionRecord, ModelStats, Recommendation};


/// A fitted table plus the time it became visible.
#[derive(Debug, Clone, Default)]
pub struct ModelSnapshot {
    table: CoOccurrenceTable,
    fitted_at: Option<DateTime<Utc>>,
}

impl ModelSnapshot {
    pub fn table(&self) -> &CoOccurrenceTable {
        &self.table
    }

    pub fn fitted_at(&self) -> Option<DateTime<Utc>> {
        self.fitted_at
    }

    pub fn stats(&self) -> ModelStats {
        ModelStats {
            items: self.table.len(),
            pairs: self.table.pair_total(),
            users: self.table.users(),
            interactions: self.table.interactions(),
            fitted_at: self.fitted_at,
        }
    }
}

/// A fully built model that is not yet visible to readers.
#[derive(Debug, Clone)]
pub struct PreparedModel {
    table: CoOccurrenceTable,
    interactions: usize,
    build_time: Duration,
}

impl PreparedModel {
    pub fn table(&self) -> &CoOccurrenceTable {
        &self.table
    }

    /// Number of interactions the model was built from.
    pub fn interactions(&self) -> usize {
        self.interactions
    }
}

/// Item-to-item co-occurrence recommender.
///
/// The visible model is an immutable [`ModelSnapshot`] behind a read-write
/// lock. [`fit`](Self::fit) builds a complete replacement without holding the
/// lock and swaps it in at the end, so readers see either the old model or
/// the new one, never a partial rebuild.
pub struct CoOccurrenceRecommender {
    snapshot: RwLock<Arc<ModelSnapshot>>,
    metrics: Option<Arc<dyn RecommendMetrics>>,
}

impl CoOccurrenceRecommender {
    /// Construct an empty recommender.
    pub fn new() -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(ModelSnapshot::default())),
            metrics: None,
        }
    }

    /// Attach a metrics observer.
    pub fn with_metrics(mut self, recorder: Arc<dyn RecommendMetrics>) -> Self {
        self.metrics = Some(recorder);
        self
    }

    /// Replace all state with a model built from `interactions`.
    ///
    /// An empty slice is legal and leaves an empty (but fitted) model.
    pub fn fit(&self, interactions: &[InteractionRecord]) {
        self.install(Self::prepare(interactions));
    }

    /// Build a model without touching the visible one.
    ///
    /// Pair with [`install`](Self::install); dropping the result discards it.
    pub fn prepare(interactions: &[InteractionRecord]) -> PreparedModel {
        let start = Instant::now();
        let table = CoOccurrenceTable::build(interactions);
        PreparedModel {
            table,
            interactions: interactions.len(),
            build_time: start.elapsed(),
        }
    }

    /// Make a prepared model visible to readers.
    pub fn install(&self, prepared: PreparedModel) {
        let start = Instant::now();
        let PreparedModel {
            table,
            interactions,
            build_time,
        } = prepared;
        let items = table.len();
        let pairs = table.pair_total();

        let next = Arc::new(ModelSnapshot {
            table,
            fitted_at: Some(Utc::now()),
        });
        *self
            .snapshot
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = next;

        let latency = build_time + start.elapsed();
        tracing::debug!(
            interactions,
            items,
            pairs,
            elapsed_ms = latency.as_millis() as u64,
            "co-occurrence model fitted"
        );
        if let Some(recorder) = &self.metrics {
            recorder.record_fit(latency, interactions, items);
        }
    }

    /// Top `n` unseen items for `history`, highest score first.
    pub fn recommend<S: AsRef<str>>(&self, history: &[S], n: usize) -> Vec<Recommendation> {
        let start = Instant::now();
        let hits = self.snapshot().table.rank(history, n);

        let latency = start.elapsed();
        tracing::debug!(
            history = history.len(),
            n,
            hits = hits.len(),
            "co-occurrence ranking complete"
        );
        if let Some(recorder) = &self.metrics {
            recorder.record_recommend(latency, history.len(), hits.len());
        }
        hits
    }

    /// Consistent view of the current model.
    pub fn snapshot(&self) -> Arc<ModelSnapshot> {
        self.snapshot
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn similarity(&self, a: &str, b: &str) -> Option<u64> {
        self.snapshot().table.similarity(a, b)
    }

    pub fn stats(&self) -> ModelStats {
        self.snapshot().stats()
    }

    pub fn is_fitted(&self) -> bool {
        self.snapshot().fitted_at.is_some()
    }
}

impl Default for CoOccurrenceRecommender {
    fn default() -> Self {
        Self::new()
    }
}

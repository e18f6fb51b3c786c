//! Process-wide owner of the engine instances.
//!
//! The registry is built empty at startup, mutated through [`ModelRegistry::train`]
//! and [`ModelRegistry::add_items`], read by the query methods, and handed to
//! request handlers explicitly rather than living in a global.

use std::sync::Arc;

use cooccur::{
    CoOccurrenceRecommender, InteractionRecord, ModelStats, PreparedModel, Recommendation,
};
use matcher::{FeatureItem, FeatureMap, FeatureSimilarityMatcher, SimilarityHit};
use serde::{Deserialize, Serialize};

use crate::config::RecoConfig;
use crate::sample::sample_interactions;

/// Where a set of recommendations came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationSource {
    /// Static popular-items list served for an empty history.
    Popular,
    /// Co-occurrence ranking against the caller's history.
    CollaborativeFiltering,
}

/// Recommendations plus their provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendOutcome {
    pub recommendations: Vec<Recommendation>,
    pub source: RecommendationSource,
}

/// Registry-level statistics for both engines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryStats {
    pub recommender: ModelStats,
    pub matcher_items: usize,
}

pub struct ModelRegistry {
    config: RecoConfig,
    recommender: Arc<CoOccurrenceRecommender>,
    matcher: Arc<FeatureSimilarityMatcher>,
}

impl ModelRegistry {
    /// Registry with fresh, empty engines.
    pub fn new(config: RecoConfig) -> Self {
        Self::with_components(
            config,
            CoOccurrenceRecommender::new(),
            FeatureSimilarityMatcher::new(),
        )
    }

    /// Registry around pre-built engines (e.g. with metrics attached).
    pub fn with_components(
        config: RecoConfig,
        recommender: CoOccurrenceRecommender,
        matcher: FeatureSimilarityMatcher,
    ) -> Self {
        Self {
            config,
            recommender: Arc::new(recommender),
            matcher: Arc::new(matcher),
        }
    }

    pub fn config(&self) -> &RecoConfig {
        &self.config
    }

    pub fn recommender(&self) -> &Arc<CoOccurrenceRecommender> {
        &self.recommender
    }

    pub fn matcher(&self) -> &Arc<FeatureSimilarityMatcher> {
        &self.matcher
    }

    /// Refit the recommender from `interactions` and return how many were
    /// consumed. An empty batch keeps the current model.
    pub fn train(&self, interactions: &[InteractionRecord]) -> usize {
        self.commit_training(Self::prepare_training(interactions))
    }

    /// Build a replacement model off to the side; `None` for an empty batch.
    ///
    /// Nothing is visible until [`commit_training`](Self::commit_training).
    pub fn prepare_training(interactions: &[InteractionRecord]) -> Option<PreparedModel> {
        if interactions.is_empty() {
            return None;
        }
        Some(CoOccurrenceRecommender::prepare(interactions))
    }

    /// Install a prepared model and return how many interactions it consumed.
    pub fn commit_training(&self, prepared: Option<PreparedModel>) -> usize {
        match prepared {
            Some(model) => {
                let trained_on = model.interactions();
                self.recommender.install(model);
                trained_on
            }
            None => {
                tracing::debug!("empty training batch; keeping current model");
                0
            }
        }
    }

    /// Fit the recommender with the bundled sample log.
    pub fn seed_sample_data(&self) -> usize {
        self.train(&sample_interactions())
    }

    /// Rank unseen items for `history`, or serve the popular list when the
    /// history is empty. `n` defaults to `recommender.default_top_n`.
    pub fn recommend<S: AsRef<str>>(&self, history: &[S], n: Option<usize>) -> RecommendOutcome {
        let n = n.unwrap_or(self.config.recommender.default_top_n);

        if history.is_empty() {
            let recommendations = self
                .config
                .fallback
                .popular_items
                .iter()
                .take(n)
                .map(|item| Recommendation {
                    item_id: item.item_id.clone(),
                    score: item.score,
                })
                .collect();
            return RecommendOutcome {
                recommendations,
                source: RecommendationSource::Popular,
            };
        }

        RecommendOutcome {
            recommendations: self.recommender.recommend(history, n),
            source: RecommendationSource::CollaborativeFiltering,
        }
    }

    /// Store catalog items in the matcher; returns the batch size.
    pub fn add_items<I>(&self, items: I) -> usize
    where
        I: IntoIterator<Item = FeatureItem>,
    {
        self.matcher.add_items(items)
    }

    /// Rank catalog items against `query`. `n` defaults to
    /// `matcher.default_top_n`.
    pub fn find_similar(&self, query: &FeatureMap, n: Option<usize>) -> Vec<SimilarityHit> {
        let n = n.unwrap_or(self.config.matcher.default_top_n);
        self.matcher.find_similar(query, n)
    }

    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            recommender: self.recommender.stats(),
            matcher_items: self.matcher.len(),
        }
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new(RecoConfig::default())
    }
}

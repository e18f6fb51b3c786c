//! Umbrella crate for the recommendation engines.
//!
//! This crate stitches together the co-occurrence recommender (`cooccur`) and
//! the feature matcher (`matcher`) behind a single [`ModelRegistry`], and
//! carries the shared YAML configuration and the bundled sample interaction log.
//!
//! ```
//! use reco::{ModelRegistry, RecommendationSource};
//!
//! let registry = ModelRegistry::default();
//! registry.seed_sample_data();
//!
//! let outcome = registry.recommend(&["samosa"], Some(2));
//! assert_eq!(outcome.source, RecommendationSource::CollaborativeFiltering);
//! assert_eq!(outcome.recommendations[0].item_id, "chai");
//! ```

pub mod config;
pub mod registry;
pub mod sample;

pub use config::{
    ConfigLoadError, FallbackYamlConfig, MatcherYamlConfig, PopularItem, RecoConfig,
    RecommenderYamlConfig,
};
pub use cooccur::{
    CoOccurrencePair, CoOccurrenceRecommender, CoOccurrenceTable, InteractionRecord, ModelSnapshot,
    ModelStats, PreparedModel, RecommendMetrics, Recommendation, SimilarityRow,
};
pub use matcher::{
    FeatureItem, FeatureMap, FeatureSimilarityMatcher, FeatureStore, FeatureValue, MatchMetrics,
    SimilarityHit, feature_map, feature_overlap, value_similarity,
};
pub use registry::{ModelRegistry, RecommendOutcome, RecommendationSource, RegistryStats};
pub use sample::sample_interactions;

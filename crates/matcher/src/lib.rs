//! # Feature matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` ranks catalog entries against a free-form feature query. Each
//! stored item is a flat mapping from feature name to a scalar
//! [`FeatureValue`]; a query is a mapping of the same shape.
//!
//! ## Scoring
//!
//! For every key in the query:
//! - key missing on the candidate: 0
//! - values exactly equal (any variant): 1
//! - both numeric but unequal: `1 / (1 + |query - candidate|)`
//! - anything else (mixed variants, unequal text or booleans): 0
//!
//! The per-key contributions are summed; items are returned by descending
//! score, ties kept in insertion order.
//!
//! ## Core Types
//!
//! - [`FeatureValue`]: closed scalar variant (`Bool`, `Number`, `Text`).
//! - [`FeatureMap`]: ordered feature name → value mapping.
//! - [`FeatureItem`]: stored `(item_id, features)` entry.
//! - [`FeatureSimilarityMatcher`]: thread-safe store plus ranking.
//! - [`SimilarityHit`]: ranked `(item_id, score)` hit.
//!
//! ## Example Usage
//!
//! ```
//! use matcher::{feature_map, FeatureSimilarityMatcher};
//!
//! let matcher = FeatureSimilarityMatcher::new();
//! matcher.add_item("x", feature_map([("price", 10)]));
//! matcher.add_item("y", feature_map([("price", 15)]));
//!
//! let hits = matcher.find_similar(&feature_map([("price", 10)]), 5);
//! assert_eq!(hits[0].item_id, "x");
//! assert_eq!(hits[0].score, 1.0);
//! assert!((hits[1].score - 1.0 / 6.0).abs() < 1e-9);
//! ```
//!
//! ## Observability
//!
//! Attach a [`MatchMetrics`] implementation with
//! [`FeatureSimilarityMatcher::with_metrics`] to record store growth and
//! query latency.

pub mod engine;
pub mod metrics;
pub mod score;
pub mod types;

pub use crate::engine::{FeatureSimilarityMatcher, FeatureStore};
pub use crate::metrics::MatchMetrics;
pub use crate::score::{feature_overlap, value_similarity};
pub use crate::types::{feature_map, FeatureItem, FeatureMap, FeatureValue, SimilarityHit};

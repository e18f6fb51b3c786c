//! # Co-occurrence recommender (`cooccur`)
//!
//! ## Purpose
//!
//! `cooccur` turns implicit interaction logs (who touched which item) into an
//! item-to-item association table and ranks unseen items against a user's
//! history. It is a deterministic counting-and-ranking engine: no weighting by
//! rating, no learned parameters, no incremental updates.
//!
//! ## Core Types
//!
//! - [`InteractionRecord`]: `(user_id, item_id, rating?)`; rating is ignored.
//! - [`CoOccurrencePair`]: unordered item pair in canonical (sorted) form.
//! - [`CoOccurrenceTable`]: the immutable model built by a single fit, holding
//!   pair counts and a dense similarity row per item.
//! - [`SimilarityRow`]: borrowed view of one item's counts against every other item.
//! - [`CoOccurrenceRecommender`]: thread-safe owner of the current table.
//!   `fit` replaces the table wholesale; `recommend` reads a snapshot.
//! - [`Recommendation`]: ranked `(item_id, score)` hit.
//!
//! ## Fitting
//!
//! Interactions are grouped per user in arrival order with duplicates kept.
//! Every index pair `(i, j)` with `i < j` in a user's raw list increments the
//! pair's count, so repeated items inflate counts once per occurrence. Every
//! fit discards all earlier state.
//!
//! ## Ranking
//!
//! For each history entry that names a known item, the item's similarity row
//! is added to per-candidate totals, skipping anything present in the history.
//! Results are sorted by descending score; equal scores keep item registration
//! order (first-seen during fit wins).
//!
//! ## Example Usage
//!
//! ```
//! use cooccur::{CoOccurrenceRecommender, InteractionRecord};
//!
//! let model = CoOccurrenceRecommender::new();
//! model.fit(&[
//!     InteractionRecord::new("u1", "a"),
//!     InteractionRecord::new("u1", "b"),
//!     InteractionRecord::new("u2", "a"),
//!     InteractionRecord::new("u2", "c"),
//! ]);
//!
//! let hits = model.recommend(&["a"], 2);
//! assert_eq!(hits.len(), 2);
//! assert_eq!(hits[0].item_id, "b");
//! assert_eq!(hits[0].score, 1);
//! assert_eq!(model.similarity("b", "c"), Some(0));
//! ```
//!
//! ## Observability
//!
//! Attach a [`RecommendMetrics`] implementation with
//! [`CoOccurrenceRecommender::with_metrics`] to record fit and ranking
//! latencies. Both operations also emit `tracing` events at debug level.

pub mod engine;
pub mod metrics;
pub mod table;
pub mod types;

pub use crate::engine::{CoOccurrenceRecommender, ModelSnapshot, PreparedModel};
pub use crate::metrics::RecommendMetrics;
pub use crate::table::{CoOccurrenceTable, SimilarityRow};
pub use crate::types::{CoOccurrencePair, InteractionRecord, ModelStats, Recommendation};

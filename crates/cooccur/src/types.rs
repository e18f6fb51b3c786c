use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single observed (user, item) association.
///
/// Scoring is presence-only: `rating` is carried so interaction logs can be
/// replayed verbatim, but it never influences pair counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionRecord {
    /// Identifier of the user that produced the interaction.
    pub user_id: String,
    /// Identifier of the item the user interacted with.
    pub item_id: String,
    /// Optional explicit rating supplied by the source system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

impl InteractionRecord {
    /// Build an unrated interaction.
    pub fn new(user_id: impl Into<String>, item_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            item_id: item_id.into(),
            rating: None,
        }
    }

    /// Attach a rating to the interaction.
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }
}

/// Unordered pair of item identifiers.
///
/// The two identifiers are sorted on construction, so `(a, b)` and `(b, a)`
/// produce the same pair and a table keyed by it never stores both orderings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CoOccurrencePair {
    first: String,
    second: String,
}

impl CoOccurrencePair {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            Self {
                first: a,
                second: b,
            }
        } else {
            Self {
                first: b,
                second: a,
            }
        }
    }

    /// Lexicographically smaller identifier.
    pub fn first(&self) -> &str {
        &self.first
    }

    /// Lexicographically larger (or equal) identifier.
    pub fn second(&self) -> &str {
        &self.second
    }

    /// Whether both members are the same item (a duplicate within one history).
    pub fn is_self_pair(&self) -> bool {
        self.first == self.second
    }
}

/// A ranked candidate item and its accumulated co-occurrence score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub item_id: String,
    pub score: u64,
}

impl From<Recommendation> for (String, u64) {
    fn from(value: Recommendation) -> Self {
        (value.item_id, value.score)
    }
}

/// Summary of the currently visible model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelStats {
    /// Distinct items registered by the last fit.
    pub items: usize,
    /// Stored pairs with a non-zero count (self-pairs included).
    pub pairs: usize,
    /// Distinct users seen by the last fit.
    pub users: usize,
    /// Interaction records consumed by the last fit.
    pub interactions: usize,
    /// When the last fit completed; `None` until the first fit.
    pub fitted_at: Option<DateTime<Utc>>,
}

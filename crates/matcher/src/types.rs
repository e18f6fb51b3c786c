use serde::{Deserialize, Serialize};

use std::collections::BTreeMap;

/// A single feature value.
///
/// Serialized untagged, so JSON booleans, numbers and strings map directly
/// onto the variants. Any other JSON shape (null, array, object) is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FeatureValue {
    /// Numeric payload, if this is a number. Booleans are not numbers.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FeatureValue::Number(value) => Some(*value),
            FeatureValue::Bool(_) | FeatureValue::Text(_) => None,
        }
    }
}

impl From<f64> for FeatureValue {
    fn from(value: f64) -> Self {
        FeatureValue::Number(value)
    }
}

impl From<i64> for FeatureValue {
    fn from(value: i64) -> Self {
        FeatureValue::Number(value as f64)
    }
}

impl From<i32> for FeatureValue {
    fn from(value: i32) -> Self {
        FeatureValue::Number(f64::from(value))
    }
}

impl From<bool> for FeatureValue {
    fn from(value: bool) -> Self {
        FeatureValue::Bool(value)
    }
}

impl From<&str> for FeatureValue {
    fn from(value: &str) -> Self {
        FeatureValue::Text(value.to_string())
    }
}

impl From<String> for FeatureValue {
    fn from(value: String) -> Self {
        FeatureValue::Text(value)
    }
}

/// Feature name to value. Ordered so per-key score sums are accumulated in a
/// fixed order.
pub type FeatureMap = BTreeMap<String, FeatureValue>;

/// A catalog entry stored in the matcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureItem {
    pub item_id: String,
    #[serde(default)]
    pub features: FeatureMap,
}

impl FeatureItem {
    pub fn new(item_id: impl Into<String>, features: FeatureMap) -> Self {
        Self {
            item_id: item_id.into(),
            features,
        }
    }
}

/// A single hit returned by the matcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityHit {
    pub item_id: String,
    /// Sum of per-key contributions over the query's keys.
    pub score: f64,
}

impl From<SimilarityHit> for (String, f64) {
    fn from(value: SimilarityHit) -> Self {
        (value.item_id, value.score)
    }
}

/// Build a [`FeatureMap`] from `(name, value)` pairs.
pub fn feature_map<K, V, I>(pairs: I) -> FeatureMap
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<FeatureValue>,
{
    pairs
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect()
}

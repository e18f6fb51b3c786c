//! Feature-overlap scoring.

use crate::types::{FeatureMap, FeatureValue};

/// Contribution of one query key whose value is present on the candidate.
///
/// Exactly equal values score 1. Two unequal numbers score
/// `1 / (1 + |q - c|)`, which lies in (0, 1) and decays with distance.
/// Every other combination, including mixed variants and NaN, scores 0.
pub fn value_similarity(query: &FeatureValue, candidate: &FeatureValue) -> f64 {
    match (query, candidate) {
        (FeatureValue::Number(q), FeatureValue::Number(c)) => {
            if q == c {
                1.0
            } else {
                let decay = 1.0 / (1.0 + (q - c).abs());
                // NaN on either side never matches.
                if decay.is_nan() {
                    0.0
                } else {
                    decay
                }
            }
        }
        (FeatureValue::Text(q), FeatureValue::Text(c)) => exact(q == c),
        (FeatureValue::Bool(q), FeatureValue::Bool(c)) => exact(q == c),
        (FeatureValue::Number(_), _) | (FeatureValue::Text(_), _) | (FeatureValue::Bool(_), _) => {
            0.0
        }
    }
}

/// Sum of [`value_similarity`] over every key of `query`; keys missing from
/// `candidate` contribute 0.
pub fn feature_overlap(query: &FeatureMap, candidate: &FeatureMap) -> f64 {
    query
        .iter()
        .filter_map(|(key, value)| candidate.get(key).map(|other| value_similarity(value, other)))
        .sum()
}

fn exact(equal: bool) -> f64 {
    if equal {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::feature_map;

    #[test]
    fn exact_matches_score_one() {
        assert_eq!(value_similarity(&"red".into(), &"red".into()), 1.0);
        assert_eq!(value_similarity(&true.into(), &true.into()), 1.0);
        assert_eq!(value_similarity(&10.into(), &10.0.into()), 1.0);
    }

    #[test]
    fn numeric_distance_decays() {
        let score = value_similarity(&10.into(), &15.into());
        assert!((score - 1.0 / 6.0).abs() < 1e-12);
        assert!(value_similarity(&10.into(), &1000.into()) > 0.0);
        assert!(value_similarity(&10.into(), &11.into()) > score);
    }

    #[test]
    fn nan_never_matches() {
        assert_eq!(value_similarity(&f64::NAN.into(), &5.into()), 0.0);
        assert_eq!(value_similarity(&5.into(), &f64::NAN.into()), 0.0);
        assert_eq!(value_similarity(&f64::NAN.into(), &f64::NAN.into()), 0.0);
    }

    #[test]
    fn mismatched_variants_score_zero() {
        assert_eq!(value_similarity(&"10".into(), &10.into()), 0.0);
        assert_eq!(value_similarity(&true.into(), &1.into()), 0.0);
        assert_eq!(value_similarity(&"red".into(), &"blue".into()), 0.0);
        assert_eq!(value_similarity(&false.into(), &true.into()), 0.0);
    }

    #[test]
    fn overlap_sums_present_keys_only() {
        let query = feature_map([
            ("from", FeatureValue::from("Sitapur")),
            ("fare", FeatureValue::from(40)),
            ("ac", FeatureValue::from(true)),
        ]);
        let candidate = feature_map([
            ("from", FeatureValue::from("Sitapur")),
            ("fare", FeatureValue::from(44)),
        ]);
        let score = feature_overlap(&query, &candidate);
        assert!((score - (1.0 + 1.0 / 5.0)).abs() < 1e-12);
        assert_eq!(feature_overlap(&FeatureMap::new(), &candidate), 0.0);
    }
}

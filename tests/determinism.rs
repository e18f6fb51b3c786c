use reco::{
    CoOccurrenceRecommender, FeatureItem, FeatureSimilarityMatcher, InteractionRecord,
    ModelRegistry, feature_map, sample_interactions,
};

fn shuffled_users(log: &[InteractionRecord]) -> Vec<InteractionRecord> {
    // Same per-user baskets, users presented in reverse order.
    let mut users: Vec<&str> = log.iter().map(|r| r.user_id.as_str()).collect();
    users.dedup();
    users
        .into_iter()
        .rev()
        .flat_map(|user| log.iter().filter(move |r| r.user_id == user).cloned())
        .collect()
}

#[test]
fn repeated_fits_produce_identical_rankings() {
    let log = sample_interactions();
    let first = CoOccurrenceRecommender::new();
    let second = CoOccurrenceRecommender::new();
    first.fit(&log);
    second.fit(&log);

    for history in [vec!["samosa"], vec!["chai", "dosa"], vec!["vada", "poha", "idli"]] {
        assert_eq!(first.recommend(&history, 9), second.recommend(&history, 9));
    }
}

#[test]
fn pair_counts_ignore_user_order() {
    let log = sample_interactions();
    let reordered = shuffled_users(&log);
    assert_ne!(log, reordered);

    let a = CoOccurrenceRecommender::new();
    let b = CoOccurrenceRecommender::new();
    a.fit(&log);
    b.fit(&reordered);

    assert_eq!(a.snapshot().table().pairs(), b.snapshot().table().pairs());
    assert_eq!(a.similarity("samosa", "chai"), Some(2));
    assert_eq!(b.similarity("samosa", "chai"), Some(2));
}

#[test]
fn ratings_do_not_change_scores() {
    let rated = sample_interactions();
    let unrated: Vec<InteractionRecord> = rated
        .iter()
        .map(|r| InteractionRecord::new(r.user_id.clone(), r.item_id.clone()))
        .collect();

    let a = CoOccurrenceRecommender::new();
    let b = CoOccurrenceRecommender::new();
    a.fit(&rated);
    b.fit(&unrated);
    assert_eq!(a.recommend(&["chai"], 9), b.recommend(&["chai"], 9));
}

#[test]
fn matcher_ties_follow_insertion_order() {
    let matcher = FeatureSimilarityMatcher::new();
    for id in ["r3", "r1", "r2"] {
        matcher.add_item(id, feature_map([("from", "Sitapur")]));
    }
    // Re-adding keeps the original slot.
    matcher.add_item("r3", feature_map([("from", "Sitapur")]));

    let ids: Vec<String> = matcher
        .find_similar(&feature_map([("from", "Sitapur")]), 3)
        .into_iter()
        .map(|hit| hit.item_id)
        .collect();
    assert_eq!(ids, vec!["r3", "r1", "r2"]);
}

#[test]
fn registry_answers_are_stable_across_instances() {
    let build = || {
        let registry = ModelRegistry::default();
        registry.seed_sample_data();
        registry.add_items([
            FeatureItem::new("r1", feature_map([("fare", 40)])),
            FeatureItem::new("r2", feature_map([("fare", 60)])),
        ]);
        registry
    };
    let a = build();
    let b = build();
    assert_eq!(a.recommend(&["samosa"], None), b.recommend(&["samosa"], None));
    let query = feature_map([("fare", 50)]);
    assert_eq!(a.find_similar(&query, None), b.find_similar(&query, None));
}

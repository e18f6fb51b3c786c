//! Bundled interaction log used to warm the recommender at startup and in demos.

use cooccur::InteractionRecord;

const SAMPLE_INTERACTIONS: &[(&str, &str, f64)] = &[
    ("user1", "samosa", 5.0),
    ("user1", "chai", 5.0),
    ("user1", "pakora", 4.0),
    ("user2", "samosa", 5.0),
    ("user2", "chai", 4.0),
    ("user2", "jalebi", 5.0),
    ("user3", "chai", 5.0),
    ("user3", "pakora", 5.0),
    ("user3", "poha", 4.0),
    ("user4", "dosa", 5.0),
    ("user4", "idli", 5.0),
    ("user4", "sambar", 5.0),
    ("user5", "dosa", 4.0),
    ("user5", "chai", 5.0),
    ("user5", "vada", 4.0),
];

/// Fifteen rated food orders across five users.
pub fn sample_interactions() -> Vec<InteractionRecord> {
    SAMPLE_INTERACTIONS
        .iter()
        .map(|&(user, item, rating)| InteractionRecord::new(user, item).with_rating(rating))
        .collect()
}

use std::error::Error;

use reco::{FeatureValue, ModelRegistry, RecoConfig, feature_map};

fn main() -> Result<(), Box<dyn Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => RecoConfig::from_file(path)?,
        None => RecoConfig::default(),
    };
    let registry = ModelRegistry::new(config);

    let trained_on = registry.seed_sample_data();
    println!("Fitted co-occurrence model on {trained_on} sample interactions");

    for history in [vec!["samosa"], vec!["dosa", "chai"], vec![]] {
        let outcome = registry.recommend(&history, None);
        println!(
            "history={history:?} -> {}",
            serde_json::to_string(&outcome)?
        );
    }

    registry.add_items([
        reco::FeatureItem::new(
            "route-sitapur-lucknow",
            feature_map([
                ("from", FeatureValue::from("Sitapur")),
                ("to", FeatureValue::from("Lucknow")),
                ("fare", FeatureValue::from(40)),
            ]),
        ),
        reco::FeatureItem::new(
            "route-sitapur-hardoi",
            feature_map([
                ("from", FeatureValue::from("Sitapur")),
                ("to", FeatureValue::from("Hardoi")),
                ("fare", FeatureValue::from(55)),
            ]),
        ),
    ]);
    let query = feature_map([
        ("from", FeatureValue::from("Sitapur")),
        ("fare", FeatureValue::from(50)),
    ]);
    println!(
        "route matches for {} -> {}",
        serde_json::to_string(&query)?,
        serde_json::to_string(&registry.find_similar(&query, None))?
    );

    Ok(())
}

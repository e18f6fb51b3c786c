use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use reco::{
    CoOccurrenceRecommender, FeatureItem, FeatureSimilarityMatcher, FeatureValue,
    InteractionRecord, feature_map,
};

/// Synthetic log: `users` baskets of `basket` items drawn from `catalog` ids.
fn synthetic_log(users: usize, basket: usize, catalog: usize) -> Vec<InteractionRecord> {
    (0..users)
        .flat_map(|u| {
            (0..basket).map(move |k| {
                let item = (u * 7 + k * 13) % catalog;
                InteractionRecord::new(format!("user-{u}"), format!("item-{item}"))
            })
        })
        .collect()
}

fn synthetic_catalog(count: usize) -> Vec<FeatureItem> {
    (0..count)
        .map(|i| {
            FeatureItem::new(
                format!("route-{i}"),
                feature_map([
                    ("from", FeatureValue::from(format!("town-{}", i % 17))),
                    ("to", FeatureValue::from(format!("town-{}", i % 23))),
                    ("fare", FeatureValue::from((i % 90) as i64 + 10)),
                    ("ac", FeatureValue::from(i % 2 == 0)),
                ]),
            )
        })
        .collect()
}

fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("cooccur_fit");

    for catalog in [50usize, 200, 500] {
        let log = synthetic_log(1_000, 6, catalog);
        group.throughput(Throughput::Elements(log.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(catalog), &log, |b, log| {
            let model = CoOccurrenceRecommender::new();
            b.iter(|| model.fit(black_box(log.as_slice())));
        });
    }

    group.finish();
}

fn bench_recommend(c: &mut Criterion) {
    let mut group = c.benchmark_group("cooccur_recommend");
    let model = CoOccurrenceRecommender::new();
    model.fit(&synthetic_log(1_000, 6, 500));

    for history_len in [1usize, 5, 20] {
        let history: Vec<String> = (0..history_len).map(|i| format!("item-{}", i * 11)).collect();
        group.bench_with_input(
            BenchmarkId::from_parameter(history_len),
            &history,
            |b, history| b.iter(|| model.recommend(black_box(history.as_slice()), 10)),
        );
    }

    group.finish();
}

fn bench_find_similar(c: &mut Criterion) {
    let mut group = c.benchmark_group("matcher_find_similar");
    let query = feature_map([
        ("from", FeatureValue::from("town-3")),
        ("fare", FeatureValue::from(40)),
        ("ac", FeatureValue::from(true)),
    ]);

    for count in [100usize, 1_000, 10_000] {
        let matcher = FeatureSimilarityMatcher::new();
        matcher.add_items(synthetic_catalog(count));
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &matcher, |b, matcher| {
            b.iter(|| matcher.find_similar(black_box(&query), 10))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_fit, bench_recommend, bench_find_similar);
criterion_main!(benches);

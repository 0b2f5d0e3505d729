use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use brandtag::{BrandRule, Catalog, parse};

fn build_catalog() -> Catalog {
    let sources = [
        "stryker* AND NOT recall",
        "\"hip replacement\" OR \"knee implant\"",
        "trauma NEAR/5 implant",
        "#orthotwitter",
        "brand AND launch",
    ];
    let rules = sources
        .iter()
        .enumerate()
        .map(|(i, source)| BrandRule {
            topic: "Medical Devices".to_owned(),
            sub_topic: "Orthopedics".to_owned(),
            query_name: format!("rule {i}"),
            internal_id: i.to_string(),
            source: (*source).to_owned(),
            expr: parse(source).unwrap(),
        })
        .collect();
    Catalog::from_rules(rules)
}

const ARTICLES: &[&str] = &[
    "StrykerMed expands its trauma line",
    "My hip-replacement recovery, week three",
    "Totally unrelated post about breakfast",
    "#orthotwitter is discussing the new implant",
    "brand launch scheduled for May",
    "stryker announces voluntary recall",
];

fn bench_batch_classify(c: &mut Criterion) {
    let catalog = build_catalog();
    let mut group = c.benchmark_group("batch_classify");
    group.throughput(Throughput::Elements(ARTICLES.len() as u64));

    group.bench_function("mixed_articles", |b| {
        b.iter(|| {
            for article in ARTICLES {
                black_box(catalog.classify(black_box(article)));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_batch_classify);
criterion_main!(benches);

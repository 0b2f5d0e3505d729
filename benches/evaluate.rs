use criterion::{Criterion, black_box, criterion_group, criterion_main};

use brandtag::{BrandRule, Catalog, parse};

/// Build a catalog of `n` rules where only the last one matches the bench
/// article, forcing a full scan.
fn build_catalog(n: usize) -> Catalog {
    let mut rules = Vec::with_capacity(n);
    for i in 0..n {
        let source = if i == n - 1 {
            "stryker* AND NOT recall".to_owned()
        } else {
            format!("filler{i} OR \"filler phrase {i}\"")
        };
        rules.push(BrandRule {
            topic: "Medical Devices".to_owned(),
            sub_topic: "Orthopedics".to_owned(),
            query_name: format!("rule {i}"),
            internal_id: i.to_string(),
            expr: parse(&source).unwrap(),
            source,
        });
    }
    Catalog::from_rules(rules)
}

const ARTICLE: &str =
    "StrykerMed announced today an expansion of its trauma implant line across Europe";

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_classify");

    for &n in &[5, 20, 50] {
        let catalog = build_catalog(n);
        group.bench_function(format!("{n}_rules"), |b| {
            b.iter(|| catalog.classify(black_box(ARTICLE)));
        });
    }

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_parse");

    let queries = [
        ("term", "stryker"),
        ("boolean", "(stryker OR \"hip replacement\") AND NOT recall"),
        ("near", "stryker NEAR/5 trauma NEAR/5 implant*"),
    ];
    for (name, query) in queries {
        group.bench_function(name, |b| {
            b.iter(|| parse(black_box(query)).unwrap());
        });
    }

    group.finish();
}

fn bench_tokenize(c: &mut Criterion) {
    c.bench_function("tokenize_article", |b| {
        b.iter(|| brandtag::tokenize(black_box(ARTICLE)));
    });
}

criterion_group!(benches, bench_classify, bench_parse, bench_tokenize);
criterion_main!(benches);

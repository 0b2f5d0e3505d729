use std::sync::Arc;
use std::thread;

use brandtag::{Catalog, Classifier};

fn main() {
    let classifier = Arc::new(Classifier::new());
    classifier.install(Catalog::load("demos/catalog.csv").expect("failed to load catalog"));

    let articles = [
        "StrykerMed expands trauma line",
        "knee implant pricing update",
        "espresso machine for the office bar",
        "unrelated chatter",
    ];

    let handles: Vec<_> = articles
        .into_iter()
        .map(|article| {
            let classifier = Arc::clone(&classifier);
            thread::spawn(move || (article, classifier.classify(article)))
        })
        .collect();

    for handle in handles {
        let (article, result) = handle.join().unwrap();
        match result {
            Some(c) => println!("{article:?} -> {} ({})", c.query_name, c.internal_id),
            None => println!("{article:?} -> no match"),
        }
    }
}

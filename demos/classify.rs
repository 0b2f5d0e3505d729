use brandtag::Catalog;

fn main() {
    let catalog = Catalog::load("demos/catalog.csv").expect("failed to load catalog");
    println!("{} rules compiled ({} skipped)", catalog.len(), catalog.skipped());

    let articles = [
        "StrykerMed announced an expansion today",
        "stryker issues voluntary recall",
        "My hip-replacement recovery went great",
        "I love Café culture in Lisbon",
        "Nothing to see here",
    ];

    for article in articles {
        match catalog.classify(article) {
            Some(c) => println!(
                "{article:?} -> {} / {} ({})",
                c.topic, c.sub_topic, c.internal_id
            ),
            None => println!("{article:?} -> no match"),
        }
    }
}

use brandtag::parse;

fn main() {
    let query = parse("(stryker OR \"hip replacement\") NEAR/6 launch* AND NOT recall")
        .expect("failed to parse query");

    println!("compiled: {query}");

    let articles = [
        "Stryker plans a product launch next quarter",
        "hip replacement launched to rave reviews",
        "stryker launch halted by recall",
    ];

    for article in articles {
        let result = query.evaluate(article);
        let spans: Vec<String> = result.spans.iter().map(ToString::to_string).collect();
        println!("{article:?}: matched={} spans={}", result.matched, spans.join(" "));
    }
}

use brandtag::{Expr, ParseError, parse, phrase, term, wildcard};

#[test]
fn parse_and_evaluate_simple_term() {
    let query = parse("stryker").unwrap();
    assert!(query.matches("Stryker announced a new trauma line"));
    assert!(!query.matches("nothing relevant here"));
}

#[test]
fn parse_and_evaluate_boolean_combination() {
    let query = parse("(stryker OR \"hip replacement\") AND NOT recall").unwrap();

    assert!(query.matches("Stryker launches new implant"));
    assert!(query.matches("My hip-replacement went well"));
    assert!(!query.matches("stryker recall announced"));
    assert!(!query.matches("unrelated chatter"));
}

#[test]
fn keywords_are_case_insensitive() {
    let upper = parse("brand AND launch").unwrap();
    let lower = parse("brand and launch").unwrap();
    let mixed = parse("brand AnD launch").unwrap();
    assert_eq!(upper, lower);
    assert_eq!(upper, mixed);
}

#[test]
fn terms_are_case_folded() {
    assert_eq!(parse("BRAND").unwrap(), parse("brand").unwrap());
    assert_eq!(parse("Café").unwrap(), term("cafe"));
}

#[test]
fn quotes_are_interchangeable() {
    assert_eq!(
        parse(r#""hip replacement""#).unwrap(),
        parse("'hip replacement'").unwrap()
    );
}

#[test]
fn near_default_distance_is_nine() {
    assert_eq!(
        parse("alpha NEAR beta").unwrap(),
        term("alpha").near(9, term("beta"))
    );
}

#[test]
fn near_distance_override() {
    assert_eq!(
        parse("alpha NEAR/3 beta").unwrap(),
        term("alpha").near(3, term("beta"))
    );
    assert_eq!(
        parse("alpha NEAR /7 beta").unwrap(),
        term("alpha").near(7, term("beta"))
    );
}

#[test]
fn wildcard_suffix() {
    assert_eq!(parse("stryker*").unwrap(), wildcard("stryker"));
}

#[test]
fn implicit_and_before_not() {
    assert_eq!(
        parse("brand NOT recall").unwrap(),
        parse("brand AND NOT recall").unwrap()
    );
}

#[test]
fn or_binds_loosest() {
    // a OR b AND c == a OR (b AND c)
    assert_eq!(
        parse("a OR b AND c").unwrap(),
        term("a").or(term("b").and(term("c")))
    );
}

#[test]
fn near_binds_tighter_than_and() {
    assert_eq!(
        parse("a AND b NEAR/2 c").unwrap(),
        term("a").and(term("b").near(2, term("c")))
    );
}

#[test]
fn not_binds_tighter_than_near() {
    assert_eq!(
        parse("NOT a NEAR/2 b").unwrap(),
        (!term("a")).near(2, term("b"))
    );
}

#[test]
fn parens_override_precedence() {
    assert_eq!(
        parse("(a OR b) AND c").unwrap(),
        term("a").or(term("b")).and(term("c"))
    );
}

#[test]
fn phrase_bodies_use_the_article_tokenizer() {
    assert_eq!(
        parse(r#""Orthopedic-Surgery Update!""#).unwrap(),
        phrase("orthopedic surgery update")
    );
}

#[test]
fn adjacent_phrase_and_keyword_without_whitespace() {
    assert_eq!(
        parse(r#""foo"OR bar"#).unwrap(),
        phrase("foo").or(term("bar"))
    );
}

#[test]
fn nearly_is_just_a_term() {
    assert_eq!(parse("nearly").unwrap(), term("nearly"));
}

#[test]
fn parse_error_unterminated_phrase() {
    assert!(matches!(
        parse(r#"brand AND "unterminated"#),
        Err(ParseError::UnterminatedPhrase { .. })
    ));
}

#[test]
fn parse_error_missing_right_operand() {
    assert!(matches!(parse("brand AND"), Err(ParseError::UnexpectedEnd)));
    assert!(matches!(parse("brand OR"), Err(ParseError::UnexpectedEnd)));
    assert!(matches!(
        parse("alpha NEAR/2"),
        Err(ParseError::UnexpectedEnd)
    ));
    assert!(matches!(parse("NOT"), Err(ParseError::UnexpectedEnd)));
}

#[test]
fn parse_error_leftover_tokens() {
    assert!(matches!(
        parse("a b"),
        Err(ParseError::TrailingTokens { .. })
    ));
}

#[test]
fn display_round_trips_through_the_parser() {
    let queries = [
        "stryker",
        "stryker*",
        r#""hip replacement""#,
        "brand AND NOT recall",
        "(a OR b) AND c NEAR/4 d",
        "alpha NEAR beta",
    ];
    for source in queries {
        let expr = parse(source).unwrap();
        let reparsed = parse(&expr.to_string()).unwrap();
        assert_eq!(expr, reparsed, "round-trip failed for {source:?}");
    }
}

#[test]
fn leaf_values_are_normalized_source_fragments() {
    match parse("Café* AND #Stryker").unwrap() {
        Expr::And(left, right) => {
            assert_eq!(*left, Expr::Wildcard("cafe".to_owned()));
            assert_eq!(*right, Expr::Term("#stryker".to_owned()));
        }
        other => panic!("expected And, got {other:?}"),
    }
}

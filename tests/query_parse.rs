use docket::{parse, ParseError, Section};

fn section() -> Section {
    Section::new()
        .set("heading", "Permitted Liens")
        .set("article", "Negative Covenants")
        .set("clause", "7.01(b)")
        .set("doc_type", "credit_agreement")
        .set("vintage", 2021_i64)
        .set("facility_size_mm", 250.0_f64)
}

#[test]
fn single_term_matches_substring() {
    let query = parse("heading: liens").unwrap();
    assert!(query.matches(&section()));
    assert!(!query.matches(&Section::new().set("heading", "Indebtedness")));
}

#[test]
fn implicit_and_between_juxtaposed_terms() {
    let query = parse(r#"heading: liens article: "negative covenants""#).unwrap();
    assert!(query.matches(&section()));

    // Either leg missing defeats the match.
    assert!(!query.matches(&Section::new().set("heading", "Permitted Liens")));
    assert!(!query.matches(&Section::new().set("article", "Negative Covenants")));
}

#[test]
fn grouping_changes_semantics() {
    let query = parse("heading: (debt OR indebtedness) AND NOT liens").unwrap();

    assert!(query.matches(&Section::new().set("heading", "debt capacity")));
    assert!(query.matches(&Section::new().set("heading", "Indebtedness")));
    assert!(!query.matches(&Section::new().set("heading", "debt and liens")));
    assert!(!query.matches(&Section::new().set("heading", "liens")));
}

#[test]
fn explicit_operators_and_precedence() {
    // AND binds tighter than OR.
    let query = parse("doc_type: credit heading: liens OR heading: baskets").unwrap();
    assert!(query.matches(&section()));
    assert!(query.matches(&Section::new().set("heading", "General Baskets")));
    assert!(!query.matches(&Section::new().set("heading", "Permitted Liens")));
}

#[test]
fn symbol_aliases_for_operators() {
    let query = parse("heading: liens & article: covenants").unwrap();
    assert!(query.matches(&section()));

    let query = parse("heading: baskets | article: covenants").unwrap();
    assert!(query.matches(&section()));

    let query = parse("!heading: baskets").unwrap();
    assert!(query.matches(&section()));

    let query = parse("(heading: liens) && !(heading: baskets)").unwrap();
    assert!(query.matches(&section()));
}

#[test]
fn word_operators_are_case_insensitive() {
    let query = parse("heading: liens and article: covenants or clause: zzz").unwrap();
    assert!(query.matches(&section()));
    let query = parse("not heading: baskets").unwrap();
    assert!(query.matches(&section()));
}

#[test]
fn quoted_phrase_is_contiguous() {
    let query = parse(r#"article: "negative covenants""#).unwrap();
    assert!(query.matches(&section()));
    assert!(!query.matches(&Section::new().set("article", "negative pledge covenants")));
}

#[test]
fn regex_literal_is_case_insensitive() {
    let query = parse("heading: /indebted(ness)?/").unwrap();
    assert!(query.matches(&Section::new().set("heading", "Indebtedness")));
    assert!(query.matches(&Section::new().set("heading", "Indebted")));
    assert!(!query.matches(&section()));
}

#[test]
fn numeric_metadata_compares_by_value() {
    let query = parse("facility_size_mm: 250").unwrap();
    assert!(query.matches(&section()));
    assert!(query.matches(&Section::new().set("facility_size_mm", 250_i64)));
    assert!(!query.matches(&Section::new().set("facility_size_mm", 2500_i64)));

    let query = parse("vintage: 2021").unwrap();
    assert!(query.matches(&section()));
    assert!(!query.matches(&Section::new().set("vintage", 2024_i64)));
}

#[test]
fn empty_query_matches_every_record() {
    let query = parse("").unwrap();
    assert!(query.is_match_all());
    assert!(query.matches(&section()));
    assert!(query.matches(&Section::new()));
}

#[test]
fn unknown_field_is_rejected_with_offset() {
    let err = parse("foo: bar").unwrap_err();
    assert_eq!(
        err,
        ParseError::UnknownField {
            offset: 0,
            name: "foo".into(),
        }
    );
}

#[test]
fn unterminated_quote_is_a_lexical_error() {
    let err = parse(r#"heading: "unclosed"#).unwrap_err();
    assert_eq!(
        err,
        ParseError::Unterminated {
            offset: 9,
            what: "string",
        }
    );
}

#[test]
fn unterminated_regex_is_a_lexical_error() {
    let err = parse("heading: /unclosed").unwrap_err();
    assert!(matches!(err, ParseError::Unterminated { what: "regex", .. }));
}

#[test]
fn invalid_pattern_is_rejected_at_parse_time() {
    let err = parse("heading: /indebted(ness?/").unwrap_err();
    assert!(matches!(err, ParseError::PatternCompile { offset: 9, .. }));
}

#[test]
fn unrecognized_character_is_rejected() {
    let err = parse("heading: a ^ b").unwrap_err();
    assert_eq!(
        err,
        ParseError::Lexical {
            offset: 11,
            ch: '^',
        }
    );
}

#[test]
fn dangling_operator_is_a_syntax_error() {
    let err = parse("heading: liens AND").unwrap_err();
    match err {
        ParseError::Syntax { found, .. } => assert_eq!(found, "end of input"),
        other => panic!("expected Syntax, got {other:?}"),
    }
}

#[test]
fn unbalanced_parens_is_a_syntax_error() {
    let err = parse("(heading: liens").unwrap_err();
    assert!(matches!(err, ParseError::Syntax { .. }));
    assert!(err.offset() <= "(heading: liens".len());

    let err = parse("heading: liens)").unwrap_err();
    assert!(matches!(err, ParseError::Syntax { .. }));
}

#[test]
fn highlights_come_back_for_the_reader_view() {
    let query = parse("heading: lien article: /covenants?/").unwrap();
    let report = query.matches_detailed(&section());
    assert!(report.matched());

    let fields: Vec<&str> = report
        .highlights()
        .iter()
        .map(|h| h.field.as_str())
        .collect();
    assert_eq!(fields, ["heading", "article"]);

    // Ranges index the original field text.
    let heading = "Permitted Liens";
    let first = &report.highlights()[0];
    assert_eq!(&heading[first.range.clone()], "Lien");
}

#[test]
fn filter_runs_the_dashboard_loop() {
    let sections = vec![
        Section::new().set("heading", "Permitted Liens"),
        Section::new().set("heading", "Indebtedness"),
        Section::new()
            .set("heading", "Liens")
            .set("doc_type", "term_sheet"),
    ];
    let query = parse("heading: liens").unwrap();
    assert_eq!(query.filter(&sections).len(), 2);

    let query = parse("heading: liens NOT doc_type: term_sheet").unwrap();
    assert_eq!(query.filter(&sections).len(), 1);
}

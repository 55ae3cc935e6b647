use rstest::{fixture, rstest};
use timecalc::{Catalog, TokenKind, Unit, tokenize, tokenize_with};

fn kinds(src: &str) -> Vec<TokenKind> {
    tokenize(src)
        .unwrap_or_else(|e| panic!("{src}: {e}"))
        .iter()
        .map(|t| t.kind())
        .collect()
}

#[fixture]
fn mixed_input() -> &'static str {
    "2015/07/09 2:15pm + 1 hour, 30 minutes"
}

#[rstest]
#[case("42", TokenKind::T_NUMBER)]
#[case("-1.5", TokenKind::T_NUMBER)]
#[case("hours", TokenKind::T_UNIT)]
#[case("now", TokenKind::T_DATETIME_LITERAL)]
#[case("epoch", TokenKind::T_DATETIME_LITERAL)]
#[case("today", TokenKind::T_DATE_LITERAL)]
#[case("2015-07-31", TokenKind::T_ISO8601)]
#[case("2015-07-31T01:23:45", TokenKind::T_ISO8601)]
#[case("20150731T0123", TokenKind::T_ISO8601)]
#[case("2015/07/31", TokenKind::T_DATE)]
#[case("14:30", TokenKind::T_TIME)]
#[case("3am", TokenKind::T_TIME)]
#[case("9.05pm", TokenKind::T_TIME)]
fn single_tokens(#[case] source: &str, #[case] expected: TokenKind) {
    assert_eq!(kinds(source), vec![expected]);
}

#[rstest]
#[case("2015")]
#[case("20150731")]
#[case("10.45")]
#[case("86410")]
fn number_wins_equal_length_ties(#[case] source: &str) {
    assert_eq!(kinds(source), vec![TokenKind::T_NUMBER]);
}

#[rstest]
#[case("ms", Unit::Millisecond)]
#[case("s", Unit::Second)]
#[case("secs", Unit::Second)]
#[case("min", Unit::Minute)]
#[case("hrs", Unit::Hour)]
#[case("d", Unit::Day)]
#[case("wk", Unit::Week)]
#[case("mons", Unit::Month)]
#[case("y", Unit::Year)]
fn unit_aliases(#[case] source: &str, #[case] expected: Unit) {
    let tokens = tokenize(source).unwrap_or_else(|e| panic!("{source}: {e}"));
    let unit = tokens
        .first()
        .and_then(|t| t.field_names().find_map(Unit::from_group));
    assert_eq!(unit, Some(expected));
}

#[rstest]
fn spans_cover_token_text(mixed_input: &str) {
    let tokens = tokenize(mixed_input).unwrap_or_else(|e| panic!("{e}"));
    for token in &tokens {
        assert_eq!(mixed_input.get(token.span()), Some(token.text()));
    }
    assert_eq!(
        tokens.iter().map(|t| t.kind()).collect::<Vec<_>>(),
        vec![
            TokenKind::T_DATE,
            TokenKind::T_TIME,
            TokenKind::T_PLUS,
            TokenKind::T_NUMBER,
            TokenKind::T_UNIT,
            TokenKind::T_COMMA,
            TokenKind::T_NUMBER,
            TokenKind::T_UNIT,
        ]
    );
}

#[test]
fn named_fields_are_exposed() {
    let tokens = tokenize("2:15pm").unwrap_or_else(|e| panic!("{e}"));
    let time = tokens.first().unwrap_or_else(|| panic!("no token"));
    assert_eq!(time.field("hour"), Some("2"));
    assert_eq!(time.field("minute"), Some("15"));
    assert_eq!(time.field("ampm"), Some("pm"));
    assert_eq!(time.field("second"), None);
}

#[test]
fn whitespace_is_dropped() {
    assert_eq!(kinds("  1\t+\n2 "), vec![
        TokenKind::T_NUMBER,
        TokenKind::T_PLUS,
        TokenKind::T_NUMBER,
    ]);
}

#[test]
fn empty_input_has_no_tokens() {
    assert_eq!(kinds(""), Vec::new());
}

#[rstest]
#[case("fail", 0)]
#[case("1 + ?", 4)]
#[case("2 hours & 3", 8)]
fn unknown_text_reports_position(#[case] source: &str, #[case] position: usize) {
    let err = tokenize(source).err().unwrap_or_else(|| panic!("{source} lexed"));
    assert_eq!(err.position(), position);
}

#[test]
fn short_input_is_its_own_context() {
    let err = tokenize("1 + ?").err().unwrap_or_else(|| panic!("lexed"));
    assert_eq!(err.context(), "1 + ?");
}

#[test]
fn long_input_context_is_elided_on_both_sides() {
    let source = format!("{}?{}", "1 + ".repeat(20), " + 2".repeat(20));
    let err = tokenize(&source).err().unwrap_or_else(|| panic!("lexed"));
    let context = err.context();
    assert_eq!(err.position(), 80);
    assert!(context.starts_with("...") && context.ends_with("..."), "{context}");
    assert_eq!(context.chars().count(), 60);
    assert_eq!(context.chars().nth(30), Some('?'));
}

#[test]
fn context_near_the_start_is_elided_only_after() {
    let source = format!("1 + ?{}", " + 2".repeat(20));
    let err = tokenize(&source).err().unwrap_or_else(|| panic!("lexed"));
    let after = source.get(5..31).unwrap_or_default();
    assert_eq!(err.context(), format!("1 + ?{after}..."));
}

#[test]
fn custom_catalog_prefers_longest_then_earliest() {
    let catalog = Catalog::empty()
        .register(TokenKind::T_NUMBER, "[0-9]+")
        .and_then(|c| c.register(TokenKind::T_DATE, "[0-9]+"))
        .and_then(|c| c.register(TokenKind::T_TIME, "[0-9]+:[0-9]+"))
        .unwrap_or_else(|e| panic!("catalog: {e}"));
    let tokens = tokenize_with(&catalog, "12:30").unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(tokens.iter().map(|t| t.kind()).collect::<Vec<_>>(), vec![
        TokenKind::T_TIME
    ]);
    let tokens = tokenize_with(&catalog, "12").unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(tokens.iter().map(|t| t.kind()).collect::<Vec<_>>(), vec![
        TokenKind::T_NUMBER
    ]);
}

//! Error classification, messages and source snippets.

mod test_util;

use rstest::rstest;
use test_util::{assert_fails, eval_err};
use timecalc::{ErrorKind, error::snippet};

#[rstest]
#[case("fail", ErrorKind::Lex)]
#[case("1 2", ErrorKind::ExtraData)]
#[case("(1 + 2", ErrorKind::Syntax)]
#[case("", ErrorKind::Syntax)]
#[case("1 year, 1 year", ErrorKind::DuplicateUnit)]
#[case("2015-02-29", ErrorKind::InvalidDate)]
#[case("2015/01/01 + 10", ErrorKind::BadOperand)]
#[case("1 / 0", ErrorKind::DivisionByZero)]
fn every_failure_has_a_kind(#[case] source: &str, #[case] kind: ErrorKind) {
    assert_fails(source, kind);
}

#[rstest]
#[case("1 year, 1 year", "unit is already used: years")]
#[case("2015-02-29", "cannot parse date: no such date 2015-02-29")]
#[case("2015/01/01 + 10", "bad operands for '+': datetime and number")]
#[case("1 / 0", "division by zero")]
#[case("(1 + 2", "unexpected end of input")]
#[case("1 + hours", "unexpected unit 'hours'")]
#[case("1 2", "unexpected data after expression: '2'")]
fn messages(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(eval_err(source).to_string(), expected);
}

#[rstest]
#[case("1 + ?", 4)]
#[case("2015/01/01 + 10", 11)]
#[case("1 hour, 2 hours, 3 minutes", 10)]
#[case("2 * (1 + 2", 10)]
fn position_points_at_the_offending_text(#[case] source: &str, #[case] position: usize) {
    assert_eq!(eval_err(source).position(), position);
}

#[test]
fn snippet_places_caret_under_error() {
    let source = "2015/01/01 + 10";
    assert_eq!(
        eval_err(source).snippet(source),
        "bad operands for '+': datetime and number\n2015/01/01 + 10\n           ^"
    );
}

#[test]
fn long_lines_are_elided_around_the_error() {
    let source = format!("{}?{}", "1 + ".repeat(20), " + 2".repeat(20));
    let rendered = snippet(&source, 80);
    let (line, caret) = rendered
        .split_once('\n')
        .unwrap_or_else(|| panic!("no caret line: {rendered}"));
    assert!(line.starts_with("...") && line.ends_with("..."), "{line}");
    assert_eq!(line.chars().count(), 60);
    assert_eq!(caret.len(), 31);
    assert_eq!(line.chars().nth(30), Some('?'));
}

#[test]
fn caret_may_sit_past_the_end() {
    assert_eq!(snippet("(1", 2), "(1\n  ^");
}

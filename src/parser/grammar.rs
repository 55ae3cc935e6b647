//! The calculator grammar.
//!
//! ```text
//! expression      := term expression_tail
//! expression_tail := "+" term expression_tail | "-" term expression_tail | ε
//! term            := factor term_tail
//! term_tail       := "*" factor term_tail | "/" factor term_tail | ε
//! factor          := datetime | NUMBER number_suffix | "(" expression ")"
//! number_suffix   := UNIT duration_tail | ε
//! duration_tail   := "," duration_part duration_tail | ε
//! duration_part   := NUMBER UNIT
//! datetime        := DATETIME_LITERAL
//!                  | ISO8601 time_suffix | DATE time_suffix
//!                  | DATE_LITERAL time_suffix | TIME date_suffix
//! time_suffix     := TIME | ε
//! date_suffix     := DATE | DATE_LITERAL | ISO8601 | ε
//! ```
//!
//! The tail nonterminals are right recursive and collect
//! `(operator, operand)` pairs, which [`fold_chain`] turns into
//! left-associative trees.

use super::ParseError;
use super::ast::Ast;
use super::datetime::Moment;
use super::engine::{Grammar, Parts, Rule, SyntaxError, nt, t};
use crate::TokenKind::{
    T_COMMA, T_DATE, T_DATE_LITERAL, T_DATETIME_LITERAL, T_ISO8601, T_LPAREN, T_MINUS, T_NUMBER,
    T_PLUS, T_RPAREN, T_SLASH, T_STAR, T_TIME, T_UNIT,
};
use crate::Unit;
use crate::tokenizer::{Span, Token};
use crate::value::{BinaryOp, Duration, Value};

/// Entry nonterminal.
pub(crate) const ENTRY: &str = "expression";

/// A `<number> <unit>` pair from a duration literal.
#[derive(Debug)]
pub(crate) struct Pair {
    number: Token,
    unit: Token,
}

/// Intermediate results built by rule actions.
#[derive(Debug)]
pub(crate) enum Node {
    Expr(Ast),
    Chain(Vec<(BinaryOp, Span, Ast)>),
    Pairs(Vec<Pair>),
    Suffix(Option<(Token, Vec<Pair>)>),
    Moment(Moment),
}

pub(crate) type ExprGrammar = Grammar<Node, ParseError>;

fn malformed(symbol: &str) -> ParseError {
    ParseError::Syntax(SyntaxError::MalformedRule {
        symbol: symbol.to_string(),
    })
}

fn expr(parts: &mut Parts<Node>) -> Result<Ast, ParseError> {
    match parts.node()? {
        Node::Expr(ast) => Ok(ast),
        _ => Err(malformed("expression")),
    }
}

fn chain(parts: &mut Parts<Node>) -> Result<Vec<(BinaryOp, Span, Ast)>, ParseError> {
    match parts.node()? {
        Node::Chain(chain) => Ok(chain),
        _ => Err(malformed("operator chain")),
    }
}

fn pairs(parts: &mut Parts<Node>) -> Result<Vec<Pair>, ParseError> {
    match parts.node()? {
        Node::Pairs(pairs) => Ok(pairs),
        _ => Err(malformed("duration")),
    }
}

fn moment(parts: &mut Parts<Node>) -> Result<Moment, ParseError> {
    match parts.node()? {
        Node::Moment(moment) => Ok(moment),
        _ => Err(malformed("datetime")),
    }
}

fn operator(token: &Token) -> Result<BinaryOp, ParseError> {
    match token.kind() {
        T_PLUS => Ok(BinaryOp::Add),
        T_MINUS => Ok(BinaryOp::Sub),
        T_STAR => Ok(BinaryOp::Mul),
        T_SLASH => Ok(BinaryOp::Div),
        _ => Err(malformed("operator")),
    }
}

fn number(token: &Token) -> Result<f64, ParseError> {
    token
        .field("number")
        .and_then(|text| text.parse().ok())
        .ok_or_else(|| malformed("number"))
}

fn unit(token: &Token) -> Result<Unit, ParseError> {
    token
        .field_names()
        .find_map(Unit::from_group)
        .ok_or_else(|| malformed("unit"))
}

/// Fold `left (op right)*` into a left-associative tree.
fn fold_chain(left: Ast, chain: Vec<(BinaryOp, Span, Ast)>) -> Ast {
    chain
        .into_iter()
        .fold(left, |acc, (op, span, right)| Ast::binary(op, span, acc, right))
}

/// Sum the pairs of one duration literal, rejecting repeated units.
fn duration_literal(pairs: &[Pair]) -> Result<Duration, ParseError> {
    let mut seen: Vec<Unit> = Vec::with_capacity(pairs.len());
    let mut total = Duration::zero();
    for pair in pairs {
        let which = unit(&pair.unit)?;
        if seen.contains(&which) {
            return Err(ParseError::DuplicateUnit {
                unit: which.plural().to_string(),
                span: pair.unit.span(),
            });
        }
        seen.push(which);
        let span = pair.number.span().start..pair.unit.span().end;
        total = Duration::of(number(&pair.number)?, which)
            .and_then(|part| total.checked_add(part))
            .ok_or(ParseError::OutOfRange { span })?;
    }
    Ok(total)
}

fn binary_step(mut p: Parts<Node>) -> Result<Node, ParseError> {
    let op_token = p.token()?;
    let op = operator(&op_token)?;
    let right = expr(&mut p)?;
    let mut steps = vec![(op, op_token.span(), right)];
    steps.extend(chain(&mut p)?);
    Ok(Node::Chain(steps))
}

fn chain_start(mut p: Parts<Node>) -> Result<Node, ParseError> {
    let left = expr(&mut p)?;
    Ok(Node::Expr(fold_chain(left, chain(&mut p)?)))
}

fn empty_chain(_: Parts<Node>) -> Result<Node, ParseError> {
    Ok(Node::Chain(Vec::new()))
}

fn datetime_token(mut p: Parts<Node>) -> Result<Node, ParseError> {
    Ok(Node::Moment(Moment::from_token(&p.token()?)?))
}

fn datetime_with_suffix(mut p: Parts<Node>) -> Result<Node, ParseError> {
    let head = Moment::from_token(&p.token()?)?;
    Ok(Node::Moment(head.combine(moment(&mut p)?)?))
}

fn empty_moment(_: Parts<Node>) -> Result<Node, ParseError> {
    Ok(Node::Moment(Moment::default()))
}

fn datetime_factor(mut p: Parts<Node>) -> Result<Node, ParseError> {
    let value = Value::Datetime(moment(&mut p)?.resolve());
    Ok(Node::Expr(Ast::Leaf(value)))
}

fn number_factor(mut p: Parts<Node>) -> Result<Node, ParseError> {
    let number_token = p.token()?;
    let Node::Suffix(suffix) = p.node()? else {
        return Err(malformed("number suffix"));
    };
    let value = match suffix {
        None => Value::Number(number(&number_token)?),
        Some((unit_token, rest)) => {
            let mut all = Vec::with_capacity(rest.len() + 1);
            all.push(Pair {
                number: number_token,
                unit: unit_token,
            });
            all.extend(rest);
            Value::Duration(duration_literal(&all)?)
        }
    };
    Ok(Node::Expr(Ast::Leaf(value)))
}

fn unit_suffix(mut p: Parts<Node>) -> Result<Node, ParseError> {
    let unit_token = p.token()?;
    Ok(Node::Suffix(Some((unit_token, pairs(&mut p)?))))
}

fn no_suffix(_: Parts<Node>) -> Result<Node, ParseError> {
    Ok(Node::Suffix(None))
}

fn more_pairs(mut p: Parts<Node>) -> Result<Node, ParseError> {
    p.skip()?;
    let mut all = pairs(&mut p)?;
    all.extend(pairs(&mut p)?);
    Ok(Node::Pairs(all))
}

fn no_pairs(_: Parts<Node>) -> Result<Node, ParseError> {
    Ok(Node::Pairs(Vec::new()))
}

fn one_pair(mut p: Parts<Node>) -> Result<Node, ParseError> {
    let number = p.token()?;
    let unit = p.token()?;
    Ok(Node::Pairs(vec![Pair { number, unit }]))
}

fn paren_factor(mut p: Parts<Node>) -> Result<Node, ParseError> {
    p.skip()?;
    Ok(Node::Expr(expr(&mut p)?))
}

/// Build the calculator grammar.
pub(crate) fn expression_grammar() -> ExprGrammar {
    ExprGrammar::new()
        .define(ENTRY, vec![Rule::new(&[nt("term"), nt("expression_tail")], chain_start)])
        .define(
            "expression_tail",
            vec![
                Rule::new(&[t(T_PLUS), nt("term"), nt("expression_tail")], binary_step),
                Rule::new(&[t(T_MINUS), nt("term"), nt("expression_tail")], binary_step),
                Rule::new(&[], empty_chain),
            ],
        )
        .define("term", vec![Rule::new(&[nt("factor"), nt("term_tail")], chain_start)])
        .define(
            "term_tail",
            vec![
                Rule::new(&[t(T_STAR), nt("factor"), nt("term_tail")], binary_step),
                Rule::new(&[t(T_SLASH), nt("factor"), nt("term_tail")], binary_step),
                Rule::new(&[], empty_chain),
            ],
        )
        .define(
            "factor",
            vec![
                Rule::new(&[nt("datetime")], datetime_factor),
                Rule::new(&[t(T_NUMBER), nt("number_suffix")], number_factor),
                Rule::new(&[t(T_LPAREN), nt(ENTRY), t(T_RPAREN)], paren_factor),
            ],
        )
        .define(
            "number_suffix",
            vec![
                Rule::new(&[t(T_UNIT), nt("duration_tail")], unit_suffix),
                Rule::new(&[], no_suffix),
            ],
        )
        .define(
            "duration_tail",
            vec![
                Rule::new(
                    &[t(T_COMMA), nt("duration_part"), nt("duration_tail")],
                    more_pairs,
                ),
                Rule::new(&[], no_pairs),
            ],
        )
        .define(
            "duration_part",
            vec![Rule::new(&[t(T_NUMBER), t(T_UNIT)], one_pair)],
        )
        .define(
            "datetime",
            vec![
                Rule::new(&[t(T_DATETIME_LITERAL)], datetime_token),
                Rule::new(&[t(T_ISO8601), nt("time_suffix")], datetime_with_suffix),
                Rule::new(&[t(T_DATE), nt("time_suffix")], datetime_with_suffix),
                Rule::new(&[t(T_DATE_LITERAL), nt("time_suffix")], datetime_with_suffix),
                Rule::new(&[t(T_TIME), nt("date_suffix")], datetime_with_suffix),
            ],
        )
        .define(
            "time_suffix",
            vec![
                Rule::new(&[t(T_TIME)], datetime_token),
                Rule::new(&[], empty_moment),
            ],
        )
        .define(
            "date_suffix",
            vec![
                Rule::new(&[t(T_DATE)], datetime_token),
                Rule::new(&[t(T_DATE_LITERAL)], datetime_token),
                Rule::new(&[t(T_ISO8601)], datetime_token),
                Rule::new(&[], empty_moment),
            ],
        )
}

//! Parser for calculator expressions.
//!
//! Tokens from [`crate::tokenize`] are matched against the grammar in
//! `grammar.rs`, which is built on the generic backtracking [`engine`].
//! Literal values are computed while parsing, so the resulting [`Ast`]
//! holds only resolved [`crate::Value`]s and binary operators.

use std::sync::LazyLock;

use thiserror::Error;

use crate::error::EvalError;
use crate::tokenizer::{Span, Token, tokenize};

pub mod ast;
mod datetime;
pub mod engine;
mod grammar;

pub use ast::Ast;
use engine::SyntaxError;
use grammar::{ENTRY, ExprGrammar, Node, expression_grammar};

/// Errors raised while turning tokens into an [`Ast`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// A unit appears twice in one duration, or a datetime has two dates or
    /// two times.
    #[error("unit is already used: {unit}")]
    DuplicateUnit { unit: String, span: Span },
    /// A date or time token names an impossible value.
    #[error("cannot parse date: {reason}")]
    InvalidDate { reason: String, span: Span },
    /// A duration literal does not fit the representable range.
    #[error("duration literal is out of range")]
    OutOfRange { span: Span },
}

impl ParseError {
    /// Byte range of the offending input.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Syntax(err) => err.span(),
            Self::DuplicateUnit { span, .. }
            | Self::InvalidDate { span, .. }
            | Self::OutOfRange { span } => span.clone(),
        }
    }
}

static GRAMMAR: LazyLock<ExprGrammar> = LazyLock::new(expression_grammar);

/// Parse already tokenized input.
///
/// # Errors
/// Returns a [`ParseError`] describing the first failure.
pub fn parse_tokens(tokens: &[Token]) -> Result<Ast, ParseError> {
    match GRAMMAR.parse(ENTRY, tokens)? {
        Node::Expr(ast) => Ok(ast),
        _ => Err(SyntaxError::MalformedRule {
            symbol: ENTRY.to_string(),
        }
        .into()),
    }
}

/// Tokenize and parse `src`.
///
/// # Errors
/// Returns [`EvalError::Lex`] if `src` cannot be tokenized and
/// [`EvalError::Parse`] if the tokens do not form an expression.
///
/// # Examples
///
/// ```rust
/// let ast = timecalc::parse("2 * (1 + 3)").unwrap_or_else(|e| panic!("{e}"));
/// assert_eq!(ast.to_sexpr(), "(* 2 (+ 1 3))");
/// ```
pub fn parse(src: &str) -> Result<Ast, EvalError> {
    let tokens = tokenize(src)?;
    Ok(parse_tokens(&tokens)?)
}

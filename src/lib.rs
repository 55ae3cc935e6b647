//! Library crate for timecalc.
//!
//! Evaluates arithmetic over numbers, durations and datetimes written in a
//! small expression language such as `2015/07/31 2:15pm + 1 day, 3 hours`.

#![forbid(unsafe_code)]

pub mod error;
pub mod eval;
pub mod language;
pub mod parser;
pub mod tokenizer;
pub mod value;

pub use error::{ErrorKind, EvalError};
pub use language::{TokenKind, Unit};
pub use parser::{Ast, parse};
pub use tokenizer::{Catalog, LexError, Span, Token, tokenize, tokenize_with};
pub use value::{BinaryOp, Breakdown, Duration, Value, ValueKind};

/// Evaluate an expression.
///
/// # Errors
/// Returns an [`EvalError`] if `src` cannot be tokenized or parsed, or if an
/// operator is applied to incompatible or out-of-range operands.
///
/// # Examples
///
/// ```rust
/// use timecalc::evaluate;
///
/// let value = evaluate("1 hour, 1 second + 1 hour").unwrap_or_else(|e| panic!("{e}"));
/// assert_eq!(value.to_string(), "2 hours, 1 second");
/// ```
pub fn evaluate(src: &str) -> Result<Value, EvalError> {
    eval::evaluate_ast(&parse(src)?)
}

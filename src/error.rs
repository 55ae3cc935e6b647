//! Error taxonomy for evaluation and helpers for rendering source snippets.
//!
//! Every failure surfaced by [`crate::evaluate`] is an [`EvalError`]. Lexing
//! and parsing failures wrap [`LexError`] and [`ParseError`]; arithmetic
//! failures are raised by the evaluator. Each variant carries the position
//! needed to point at the offending text without re-parsing.

use thiserror::Error;

use crate::parser::ParseError;
use crate::parser::engine::SyntaxError;
use crate::tokenizer::{LexError, Span};
use crate::value::ValueKind;

/// Characters of context shown on either side of an error position.
pub const CONTEXT: usize = 30;

const ELLIPSIS: &str = "...";

/// Cut a window of at most [`CONTEXT`] characters either side of `pos`.
///
/// Returns the windowed line and the character column of `pos` within it.
pub(crate) fn window(text: &str, pos: usize) -> (String, usize) {
    let len = text.chars().count();
    let at = text.get(..pos).map_or(len, |head| head.chars().count());
    let (prefix, start) = if at > CONTEXT {
        (ELLIPSIS, at - CONTEXT + ELLIPSIS.len())
    } else {
        ("", 0)
    };
    let (suffix, end) = if at + CONTEXT < len {
        (ELLIPSIS, at + CONTEXT - ELLIPSIS.len())
    } else {
        ("", len)
    };
    let head: String = text.chars().take(at).skip(start).collect();
    let tail: String = text.chars().take(end).skip(at).collect();
    let column = prefix.len() + head.chars().count();
    (format!("{prefix}{head}{tail}{suffix}"), column)
}

/// Render `text` with a caret under byte offset `pos`.
///
/// # Examples
///
/// ```rust
/// use timecalc::error::snippet;
///
/// assert_eq!(snippet("1 + ?", 4), "1 + ?\n    ^");
/// ```
#[must_use]
pub fn snippet(text: &str, pos: usize) -> String {
    let (line, column) = window(text, pos);
    format!("{line}\n{}^", " ".repeat(column))
}

/// Coarse classification of [`EvalError`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Lex,
    ExtraData,
    Syntax,
    DuplicateUnit,
    InvalidDate,
    BadOperand,
    DivisionByZero,
    OutOfRange,
}

/// Errors returned by [`crate::evaluate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The operator has no rule for this pair of operand types.
    #[error("bad operands for '{op}': {left} and {right}")]
    BadOperand {
        op: String,
        left: ValueKind,
        right: ValueKind,
        span: Span,
    },
    #[error("division by zero")]
    DivisionByZero { span: Span },
    #[error("result of '{op}' is out of range")]
    OutOfRange { op: String, span: Span },
}

impl EvalError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Lex(_) => ErrorKind::Lex,
            Self::Parse(err) => match err {
                ParseError::Syntax(SyntaxError::ExtraData { .. }) => ErrorKind::ExtraData,
                ParseError::Syntax(_) => ErrorKind::Syntax,
                ParseError::DuplicateUnit { .. } => ErrorKind::DuplicateUnit,
                ParseError::InvalidDate { .. } => ErrorKind::InvalidDate,
                ParseError::OutOfRange { .. } => ErrorKind::OutOfRange,
            },
            Self::BadOperand { .. } => ErrorKind::BadOperand,
            Self::DivisionByZero { .. } => ErrorKind::DivisionByZero,
            Self::OutOfRange { .. } => ErrorKind::OutOfRange,
        }
    }

    /// Byte offset the error points at.
    #[must_use]
    pub fn position(&self) -> usize {
        match self {
            Self::Lex(err) => err.position(),
            Self::Parse(err) => err.span().start,
            Self::BadOperand { span, .. }
            | Self::DivisionByZero { span }
            | Self::OutOfRange { span, .. } => span.start,
        }
    }

    /// Render the message followed by a pointer into `src`.
    #[must_use]
    pub fn snippet(&self, src: &str) -> String {
        format!("{self}\n{}", snippet(src, self.position()))
    }
}

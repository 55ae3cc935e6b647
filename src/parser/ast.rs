//! Expression trees produced by the grammar.

use crate::tokenizer::Span;
use crate::value::{BinaryOp, Value};

/// A parsed expression: a resolved literal or an operator applied to two
/// sub-expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum Ast {
    Leaf(Value),
    Binary {
        op: BinaryOp,
        /// Source of the operator token.
        span: Span,
        left: Box<Ast>,
        right: Box<Ast>,
    },
}

impl Ast {
    #[must_use]
    pub fn binary(op: BinaryOp, span: Span, left: Self, right: Self) -> Self {
        Self::Binary {
            op,
            span,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Render the tree as an s-expression, mainly for tests and debugging.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use timecalc::parse;
    ///
    /// let ast = parse("1 - 2 - 3").unwrap_or_else(|e| panic!("{e}"));
    /// assert_eq!(ast.to_sexpr(), "(- (- 1 2) 3)");
    /// ```
    #[must_use]
    pub fn to_sexpr(&self) -> String {
        match self {
            Self::Leaf(value) => value.to_string(),
            Self::Binary {
                op, left, right, ..
            } => format!("({op} {} {})", left.to_sexpr(), right.to_sexpr()),
        }
    }
}

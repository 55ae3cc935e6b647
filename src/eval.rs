//! Evaluation of parsed expressions.
//!
//! Evaluation is a post-order walk: both operands are reduced to values and
//! then combined with [`crate::value::apply`]. Failures carry the span of the
//! operator that raised them.

use log::debug;

use crate::error::EvalError;
use crate::parser::Ast;
use crate::value::{AlgebraError, Value, apply};

/// Reduce `ast` to a single value.
///
/// # Errors
/// Returns [`EvalError::BadOperand`], [`EvalError::DivisionByZero`] or
/// [`EvalError::OutOfRange`] for the first operator that fails.
pub fn evaluate_ast(ast: &Ast) -> Result<Value, EvalError> {
    match ast {
        Ast::Leaf(value) => Ok(*value),
        Ast::Binary {
            op,
            span,
            left,
            right,
        } => {
            let lhs = evaluate_ast(left)?;
            let rhs = evaluate_ast(right)?;
            apply(*op, &lhs, &rhs).map_err(|err| {
                debug!("'{op}' failed on {} and {}: {err:?}", lhs.kind(), rhs.kind());
                match err {
                    AlgebraError::Undefined => EvalError::BadOperand {
                        op: op.symbol().to_string(),
                        left: lhs.kind(),
                        right: rhs.kind(),
                        span: span.clone(),
                    },
                    AlgebraError::DivisionByZero => EvalError::DivisionByZero { span: span.clone() },
                    AlgebraError::OutOfRange => EvalError::OutOfRange {
                        op: op.symbol().to_string(),
                        span: span.clone(),
                    },
                }
            })
        }
    }
}

//! Binary operators over [`Value`]s.
//!
//! The whole compatibility table lives in [`apply`]: one `match` over the
//! operator and both operand types. Pairs without an arm are undefined.

use crate::value::{Duration, Value};

/// Infix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Why an operator could not produce a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgebraError {
    /// No rule exists for this operator and operand types.
    Undefined,
    DivisionByZero,
    /// The result is not representable.
    OutOfRange,
}

/// Apply `op` to `left` and `right`.
///
/// # Errors
/// Returns [`AlgebraError::Undefined`] for unsupported type pairs,
/// [`AlgebraError::DivisionByZero`] for a zero divisor and
/// [`AlgebraError::OutOfRange`] when the result overflows.
#[expect(clippy::float_arithmetic, reason = "numbers are floating point")]
pub fn apply(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, AlgebraError> {
    use AlgebraError::{DivisionByZero, OutOfRange, Undefined};
    use BinaryOp::{Add, Div, Mul, Sub};
    use Value::{Datetime, Number};

    match (op, *left, *right) {
        (Add, Number(a), Number(b)) => Ok(Number(a + b)),
        (Sub, Number(a), Number(b)) => Ok(Number(a - b)),
        (Mul, Number(a), Number(b)) => Ok(Number(a * b)),
        (Div, Number(_), Number(b)) if b == 0.0 => Err(DivisionByZero),
        (Div, Number(a), Number(b)) => Ok(Number(a / b)),

        (Mul, Number(n), Value::Duration(d)) | (Mul, Value::Duration(d), Number(n)) => {
            d.scale(n).map(Value::Duration).ok_or(OutOfRange)
        }
        (Add, Value::Duration(a), Value::Duration(b)) => {
            a.checked_add(b).map(Value::Duration).ok_or(OutOfRange)
        }
        (Sub, Value::Duration(a), Value::Duration(b)) => {
            a.checked_sub(b).map(Value::Duration).ok_or(OutOfRange)
        }
        (Div, Value::Duration(_), Number(n)) if n == 0.0 => Err(DivisionByZero),
        (Div, Value::Duration(d), Number(n)) => {
            d.divide(n).map(Value::Duration).ok_or(OutOfRange)
        }
        (Div, Value::Duration(_), Value::Duration(b)) if b.is_zero() => Err(DivisionByZero),
        (Div, Value::Duration(a), Value::Duration(b)) => a.ratio(b).map(Number).ok_or(OutOfRange),

        (Add, Value::Duration(d), Datetime(dt)) | (Add, Datetime(dt), Value::Duration(d)) => dt
            .checked_add_signed(d.as_delta())
            .map(Datetime)
            .ok_or(OutOfRange),
        (Sub, Datetime(dt), Value::Duration(d)) => dt
            .checked_sub_signed(d.as_delta())
            .map(Datetime)
            .ok_or(OutOfRange),
        (Sub, Datetime(a), Datetime(b)) => {
            Ok(Value::Duration(Duration::from(a.signed_duration_since(b))))
        }

        _ => Err(Undefined),
    }
}

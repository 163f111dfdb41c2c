//! Binary and unary operator implementations.

use crate::evaluator::ErrorKind;
use crate::parser::{BinaryOp, UnaryOp};
use crate::values::{Kind, Value};

/// Apply a binary operator to two evaluated operands.
///
/// Both operands must have the same numeric kind. Booleans never take part
/// in arithmetic, and ints and floats are never coerced into each other.
pub(super) fn eval_binary(op: BinaryOp, left: Value, right: Value) -> Result<Value, ErrorKind> {
    match (left, right) {
        (Value::Float(l), Value::Float(r)) => Ok(Value::Float(eval_binary_float(op, l, r))),
        (Value::Int(l), Value::Int(r)) => eval_binary_int(op, l, r).map(Value::Int),
        (Value::Bool(_), _) | (_, Value::Bool(_)) => Err(ErrorKind::UnsupportedOperator {
            op: op.symbol(),
            operand: Kind::Bool,
        }),
        (l, r) => Err(ErrorKind::TypeMismatch {
            operation: format!("'{}'", op),
            message: format!("cannot combine {} and {}", l.kind(), r.kind()),
            argument: None,
        }),
    }
}

pub(super) fn eval_unary(op: UnaryOp, operand: Value) -> Result<Value, ErrorKind> {
    match (op, operand) {
        (UnaryOp::Plus, Value::Float(_) | Value::Int(_)) => Ok(operand),
        (UnaryOp::Neg, Value::Float(v)) => Ok(Value::Float(-v)),
        (UnaryOp::Neg, Value::Int(v)) => Ok(Value::Int(v.wrapping_neg())),
        (_, Value::Bool(_)) => Err(ErrorKind::UnsupportedOperator {
            op: op.symbol(),
            operand: Kind::Bool,
        }),
    }
}

/// Evaluate a binary operation on two integers.
///
/// Uses wrapping arithmetic to prevent panics on overflow.
/// Division by zero returns an error.
pub(super) fn eval_binary_int(op: BinaryOp, left: i64, right: i64) -> Result<i64, ErrorKind> {
    match op {
        BinaryOp::Add => Ok(left.wrapping_add(right)),
        BinaryOp::Sub => Ok(left.wrapping_sub(right)),
        BinaryOp::Mul => Ok(left.wrapping_mul(right)),
        BinaryOp::Div => {
            if right == 0 {
                Err(ErrorKind::DivisionByZero)
            } else {
                // Use wrapping_div to handle i64::MIN / -1 case
                Ok(left.wrapping_div(right))
            }
        }
    }
}

/// Evaluate a binary operation on two floats.
///
/// Follows IEEE 754 semantics (produces inf/nan rather than panicking).
pub(super) fn eval_binary_float(op: BinaryOp, left: f64, right: f64) -> f64 {
    match op {
        BinaryOp::Add => left + right,
        BinaryOp::Sub => left - right,
        BinaryOp::Mul => left * right,
        BinaryOp::Div => left / right,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_arithmetic() {
        assert_eq!(eval_binary_int(BinaryOp::Add, 2, 3).unwrap(), 5);
        assert_eq!(eval_binary_int(BinaryOp::Sub, 3, 10).unwrap(), -7);
        assert_eq!(eval_binary_int(BinaryOp::Mul, -2, 5).unwrap(), -10);
        assert_eq!(eval_binary_int(BinaryOp::Div, 7, 3).unwrap(), 2);
        assert_eq!(eval_binary_int(BinaryOp::Div, -7, 2).unwrap(), -3);
    }

    #[test]
    fn test_int_div_by_zero() {
        assert_eq!(
            eval_binary_int(BinaryOp::Div, 10, 0),
            Err(ErrorKind::DivisionByZero)
        );
    }

    #[test]
    fn test_int_wrapping_overflow() {
        assert_eq!(eval_binary_int(BinaryOp::Add, i64::MAX, 1).unwrap(), i64::MIN);
        assert_eq!(eval_binary_int(BinaryOp::Mul, i64::MAX, 2).unwrap(), -2);
        assert_eq!(eval_binary_int(BinaryOp::Div, i64::MIN, -1).unwrap(), i64::MIN);
    }

    #[test]
    fn test_float_div_by_zero() {
        let result = eval_binary_float(BinaryOp::Div, 10.0, 0.0);
        assert!(result.is_infinite() && result.is_sign_positive());
        assert!(eval_binary_float(BinaryOp::Div, -1.0, 0.0).is_sign_negative());
        assert!(eval_binary_float(BinaryOp::Div, 0.0, 0.0).is_nan());
    }

    #[test]
    fn test_mixed_kinds_are_rejected() {
        let err = eval_binary(BinaryOp::Add, Value::Float(1.0), Value::Int(2)).unwrap_err();
        assert_eq!(
            err,
            ErrorKind::TypeMismatch {
                operation: "'+'".to_string(),
                message: "cannot combine float and int".to_string(),
                argument: None,
            }
        );
    }

    #[test]
    fn test_bool_operands_are_unsupported() {
        assert_eq!(
            eval_binary(BinaryOp::Mul, Value::Int(1), Value::Bool(true)),
            Err(ErrorKind::UnsupportedOperator {
                op: "*",
                operand: Kind::Bool
            })
        );
        assert_eq!(
            eval_unary(UnaryOp::Neg, Value::Bool(false)),
            Err(ErrorKind::UnsupportedOperator {
                op: "-",
                operand: Kind::Bool
            })
        );
    }

    #[test]
    fn test_unary() {
        assert_eq!(eval_unary(UnaryOp::Neg, Value::Float(2.5)), Ok(Value::Float(-2.5)));
        assert_eq!(eval_unary(UnaryOp::Neg, Value::Int(i64::MIN)), Ok(Value::Int(i64::MIN)));
        assert_eq!(eval_unary(UnaryOp::Plus, Value::Int(4)), Ok(Value::Int(4)));
    }
}

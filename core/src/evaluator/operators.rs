//! Binary operator implementations.

use crate::evaluator::{ExecutionError, RuntimeError};
use crate::parser::BinaryOp;
use crate::values::Value;

/// Apply `op` to two scalars.
///
/// Two integers stay integer except under division; any float operand
/// promotes the operation to float.
pub(super) fn eval_binary(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, ExecutionError> {
    match (left, right) {
        (Value::Integer(l), Value::Integer(r)) => eval_binary_int(op, *l, *r),
        (Value::Integer(l), Value::Float(r)) => eval_binary_float(op, *l as f64, *r).map(Value::Float),
        (Value::Float(l), Value::Integer(r)) => eval_binary_float(op, *l, *r as f64).map(Value::Float),
        (Value::Float(l), Value::Float(r)) => eval_binary_float(op, *l, *r).map(Value::Float),
        (Value::Sequence(_), _) | (_, Value::Sequence(_)) => {
            let found = if left.is_scalar() { right } else { left };
            Err(RuntimeError::UnexpectedValue {
                expected: "scalar",
                found: found.kind_name(),
            }
            .into())
        }
    }
}

/// Evaluate a binary operation on two integers.
///
/// Uses wrapping arithmetic to prevent panics on overflow. Division always
/// produces a float. Power goes through `f64::powf` and narrows back,
/// saturating at the `i64` bounds.
pub(super) fn eval_binary_int(op: BinaryOp, left: i64, right: i64) -> Result<Value, ExecutionError> {
    match op {
        BinaryOp::Add => Ok(Value::Integer(left.wrapping_add(right))),
        BinaryOp::Sub => Ok(Value::Integer(left.wrapping_sub(right))),
        BinaryOp::Mul => Ok(Value::Integer(left.wrapping_mul(right))),
        BinaryOp::Div => {
            if right == 0 {
                Err(RuntimeError::DivisionByZero.into())
            } else {
                Ok(Value::Float(left as f64 / right as f64))
            }
        }
        BinaryOp::Pow => Ok(Value::Integer((left as f64).powf(right as f64) as i64)),
    }
}

/// Evaluate a binary operation on two floats.
///
/// Division by zero is an error; otherwise IEEE 754 semantics apply.
pub(super) fn eval_binary_float(op: BinaryOp, left: f64, right: f64) -> Result<f64, ExecutionError> {
    match op {
        BinaryOp::Add => Ok(left + right),
        BinaryOp::Sub => Ok(left - right),
        BinaryOp::Mul => Ok(left * right),
        BinaryOp::Div => {
            if right == 0.0 {
                Err(RuntimeError::DivisionByZero.into())
            } else {
                Ok(left / right)
            }
        }
        BinaryOp::Pow => Ok(left.powf(right)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::ExecutionErrorKind;
    use crate::values::Sequence;

    fn int(op: BinaryOp, left: i64, right: i64) -> Value {
        eval_binary_int(op, left, right).unwrap()
    }

    #[test]
    fn test_int_add() {
        assert_eq!(int(BinaryOp::Add, 2, 3), Value::Integer(5));
        assert_eq!(int(BinaryOp::Add, -5, 3), Value::Integer(-2));
    }

    #[test]
    fn test_int_sub() {
        assert_eq!(int(BinaryOp::Sub, 10, 4), Value::Integer(6));
        assert_eq!(int(BinaryOp::Sub, 3, 10), Value::Integer(-7));
    }

    #[test]
    fn test_int_mul() {
        assert_eq!(int(BinaryOp::Mul, 3, 4), Value::Integer(12));
        assert_eq!(int(BinaryOp::Mul, -2, 5), Value::Integer(-10));
    }

    #[test]
    fn test_int_overflow_wraps() {
        assert_eq!(int(BinaryOp::Add, i64::MAX, 1), Value::Integer(i64::MIN));
        assert_eq!(int(BinaryOp::Mul, i64::MAX, 2), Value::Integer(-2));
    }

    #[test]
    fn test_int_div_promotes_to_float() {
        assert_eq!(int(BinaryOp::Div, 7, 2), Value::Float(3.5));
        assert_eq!(int(BinaryOp::Div, 6, 3), Value::Float(2.0));
    }

    #[test]
    fn test_int_pow() {
        assert_eq!(int(BinaryOp::Pow, 2, 10), Value::Integer(1024));
        assert_eq!(int(BinaryOp::Pow, -1, 3), Value::Integer(-1));
        assert_eq!(int(BinaryOp::Pow, -1, 4), Value::Integer(1));
        // Negative exponents truncate towards zero.
        assert_eq!(int(BinaryOp::Pow, 2, -1), Value::Integer(0));
        assert_eq!(int(BinaryOp::Pow, 10, 100), Value::Integer(i64::MAX));
    }

    #[test]
    fn test_division_by_zero() {
        for result in [
            eval_binary_int(BinaryOp::Div, 1, 0),
            eval_binary_float(BinaryOp::Div, 1.0, 0.0).map(Value::Float),
            eval_binary_float(BinaryOp::Div, 1.0, -0.0).map(Value::Float),
        ] {
            let err = result.unwrap_err();
            assert_eq!(err.kind, ExecutionErrorKind::Runtime(RuntimeError::DivisionByZero));
            assert_eq!(err.to_string(), "attempted division by 0");
        }
    }

    #[test]
    fn test_float_ops() {
        assert_eq!(eval_binary_float(BinaryOp::Add, 1.5, 2.25).unwrap(), 3.75);
        assert_eq!(eval_binary_float(BinaryOp::Pow, 4.0, 0.5).unwrap(), 2.0);
    }

    #[test]
    fn test_mixed_operands_promote() {
        assert_eq!(
            eval_binary(BinaryOp::Add, &Value::Integer(2), &Value::Float(0.5)).unwrap(),
            Value::Float(2.5)
        );
        assert_eq!(
            eval_binary(BinaryOp::Mul, &Value::Float(1.5), &Value::Integer(2)).unwrap(),
            Value::Float(3.0)
        );
        assert!(eval_binary(BinaryOp::Div, &Value::Float(1.5), &Value::Integer(0)).is_err());
    }

    #[test]
    fn test_sequence_operand_is_rejected() {
        let seq = Value::Sequence(Sequence::new(1, 2));
        let err = eval_binary(BinaryOp::Add, &Value::Integer(1), &seq).unwrap_err();
        assert_eq!(
            err.kind,
            ExecutionErrorKind::Runtime(RuntimeError::UnexpectedValue {
                expected: "scalar",
                found: "Sequence",
            })
        );
    }
}

use std::sync::Arc;

use crate::evaluator::{CancellationToken, ExecutionErrorKind, Runtime};
use crate::values::{Sequence, Transform, Value};

fn add_one() -> Transform {
    Arc::new(|value: Value, _: &Runtime| match value {
        Value::Integer(i) => Ok(Value::Integer(i + 1)),
        other => Ok(other),
    })
}

fn halve() -> Transform {
    Arc::new(|value: Value, _: &Runtime| match value {
        Value::Integer(i) => Ok(Value::Float(i as f64 / 2.0)),
        other => Ok(other),
    })
}

#[test]
fn test_len_counts_inclusive_range() {
    assert_eq!(Sequence::new(1, 15).len(), 15);
    assert_eq!(Sequence::new(-3, -3).len(), 1);
    assert_eq!(Sequence::new(i64::MIN, i64::MAX).len(), u64::MAX);
}

#[test]
fn test_element_without_transforms() {
    let runtime = Runtime::default();
    let seq = Sequence::new(5, 10);
    assert_eq!(seq.element(0, &runtime).unwrap(), Value::Integer(5));
    assert_eq!(seq.element(5, &runtime).unwrap(), Value::Integer(10));
}

#[test]
fn test_transforms_apply_in_order() {
    let runtime = Runtime::default();
    let seq = Sequence::new(1, 3).with_transform(add_one()).with_transform(halve());
    assert_eq!(seq.element(0, &runtime).unwrap(), Value::Float(1.0));
    assert_eq!(seq.element(2, &runtime).unwrap(), Value::Float(2.0));

    let reversed = Sequence::new(1, 3).with_transform(halve()).with_transform(add_one());
    assert_eq!(reversed.element(0, &runtime).unwrap(), Value::Float(0.5));
}

#[test]
fn test_with_transform_keeps_original() {
    let original = Sequence::new(1, 3);
    let mapped = original.with_transform(add_one());
    assert_eq!(original.transform_count(), 0);
    assert_eq!(mapped.transform_count(), 1);
    assert_eq!(mapped.len(), 3);
}

#[test]
fn test_transform_observes_cancellation() {
    let token = CancellationToken::new();
    let runtime = Runtime::default().with_cancellation(token.clone());
    let seq = Sequence::new(1, 3).with_transform(add_one());
    token.cancel();
    let err = seq.element(0, &runtime).unwrap_err();
    assert_eq!(err.kind, ExecutionErrorKind::Interrupted);
}

#[test]
fn test_scalar_accessors() {
    assert_eq!(Value::Integer(3).as_integer(), Some(3));
    assert_eq!(Value::Float(3.0).as_integer(), None);
    assert!(Value::Integer(1).is_scalar());
    assert!(!Value::Sequence(Sequence::new(0, 1)).is_scalar());
    assert_eq!(Value::Sequence(Sequence::new(0, 1)).kind_name(), "Sequence");
}


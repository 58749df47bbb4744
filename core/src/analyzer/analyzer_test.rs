use indoc::indoc;
use pretty_assertions::assert_eq;

use super::*;
use crate::ast::{BinaryOp, Expr, Program, Statement};
use crate::parser::parse;
use crate::scope::SymbolTable;
use crate::types::Type;

fn check(statements: Vec<Statement>) -> Result<SymbolTable, TypeError> {
    analyze(&Program { statements }, SymbolTable::new())
}

fn check_source(source: &str) -> Result<SymbolTable, TypeError> {
    let program = parse(source).unwrap_or_else(|e| panic!("Failed to parse {:?}: {}", source, e));
    analyze(&program, SymbolTable::new())
}

fn type_of(expr: Expr) -> Result<Type, TypeError> {
    let table = check(vec![Statement::declare(1, "result", expr)])?;
    Ok(*table.lookup("result").unwrap())
}

fn add(left: Expr, right: Expr) -> Expr {
    Expr::binary(BinaryOp::Add, left, right)
}

fn sum_lambda_reduce(source: Expr, neutral: Expr) -> Expr {
    Expr::reduce(source, neutral, "x", "y", add(Expr::var("x"), Expr::var("y")))
}

fn int_seq(lower: i64, upper: i64) -> Expr {
    Expr::sequence(Expr::int(lower), Expr::int(upper))
}

// ============================================================================
// Binary Operations
// ============================================================================

#[test]
fn test_arithmetic_operators_integers() {
    for op in [BinaryOp::Add, BinaryOp::Sub, BinaryOp::Mul, BinaryOp::Pow] {
        let ty = type_of(Expr::binary(op, Expr::int(1), Expr::int(2))).unwrap();
        assert_eq!(ty, Type::Integer, "Failed for operator {}", op);
    }
}

#[test]
fn test_division_is_always_float() {
    let ty = type_of(Expr::binary(BinaryOp::Div, Expr::int(4), Expr::int(2))).unwrap();
    assert_eq!(ty, Type::Float);
}

#[test]
fn test_mixed_operands_promote_to_float() {
    for op in [BinaryOp::Add, BinaryOp::Sub, BinaryOp::Mul, BinaryOp::Pow] {
        assert_eq!(type_of(Expr::binary(op, Expr::int(1), Expr::float(2.0))).unwrap(), Type::Float);
        assert_eq!(type_of(Expr::binary(op, Expr::float(1.0), Expr::int(2))).unwrap(), Type::Float);
    }
}

#[test]
fn test_addition_of_scalar_and_reduction_result() {
    let expr = add(
        Expr::float(3.0),
        Expr::reduce(int_seq(0, 3), Expr::float(3.0), "x", "y", add(Expr::float(3.0), Expr::float(4.0))),
    );
    assert_eq!(type_of(expr).unwrap(), Type::Float);
}

#[test]
fn test_addition_of_mismatching_types() {
    let err = type_of(add(Expr::float(3.0), int_seq(0, 3))).unwrap_err();
    assert_eq!(err.kind, TypeErrorKind::OperatorOnSequence { op: BinaryOp::Add });
    assert_eq!(err.to_string(), "invalid usage of operator + on sequence");
}

#[test]
fn test_addition_of_mapping_result() {
    let mapping = Expr::map(int_seq(1, 3), "x", add(Expr::var("x"), Expr::float(3.0)));
    assert!(type_of(add(Expr::float(3.0), mapping)).is_err());
}

// ============================================================================
// Sequences
// ============================================================================

#[test]
fn test_sequence_boundary_expression_evaluating_to_integer() {
    let expr = Expr::sequence(Expr::int(3), sum_lambda_reduce(int_seq(1, 5), Expr::int(0)));
    assert_eq!(type_of(expr).unwrap(), Type::IntegerSequence);
}

#[test]
fn test_float_sequence_boundary() {
    let err = type_of(Expr::sequence(Expr::float(1.0), Expr::float(2.0))).unwrap_err();
    assert_eq!(err.kind, TypeErrorKind::NonIntegerBound { found: Type::Float });
}

#[test]
fn test_sequence_boundary_expression_evaluating_to_float() {
    let expr = Expr::sequence(Expr::int(1), add(Expr::int(1), Expr::float(3.5)));
    assert!(type_of(expr).is_err());
}

#[test]
fn test_reduction_type_propagates_to_boundary() {
    // The float neutral element makes the reduction a float.
    let expr = Expr::sequence(Expr::int(3), sum_lambda_reduce(int_seq(1, 5), Expr::float(0.0)));
    assert_eq!(
        type_of(expr).unwrap_err().kind,
        TypeErrorKind::NonIntegerBound { found: Type::Float }
    );
}

// ============================================================================
// Map and reduce
// ============================================================================

#[test]
fn test_mapping_promotes_lambda_type() {
    let ints = Expr::map(int_seq(1, 3), "i", add(Expr::var("i"), Expr::int(1)));
    assert_eq!(type_of(ints).unwrap(), Type::IntegerSequence);

    let floats = Expr::map(
        int_seq(1, 3),
        "i",
        Expr::binary(BinaryOp::Div, Expr::var("i"), Expr::int(2)),
    );
    assert_eq!(type_of(floats).unwrap(), Type::FloatSequence);
}

#[test]
fn test_mapping_over_scalar() {
    let expr = Expr::map(Expr::float(3.0), "x", add(Expr::float(3.0), Expr::float(4.0)));
    assert_eq!(
        type_of(expr).unwrap_err().kind,
        TypeErrorKind::MapOverScalar { found: Type::Float }
    );
}

#[test]
fn test_mapping_lambda_result_is_sequence() {
    let expr = Expr::map(int_seq(3, 4), "x", int_seq(3, 4));
    assert_eq!(
        type_of(expr).unwrap_err().kind,
        TypeErrorKind::LambdaResultNotScalar { found: Type::IntegerSequence }
    );
}

#[test]
fn test_reducing_over_scalar() {
    let expr = sum_lambda_reduce(Expr::float(3.0), Expr::float(3.0));
    assert_eq!(
        type_of(expr).unwrap_err().kind,
        TypeErrorKind::ReduceOverScalar { found: Type::Float }
    );
}

#[test]
fn test_neutral_element_is_sequence() {
    let expr = sum_lambda_reduce(int_seq(3, 4), int_seq(3, 4));
    assert_eq!(
        type_of(expr).unwrap_err().kind,
        TypeErrorKind::NeutralNotScalar { found: Type::IntegerSequence }
    );
}

#[test]
fn test_reduce_lambda_result_is_sequence() {
    let expr = Expr::reduce(
        int_seq(3, 4),
        Expr::int(0),
        "x",
        "y",
        Expr::sequence(Expr::int(1), Expr::var("x")),
    );
    assert!(matches!(
        type_of(expr).unwrap_err().kind,
        TypeErrorKind::LambdaResultNotScalar { .. }
    ));
}

#[test]
fn test_reduce_binds_element_and_neutral_types() {
    // x is bound to the element type, y to the neutral type.
    let expr = Expr::reduce(
        int_seq(1, 3),
        Expr::float(1.0),
        "x",
        "y",
        Expr::sequence(Expr::int(0), Expr::var("x")),
    );
    assert!(matches!(
        type_of(expr).unwrap_err().kind,
        TypeErrorKind::LambdaResultNotScalar { .. }
    ));

    let expr = Expr::reduce(
        int_seq(1, 3),
        Expr::float(1.0),
        "x",
        "y",
        Expr::sequence(Expr::int(0), Expr::var("y")),
    );
    assert_eq!(
        type_of(expr).unwrap_err().kind,
        TypeErrorKind::NonIntegerBound { found: Type::Float }
    );
}

#[test]
fn test_complex_valid_program() {
    let table = check_source(indoc! {"
        var n = map({1, 10}, x -> reduce({1, x}, 1.0, x y -> x * y))
        out reduce(n, 0.0, x y -> x + y)
    "})
    .unwrap();
    assert_eq!(table.lookup("n"), Some(&Type::FloatSequence));
}

// ============================================================================
// Variables and lines
// ============================================================================

#[test]
fn test_type_info_propagates_through_variables() {
    let err = check(vec![
        Statement::declare(1, "a", int_seq(0, 3)),
        Statement::out(2, add(Expr::float(3.0), Expr::var("a"))),
    ])
    .unwrap_err();
    assert_eq!(err.line, Some(2));
}

#[test]
fn test_accessing_undeclared_variable() {
    let err = check(vec![
        Statement::declare(1, "a", Expr::float(1.0)),
        Statement::declare(2, "b", Expr::var("c")),
    ])
    .unwrap_err();
    assert_eq!(
        err,
        TypeError {
            kind: TypeErrorKind::UndeclaredVariable { name: "c".to_string() },
            line: Some(2),
        }
    );
    assert_eq!(err.to_string(), "access of undeclared variable");
}

#[test]
fn test_lambda_cannot_see_enclosing_variables() {
    let err = check_source("var a = 1\nout map({1, 2}, i -> i + a)").unwrap_err();
    assert_eq!(err.kind, TypeErrorKind::UndeclaredVariable { name: "a".to_string() });
    assert_eq!(err.line, Some(2));
}

#[test]
fn test_redeclaration_shadows() {
    let table = check_source("var a = 1\nvar a = {1, 2}").unwrap();
    assert_eq!(table.lookup("a"), Some(&Type::IntegerSequence));
}

#[test]
fn test_print_string_needs_no_types() {
    let table = check_source("print \"hello\"").unwrap();
    assert!(table.is_empty());
}

#[test]
fn test_extends_previous_table() {
    let previous = SymbolTable::new().bind("n", Type::Integer);
    let program = parse("var s = {0, n}").unwrap();
    let table = analyze(&program, previous).unwrap();
    assert_eq!(table.lookup("n"), Some(&Type::Integer));
    assert_eq!(table.lookup("s"), Some(&Type::IntegerSequence));
}

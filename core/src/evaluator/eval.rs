//! Core evaluation logic.

use std::io::Write;
use std::sync::Arc;

use tracing::trace;

use crate::ast::{
    BinOp, Expr, Mapping, PrintExpression, PrintString, Program, Reducing, SequenceLiteral,
    VariableDeclaration,
};
use crate::evaluator::operators::eval_binary;
use crate::evaluator::{ExecutionError, ExecutionErrorKind, Runtime, RuntimeError};
use crate::scope::Scope;
use crate::values::{Sequence, Transform, Value};
use crate::visitor::Visitor;

type Evaluated = Result<(Scope, Value), ExecutionError>;

/// Tree-walking executor for type-checked programs.
///
/// Statements write to `out`. Lambda bodies run in a detached executor with
/// no output sink and a scope holding only the lambda's parameters.
pub struct Executor<'a> {
    out: Option<&'a mut dyn Write>,
    runtime: &'a Runtime,
}

impl<'a> Executor<'a> {
    pub fn new(out: &'a mut dyn Write, runtime: &'a Runtime) -> Self {
        Self {
            out: Some(out),
            runtime,
        }
    }

    /// An executor that can only evaluate expressions.
    pub fn detached(runtime: &'a Runtime) -> Self {
        Self { out: None, runtime }
    }

    fn write(&mut self, text: &str) -> Result<(), ExecutionError> {
        if let Some(out) = self.out.as_deref_mut() {
            out.write_all(text.as_bytes())
                .and_then(|()| out.flush())
                .map_err(|e| ExecutionError::new(ExecutionErrorKind::Output(e.to_string())))?;
        }
        Ok(())
    }
}

/// Evaluate a lambda body with `params` as its whole scope.
fn eval_lambda(body: &Expr, params: Scope, runtime: &Runtime) -> Result<Value, ExecutionError> {
    let (_, value) = Executor::detached(runtime).visit_expr(body, params)?;
    if !value.is_scalar() {
        return Err(RuntimeError::UnexpectedValue {
            expected: "scalar",
            found: value.kind_name(),
        }
        .into());
    }
    Ok(value)
}

fn expect_sequence(value: Value) -> Result<Sequence, ExecutionError> {
    match value {
        Value::Sequence(seq) => Ok(seq),
        other => Err(RuntimeError::UnexpectedValue {
            expected: "Sequence",
            found: other.kind_name(),
        }
        .into()),
    }
}

fn expect_integer(value: &Value) -> Result<i64, ExecutionError> {
    value.as_integer().ok_or_else(|| {
        RuntimeError::UnexpectedValue {
            expected: "Integer",
            found: value.kind_name(),
        }
        .into()
    })
}

impl Visitor for Executor<'_> {
    type Context = Scope;
    type Output = Value;
    type Error = ExecutionError;

    fn visit_program(&mut self, program: &Program, scope: Scope) -> Result<Scope, ExecutionError> {
        program
            .statements
            .iter()
            .try_fold(scope, |scope, statement| {
                self.runtime.check_cancelled()?;
                trace!(line = statement.line(), "executing statement");
                self.visit_statement(statement, scope)
            })
    }

    fn visit_variable_declaration(
        &mut self,
        decl: &VariableDeclaration,
        scope: Scope,
    ) -> Result<Scope, ExecutionError> {
        let (scope, value) = self
            .visit_expr(&decl.expr, scope)
            .map_err(|e| e.at_line(decl.line))?;
        Ok(scope.bind(decl.identifier.as_str(), value))
    }

    fn visit_print_expression(
        &mut self,
        print: &PrintExpression,
        scope: Scope,
    ) -> Result<Scope, ExecutionError> {
        let printed = self.visit_expr(&print.expr, scope).and_then(|(scope, value)| {
            let text = self.runtime.render(&value)?;
            self.write(&text)?;
            Ok(scope)
        });
        printed.map_err(|e| e.at_line(print.line))
    }

    fn visit_print_string(&mut self, print: &PrintString, scope: Scope) -> Result<Scope, ExecutionError> {
        self.write(&print.text).map_err(|e| e.at_line(print.line))?;
        Ok(scope)
    }

    fn visit_integer_literal(&mut self, value: i64, scope: Scope) -> Evaluated {
        Ok((scope, Value::Integer(value)))
    }

    fn visit_float_literal(&mut self, value: f64, scope: Scope) -> Evaluated {
        Ok((scope, Value::Float(value)))
    }

    fn visit_variable_access(&mut self, identifier: &str, scope: Scope) -> Evaluated {
        match scope.lookup(identifier).cloned() {
            Some(value) => Ok((scope, value)),
            None => Err(RuntimeError::UndeclaredVariable {
                name: identifier.to_string(),
            }
            .into()),
        }
    }

    fn visit_bin_op(&mut self, bin_op: &BinOp, scope: Scope) -> Evaluated {
        let (scope, left) = self.visit_expr(&bin_op.left, scope)?;
        let (scope, right) = self.visit_expr(&bin_op.right, scope)?;
        let value = eval_binary(bin_op.op, &left, &right)?;
        Ok((scope, value))
    }

    fn visit_sequence_literal(&mut self, seq: &SequenceLiteral, scope: Scope) -> Evaluated {
        let (scope, lower) = self.visit_expr(&seq.lower, scope)?;
        let (scope, upper) = self.visit_expr(&seq.upper, scope)?;
        let lower = expect_integer(&lower)?;
        let upper = expect_integer(&upper)?;

        if upper < lower {
            return Err(RuntimeError::InvalidSequenceBounds { lower, upper }.into());
        }
        Ok((scope, Value::Sequence(Sequence::new(lower, upper))))
    }

    fn visit_mapping(&mut self, mapping: &Mapping, scope: Scope) -> Evaluated {
        let (scope, source) = self.visit_expr(&mapping.source, scope)?;
        let source = expect_sequence(source)?;

        let identifier = mapping.lambda.identifier.clone();
        let body = Arc::clone(&mapping.lambda.body);
        let transform: Transform = Arc::new(move |element: Value, runtime: &Runtime| {
            eval_lambda(&body, Scope::from_pairs([(identifier.as_str(), element)]), runtime)
        });

        Ok((scope, Value::Sequence(source.with_transform(transform))))
    }

    fn visit_reducing(&mut self, reducing: &Reducing, scope: Scope) -> Evaluated {
        let (scope, source) = self.visit_expr(&reducing.source, scope)?;
        let source = expect_sequence(source)?;
        let (scope, neutral) = self.visit_expr(&reducing.neutral, scope)?;
        if !neutral.is_scalar() {
            return Err(RuntimeError::UnexpectedValue {
                expected: "scalar",
                found: neutral.kind_name(),
            }
            .into());
        }

        let runtime = self.runtime;
        let lambda = &reducing.lambda;
        let value = runtime.reduce(&source, neutral, |acc, element| {
            let params = Scope::new()
                .bind(lambda.left.as_str(), acc)
                .bind(lambda.right.as_str(), element);
            eval_lambda(&lambda.body, params, runtime)
        })?;
        Ok((scope, value))
    }
}

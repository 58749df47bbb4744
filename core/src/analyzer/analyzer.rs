use tracing::trace;

use crate::analyzer::error::{TypeError, TypeErrorKind};
use crate::ast::{
    BinOp, Expr, Mapping, PrintExpression, Program, Reducing, SequenceLiteral,
    VariableDeclaration,
};
use crate::parser::BinaryOp;
use crate::scope::SymbolTable;
use crate::types::Type;
use crate::visitor::Visitor;

/// Type-check `program` on top of the bindings of earlier programs.
///
/// Returns the symbol table extended with the program's declarations. On
/// error the given table is consumed and nothing is committed.
pub fn analyze(program: &Program, symbol_table: SymbolTable) -> Result<SymbolTable, TypeError> {
    TypeChecker.visit_program(program, symbol_table)
}

/// Single top-down pass inferring the [`Type`] of every expression.
pub struct TypeChecker;

type Checked = Result<(SymbolTable, Type), TypeError>;

impl TypeChecker {
    /// Check a lambda body in a table holding only its parameters.
    fn check_lambda(&mut self, body: &Expr, params: SymbolTable) -> Result<Type, TypeError> {
        let (_, ty) = self.visit_expr(body, params)?;
        if !ty.is_numeric() {
            return Err(TypeErrorKind::LambdaResultNotScalar { found: ty }.into());
        }
        Ok(ty)
    }
}

impl Visitor for TypeChecker {
    type Context = SymbolTable;
    type Output = Type;
    type Error = TypeError;

    fn visit_variable_declaration(
        &mut self,
        decl: &VariableDeclaration,
        table: SymbolTable,
    ) -> Result<SymbolTable, TypeError> {
        let (table, ty) = self
            .visit_expr(&decl.expr, table)
            .map_err(|e| e.at_line(decl.line))?;
        trace!(identifier = %decl.identifier, %ty, "declared");
        Ok(table.bind(decl.identifier.as_str(), ty))
    }

    fn visit_print_expression(
        &mut self,
        print: &PrintExpression,
        table: SymbolTable,
    ) -> Result<SymbolTable, TypeError> {
        let (table, _) = self
            .visit_expr(&print.expr, table)
            .map_err(|e| e.at_line(print.line))?;
        Ok(table)
    }

    fn visit_integer_literal(&mut self, _value: i64, table: SymbolTable) -> Checked {
        Ok((table, Type::Integer))
    }

    fn visit_float_literal(&mut self, _value: f64, table: SymbolTable) -> Checked {
        Ok((table, Type::Float))
    }

    fn visit_variable_access(&mut self, identifier: &str, table: SymbolTable) -> Checked {
        match table.lookup(identifier).copied() {
            Some(ty) => Ok((table, ty)),
            None => Err(TypeErrorKind::UndeclaredVariable {
                name: identifier.to_string(),
            }
            .into()),
        }
    }

    fn visit_bin_op(&mut self, bin_op: &BinOp, table: SymbolTable) -> Checked {
        let (table, left) = self.visit_expr(&bin_op.left, table)?;
        let (table, right) = self.visit_expr(&bin_op.right, table)?;

        if !left.is_numeric() || !right.is_numeric() {
            return Err(TypeErrorKind::OperatorOnSequence { op: bin_op.op }.into());
        }

        let ty = match bin_op.op {
            BinaryOp::Div => Type::Float,
            _ => left.promote(right),
        };
        Ok((table, ty))
    }

    fn visit_sequence_literal(&mut self, seq: &SequenceLiteral, table: SymbolTable) -> Checked {
        let (table, lower) = self.visit_expr(&seq.lower, table)?;
        let (table, upper) = self.visit_expr(&seq.upper, table)?;

        for bound in [lower, upper] {
            if bound != Type::Integer {
                return Err(TypeErrorKind::NonIntegerBound { found: bound }.into());
            }
        }
        Ok((table, Type::IntegerSequence))
    }

    fn visit_mapping(&mut self, mapping: &Mapping, table: SymbolTable) -> Checked {
        let (table, source) = self.visit_expr(&mapping.source, table)?;
        if !source.is_sequence() {
            return Err(TypeErrorKind::MapOverScalar { found: source }.into());
        }

        let params = SymbolTable::from_pairs([(
            mapping.lambda.identifier.as_str(),
            source.to_numeric(),
        )]);
        let body = self.check_lambda(&mapping.lambda.body, params)?;
        Ok((table, body.to_sequence()))
    }

    fn visit_reducing(&mut self, reducing: &Reducing, table: SymbolTable) -> Checked {
        let (table, source) = self.visit_expr(&reducing.source, table)?;
        if !source.is_sequence() {
            return Err(TypeErrorKind::ReduceOverScalar { found: source }.into());
        }

        let (table, neutral) = self.visit_expr(&reducing.neutral, table)?;
        if !neutral.is_numeric() {
            return Err(TypeErrorKind::NeutralNotScalar { found: neutral }.into());
        }

        // When both parameters share a name the right one wins.
        let params = SymbolTable::new()
            .bind(reducing.lambda.left.as_str(), source.to_numeric())
            .bind(reducing.lambda.right.as_str(), neutral);
        let body = self.check_lambda(&reducing.lambda.body, params)?;
        Ok((table, body))
    }
}

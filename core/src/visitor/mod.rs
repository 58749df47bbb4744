//! Generic context-threading visitor over the SeqLang AST.
//!
//! A visitor threads an owned context of type [`Visitor::Context`] through the
//! tree. Statement handlers return the updated context; expression handlers
//! return the updated context together with a result of type
//! [`Visitor::Output`]. Every handler may fail with [`Visitor::Error`].
//!
//! Statement handlers default to passing the context through the statement's
//! children in order and keeping it otherwise unchanged. Expression handlers
//! have no default: every concrete visitor must say what each expression
//! evaluates to, although one that only cares about a few node kinds can
//! pass the context along with [`walk_children`].
//!
//! Dispatch is an exhaustive `match` over the node enums, so adding a node
//! variant fails to compile until every pass handles it.

use crate::ast::{
    BinOp, Expr, Mapping, Node, PrintExpression, PrintString, Program, Reducing,
    SequenceLiteral, Statement, VariableDeclaration,
};

pub trait Visitor {
    /// State threaded through the traversal (symbol table, scope, ...).
    type Context;

    /// What an expression evaluates to (a type, a value, ...).
    type Output;

    type Error;

    fn visit_program(
        &mut self,
        program: &Program,
        context: Self::Context,
    ) -> Result<Self::Context, Self::Error> {
        walk_children(self, Node::Program(program), context)
    }

    fn visit_statement(
        &mut self,
        statement: &Statement,
        context: Self::Context,
    ) -> Result<Self::Context, Self::Error> {
        match statement {
            Statement::VariableDeclaration(decl) => self.visit_variable_declaration(decl, context),
            Statement::PrintExpression(print) => self.visit_print_expression(print, context),
            Statement::PrintString(print) => self.visit_print_string(print, context),
        }
    }

    fn visit_variable_declaration(
        &mut self,
        decl: &VariableDeclaration,
        context: Self::Context,
    ) -> Result<Self::Context, Self::Error> {
        visit_node(self, Node::Expr(&decl.expr), context)
    }

    fn visit_print_expression(
        &mut self,
        print: &PrintExpression,
        context: Self::Context,
    ) -> Result<Self::Context, Self::Error> {
        visit_node(self, Node::Expr(&print.expr), context)
    }

    fn visit_print_string(
        &mut self,
        _print: &PrintString,
        context: Self::Context,
    ) -> Result<Self::Context, Self::Error> {
        Ok(context)
    }

    fn visit_expr(
        &mut self,
        expr: &Expr,
        context: Self::Context,
    ) -> Result<(Self::Context, Self::Output), Self::Error> {
        match expr {
            Expr::IntegerLiteral(value) => self.visit_integer_literal(*value, context),
            Expr::FloatLiteral(value) => self.visit_float_literal(*value, context),
            Expr::VariableAccess(identifier) => self.visit_variable_access(identifier, context),
            Expr::BinOp(bin_op) => self.visit_bin_op(bin_op, context),
            Expr::SequenceLiteral(seq) => self.visit_sequence_literal(seq, context),
            Expr::Mapping(mapping) => self.visit_mapping(mapping, context),
            Expr::Reducing(reducing) => self.visit_reducing(reducing, context),
        }
    }

    fn visit_integer_literal(
        &mut self,
        value: i64,
        context: Self::Context,
    ) -> Result<(Self::Context, Self::Output), Self::Error>;

    fn visit_float_literal(
        &mut self,
        value: f64,
        context: Self::Context,
    ) -> Result<(Self::Context, Self::Output), Self::Error>;

    fn visit_variable_access(
        &mut self,
        identifier: &str,
        context: Self::Context,
    ) -> Result<(Self::Context, Self::Output), Self::Error>;

    fn visit_bin_op(
        &mut self,
        bin_op: &BinOp,
        context: Self::Context,
    ) -> Result<(Self::Context, Self::Output), Self::Error>;

    fn visit_sequence_literal(
        &mut self,
        seq: &SequenceLiteral,
        context: Self::Context,
    ) -> Result<(Self::Context, Self::Output), Self::Error>;

    fn visit_mapping(
        &mut self,
        mapping: &Mapping,
        context: Self::Context,
    ) -> Result<(Self::Context, Self::Output), Self::Error>;

    fn visit_reducing(
        &mut self,
        reducing: &Reducing,
        context: Self::Context,
    ) -> Result<(Self::Context, Self::Output), Self::Error>;
}

/// Visit one node, discarding an expression's result and keeping only the
/// context it produced.
pub fn visit_node<V: Visitor + ?Sized>(
    visitor: &mut V,
    node: Node<'_>,
    context: V::Context,
) -> Result<V::Context, V::Error> {
    match node {
        Node::Program(program) => visitor.visit_program(program, context),
        Node::Statement(statement) => visitor.visit_statement(statement, context),
        Node::Expr(expr) => visitor.visit_expr(expr, context).map(|(context, _)| context),
    }
}

/// Fold the context through the node's children, pre-order, in the order
/// given by [`Node::children`].
pub fn walk_children<V: Visitor + ?Sized>(
    visitor: &mut V,
    node: Node<'_>,
    context: V::Context,
) -> Result<V::Context, V::Error> {
    node.children()
        .into_iter()
        .try_fold(context, |context, child| visit_node(visitor, child, context))
}

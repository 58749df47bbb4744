//! Abstract syntax tree for SeqLang programs.
//!
//! The tree is produced by [`crate::parser::parse`] and consumed by both the
//! analyzer and the evaluator through the [`crate::visitor::Visitor`] trait.
//! Nodes are plain owned values: they compare structurally and every child is
//! owned by exactly one parent.

use std::sync::Arc;

pub use crate::parser::BinaryOp;

/// A whole program: the statements of one `interpret` call, in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    VariableDeclaration(VariableDeclaration),
    PrintExpression(PrintExpression),
    PrintString(PrintString),
}

/// `var <identifier> = <expr>`
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub line: usize,
    pub identifier: String,
    pub expr: Expr,
}

/// `out <expr>`
#[derive(Debug, Clone, PartialEq)]
pub struct PrintExpression {
    pub line: usize,
    pub expr: Expr,
}

/// `print "<text>"`
#[derive(Debug, Clone, PartialEq)]
pub struct PrintString {
    pub line: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    IntegerLiteral(i64),
    FloatLiteral(f64),
    VariableAccess(String),
    BinOp(BinOp),
    SequenceLiteral(SequenceLiteral),
    Mapping(Mapping),
    Reducing(Reducing),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinOp {
    pub op: BinaryOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

/// `{lower, upper}`, both bounds inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceLiteral {
    pub lower: Box<Expr>,
    pub upper: Box<Expr>,
}

/// `map(source, identifier -> body)`
#[derive(Debug, Clone, PartialEq)]
pub struct Mapping {
    pub source: Box<Expr>,
    pub lambda: UnaryLambda,
}

/// `reduce(source, neutral, left right -> body)`
#[derive(Debug, Clone, PartialEq)]
pub struct Reducing {
    pub source: Box<Expr>,
    pub neutral: Box<Expr>,
    pub lambda: BinaryLambda,
}

/// Lambda bodies are shared with the deferred transforms of sequence values,
/// which outlive the program they were declared in.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryLambda {
    pub identifier: String,
    pub body: Arc<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryLambda {
    pub left: String,
    pub right: String,
    pub body: Arc<Expr>,
}

impl Statement {
    /// 1-based source line the statement starts on.
    pub fn line(&self) -> usize {
        match self {
            Statement::VariableDeclaration(decl) => decl.line,
            Statement::PrintExpression(print) => print.line,
            Statement::PrintString(print) => print.line,
        }
    }
}

// Convenience constructors, mostly used to build trees by hand in tests.
impl Expr {
    pub fn int(value: i64) -> Self {
        Expr::IntegerLiteral(value)
    }

    pub fn float(value: f64) -> Self {
        Expr::FloatLiteral(value)
    }

    pub fn var(identifier: impl Into<String>) -> Self {
        Expr::VariableAccess(identifier.into())
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::BinOp(BinOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn sequence(lower: Expr, upper: Expr) -> Self {
        Expr::SequenceLiteral(SequenceLiteral {
            lower: Box::new(lower),
            upper: Box::new(upper),
        })
    }

    pub fn map(source: Expr, identifier: impl Into<String>, body: Expr) -> Self {
        Expr::Mapping(Mapping {
            source: Box::new(source),
            lambda: UnaryLambda {
                identifier: identifier.into(),
                body: Arc::new(body),
            },
        })
    }

    pub fn reduce(
        source: Expr,
        neutral: Expr,
        left: impl Into<String>,
        right: impl Into<String>,
        body: Expr,
    ) -> Self {
        Expr::Reducing(Reducing {
            source: Box::new(source),
            neutral: Box::new(neutral),
            lambda: BinaryLambda {
                left: left.into(),
                right: right.into(),
                body: Arc::new(body),
            },
        })
    }
}

impl Statement {
    pub fn declare(line: usize, identifier: impl Into<String>, expr: Expr) -> Self {
        Statement::VariableDeclaration(VariableDeclaration {
            line,
            identifier: identifier.into(),
            expr,
        })
    }

    pub fn out(line: usize, expr: Expr) -> Self {
        Statement::PrintExpression(PrintExpression { line, expr })
    }

    pub fn print(line: usize, text: impl Into<String>) -> Self {
        Statement::PrintString(PrintString {
            line,
            text: text.into(),
        })
    }
}

/// Borrowed view of any node, used for generic child enumeration.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Program(&'a Program),
    Statement(&'a Statement),
    Expr(&'a Expr),
}

impl<'a> Node<'a> {
    /// Direct children in traversal order.
    ///
    /// Lambda bodies are children of their `map`/`reduce` node and come after
    /// the other operands.
    pub fn children(self) -> Vec<Node<'a>> {
        match self {
            Node::Program(program) => program.statements.iter().map(Node::Statement).collect(),
            Node::Statement(statement) => match statement {
                Statement::VariableDeclaration(decl) => vec![Node::Expr(&decl.expr)],
                Statement::PrintExpression(print) => vec![Node::Expr(&print.expr)],
                Statement::PrintString(_) => vec![],
            },
            Node::Expr(expr) => match expr {
                Expr::IntegerLiteral(_) | Expr::FloatLiteral(_) | Expr::VariableAccess(_) => {
                    vec![]
                }
                Expr::BinOp(bin_op) => vec![Node::Expr(&bin_op.left), Node::Expr(&bin_op.right)],
                Expr::SequenceLiteral(seq) => vec![Node::Expr(&seq.lower), Node::Expr(&seq.upper)],
                Expr::Mapping(mapping) => vec![
                    Node::Expr(&mapping.source),
                    Node::Expr(&mapping.lambda.body),
                ],
                Expr::Reducing(reducing) => vec![
                    Node::Expr(&reducing.source),
                    Node::Expr(&reducing.neutral),
                    Node::Expr(&reducing.lambda.body),
                ],
            },
        }
    }
}

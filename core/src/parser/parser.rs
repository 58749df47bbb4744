use std::sync::Arc;

use lazy_static::lazy_static;
use pest::Parser;
use pest::iterators::Pair;
use pest::pratt_parser::{Assoc, Op, PrattParser};
use pest_derive::Parser;

use crate::ast::{
    BinaryLambda, Expr, Mapping, PrintExpression, PrintString, Program, Reducing, Statement,
    UnaryLambda, VariableDeclaration,
};
use crate::parser::error::{ParseError, ParseErrorKind, convert_pest_error};
use crate::parser::syntax::BinaryOp;

lazy_static! {
    // Note: precedence is defined lowest to highest.
    static ref PRATT_PARSER: PrattParser<Rule> = PrattParser::new()
        .op(
            Op::infix(Rule::add, Assoc::Left) |
            Op::infix(Rule::sub, Assoc::Left)
        )                                               // `+`, `-`
        .op(
            Op::infix(Rule::mul, Assoc::Left) |
            Op::infix(Rule::div, Assoc::Left)
        )                                               // `*`, `/`
        .op(Op::infix(Rule::pow, Assoc::Right))          // `^` (right-assoc)
        ;
}

#[derive(Parser)]
#[grammar = "parser/seqlang.pest"]
pub struct SeqLangParser;

/// Parse a whole program and shape it into the AST.
///
/// Statement line numbers are 1-based and relative to `source`.
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let mut pairs =
        SeqLangParser::parse(Rule::program, source).map_err(|e| convert_pest_error(e, source))?;
    let program = pairs
        .next()
        .ok_or_else(|| ParseError::other("empty parse tree", 1, Default::default()))?;

    let statements = program
        .into_inner()
        .filter(|pair| {
            matches!(
                pair.as_rule(),
                Rule::var_decl | Rule::print_expr | Rule::print_str
            )
        })
        .map(parse_statement)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Program { statements })
}

fn line_of(pair: &Pair<Rule>) -> usize {
    pair.as_span().start_pos().line_col().0
}

fn is_keyword(rule: Rule) -> bool {
    matches!(
        rule,
        Rule::var_kw | Rule::out_kw | Rule::print_kw | Rule::map_kw | Rule::reduce_kw
    )
}

/// Children of `pair` without the keyword tokens.
fn operands<'i>(pair: Pair<'i, Rule>) -> Operands<'i> {
    let line = line_of(&pair);
    let span = pair.as_span().into();
    Operands {
        pairs: pair
            .into_inner()
            .filter(|p| !is_keyword(p.as_rule()))
            .collect::<Vec<_>>()
            .into_iter(),
        line,
        span,
    }
}

struct Operands<'i> {
    pairs: std::vec::IntoIter<Pair<'i, Rule>>,
    line: usize,
    span: crate::parser::Span,
}

impl<'i> Operands<'i> {
    fn next(&mut self) -> Result<Pair<'i, Rule>, ParseError> {
        self.pairs.next().ok_or_else(|| {
            ParseError::other("missing expected pair in rule", self.line, self.span.clone())
        })
    }

    fn next_ident(&mut self) -> Result<String, ParseError> {
        Ok(self.next()?.as_str().to_string())
    }

    fn next_expr(&mut self) -> Result<Expr, ParseError> {
        parse_expr(self.next()?)
    }
}

fn parse_statement(pair: Pair<Rule>) -> Result<Statement, ParseError> {
    let line = line_of(&pair);
    let rule = pair.as_rule();
    let mut operands = operands(pair);

    match rule {
        Rule::var_decl => {
            let identifier = operands.next_ident()?;
            let expr = operands.next_expr()?;
            Ok(Statement::VariableDeclaration(VariableDeclaration {
                line,
                identifier,
                expr,
            }))
        }
        Rule::print_expr => {
            let expr = operands.next_expr()?;
            Ok(Statement::PrintExpression(PrintExpression { line, expr }))
        }
        Rule::print_str => {
            let string = operands.next()?;
            // `string` always has a (possibly empty) `text` child.
            let text = string
                .into_inner()
                .next()
                .map(|text| text.as_str().to_string())
                .unwrap_or_default();
            Ok(Statement::PrintString(PrintString { line, text }))
        }
        _ => Err(ParseError::other(
            format!("unexpected statement rule {:?}", rule),
            line,
            operands.span,
        )),
    }
}

pub fn parse_expr(pair: Pair<Rule>) -> Result<Expr, ParseError> {
    let line = line_of(&pair);
    match pair.as_rule() {
        Rule::expression => PRATT_PARSER
            .map_primary(parse_expr)
            .map_infix(|lhs, op, rhs| {
                let op = match op.as_rule() {
                    Rule::add => BinaryOp::Add,
                    Rule::sub => BinaryOp::Sub,
                    Rule::mul => BinaryOp::Mul,
                    Rule::div => BinaryOp::Div,
                    Rule::pow => BinaryOp::Pow,
                    rule => {
                        return Err(ParseError::other(
                            format!("unknown binary operator {:?}", rule),
                            line_of(&op),
                            op.as_span().into(),
                        ));
                    }
                };
                Ok(Expr::binary(op, lhs?, rhs?))
            })
            .parse(pair.into_inner()),

        Rule::integer => {
            let text = pair.as_str();
            text.parse().map(Expr::IntegerLiteral).map_err(|_| {
                ParseError::new(
                    ParseErrorKind::IntegerOutOfRange {
                        text: text.to_string(),
                    },
                    line,
                    pair.as_span().into(),
                )
            })
        }

        Rule::float => {
            let text = pair.as_str();
            text.parse().map(Expr::FloatLiteral).map_err(|_| {
                ParseError::new(
                    ParseErrorKind::InvalidNumber {
                        text: text.to_string(),
                    },
                    line,
                    pair.as_span().into(),
                )
            })
        }

        Rule::ident => Ok(Expr::VariableAccess(pair.as_str().to_string())),

        Rule::sequence => {
            let mut operands = operands(pair);
            let lower = operands.next_expr()?;
            let upper = operands.next_expr()?;
            Ok(Expr::sequence(lower, upper))
        }

        Rule::mapping => {
            let mut operands = operands(pair);
            let source = operands.next_expr()?;
            let identifier = operands.next_ident()?;
            let body = operands.next_expr()?;
            Ok(Expr::Mapping(Mapping {
                source: Box::new(source),
                lambda: UnaryLambda {
                    identifier,
                    body: Arc::new(body),
                },
            }))
        }

        Rule::reduction => {
            let mut operands = operands(pair);
            let source = operands.next_expr()?;
            let neutral = operands.next_expr()?;
            let left = operands.next_ident()?;
            let right = operands.next_ident()?;
            let body = operands.next_expr()?;
            Ok(Expr::Reducing(Reducing {
                source: Box::new(source),
                neutral: Box::new(neutral),
                lambda: BinaryLambda {
                    left,
                    right,
                    body: Arc::new(body),
                },
            }))
        }

        rule => Err(ParseError::other(
            format!("unexpected expression rule {:?}", rule),
            line,
            pair.as_span().into(),
        )),
    }
}

use thiserror::Error;

use crate::parser::{Rule, Span};

/// Syntax error at a 1-based line of the parsed source.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid syntax: {kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub line: usize,
    pub span: Span,
}

/// Specific kinds of parse errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseErrorKind {
    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },

    #[error("integer literal out of range")]
    IntegerOutOfRange { text: String },

    #[error("invalid number literal {text}")]
    InvalidNumber { text: String },

    /// Catch-all for shaping failures that the grammar should rule out.
    #[error("{message}")]
    Other { message: String },
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, line: usize, span: Span) -> Self {
        Self { kind, line, span }
    }

    pub(crate) fn other(message: impl Into<String>, line: usize, span: Span) -> Self {
        Self::new(
            ParseErrorKind::Other {
                message: message.into(),
            },
            line,
            span,
        )
    }
}

/// Convert Pest error to human-readable ParseError
pub fn convert_pest_error(err: pest::error::Error<Rule>, source: &str) -> ParseError {
    use pest::error::{ErrorVariant, InputLocation, LineColLocation};

    let line = match err.line_col {
        LineColLocation::Pos((line, _)) => line,
        LineColLocation::Span((line, _), _) => line,
    };

    let span = match err.location {
        InputLocation::Pos(pos) => Span(pos..pos),
        InputLocation::Span((start, end)) => Span(start..end),
    };

    let kind = match err.variant {
        ErrorVariant::ParsingError {
            positives,
            negatives,
        } => {
            let expected = format_expected_rules(&positives);
            let found = if negatives.is_empty() {
                describe_input_at(source, span.0.start)
            } else {
                format_found_rules(&negatives)
            };
            ParseErrorKind::UnexpectedToken { expected, found }
        }
        ErrorVariant::CustomError { message } => ParseErrorKind::Other { message },
    };

    ParseError::new(kind, line, span)
}

/// Format expected rules in a human-readable way
fn format_expected_rules(rules: &[Rule]) -> String {
    let mut concepts = Vec::new();

    for rule in rules {
        let concept = match rule {
            Rule::var_kw | Rule::out_kw | Rule::print_kw => "statement",
            Rule::ident => "identifier",
            Rule::string => "string",
            Rule::add | Rule::sub | Rule::mul | Rule::div | Rule::pow => "operator",
            Rule::EOI => "end of input",
            _ => "expression",
        };
        if !concepts.contains(&concept) {
            concepts.push(concept);
        }
    }

    match concepts.split_last() {
        None => "something else".to_string(),
        Some((only, [])) => only.to_string(),
        Some((last, rest)) => format!("{} or {}", rest.join(", "), last),
    }
}

/// Format found rules in a human-readable way
fn format_found_rules(rules: &[Rule]) -> String {
    match rules.first() {
        None => "unexpected token".to_string(),
        Some(Rule::ident) => "identifier".to_string(),
        Some(Rule::integer) => "integer".to_string(),
        Some(Rule::float) => "floating-point number".to_string(),
        Some(Rule::keyword) => "keyword".to_string(),
        Some(Rule::EOI) => "end of input".to_string(),
        Some(rule) => format!("{:?}", rule),
    }
}

/// Describe the source text at `pos` for "found ..." messages.
fn describe_input_at(source: &str, pos: usize) -> String {
    let rest = source.get(pos..).unwrap_or_default();
    match rest.chars().next() {
        None => "end of input".to_string(),
        Some('\n' | '\r') => "end of line".to_string(),
        Some(c) if c.is_ascii_alphanumeric() || c == '_' => {
            let word: String = rest
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
                .collect();
            format!("'{}'", word)
        }
        Some(c) => format!("'{}'", c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_expected_rules() {
        assert_eq!(format_expected_rules(&[Rule::integer, Rule::float]), "expression");
        assert_eq!(
            format_expected_rules(&[Rule::var_kw, Rule::out_kw, Rule::EOI]),
            "statement or end of input"
        );
        assert_eq!(
            format_expected_rules(&[Rule::ident, Rule::string, Rule::EOI]),
            "identifier, string or end of input"
        );
        assert_eq!(format_expected_rules(&[]), "something else");
    }

    #[test]
    fn test_describe_input_at() {
        assert_eq!(describe_input_at("out ;", 4), "';'");
        assert_eq!(describe_input_at("out foo bar", 4), "'foo'");
        assert_eq!(describe_input_at("out\n", 3), "end of line");
        assert_eq!(describe_input_at("out", 3), "end of input");
    }

    #[test]
    fn test_display() {
        let error = ParseError::new(
            ParseErrorKind::UnexpectedToken {
                expected: "expression".to_string(),
                found: "','".to_string(),
            },
            3,
            Span::new(10, 11),
        );
        assert_eq!(error.to_string(), "invalid syntax: expected expression, found ','");
        assert_eq!(error.line, 3);
    }
}

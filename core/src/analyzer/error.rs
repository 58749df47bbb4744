use thiserror::Error;

use crate::parser::BinaryOp;
use crate::types::Type;

/// Type error, attributed to the statement it occurred in.
///
/// Errors are raised without a line while checking expressions; the
/// statement handler attaches its own line on the way out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct TypeError {
    pub kind: TypeErrorKind,
    pub line: Option<usize>,
}

/// Specific kinds of type errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeErrorKind {
    #[error("invalid usage of operator {op} on sequence")]
    OperatorOnSequence { op: BinaryOp },

    #[error("first parameter of map must be of sequence type")]
    MapOverScalar { found: Type },

    #[error("first parameter of reduce must be of sequence type")]
    ReduceOverScalar { found: Type },

    #[error("second parameter of reduce must be of scalar type")]
    NeutralNotScalar { found: Type },

    #[error("return value of lambda must be scalar")]
    LambdaResultNotScalar { found: Type },

    #[error("sequence boundaries must be of type Integer, found {found}")]
    NonIntegerBound { found: Type },

    #[error("access of undeclared variable")]
    UndeclaredVariable { name: String },
}

impl TypeError {
    pub fn new(kind: TypeErrorKind) -> Self {
        Self { kind, line: None }
    }

    /// Attach `line` unless the error already carries one.
    pub fn at_line(self, line: usize) -> Self {
        Self {
            line: self.line.or(Some(line)),
            ..self
        }
    }
}

impl From<TypeErrorKind> for TypeError {
    fn from(kind: TypeErrorKind) -> Self {
        Self::new(kind)
    }
}

//! Runtime evaluation errors.
//!
//! Most of these cannot happen in a program that passed the type checker;
//! the evaluator re-checks value kinds anyway and reports
//! [`RuntimeError::UnexpectedValue`] instead of panicking.

use thiserror::Error;

/// Execution error, attributed to the statement it occurred in.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}")]
pub struct ExecutionError {
    pub kind: ExecutionErrorKind,
    pub line: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExecutionErrorKind {
    /// Error in the program being run.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    /// The output sink failed.
    #[error("failed to write output: {0}")]
    Output(String),

    /// The caller cancelled the call.
    #[error("interpretation cancelled")]
    Interrupted,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("attempted division by 0")]
    DivisionByZero,

    #[error("lower sequence boundary is higher than upper boundary")]
    InvalidSequenceBounds { lower: i64, upper: i64 },

    #[error("access of undeclared variable")]
    UndeclaredVariable { name: String },

    #[error("expected {expected}, found {found}")]
    UnexpectedValue {
        expected: &'static str,
        found: &'static str,
    },
}

impl ExecutionError {
    pub fn new(kind: ExecutionErrorKind) -> Self {
        Self { kind, line: None }
    }

    pub fn interrupted() -> Self {
        Self::new(ExecutionErrorKind::Interrupted)
    }

    pub fn is_interrupted(&self) -> bool {
        self.kind == ExecutionErrorKind::Interrupted
    }

    /// Attach `line` unless the error already carries one.
    pub fn at_line(self, line: usize) -> Self {
        Self {
            line: self.line.or(Some(line)),
            ..self
        }
    }
}

impl From<ExecutionErrorKind> for ExecutionError {
    fn from(kind: ExecutionErrorKind) -> Self {
        Self::new(kind)
    }
}

// Convenient conversions for error construction
impl From<RuntimeError> for ExecutionError {
    fn from(e: RuntimeError) -> Self {
        Self::new(ExecutionErrorKind::Runtime(e))
    }
}

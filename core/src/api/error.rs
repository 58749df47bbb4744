//! Public error type of the interpreter.
//!
//! Every internal error is converted to [`Error`] at the API boundary. The
//! line is relative to the source of the failing call; the interpreter then
//! shifts it by the statements it interpreted before.

use thiserror::Error;

use crate::analyzer::TypeError;
use crate::evaluator::{ExecutionError, ExecutionErrorKind};
use crate::parser::ParseError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The program is invalid or failed while running.
    #[error("error on line {line}: {message}")]
    Program {
        kind: ErrorKind,
        message: String,
        line: usize,
    },

    /// The caller cancelled the call. Not a program error.
    #[error("interpretation cancelled")]
    Cancelled,
}

/// Stage at which a program failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Syntax,
    Type,
    Runtime,
}

impl Error {
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Error::Program { kind, .. } => Some(*kind),
            Error::Cancelled => None,
        }
    }

    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Program { line, .. } => Some(*line),
            Error::Cancelled => None,
        }
    }

    /// Message without the line prefix.
    pub fn message(&self) -> Option<&str> {
        match self {
            Error::Program { message, .. } => Some(message),
            Error::Cancelled => None,
        }
    }

    pub(crate) fn with_line_offset(self, offset: usize) -> Self {
        match self {
            Error::Program {
                kind,
                message,
                line,
            } => Error::Program {
                kind,
                message,
                line: line + offset,
            },
            Error::Cancelled => Error::Cancelled,
        }
    }
}

// ============================================================================
// Conversion from internal errors
// ============================================================================

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::Program {
            kind: ErrorKind::Syntax,
            message: err.to_string(),
            line: err.line,
        }
    }
}

impl From<TypeError> for Error {
    fn from(err: TypeError) -> Self {
        Error::Program {
            kind: ErrorKind::Type,
            message: err.to_string(),
            line: err.line.unwrap_or_default(),
        }
    }
}

impl From<ExecutionError> for Error {
    fn from(err: ExecutionError) -> Self {
        if err.kind == ExecutionErrorKind::Interrupted {
            return Error::Cancelled;
        }
        Error::Program {
            kind: ErrorKind::Runtime,
            message: err.to_string(),
            line: err.line.unwrap_or_default(),
        }
    }
}

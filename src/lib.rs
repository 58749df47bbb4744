//! SeqLang - a small language for arithmetic over lazy integer sequences
//!
//! # Overview
//!
//! A SeqLang program is a list of statements, one per line:
//!
//! - `var x = <expr>` declares (or shadows) a variable
//! - `out <expr>` prints the value of an expression
//! - `print "text"` prints text verbatim
//!
//! Expressions combine integers and floats with `+ - * / ^`, build integer
//! ranges `{lower, upper}`, transform them lazily with `map(seq, i -> ...)` and
//! fold them in parallel with `reduce(seq, neutral, a b -> ...)`.
//!
//! # Quick Start
//!
//! ```
//! use seqlang::Interpreter;
//!
//! let mut interpreter = Interpreter::new(Vec::new());
//! interpreter
//!     .interpret("var n = 500\nvar sequence = map({0, n}, i -> (-1)^i / (2 * i + 1))")
//!     .unwrap();
//! interpreter
//!     .interpret("var pi = 4 * reduce(sequence, 0, x y -> x + y)\nprint \"pi = \"\nout pi")
//!     .unwrap();
//! assert_eq!(interpreter.output(), b"pi = 3.143588659585788");
//! ```
//!
//! Errors carry the line of the failing statement, counted across every
//! successful call on the same interpreter. Use [`render_error`] to show one
//! against the source that produced it.

mod error_renderer;

pub use seqlang_core::api::{
    CancellationToken, Error, ErrorKind, InterpretationResult, Interpreter, InterpreterOptions,
    InterpreterState, run_program,
};

pub use seqlang_core::scope::{Scope, SymbolTable};
pub use seqlang_core::types::Type;
pub use seqlang_core::values::{self, Sequence, Value};

pub use error_renderer::{
    render_error, render_error_to, render_error_to_string, render_error_to_string_no_color,
};

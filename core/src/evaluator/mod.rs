//! Tree-walking executor for SeqLang programs.
//!
//! The executor evaluates a type-checked [`Program`] into runtime values,
//! threading a [`Scope`] from statement to statement. It does not assume the
//! checker ran: value kinds are re-checked and mismatches are reported as
//! [`RuntimeError::UnexpectedValue`].
//!
//! ## Example
//!
//! ```
//! use seqlang_core::evaluator::{Runtime, execute};
//! use seqlang_core::parser::parse;
//! use seqlang_core::scope::Scope;
//!
//! let program = parse("var a = 2\nout a * 3.5").unwrap();
//! let mut out = Vec::new();
//! let scope = execute(&program, Scope::new(), &mut out, &Runtime::default()).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "7.0");
//! assert!(scope.lookup("a").is_some());
//! ```

mod error;
mod eval;
mod operators;
mod runtime;


pub use error::{ExecutionError, ExecutionErrorKind, RuntimeError};
pub use eval::Executor;
pub use runtime::{CancellationToken, DEFAULT_PREVIEW_LEN, Runtime, worker_pool};

use std::io::Write;

use crate::ast::Program;
use crate::scope::Scope;
use crate::visitor::Visitor;

/// Run `program` on top of `scope`, writing printed output to `out`.
///
/// Returns the scope extended with the program's declarations. Output
/// already written before an error stays written.
pub fn execute(
    program: &Program,
    scope: Scope,
    out: &mut dyn Write,
    runtime: &Runtime,
) -> Result<Scope, ExecutionError> {
    Executor::new(out, runtime).visit_program(program, scope)
}

//! Public API for the SeqLang interpreter.
//!
//! An [`Interpreter`] keeps the declarations of every successful call, so a
//! program can be fed to it one piece at a time, as a REPL does. A call that
//! fails leaves it exactly as it was before the call.
//!
//! # Example
//!
//! ```
//! use seqlang_core::api::Interpreter;
//!
//! let mut interpreter = Interpreter::new(Vec::new());
//! interpreter.interpret("var seq = map({1, 4}, n -> n ^ 2)").unwrap();
//! interpreter.interpret("out seq").unwrap();
//! assert_eq!(interpreter.output(), b"{ 1, 4, 9, 16 }");
//!
//! let err = interpreter.interpret("out 1 / 0").unwrap_err();
//! assert_eq!(err.to_string(), "error on line 3: attempted division by 0");
//! ```

pub mod error;
pub mod interpreter;
pub mod options;


pub use crate::evaluator::CancellationToken;
pub use error::{Error, ErrorKind};
pub use interpreter::{InterpretationResult, Interpreter, InterpreterState, run_program};
pub use options::InterpreterOptions;

use std::io::Write;

use tracing::debug;

use crate::analyzer::analyze;
use crate::api::{CancellationToken, Error, InterpreterOptions};
use crate::evaluator::{Runtime, execute, worker_pool};
use crate::parser::parse;
use crate::scope::{Scope, SymbolTable};

/// Bindings and progress carried from one successful call to the next.
#[derive(Debug, Clone, Default)]
pub struct InterpreterState {
    pub symbol_table: SymbolTable,
    pub scope: Scope,
    /// Statements interpreted by earlier calls; added to error lines.
    pub interpreted_statements: usize,
}

/// Incremental SeqLang interpreter writing program output to `W`.
pub struct Interpreter<W: Write> {
    out: W,
    runtime: Runtime,
    state: InterpreterState,
}

impl<W: Write> Interpreter<W> {
    pub fn new(out: W) -> Self {
        Self::with_options(out, InterpreterOptions::default())
    }

    pub fn with_options(out: W, options: InterpreterOptions) -> Self {
        let runtime =
            Runtime::new(worker_pool(options.worker_threads)).with_preview_len(options.preview_len);
        Self {
            out,
            runtime,
            state: InterpreterState::default(),
        }
    }

    /// Interpret `source` on top of the declarations of earlier calls.
    ///
    /// Blank input is a no-op. On error nothing is committed, and the error
    /// line counts the statements of all earlier successful calls. Output
    /// written before the error stays written.
    pub fn interpret(&mut self, source: &str) -> Result<(), Error> {
        self.interpret_with_cancellation(source, &CancellationToken::new())
    }

    /// Like [`Interpreter::interpret`], stopping early with
    /// [`Error::Cancelled`] once `token` is cancelled.
    pub fn interpret_with_cancellation(
        &mut self,
        source: &str,
        token: &CancellationToken,
    ) -> Result<(), Error> {
        if source.trim().is_empty() {
            return Ok(());
        }

        let offset = self.state.interpreted_statements;
        debug!(offset, "interpreting");

        match self.run(source, token) {
            Ok(state) => {
                debug!(statements = state.interpreted_statements - offset, "committing");
                self.state = state;
                Ok(())
            }
            Err(err) => {
                debug!(%err, "rolling back");
                Err(err.with_line_offset(offset))
            }
        }
    }

    fn run(&mut self, source: &str, token: &CancellationToken) -> Result<InterpreterState, Error> {
        let program = parse(source)?;
        let symbol_table = analyze(&program, self.state.symbol_table.clone())?;

        let runtime = self.runtime.clone().with_cancellation(token.clone());
        let scope = execute(&program, self.state.scope.clone(), &mut self.out, &runtime)?;

        Ok(InterpreterState {
            symbol_table,
            scope,
            interpreted_statements: self.state.interpreted_statements + program.statements.len(),
        })
    }

    pub fn state(&self) -> &InterpreterState {
        &self.state
    }

    pub fn symbol_table(&self) -> &SymbolTable {
        &self.state.symbol_table
    }

    pub fn scope(&self) -> &Scope {
        &self.state.scope
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn output_mut(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }
}

/// Outcome of running a whole program, as shown to an editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterpretationResult {
    Success(String),
    Error { line: usize, message: String },
}

/// Run `source` on a fresh interpreter, capturing its output.
///
/// Returns `None` when `token` is cancelled before the program finishes.
pub fn run_program(
    source: &str,
    options: InterpreterOptions,
    token: &CancellationToken,
) -> Option<InterpretationResult> {
    let mut interpreter = Interpreter::with_options(Vec::new(), options);
    let result = interpreter.interpret_with_cancellation(source, token);
    match result {
        Ok(()) => Some(InterpretationResult::Success(
            String::from_utf8_lossy(interpreter.output()).into_owned(),
        )),
        Err(Error::Cancelled) => None,
        Err(Error::Program { line, message, .. }) => {
            Some(InterpretationResult::Error { line, message })
        }
    }
}

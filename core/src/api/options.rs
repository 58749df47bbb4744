//! Configuration options for the interpreter.

use crate::evaluator::DEFAULT_PREVIEW_LEN;

/// Configuration options for an [`Interpreter`](crate::api::Interpreter).
///
/// # Example
///
/// ```
/// use seqlang_core::api::InterpreterOptions;
///
/// let options = InterpreterOptions {
///     worker_threads: Some(4),
///     ..Default::default()
/// };
/// assert_eq!(options.preview_len, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterOptions {
    /// Threads used to materialize sequences.
    ///
    /// Default: `None`, the host's available parallelism minus one (at
    /// least one).
    pub worker_threads: Option<usize>,

    /// Number of elements shown when a sequence is printed.
    ///
    /// Default: 10
    pub preview_len: usize,
}

impl Default for InterpreterOptions {
    fn default() -> Self {
        Self {
            worker_threads: None,
            preview_len: DEFAULT_PREVIEW_LEN,
        }
    }
}

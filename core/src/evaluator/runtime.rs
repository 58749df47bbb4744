//! Worker pool, cancellation and sequence materialization.
//!
//! Sequences are only ever materialized here: by [`Runtime::reduce`] and by
//! [`Runtime::render`] when a sequence is printed. Both fan element
//! transforms out over the worker pool; neither touches any scope.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{trace, warn};

use crate::evaluator::ExecutionError;
use crate::values::{Sequence, Value};

/// Ranges of at most this many elements are folded sequentially.
const REDUCE_BLOCK: u64 = 32;

/// Number of sequence elements shown when printing.
pub const DEFAULT_PREVIEW_LEN: usize = 10;

/// Shared flag for cooperative cancellation of a running interpretation.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Build the worker pool for one interpreter.
///
/// `None` uses the host's parallelism minus one, leaving a thread for the
/// caller that may cancel. Returns `None` if the pool cannot be built, in
/// which case work runs on rayon's global pool.
pub fn worker_pool(threads: Option<usize>) -> Option<Arc<ThreadPool>> {
    let threads = threads.unwrap_or_else(default_worker_threads).max(1);
    match ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|index| format!("seqlang-worker-{index}"))
        .build()
    {
        Ok(pool) => Some(Arc::new(pool)),
        Err(e) => {
            warn!("failed to create worker pool ({e}), using the global pool");
            None
        }
    }
}

fn default_worker_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .saturating_sub(1)
}

/// Everything element transforms need while a program runs.
#[derive(Clone)]
pub struct Runtime {
    pool: Option<Arc<ThreadPool>>,
    cancellation: CancellationToken,
    preview_len: usize,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Runtime {
    pub fn new(pool: Option<Arc<ThreadPool>>) -> Self {
        Self {
            pool,
            cancellation: CancellationToken::new(),
            preview_len: DEFAULT_PREVIEW_LEN,
        }
    }

    pub fn with_cancellation(self, cancellation: CancellationToken) -> Self {
        Self {
            cancellation,
            ..self
        }
    }

    pub fn with_preview_len(self, preview_len: usize) -> Self {
        Self {
            preview_len,
            ..self
        }
    }

    pub fn check_cancelled(&self) -> Result<(), ExecutionError> {
        if self.cancellation.is_cancelled() {
            Err(ExecutionError::interrupted())
        } else {
            Ok(())
        }
    }

    /// Run `work` on the worker pool.
    fn install<R, F>(&self, work: F) -> R
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(work),
            None => work(),
        }
    }

    /// Fold the materialized elements of `seq` with `combine`, seeded with
    /// `neutral`.
    ///
    /// `combine(accumulator, element)` always receives its operands in
    /// ascending element order and `neutral` enters the fold exactly once.
    ///
    /// The range is folded as a tree, not as one left fold: blocks of at most
    /// 32 elements fold left to right, and larger ranges split in two halves
    /// whose results are combined as `combine(left, right)`. The result only
    /// matches a sequential left fold when `combine` is associative. For
    /// example `reduce({1, 40}, 0, a b -> a - b)` gives `358`, not `-820`, and
    /// `reduce({1, 100}, 0, a b -> a + 1)` gives `27`.
    ///
    /// Cancellation and the first failing element stop every pending block.
    pub fn reduce<F>(&self, seq: &Sequence, neutral: Value, combine: F) -> Result<Value, ExecutionError>
    where
        F: Fn(Value, Value) -> Result<Value, ExecutionError> + Sync,
    {
        trace!(lower = seq.lower(), upper = seq.upper(), "reducing sequence");
        let fold = Fold {
            runtime: self,
            seq,
            combine: &combine,
            failed: AtomicBool::new(false),
        };
        self.install(|| fold.range(0, seq.len(), Some(neutral)))
            .map_err(|stop| match stop {
                Stop::Failed(err) => err,
                // Only reachable if a failure was lost on the way up.
                Stop::Aborted => ExecutionError::interrupted(),
            })
    }

    /// Materialize the first elements of `seq` for printing.
    ///
    /// The flag is set when the declared range holds more elements than
    /// were returned.
    pub fn preview(&self, seq: &Sequence) -> Result<(Vec<Value>, bool), ExecutionError> {
        let limit = self.preview_len as u64;
        // At most `preview_len` elements, so the cast is lossless.
        let shown = seq.len().min(limit) as usize;
        trace!(lower = seq.lower(), upper = seq.upper(), shown, "previewing sequence");
        let elements = self.install(|| {
            (0..shown)
                .into_par_iter()
                .map(|index| seq.element(index as u64, self))
                .collect::<Result<Vec<_>, _>>()
        })?;
        Ok((elements, seq.len() > limit))
    }

    /// Text printed by `out` for `value`.
    pub fn render(&self, value: &Value) -> Result<String, ExecutionError> {
        match value {
            Value::Sequence(seq) => {
                let (elements, truncated) = self.preview(seq)?;
                let mut parts: Vec<String> = elements.iter().map(Value::to_string).collect();
                if truncated {
                    parts.push("...".to_string());
                }
                Ok(format!("{{ {} }}", parts.join(", ")))
            }
            scalar => Ok(scalar.to_string()),
        }
    }
}

/// Why a subtree of a reduction stopped.
enum Stop {
    Failed(ExecutionError),
    /// Another subtree failed first.
    Aborted,
}

impl From<ExecutionError> for Stop {
    fn from(err: ExecutionError) -> Self {
        Stop::Failed(err)
    }
}

/// One running reduction, shared by all of its subtrees.
struct Fold<'a, F> {
    runtime: &'a Runtime,
    seq: &'a Sequence,
    combine: &'a F,
    failed: AtomicBool,
}

impl<F> Fold<'_, F>
where
    F: Fn(Value, Value) -> Result<Value, ExecutionError> + Sync,
{
    fn check(&self) -> Result<(), Stop> {
        if self.failed.load(Ordering::Relaxed) {
            return Err(Stop::Aborted);
        }
        self.runtime.check_cancelled()?;
        Ok(())
    }

    fn fail(&self, err: ExecutionError) -> Stop {
        self.failed.store(true, Ordering::Relaxed);
        Stop::Failed(err)
    }

    fn element(&self, index: u64) -> Result<Value, Stop> {
        self.seq
            .element(index, self.runtime)
            .map_err(|err| self.fail(err))
    }

    fn apply(&self, acc: Value, element: Value) -> Result<Value, Stop> {
        (self.combine)(acc, element).map_err(|err| self.fail(err))
    }

    fn range(&self, start: u64, end: u64, seed: Option<Value>) -> Result<Value, Stop> {
        self.check()?;

        let count = end - start;
        if count <= REDUCE_BLOCK {
            let (mut acc, first) = match seed {
                Some(seed) => (seed, start),
                None => (self.element(start)?, start + 1),
            };
            for index in first..end {
                self.check()?;
                acc = self.apply(acc, self.element(index)?)?;
            }
            return Ok(acc);
        }

        let mid = start + count / 2;
        let (left, right) = rayon::join(
            || self.range(start, mid, seed),
            || self.range(mid, end, None),
        );
        match (left, right) {
            (Ok(left), Ok(right)) => {
                self.check()?;
                self.apply(left, right)
            }
            (Err(Stop::Failed(err)), _) | (_, Err(Stop::Failed(err))) => Err(Stop::Failed(err)),
            _ => Err(Stop::Aborted),
        }
    }
}

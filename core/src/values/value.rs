use std::fmt;
use std::sync::Arc;

use crate::evaluator::{ExecutionError, Runtime};

/// Deferred elementwise transform, applied when a sequence is materialized.
///
/// Transforms receive the [`Runtime`] of the call that materializes them,
/// not of the call that created them, so a sequence kept in scope across
/// calls observes the current call's cancellation.
pub type Transform = Arc<dyn Fn(Value, &Runtime) -> Result<Value, ExecutionError> + Send + Sync>;

#[derive(Clone)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Sequence(Sequence),
}

/// The closed integer range `[lower, upper]` with pending transforms.
#[derive(Clone)]
pub struct Sequence {
    lower: i64,
    upper: i64,
    transforms: Vec<Transform>,
}

impl Value {
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Value::Sequence(_))
    }

    /// Short name of the value's kind, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "Integer",
            Value::Float(_) => "Float",
            Value::Sequence(_) => "Sequence",
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(value) => Some(*value),
            _ => None,
        }
    }
}

impl Sequence {
    /// A range without transforms. Callers check `lower <= upper`.
    pub fn new(lower: i64, upper: i64) -> Self {
        debug_assert!(lower <= upper);
        Self {
            lower,
            upper,
            transforms: Vec::new(),
        }
    }

    pub fn lower(&self) -> i64 {
        self.lower
    }

    pub fn upper(&self) -> i64 {
        self.upper
    }

    /// Number of integers in the declared range, saturating at `u64::MAX`.
    ///
    /// Maps never change the element count.
    pub fn len(&self) -> u64 {
        u64::try_from(self.upper as i128 - self.lower as i128 + 1).unwrap_or(u64::MAX)
    }

    pub fn transform_count(&self) -> usize {
        self.transforms.len()
    }

    /// The same range with one more transform appended to the chain.
    pub fn with_transform(&self, transform: Transform) -> Self {
        let mut transforms = self.transforms.clone();
        transforms.push(transform);
        Self {
            lower: self.lower,
            upper: self.upper,
            transforms,
        }
    }

    /// Materialize the element at `index`, counted from `lower`.
    pub fn element(&self, index: u64, runtime: &Runtime) -> Result<Value, ExecutionError> {
        let base = (self.lower as i128 + index as i128) as i64;
        self.transforms
            .iter()
            .try_fold(Value::Integer(base), |value, transform| {
                runtime.check_cancelled()?;
                transform(value, runtime)
            })
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(value) => write!(f, "Integer({})", value),
            Value::Float(value) => write!(f, "Float({:?})", value),
            Value::Sequence(seq) => write!(f, "{:?}", seq),
        }
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("lower", &self.lower)
            .field("upper", &self.upper)
            .field("transforms", &self.transforms.len())
            .finish()
    }
}

/// Scalars compare by value; sequences compare by range and chain length,
/// since transforms have no identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Sequence(a), Value::Sequence(b)) => {
                a.lower == b.lower
                    && a.upper == b.upper
                    && a.transforms.len() == b.transforms.len()
            }
            _ => false,
        }
    }
}

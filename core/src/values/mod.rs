//! Runtime values produced by the evaluator.

mod display;
mod value;

pub use display::format_float;
pub use value::{Sequence, Transform, Value};

#[cfg(test)]
mod value_test;

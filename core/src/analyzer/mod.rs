//! Static type checking of SeqLang programs.

pub mod analyzer;
pub mod error;

#[cfg(test)]
mod analyzer_test;

pub use analyzer::{TypeChecker, analyze};
pub use error::{TypeError, TypeErrorKind};

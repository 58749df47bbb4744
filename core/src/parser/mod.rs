//! pest-based parser turning SeqLang source text into an [`crate::ast::Program`].

pub mod error;
#[allow(clippy::module_inception)]
pub mod parser;
mod syntax;

// Re-export the parser and rule enum for external use
pub use parser::SeqLangParser;
pub use parser::Rule;
pub use parser::parse;

pub use error::{ParseError, ParseErrorKind};
pub use syntax::{BinaryOp, Span};

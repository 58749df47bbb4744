//! Core of the SeqLang interpreter: AST, parser, type checker and executor.
//!
//! Most users want [`api::Interpreter`].

pub mod analyzer;
pub mod api;
pub mod ast;
pub mod evaluator;
pub mod parser;
pub mod scope;
pub mod types;
pub mod values;
pub mod visitor;

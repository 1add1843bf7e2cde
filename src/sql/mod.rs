//! Query language module
//!
//! This module contains the lexer, parser, and AST for the command grammar.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::{ColumnRef, Command, CompareOp, Predicate, Projection};
pub use parser::Parser;

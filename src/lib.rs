//! flatdb - A minimal flat-file tabular data store
//!
//! This library provides the core components for a tiny SQL-like engine:
//! - Query parsing (lexer, parser, AST)
//! - Flat-file record store (one text file per table)
//! - Query execution (projection, filtering, nested-loop equi-join)
//! - Schema catalog

pub mod catalog;
pub mod error;
pub mod executor;
pub mod sql;
pub mod storage;

pub use error::{Error, Result};

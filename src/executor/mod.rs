//! Query execution module
//!
//! This module contains the predicate evaluator and the engine that
//! executes parsed commands against a record store.

pub mod executor;
pub mod predicate;

pub use executor::{Engine, QueryResult};

//! Catalog module
//!
//! This module contains the schema definitions for stored tables.

pub mod schema;

pub use schema::Schema;

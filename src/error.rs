//! Error types for flatdb
//!
//! This module defines all error types used throughout the engine.

use thiserror::Error;

/// The main error type for flatdb
#[derive(Error, Debug)]
pub enum Error {
    // ========== Lexer Errors ==========
    #[error("Syntax error: unterminated string literal starting at position {0}")]
    UnterminatedString(usize),

    // ========== Parser Errors ==========
    #[error("Syntax error: unexpected token '{found}', expected {expected}")]
    UnexpectedToken { expected: String, found: String },

    #[error("Syntax error: unexpected end of input, expected {0}")]
    UnexpectedEof(String),

    #[error("Invalid {family} syntax: {detail}")]
    InvalidSyntax { family: &'static str, detail: String },

    #[error("Unrecognized command: {0}")]
    Unrecognized(String),

    // ========== Catalog Errors ==========
    #[error("Table '{0}' does not exist")]
    TableNotFound(String),

    #[error("Column '{0}' not found in {1}")]
    ColumnNotFound(String, String),

    // ========== I/O Errors ==========
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl Error {
    /// Wrap a parse failure with the command family that was being parsed.
    pub(crate) fn invalid_syntax(family: &'static str, inner: Error) -> Error {
        match inner {
            Error::InvalidSyntax { .. } | Error::Unrecognized(_) => inner,
            other => Error::InvalidSyntax {
                family,
                detail: other.to_string(),
            },
        }
    }
}

/// Result type alias for flatdb operations
pub type Result<T> = std::result::Result<T, Error>;

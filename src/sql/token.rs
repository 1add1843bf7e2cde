//! Token definitions
//!
//! This module defines the tokens of the command grammar, along with their
//! source spans. Spans let the parser recover raw source text for the
//! pieces that are stored verbatim (column definitions, INSERT values).

use std::fmt;

/// A half-open byte range into the original command text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// Token types
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // ========== Keywords ==========
    Create,
    Table,
    Insert,
    Into,
    Values,
    Desc,
    Select,
    From,
    Where,
    Join,
    On,

    // ========== Literals ==========
    /// Identifier (table name, column name, bare value word)
    Identifier(String),
    /// Numeric literal, kept as raw text so `1.50` round-trips unchanged
    Number(String),
    /// String literal (single-quoted); value is the inner text
    StringLiteral(String),

    // ========== Operators ==========
    /// =
    Eq,
    /// !=
    Neq,
    /// <
    Lt,
    /// >
    Gt,
    /// <=
    Lte,
    /// >=
    Gte,

    // ========== Delimiters ==========
    /// *
    Asterisk,
    /// (
    LParen,
    /// )
    RParen,
    /// ,
    Comma,
    /// .
    Dot,

    // ========== Special ==========
    /// Any other non-whitespace character; keeps the lexer total over the
    /// arbitrary text that may appear inside INSERT value lists
    Symbol(char),
    /// End of input
    Eof,
}

impl Token {
    /// Try to parse a keyword from a string
    pub fn from_keyword(s: &str) -> Option<Token> {
        match s.to_uppercase().as_str() {
            "CREATE" => Some(Token::Create),
            "TABLE" => Some(Token::Table),
            "INSERT" => Some(Token::Insert),
            "INTO" => Some(Token::Into),
            "VALUES" => Some(Token::Values),
            "DESC" => Some(Token::Desc),
            "SELECT" => Some(Token::Select),
            "FROM" => Some(Token::From),
            "WHERE" => Some(Token::Where),
            "JOIN" => Some(Token::Join),
            "ON" => Some(Token::On),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Create => write!(f, "CREATE"),
            Token::Table => write!(f, "TABLE"),
            Token::Insert => write!(f, "INSERT"),
            Token::Into => write!(f, "INTO"),
            Token::Values => write!(f, "VALUES"),
            Token::Desc => write!(f, "DESC"),
            Token::Select => write!(f, "SELECT"),
            Token::From => write!(f, "FROM"),
            Token::Where => write!(f, "WHERE"),
            Token::Join => write!(f, "JOIN"),
            Token::On => write!(f, "ON"),
            Token::Identifier(s) => write!(f, "{}", s),
            Token::Number(s) => write!(f, "{}", s),
            Token::StringLiteral(s) => write!(f, "'{}'", s),
            Token::Eq => write!(f, "="),
            Token::Neq => write!(f, "!="),
            Token::Lt => write!(f, "<"),
            Token::Gt => write!(f, ">"),
            Token::Lte => write!(f, "<="),
            Token::Gte => write!(f, ">="),
            Token::Asterisk => write!(f, "*"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Comma => write!(f, ","),
            Token::Dot => write!(f, "."),
            Token::Symbol(c) => write!(f, "{}", c),
            Token::Eof => write!(f, "end of input"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_parsing() {
        assert_eq!(Token::from_keyword("SELECT"), Some(Token::Select));
        assert_eq!(Token::from_keyword("select"), Some(Token::Select));
        assert_eq!(Token::from_keyword("SeLeCt"), Some(Token::Select));
        assert_eq!(Token::from_keyword("users"), None);
    }
}

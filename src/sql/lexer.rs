//! Command lexer (tokenizer)
//!
//! This module converts a raw command string into a stream of spanned
//! tokens. Every token carries the byte range it came from so the parser
//! can capture verbatim source slices where the grammar stores raw text.

use super::token::{Span, Token};
use crate::error::{Error, Result};

/// Command lexer
pub struct Lexer {
    /// Input characters with their byte offsets
    input: Vec<(usize, char)>,
    /// Current position in input
    position: usize,
    /// Total byte length of the input
    len: usize,
}

impl Lexer {
    /// Create a new lexer for the given input
    pub fn new(input: &str) -> Self {
        Self {
            input: input.char_indices().collect(),
            position: 0,
            len: input.len(),
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<(Token, Span)>> {
        let mut tokens = Vec::new();

        loop {
            let (token, span) = self.next_token()?;
            let done = token == Token::Eof;
            tokens.push((token, span));
            if done {
                break;
            }
        }

        Ok(tokens)
    }

    /// Get the next token from the input
    fn next_token(&mut self) -> Result<(Token, Span)> {
        self.skip_whitespace();

        if self.is_at_end() {
            return Ok((
                Token::Eof,
                Span {
                    start: self.len,
                    end: self.len,
                },
            ));
        }

        let start = self.byte_pos();
        let ch = self.current_char();

        let token = match ch {
            '(' => {
                self.advance();
                Token::LParen
            }
            ')' => {
                self.advance();
                Token::RParen
            }
            ',' => {
                self.advance();
                Token::Comma
            }
            '.' => {
                self.advance();
                Token::Dot
            }
            '*' => {
                self.advance();
                Token::Asterisk
            }
            '=' => {
                self.advance();
                Token::Eq
            }
            '<' => {
                self.advance();
                if !self.is_at_end() && self.current_char() == '=' {
                    self.advance();
                    Token::Lte
                } else {
                    Token::Lt
                }
            }
            '>' => {
                self.advance();
                if !self.is_at_end() && self.current_char() == '=' {
                    self.advance();
                    Token::Gte
                } else {
                    Token::Gt
                }
            }
            '!' => {
                self.advance();
                if !self.is_at_end() && self.current_char() == '=' {
                    self.advance();
                    Token::Neq
                } else {
                    Token::Symbol('!')
                }
            }
            '\'' => self.read_string()?,
            _ if ch.is_ascii_digit() => self.read_number(),
            _ if ch.is_alphabetic() || ch == '_' => self.read_identifier(),
            other => {
                self.advance();
                Token::Symbol(other)
            }
        };

        Ok((
            token,
            Span {
                start,
                end: self.byte_pos(),
            },
        ))
    }

    /// Check if we've reached the end of input
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Byte offset of the current position
    fn byte_pos(&self) -> usize {
        self.input
            .get(self.position)
            .map(|(offset, _)| *offset)
            .unwrap_or(self.len)
    }

    /// Get the current character
    fn current_char(&self) -> char {
        self.input[self.position].1
    }

    /// Advance to the next character
    fn advance(&mut self) {
        self.position += 1;
    }

    /// Skip whitespace characters
    fn skip_whitespace(&mut self) {
        while !self.is_at_end() && self.current_char().is_whitespace() {
            self.advance();
        }
    }

    /// Read a string literal (single-quoted, no escape processing)
    fn read_string(&mut self) -> Result<Token> {
        let start_pos = self.byte_pos();
        self.advance(); // skip opening quote

        let mut value = String::new();
        while !self.is_at_end() {
            let ch = self.current_char();
            self.advance();
            if ch == '\'' {
                return Ok(Token::StringLiteral(value));
            }
            value.push(ch);
        }

        Err(Error::UnterminatedString(start_pos))
    }

    /// Read a number, keeping the raw text intact
    fn read_number(&mut self) -> Token {
        let mut value = String::new();

        while !self.is_at_end() {
            let ch = self.current_char();
            if ch.is_ascii_digit() || ch == '.' {
                value.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::Number(value)
    }

    /// Read an identifier or keyword
    fn read_identifier(&mut self) -> Token {
        let mut value = String::new();

        while !self.is_at_end() {
            let ch = self.current_char();
            if ch.is_alphanumeric() || ch == '_' {
                value.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::from_keyword(&value).unwrap_or(Token::Identifier(value))
    }
}

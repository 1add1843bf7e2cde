//! Command parser
//!
//! This module classifies a raw command string into one of the five
//! recognized command shapes and extracts its operands. Keywords and
//! identifiers match case-insensitively; table names are lowercased;
//! literal text keeps its original case.
//!
//! Two extraction rules are deliberate quirks of the stored format:
//! CREATE TABLE column definitions and INSERT values are captured as
//! verbatim source slices (so internal spaces survive and quote characters
//! become part of the stored value), while WHERE literals have their
//! quotes stripped.

use super::ast::*;
use super::lexer::Lexer;
use super::token::{Span, Token};
use crate::error::{Error, Result};

/// Command parser
pub struct Parser<'a> {
    source: &'a str,
    tokens: Vec<(Token, Span)>,
    position: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser from a command string
    pub fn new(source: &'a str) -> Result<Self> {
        let tokens = Lexer::new(source).tokenize()?;
        Ok(Self {
            source,
            tokens,
            position: 0,
        })
    }

    /// Parse the command
    ///
    /// Dispatches on the leading keyword; a SELECT becomes a join command
    /// when a JOIN token appears anywhere in the input. Failures inside a
    /// family are reported as a syntax error naming that family.
    pub fn parse(&mut self) -> Result<Command> {
        match self.current() {
            Token::Create => self
                .parse_create_table()
                .map(Command::CreateTable)
                .map_err(|e| Error::invalid_syntax("CREATE TABLE", e)),
            Token::Insert => self
                .parse_insert()
                .map(Command::Insert)
                .map_err(|e| Error::invalid_syntax("INSERT INTO", e)),
            Token::Desc => self
                .parse_describe()
                .map(Command::Describe)
                .map_err(|e| Error::invalid_syntax("DESC", e)),
            Token::Select => {
                if self.tokens.iter().any(|(t, _)| *t == Token::Join) {
                    self.parse_select_join()
                        .map(Command::SelectJoin)
                        .map_err(|e| Error::invalid_syntax("JOIN", e))
                } else {
                    self.parse_select()
                        .map(Command::Select)
                        .map_err(|e| Error::invalid_syntax("SELECT", e))
                }
            }
            _ => Err(Error::Unrecognized(self.source.trim().to_string())),
        }
    }

    // ========== CREATE TABLE ==========

    fn parse_create_table(&mut self) -> Result<CreateTableCommand> {
        self.expect(&Token::Create)?;
        self.expect(&Token::Table)?;
        let table = self.expect_identifier()?.to_lowercase();
        self.expect(&Token::LParen)?;
        let columns = self.parse_raw_cells()?;
        if columns.iter().all(|c| c.is_empty()) {
            return Err(Error::UnexpectedToken {
                expected: "at least one column definition".to_string(),
                found: ")".to_string(),
            });
        }
        self.expect_end()?;
        Ok(CreateTableCommand { table, columns })
    }

    // ========== INSERT INTO ==========

    fn parse_insert(&mut self) -> Result<InsertCommand> {
        self.expect(&Token::Insert)?;
        self.expect(&Token::Into)?;
        let table = self.expect_identifier()?.to_lowercase();
        self.expect(&Token::Values)?;
        self.expect(&Token::LParen)?;
        let values = self.parse_raw_cells()?;
        if values.iter().all(|v| v.is_empty()) {
            return Err(Error::UnexpectedToken {
                expected: "at least one value".to_string(),
                found: ")".to_string(),
            });
        }
        self.expect_end()?;
        Ok(InsertCommand { table, values })
    }

    // ========== DESC ==========

    fn parse_describe(&mut self) -> Result<DescribeCommand> {
        self.expect(&Token::Desc)?;
        let table = self.expect_identifier()?.to_lowercase();
        self.expect_end()?;
        Ok(DescribeCommand { table })
    }

    // ========== SELECT ==========

    fn parse_select(&mut self) -> Result<SelectCommand> {
        self.expect(&Token::Select)?;
        let projection = self.parse_projection()?;
        self.expect(&Token::From)?;
        let table = self.expect_identifier()?.to_lowercase();

        let predicate = if self.check(&Token::Where) {
            self.advance();
            let column = ColumnRef {
                table: None,
                column: self.expect_identifier()?,
            };
            let op = self.parse_compare_op()?;
            let value = self.parse_literal()?;
            Some(Predicate { column, op, value })
        } else {
            None
        };

        self.expect_end()?;
        Ok(SelectCommand {
            projection,
            table,
            predicate,
        })
    }

    // ========== SELECT ... JOIN ==========

    fn parse_select_join(&mut self) -> Result<SelectJoinCommand> {
        self.expect(&Token::Select)?;
        let projection = self.parse_projection()?;
        self.expect(&Token::From)?;
        let left = self.expect_identifier()?.to_lowercase();
        self.expect(&Token::Join)?;
        let right = self.expect_identifier()?.to_lowercase();
        self.expect(&Token::On)?;
        let left_key = self.parse_qualified_ref()?;
        self.expect(&Token::Eq)?;
        let right_key = self.parse_qualified_ref()?;

        let predicate = if self.check(&Token::Where) {
            self.advance();
            let column = self.parse_qualified_ref()?;
            let op = self.parse_compare_op()?;
            let value = self.parse_literal()?;
            Some(Predicate { column, op, value })
        } else {
            None
        };

        self.expect_end()?;
        Ok(SelectJoinCommand {
            projection,
            left,
            right,
            left_key,
            right_key,
            predicate,
        })
    }

    // ========== Clause helpers ==========

    /// Parse `*` or a comma-separated list of projected column cells
    ///
    /// Each cell is the raw source slice up to the next comma or FROM, so
    /// a projected name may contain internal spaces (a stored cell like
    /// `id INT` is addressable by its full text) or a `table.` qualifier.
    /// FROM is left for the caller to consume.
    fn parse_projection(&mut self) -> Result<Projection> {
        if self.check(&Token::Asterisk) {
            self.advance();
            return Ok(Projection::Wildcard);
        }

        let mut columns = Vec::new();
        let mut cell_start: Option<usize> = None;
        let mut cell_end = 0usize;
        loop {
            let span = self.current_span();
            match self.current() {
                Token::From | Token::Eof => {
                    columns.push(Self::cell_text(self.source, cell_start, cell_end));
                    break;
                }
                Token::Comma => {
                    columns.push(Self::cell_text(self.source, cell_start, cell_end));
                    cell_start = None;
                    self.advance();
                }
                _ => {
                    if cell_start.is_none() {
                        cell_start = Some(span.start);
                    }
                    cell_end = span.end;
                    self.advance();
                }
            }
        }

        if columns.iter().any(|c| c.is_empty()) {
            return Err(Error::UnexpectedToken {
                expected: "column name".to_string(),
                found: self.current().to_string(),
            });
        }
        Ok(Projection::Columns(columns))
    }

    /// Parse a mandatory `table.column` reference
    fn parse_qualified_ref(&mut self) -> Result<ColumnRef> {
        let table = self.expect_identifier()?.to_lowercase();
        self.expect(&Token::Dot)?;
        let column = self.expect_identifier()?;
        Ok(ColumnRef {
            table: Some(table),
            column,
        })
    }

    fn parse_compare_op(&mut self) -> Result<CompareOp> {
        let op = match self.current() {
            Token::Eq => CompareOp::Eq,
            Token::Neq => CompareOp::Neq,
            Token::Lt => CompareOp::Lt,
            Token::Gt => CompareOp::Gt,
            Token::Lte => CompareOp::Lte,
            Token::Gte => CompareOp::Gte,
            other => {
                return Err(Error::UnexpectedToken {
                    expected: "comparison operator".to_string(),
                    found: other.to_string(),
                });
            }
        };
        self.advance();
        Ok(op)
    }

    /// Parse a WHERE literal
    ///
    /// A quoted literal yields its inner text (quotes stripped). An
    /// unquoted literal is the raw text of the next run of contiguous
    /// tokens, i.e. everything up to the next whitespace.
    fn parse_literal(&mut self) -> Result<String> {
        match self.current().clone() {
            Token::StringLiteral(s) => {
                self.advance();
                Ok(s)
            }
            Token::Eof => Err(Error::UnexpectedEof("literal value".to_string())),
            _ => {
                let start = self.current_span().start;
                let mut end = self.current_span().end;
                self.advance();
                while !self.check(&Token::Eof) && self.current_span().start == end {
                    end = self.current_span().end;
                    self.advance();
                }
                Ok(self.source[start..end].to_string())
            }
        }
    }

    /// Capture the cells of a parenthesized list as verbatim source slices
    ///
    /// Cells split on top-level commas (parenthesis depth is tracked) and a
    /// quoted string is a single token, so commas inside quotes never split
    /// a cell. Each cell is the raw slice from its first token to the
    /// delimiter, so whitespace after a comma is dropped but everything
    /// else, trailing spaces included, stays in the cell. Consumes through
    /// the closing parenthesis.
    fn parse_raw_cells(&mut self) -> Result<Vec<String>> {
        let mut cells = Vec::new();
        let mut depth = 1usize;
        let mut cell_start: Option<usize> = None;

        loop {
            let span = self.current_span();
            match self.current() {
                Token::Eof => {
                    return Err(Error::UnexpectedEof("')'".to_string()));
                }
                Token::RParen if depth == 1 => {
                    cells.push(Self::cell_text(self.source, cell_start, span.start));
                    self.advance();
                    return Ok(cells);
                }
                Token::Comma if depth == 1 => {
                    cells.push(Self::cell_text(self.source, cell_start, span.start));
                    cell_start = None;
                    self.advance();
                }
                token => {
                    match token {
                        Token::LParen => depth += 1,
                        Token::RParen => depth -= 1,
                        _ => {}
                    }
                    if cell_start.is_none() {
                        cell_start = Some(span.start);
                    }
                    self.advance();
                }
            }
        }
    }

    fn cell_text(source: &str, start: Option<usize>, end: usize) -> String {
        match start {
            Some(start) => source[start..end].to_string(),
            None => String::new(),
        }
    }

    // ========== Token cursor ==========

    fn current(&self) -> &Token {
        &self.tokens[self.position].0
    }

    fn current_span(&self) -> Span {
        self.tokens[self.position].1
    }

    fn check(&self, token: &Token) -> bool {
        self.current() == token
    }

    fn advance(&mut self) {
        if self.position + 1 < self.tokens.len() {
            self.position += 1;
        }
    }

    fn expect(&mut self, token: &Token) -> Result<()> {
        if self.check(token) {
            self.advance();
            Ok(())
        } else {
            Err(Error::UnexpectedToken {
                expected: token.to_string(),
                found: self.current().to_string(),
            })
        }
    }

    fn expect_identifier(&mut self) -> Result<String> {
        match self.current().clone() {
            Token::Identifier(name) => {
                self.advance();
                Ok(name)
            }
            other => Err(Error::UnexpectedToken {
                expected: "identifier".to_string(),
                found: other.to_string(),
            }),
        }
    }

    fn expect_end(&mut self) -> Result<()> {
        if self.check(&Token::Eof) {
            Ok(())
        } else {
            Err(Error::UnexpectedToken {
                expected: "end of input".to_string(),
                found: self.current().to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<Command> {
        Parser::new(input)?.parse()
    }

    #[test]
    fn test_create_table() {
        let cmd = parse("CREATE TABLE Users (id, name)").unwrap();
        assert_eq!(
            cmd,
            Command::CreateTable(CreateTableCommand {
                table: "users".to_string(),
                columns: vec!["id".to_string(), "name".to_string()],
            })
        );
    }

    #[test]
    fn test_create_table_preserves_internal_spaces() {
        // Whitespace after commas is dropped; a type qualifier stays part
        // of its cell.
        let cmd = parse("create table t (id INT,  name  VARCHAR(50))").unwrap();
        match cmd {
            Command::CreateTable(c) => {
                assert_eq!(c.columns, vec!["id INT", "name  VARCHAR(50)"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_whitespace_before_comma_stays_in_the_cell() {
        // Only whitespace after a comma is dropped; a trailing space is
        // part of its cell, exactly as it lands in the stored header.
        let cmd = parse("CREATE TABLE t (a , b)").unwrap();
        match cmd {
            Command::CreateTable(c) => {
                assert_eq!(c.columns, vec!["a ", "b"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_create_table_empty_column_list_is_error() {
        assert!(matches!(
            parse("CREATE TABLE t ()"),
            Err(Error::InvalidSyntax {
                family: "CREATE TABLE",
                ..
            })
        ));
    }

    #[test]
    fn test_insert_preserves_quotes() {
        let cmd = parse("INSERT INTO users VALUES (1, 'Alice')").unwrap();
        assert_eq!(
            cmd,
            Command::Insert(InsertCommand {
                table: "users".to_string(),
                values: vec!["1".to_string(), "'Alice'".to_string()],
            })
        );
    }

    #[test]
    fn test_insert_protects_quoted_commas() {
        let cmd = parse("INSERT INTO t VALUES ('New York, NY', 2)").unwrap();
        match cmd {
            Command::Insert(c) => {
                assert_eq!(c.values, vec!["'New York, NY'", "2"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_insert_arbitrary_value_text() {
        let cmd = parse("INSERT INTO t VALUES (2024-01-01, 1.50)").unwrap();
        match cmd {
            Command::Insert(c) => {
                assert_eq!(c.values, vec!["2024-01-01", "1.50"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_desc() {
        let cmd = parse("desc USERS").unwrap();
        assert_eq!(
            cmd,
            Command::Describe(DescribeCommand {
                table: "users".to_string(),
            })
        );
    }

    #[test]
    fn test_select_wildcard() {
        let cmd = parse("SELECT * FROM users").unwrap();
        assert_eq!(
            cmd,
            Command::Select(SelectCommand {
                projection: Projection::Wildcard,
                table: "users".to_string(),
                predicate: None,
            })
        );
    }

    #[test]
    fn test_projection_cell_with_internal_spaces() {
        // A stored cell like `id INT` is projectable by its full text.
        let cmd = parse("SELECT id INT, name FROM t").unwrap();
        match cmd {
            Command::Select(c) => {
                assert_eq!(
                    c.projection,
                    Projection::Columns(vec!["id INT".to_string(), "name".to_string()])
                );
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_projection_missing_name_is_error() {
        assert!(parse("SELECT FROM t").is_err());
        assert!(parse("SELECT a, , b FROM t").is_err());
    }

    #[test]
    fn test_select_with_where_strips_quotes() {
        let cmd = parse("SELECT name, city FROM users WHERE name = 'Alice'").unwrap();
        match cmd {
            Command::Select(c) => {
                assert_eq!(
                    c.projection,
                    Projection::Columns(vec!["name".to_string(), "city".to_string()])
                );
                let pred = c.predicate.unwrap();
                assert_eq!(pred.column.column, "name");
                assert_eq!(pred.op, CompareOp::Eq);
                assert_eq!(pred.value, "Alice");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_select_where_operators() {
        for (text, op) in [
            ("=", CompareOp::Eq),
            ("!=", CompareOp::Neq),
            ("<", CompareOp::Lt),
            (">", CompareOp::Gt),
            ("<=", CompareOp::Lte),
            (">=", CompareOp::Gte),
        ] {
            let cmd = parse(&format!("SELECT * FROM t WHERE a {} 5", text)).unwrap();
            match cmd {
                Command::Select(c) => assert_eq!(c.predicate.unwrap().op, op),
                other => panic!("unexpected command: {:?}", other),
            }
        }
    }

    #[test]
    fn test_select_where_unquoted_literal_runs_to_whitespace() {
        let cmd = parse("SELECT * FROM t WHERE d = 2024-01-01").unwrap();
        match cmd {
            Command::Select(c) => assert_eq!(c.predicate.unwrap().value, "2024-01-01"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_select_join() {
        let cmd =
            parse("SELECT users.name FROM orders JOIN users ON orders.uid = users.id").unwrap();
        assert_eq!(
            cmd,
            Command::SelectJoin(SelectJoinCommand {
                projection: Projection::Columns(vec!["users.name".to_string()]),
                left: "orders".to_string(),
                right: "users".to_string(),
                left_key: ColumnRef {
                    table: Some("orders".to_string()),
                    column: "uid".to_string(),
                },
                right_key: ColumnRef {
                    table: Some("users".to_string()),
                    column: "id".to_string(),
                },
                predicate: None,
            })
        );
    }

    #[test]
    fn test_select_join_with_where() {
        let cmd = parse(
            "SELECT * FROM a JOIN b ON a.x = b.y WHERE b.z >= 10",
        )
        .unwrap();
        match cmd {
            Command::SelectJoin(c) => {
                let pred = c.predicate.unwrap();
                assert_eq!(pred.column.table.as_deref(), Some("b"));
                assert_eq!(pred.column.column, "z");
                assert_eq!(pred.op, CompareOp::Gte);
                assert_eq!(pred.value, "10");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_join_literal_in_where_does_not_trigger_join_parse() {
        // Only a JOIN token switches to the join family, not the word
        // inside a string literal.
        let cmd = parse("SELECT * FROM t WHERE a = 'join'").unwrap();
        assert!(matches!(cmd, Command::Select(_)));
    }

    #[test]
    fn test_unrecognized_command() {
        assert!(matches!(
            parse("DELETE FROM users"),
            Err(Error::Unrecognized(_))
        ));
        assert!(matches!(parse("hello world"), Err(Error::Unrecognized(_))));
    }

    #[test]
    fn test_keyword_prefix_with_bad_tail_names_the_family() {
        match parse("CREATE TABLE") {
            Err(Error::InvalidSyntax { family, .. }) => assert_eq!(family, "CREATE TABLE"),
            other => panic!("unexpected result: {:?}", other),
        }
        match parse("INSERT INTO t (1, 2)") {
            Err(Error::InvalidSyntax { family, .. }) => assert_eq!(family, "INSERT INTO"),
            other => panic!("unexpected result: {:?}", other),
        }
        match parse("SELECT a FROM t JOIN") {
            Err(Error::InvalidSyntax { family, .. }) => assert_eq!(family, "JOIN"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_trailing_tokens_are_rejected() {
        assert!(parse("SELECT * FROM t garbage").is_err());
        assert!(parse("DESC t extra").is_err());
    }

    #[test]
    fn test_case_insensitive_keywords() {
        assert!(parse("select * from t").is_ok());
        assert!(parse("CrEaTe TaBlE t (a)").is_ok());
        assert!(parse("insert into t values (1)").is_ok());
    }
}

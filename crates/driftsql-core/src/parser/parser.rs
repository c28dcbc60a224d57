//! SQL Parser implementation.
//!
//! The grammar is split over several files: this one holds the parser
//! state, statement dispatch and token helpers; expressions, queries, DML,
//! DDL and drift files each live in a sibling module with their own
//! `impl Parser` block.

use super::error::ParseError;
use super::stream::TokenStream;
use crate::ast::{Expr, Statement};
use crate::dialect::{Dialect, GenericDialect};
use crate::lexer::{Keyword, Span, Token, TokenKind};

static GENERIC: GenericDialect = GenericDialect::new();

/// SQL Parser.
///
/// One parser consumes one source text. The dialect decides which
/// optional syntax is accepted.
pub struct Parser<'a> {
    pub(super) stream: TokenStream<'a>,
    pub(super) dialect: &'a dyn Dialect,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given input using [`GenericDialect`].
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::with_dialect(input, &GENERIC)
    }

    /// Creates a new parser for the given input and dialect.
    #[must_use]
    pub fn with_dialect(input: &'a str, dialect: &'a dyn Dialect) -> Self {
        Self {
            stream: TokenStream::new(input, dialect.drift_extensions()),
            dialect,
        }
    }

    /// Returns the dialect this parser was created with.
    #[must_use]
    pub fn dialect(&self) -> &'a dyn Dialect {
        self.dialect
    }

    /// Parses a single SQL statement.
    ///
    /// A trailing `;` is accepted; any other token after the statement is
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns the first syntax error found in the input.
    pub fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        let statement = self.parse_statement_body()?;
        self.eat(&TokenKind::Semicolon);
        self.expect_end("end of statement")?;
        Ok(statement)
    }

    /// Parses a single expression that spans the whole input.
    ///
    /// # Errors
    ///
    /// Returns the first syntax error found in the input.
    pub fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_expr()?;
        self.expect_end("end of expression")?;
        Ok(expr)
    }

    /// Parses `;`-separated statements until the end of input.
    ///
    /// Empty statements are skipped.
    ///
    /// # Errors
    ///
    /// Returns the first syntax error found in the input.
    pub fn parse_script(&mut self) -> Result<Vec<Statement>, ParseError> {
        let mut statements = Vec::new();
        loop {
            while self.eat(&TokenKind::Semicolon) {}
            if self.stream.is_at_end() {
                break;
            }
            let statement = self.parse_statement_body()?;
            tracing::debug!(
                line = statement.span().line,
                index = statements.len(),
                "parsed statement"
            );
            statements.push(statement);
            if !self.stream.is_at_end() {
                self.expect(&TokenKind::Semicolon)?;
            }
        }
        Ok(statements)
    }

    /// Parses one statement without its terminator.
    pub(super) fn parse_statement_body(&mut self) -> Result<Statement, ParseError> {
        let start = self.stream.current().span;
        match self.stream.current().as_keyword() {
            Some(Keyword::With) => {
                let with = self.parse_with_clause()?;
                match self.stream.current().as_keyword() {
                    Some(Keyword::Select | Keyword::Values) => Ok(Statement::Select(
                        self.parse_select_after_with(Some(with), start)?,
                    )),
                    Some(Keyword::Insert | Keyword::Replace) => Ok(Statement::Insert(
                        self.parse_insert_statement(Some(with), start)?,
                    )),
                    Some(Keyword::Update) => Ok(Statement::Update(
                        self.parse_update_statement(Some(with), start)?,
                    )),
                    Some(Keyword::Delete) => Ok(Statement::Delete(
                        self.parse_delete_statement(Some(with), start)?,
                    )),
                    _ => Err(self.stream.error_at("SELECT, INSERT, UPDATE or DELETE")),
                }
            }
            Some(Keyword::Select | Keyword::Values) => {
                Ok(Statement::Select(self.parse_select_statement()?))
            }
            Some(Keyword::Insert | Keyword::Replace) => Ok(Statement::Insert(
                self.parse_insert_statement(None, start)?,
            )),
            Some(Keyword::Update) => Ok(Statement::Update(
                self.parse_update_statement(None, start)?,
            )),
            Some(Keyword::Delete) => Ok(Statement::Delete(
                self.parse_delete_statement(None, start)?,
            )),
            Some(Keyword::Create) => self.parse_create_statement(),
            _ => Err(self.stream.error_at("statement")),
        }
    }

    // --- Helper methods ---

    /// Consumes and returns the current token.
    pub(super) fn advance(&mut self) -> Token<'a> {
        self.stream.advance()
    }

    /// Checks if the current token has the same variant as `kind`.
    pub(super) fn check(&self, kind: &TokenKind) -> bool {
        self.stream.check(kind)
    }

    /// Checks if the current token is the given keyword.
    pub(super) fn check_keyword(&self, keyword: Keyword) -> bool {
        self.stream.check_keyword(keyword)
    }

    /// Consumes the current token if it has the same variant as `kind`.
    pub(super) fn eat(&mut self, kind: &TokenKind) -> bool {
        let matched = self.check(kind);
        if matched {
            self.advance();
        }
        matched
    }

    /// Consumes the current token if it is the given keyword.
    pub(super) fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        let matched = self.check_keyword(keyword);
        if matched {
            self.advance();
        }
        matched
    }

    /// Expects the current token to be the given kind.
    pub(super) fn expect(&mut self, kind: &TokenKind) -> Result<Span, ParseError> {
        if self.check(kind) {
            Ok(self.advance().span)
        } else {
            Err(self.stream.error_at(&describe(kind)))
        }
    }

    /// Expects the current token to be the given keyword.
    pub(super) fn expect_keyword(&mut self, keyword: Keyword) -> Result<Span, ParseError> {
        if self.check_keyword(keyword) {
            Ok(self.advance().span)
        } else {
            Err(self.stream.error_at(keyword.as_str()))
        }
    }

    /// Expects the end of input.
    pub(super) fn expect_end(&self, expected: &str) -> Result<(), ParseError> {
        if self.stream.is_at_end() {
            Ok(())
        } else {
            Err(self.stream.error_at(expected))
        }
    }

    /// Returns true if the current token can be read as a name.
    pub(super) fn check_identifier(&self) -> bool {
        self.stream.current_kind().is_identifier_like()
    }

    /// Expects and returns an identifier.
    ///
    /// Keywords that SQLite lets fall back to identifiers are accepted and
    /// keep their source spelling.
    pub(super) fn expect_identifier(&mut self) -> Result<String, ParseError> {
        let token = self.stream.current();
        match &token.kind {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            TokenKind::Keyword(kw) if kw.can_be_identifier() => {
                let name = token.lexeme.to_string();
                self.advance();
                Ok(name)
            }
            _ => Err(self.stream.error_at("identifier")),
        }
    }

    /// Parses `name` or `schema.name`.
    pub(super) fn parse_qualified_name(&mut self) -> Result<(Option<String>, String), ParseError> {
        let first = self.expect_identifier()?;
        if self.eat(&TokenKind::Dot) {
            let second = self.expect_identifier()?;
            Ok((Some(first), second))
        } else {
            Ok((None, first))
        }
    }

    /// Parses an optional alias: `AS name` or a bare identifier.
    ///
    /// Bare aliases must be plain identifiers so that keywords such as
    /// `JOIN` or `WHERE` are never taken as aliases.
    pub(super) fn parse_optional_alias(&mut self) -> Result<Option<String>, ParseError> {
        if self.eat_keyword(Keyword::As) {
            return self.expect_identifier().map(Some);
        }
        if let TokenKind::Identifier(name) = self.stream.current_kind() {
            let name = name.clone();
            self.advance();
            return Ok(Some(name));
        }
        Ok(None)
    }

    /// Parses a comma-separated list of identifiers.
    pub(super) fn parse_identifier_list(&mut self) -> Result<Vec<String>, ParseError> {
        let mut names = vec![self.expect_identifier()?];
        while self.eat(&TokenKind::Comma) {
            names.push(self.expect_identifier()?);
        }
        Ok(names)
    }

    /// Parses `(name, ...)`.
    pub(super) fn parse_parenthesized_identifiers(&mut self) -> Result<Vec<String>, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let names = self.parse_identifier_list()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(names)
    }

    /// Parses a comma-separated list of expressions.
    pub(super) fn parse_expression_list(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut exprs = vec![self.parse_expr()?];
        while self.eat(&TokenKind::Comma) {
            exprs.push(self.parse_expr()?);
        }
        Ok(exprs)
    }

    /// Returns the span of the current token, used as the start of a node.
    pub(super) fn start(&self) -> Span {
        self.stream.current().span
    }

    /// Returns the span from `start` to the last consumed token.
    pub(super) fn span_from(&self, start: Span) -> Span {
        self.stream.span_from(start)
    }

    /// Fails with [`Unsupported`](super::ParseErrorKind::Unsupported) when
    /// the dialect has disabled `feature`.
    pub(super) fn require_feature(
        &self,
        enabled: bool,
        feature: &str,
        span: Span,
    ) -> Result<(), ParseError> {
        if enabled {
            Ok(())
        } else {
            tracing::trace!(feature, dialect = self.dialect.name(), "rejected by dialect");
            Err(ParseError::unsupported(feature, self.dialect.name(), span))
        }
    }

    /// Fails unless drift extensions are enabled.
    pub(super) fn require_drift(&self, feature: &str, span: Span) -> Result<(), ParseError> {
        self.require_feature(self.dialect.drift_extensions(), feature, span)
    }

    /// Runs `parse` and rewinds the stream if it fails.
    pub(super) fn speculate<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Option<T> {
        let checkpoint = self.stream.checkpoint();
        match parse(self) {
            Ok(value) => Some(value),
            Err(_) => {
                self.stream.restore(checkpoint);
                None
            }
        }
    }
}

/// Describes a token kind for "expected ..." messages.
fn describe(kind: &TokenKind) -> String {
    let symbol = match kind {
        TokenKind::LeftParen => "(",
        TokenKind::RightParen => ")",
        TokenKind::Comma => ",",
        TokenKind::Semicolon => ";",
        TokenKind::Dot => ".",
        TokenKind::Colon => ":",
        TokenKind::Eq => "=",
        TokenKind::Identifier(_) => return "identifier".to_string(),
        TokenKind::String(_) => return "string literal".to_string(),
        TokenKind::InlineDart(_) => return "Dart code in backticks".to_string(),
        other => return format!("{other:?}"),
    };
    format!("'{symbol}'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, Expr};
    use crate::dialect::DriftDialect;
    use crate::parser::ParseErrorKind;

    fn parse(sql: &str) -> Result<Statement, ParseError> {
        Parser::new(sql).parse_statement()
    }

    #[test]
    fn test_simple_select() {
        let stmt = parse("SELECT id, name FROM users").unwrap();
        assert!(matches!(stmt, Statement::Select(_)));
    }

    #[test]
    fn test_trailing_semicolon() {
        assert!(parse("SELECT 1;").is_ok());
        let err = parse("SELECT 1; SELECT 2").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
        assert_eq!(err.found, Some(TokenKind::Keyword(Keyword::Select)));
    }

    #[test]
    fn test_dispatch() {
        assert!(matches!(parse("VALUES (1)").unwrap(), Statement::Select(_)));
        assert!(matches!(
            parse("WITH x AS (SELECT 1) DELETE FROM t").unwrap(),
            Statement::Delete(_)
        ));
        assert!(matches!(
            parse("REPLACE INTO t VALUES (1)").unwrap(),
            Statement::Insert(_)
        ));
        assert!(matches!(
            parse("CREATE INDEX i ON t (a)").unwrap(),
            Statement::CreateIndex(_)
        ));
    }

    #[test]
    fn test_unknown_statement() {
        let err = parse("DROP TABLE t").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
        assert_eq!(err.expected.as_deref(), Some("statement"));
    }

    #[test]
    fn test_parse_expression() {
        let expr = Parser::new("1 + 2").parse_expression().unwrap();
        assert!(matches!(
            expr,
            Expr::Binary {
                op: BinaryOp::Add,
                ..
            }
        ));
        assert!(Parser::new("1 +").parse_expression().is_err());
        assert!(Parser::new("1 2").parse_expression().is_err());
    }

    #[test]
    fn test_parse_script() {
        let statements = Parser::new(";; SELECT 1; ; UPDATE t SET a = 1;")
            .parse_script()
            .unwrap();
        assert_eq!(statements.len(), 2);
        assert!(Parser::new("").parse_script().unwrap().is_empty());
        assert!(Parser::new("SELECT 1 SELECT 2").parse_script().is_err());
    }

    #[test]
    fn test_keyword_identifier_fallback() {
        let stmt = parse("SELECT key, replace(a, 'x', 'y') FROM filter").unwrap();
        assert_eq!(stmt.to_string(), "SELECT \"key\", replace(a, 'x', 'y') FROM \"filter\"");
    }

    #[test]
    fn test_dialect_name() {
        let dialect = DriftDialect::new();
        let parser = Parser::with_dialect("SELECT 1", &dialect);
        assert_eq!(parser.dialect().name(), "drift");
        assert_eq!(Parser::new("").dialect().name(), "generic");
    }
}

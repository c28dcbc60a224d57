//! # driftsql-core
//!
//! A parser for the SQLite dialect of SQL, including the template syntax
//! drift adds on top of it.
//!
//! This crate provides:
//! - A hand-written lexer producing tokens with byte, line and column spans
//! - A recursive descent parser with Pratt expression parsing
//! - An AST in which every node carries the span it was parsed from
//! - Dialects gating optional syntax by SQLite version or drift support
//!
//! ## Parsing statements
//!
//! ```rust
//! use driftsql_core::ast::{Expr, ResultColumn, SelectCore, Statement};
//! use driftsql_core::parse_statement;
//!
//! let statement = parse_statement("SELECT row_number() OVER (ORDER BY id) FROM users").unwrap();
//! let Statement::Select(select) = statement else { unreachable!() };
//! let SelectCore::Select(clause) = &select.core else { unreachable!() };
//! let ResultColumn::Expression { expr, .. } = &clause.columns[0] else { unreachable!() };
//! assert!(matches!(expr, Expr::WindowFunction { .. }));
//! assert_eq!(expr.span().start, 7);
//! ```
//!
//! ## drift templates
//!
//! Template syntax is only accepted by a dialect with drift extensions:
//!
//! ```rust
//! use driftsql_core::dialect::DriftDialect;
//! use driftsql_core::Parser;
//!
//! let dialect = DriftDialect::new();
//! let file = Parser::with_dialect(
//!     "import 'tables.drift';\nbyName: SELECT * FROM users WHERE $predicate LIMIT $limit;",
//!     &dialect,
//! )
//! .parse_drift_file()
//! .unwrap();
//! assert_eq!(file.declared_statements().count(), 1);
//!
//! assert!(driftsql_core::parse_statement("SELECT * FROM users WHERE $predicate").is_ok());
//! assert!(driftsql_core::parse_statement("SELECT t.** FROM users t").is_err());
//! ```

pub mod ast;
pub mod dialect;
pub mod lexer;
pub mod parser;

pub use ast::{Expr, Node, Statement};
pub use dialect::{Dialect, DriftDialect, GenericDialect};
pub use lexer::{Keyword, Lexer, Span, Token, TokenKind};
pub use parser::{ParseError, ParseErrorKind, Parser};

/// Parses one statement with the [`GenericDialect`].
///
/// # Errors
///
/// Returns the first syntax error in `sql`.
pub fn parse_statement(sql: &str) -> Result<Statement, ParseError> {
    Parser::new(sql).parse_statement()
}

/// Parses one expression with the [`GenericDialect`].
///
/// # Errors
///
/// Returns the first syntax error in `sql`.
pub fn parse_expression(sql: &str) -> Result<Expr, ParseError> {
    Parser::new(sql).parse_expression()
}

/// Parses `;`-separated statements with the [`GenericDialect`].
///
/// # Errors
///
/// Returns the first syntax error in `sql`.
pub fn parse_script(sql: &str) -> Result<Vec<Statement>, ParseError> {
    Parser::new(sql).parse_script()
}

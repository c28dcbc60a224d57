//! drift file parsing.

use super::error::ParseError;
use super::expression::variable_kind;
use super::parser::Parser;
use crate::ast::{
    DeclaredStatement, DriftFile, DriftStatement, ImportStatement, StatementParameter,
};
use crate::lexer::{Keyword, Span, TokenKind};

impl Parser<'_> {
    /// Parses a `.drift` file: imports, named queries, `@create`
    /// statements and plain statements, each terminated by `;`.
    ///
    /// The parser's dialect must enable drift extensions.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] encountered.
    pub fn parse_drift_file(&mut self) -> Result<DriftFile, ParseError> {
        let start = self.start();
        self.require_drift("drift files", start)?;

        let mut statements: Vec<DriftStatement> = Vec::new();
        loop {
            while self.eat(&TokenKind::Semicolon) {}
            if self.stream.is_at_end() {
                break;
            }

            let statement = self.parse_drift_statement()?;
            tracing::debug!(
                line = statement.span().line,
                index = statements.len(),
                "parsed drift entry"
            );
            statements.push(statement);

            if !self.stream.is_at_end() {
                self.expect(&TokenKind::Semicolon)?;
            }
        }

        let span = match (statements.first(), statements.last()) {
            (Some(first), Some(last)) => first.span().merge(last.span()),
            _ => Span::with_position(start.start, start.start, start.line, start.column),
        };
        Ok(DriftFile { statements, span })
    }

    fn parse_drift_statement(&mut self) -> Result<DriftStatement, ParseError> {
        let start = self.start();

        if self.check_keyword(Keyword::Import)
            && matches!(self.stream.peek(1).kind, TokenKind::String(_))
        {
            self.advance();
            let TokenKind::String(uri) = self.advance().kind else {
                return Err(ParseError::unexpected("import URI", self.stream.previous()));
            };
            return Ok(DriftStatement::Import(ImportStatement {
                uri,
                span: self.span_from(start),
            }));
        }

        if matches!(self.stream.current_kind(), TokenKind::AtParameter(name) if name == "create")
        {
            self.advance();
            self.expect(&TokenKind::Colon)?;
            let statement = self.parse_statement_body()?;
            return Ok(DriftStatement::OnCreate {
                statement,
                span: self.span_from(start),
            });
        }

        if self.at_declared_statement() {
            return Ok(DriftStatement::Declared(self.parse_declared_statement()?));
        }

        Ok(DriftStatement::Plain(self.parse_statement_body()?))
    }

    /// A named query starts with `name(`, `name:` or `name AS`.
    fn at_declared_statement(&self) -> bool {
        self.check_identifier()
            && matches!(
                self.stream.peek(1).kind,
                TokenKind::LeftParen | TokenKind::Colon | TokenKind::Keyword(Keyword::As)
            )
    }

    fn parse_declared_statement(&mut self) -> Result<DeclaredStatement, ParseError> {
        let start = self.start();
        let name = self.expect_identifier()?;

        let mut parameters = Vec::new();
        if self.eat(&TokenKind::LeftParen) {
            if !self.check(&TokenKind::RightParen) {
                parameters.push(self.parse_statement_parameter()?);
                while self.eat(&TokenKind::Comma) {
                    parameters.push(self.parse_statement_parameter()?);
                }
            }
            self.expect(&TokenKind::RightParen)?;
        }

        let result_class = if self.eat_keyword(Keyword::As) {
            Some(self.expect_identifier()?)
        } else {
            None
        };

        self.expect(&TokenKind::Colon)?;
        let statement = self.parse_statement_body()?;

        Ok(DeclaredStatement {
            name,
            parameters,
            result_class,
            statement,
            span: self.span_from(start),
        })
    }

    /// Parses `[REQUIRED] var [AS type [OR NULL]]` or `$name = default`.
    fn parse_statement_parameter(&mut self) -> Result<StatementParameter, ParseError> {
        let start = self.start();

        if let TokenKind::DollarParameter(name) = self.stream.current_kind() {
            if self.stream.peek(1).kind == TokenKind::Eq {
                let name = name.clone();
                self.advance();
                self.advance();
                let default = self.parse_expr()?;
                return Ok(StatementParameter::DefaultValue {
                    name,
                    default,
                    span: self.span_from(start),
                });
            }
        }

        let required = self.eat_keyword(Keyword::Required);
        let Some(variable) = variable_kind(self.stream.current_kind()) else {
            return Err(self.stream.error_at("variable"));
        };
        self.advance();

        let mut type_name = None;
        let mut or_null = false;
        if self.eat_keyword(Keyword::As) {
            type_name = Some(self.parse_type_name()?);
            if self.check_keyword(Keyword::Or) && self.stream.check_keyword_at(1, Keyword::Null) {
                self.advance();
                self.advance();
                or_null = true;
            }
        }

        Ok(StatementParameter::VariableType {
            variable,
            required,
            type_name,
            or_null,
            span: self.span_from(start),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{DriftStatement, Expr, Statement, StatementParameter, VariableKind};
    use crate::dialect::DriftDialect;
    use crate::parser::{ParseErrorKind, Parser};

    const FILE: &str = "\
import 'tables.drift';
import 'package:app/converters.dart';

CREATE TABLE todos (
  id INTEGER NOT NULL PRIMARY KEY,
  title TEXT NOT NULL,
  category INT REFERENCES categories (id)
) AS Todo;

@create: INSERT INTO todos (title) VALUES ('first');

allTodos: SELECT * FROM todos;
todosIn(REQUIRED :category AS INTEGER OR NULL, $order = title) AS TodoRow:
  SELECT t.** FROM todos t WHERE category = :category ORDER BY $order;
";

    #[test]
    fn test_drift_file() {
        let dialect = DriftDialect::new();
        let file = Parser::with_dialect(FILE, &dialect)
            .parse_drift_file()
            .unwrap();
        assert_eq!(file.statements.len(), 6);

        let imports: Vec<_> = file.imports().map(|i| i.uri.as_str()).collect();
        assert_eq!(imports, ["tables.drift", "package:app/converters.dart"]);

        assert!(matches!(
            file.statements[2],
            DriftStatement::Plain(Statement::CreateTable(_))
        ));
        assert!(matches!(
            file.statements[3],
            DriftStatement::OnCreate {
                statement: Statement::Insert(_),
                ..
            }
        ));

        let declared: Vec<_> = file.declared_statements().collect();
        assert_eq!(declared.len(), 2);
        assert_eq!(declared[0].name, "allTodos");
        assert!(declared[0].parameters.is_empty());

        let todos_in = declared[1];
        assert_eq!(todos_in.result_class.as_deref(), Some("TodoRow"));
        let StatementParameter::VariableType {
            variable,
            required,
            type_name,
            or_null,
            ..
        } = &todos_in.parameters[0]
        else {
            panic!("expected a type hint");
        };
        assert_eq!(
            variable,
            &VariableKind::Named {
                prefix: ':',
                name: "category".to_string()
            }
        );
        assert!(*required);
        assert_eq!(type_name.as_ref().unwrap().name, "INTEGER");
        assert!(*or_null);

        let StatementParameter::DefaultValue { name, default, .. } = &todos_in.parameters[1]
        else {
            panic!("expected a default value");
        };
        assert_eq!(name, "order");
        assert!(matches!(default, Expr::Reference { .. }));
    }

    #[test]
    fn test_drift_file_round_trip() {
        let dialect = DriftDialect::new();
        let file = Parser::with_dialect(FILE, &dialect)
            .parse_drift_file()
            .unwrap();
        let rendered = file.to_string();
        let reparsed = Parser::with_dialect(&rendered, &dialect)
            .parse_drift_file()
            .unwrap();
        assert_eq!(reparsed.to_string(), rendered);
    }

    #[test]
    fn test_empty_drift_file() {
        let dialect = DriftDialect::new();
        let file = Parser::with_dialect("  ;; ", &dialect)
            .parse_drift_file()
            .unwrap();
        assert!(file.statements.is_empty());
        assert!(file.span.is_empty());
    }

    #[test]
    fn test_drift_file_requires_drift_dialect() {
        let err = Parser::new("allTodos: SELECT 1;")
            .parse_drift_file()
            .unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Unsupported);
    }

    #[test]
    fn test_missing_separator() {
        let dialect = DriftDialect::new();
        let err = Parser::with_dialect("a: SELECT 1 b: SELECT 2", &dialect)
            .parse_drift_file()
            .unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    }
}

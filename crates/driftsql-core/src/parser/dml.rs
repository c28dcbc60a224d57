//! INSERT, UPDATE and DELETE parsing.

use super::error::ParseError;
use super::parser::Parser;
use crate::ast::{
    Assignment, ConflictResolution, ConflictTarget, DeleteStatement, IndexedColumn, InsertMode,
    InsertSource, InsertStatement, ReturningClause, UpdateStatement, UpsertAction, UpsertClause,
    WithClause,
};
use crate::lexer::{Keyword, Span, TokenKind};

impl Parser<'_> {
    /// Parses an INSERT or REPLACE statement.
    pub(super) fn parse_insert_statement(
        &mut self,
        with: Option<WithClause>,
        start: Span,
    ) -> Result<InsertStatement, ParseError> {
        let mode = if self.eat_keyword(Keyword::Replace) {
            InsertMode::Replace
        } else {
            self.expect_keyword(Keyword::Insert)?;
            if self.eat_keyword(Keyword::Or) {
                InsertMode::InsertOr(self.parse_conflict_resolution()?)
            } else {
                InsertMode::Insert
            }
        };
        self.expect_keyword(Keyword::Into)?;

        let (schema, table) = self.parse_qualified_name()?;
        let alias = if self.eat_keyword(Keyword::As) {
            Some(self.expect_identifier()?)
        } else {
            None
        };

        let columns = if self.check(&TokenKind::LeftParen) {
            self.parse_parenthesized_identifiers()?
        } else {
            Vec::new()
        };

        let source = self.parse_insert_source()?;

        let mut upserts = Vec::new();
        while self.check_keyword(Keyword::On) && self.stream.check_keyword_at(1, Keyword::Conflict)
        {
            upserts.push(self.parse_upsert_clause()?);
        }

        let returning = self.parse_optional_returning()?;

        Ok(InsertStatement {
            with,
            mode,
            schema,
            table,
            alias,
            columns,
            source,
            upserts,
            returning,
            span: self.span_from(start),
        })
    }

    fn parse_insert_source(&mut self) -> Result<InsertSource, ParseError> {
        let start = self.start();
        match self.stream.current_kind() {
            TokenKind::Keyword(Keyword::Values) => {
                Ok(InsertSource::Values(self.parse_values_clause()?))
            }
            TokenKind::Keyword(Keyword::Select | Keyword::With) => {
                Ok(InsertSource::Query(Box::new(self.parse_select_statement()?)))
            }
            TokenKind::Keyword(Keyword::Default) => {
                self.advance();
                self.expect_keyword(Keyword::Values)?;
                Ok(InsertSource::DefaultValues {
                    span: self.span_from(start),
                })
            }
            TokenKind::DollarParameter(name) if self.dialect.drift_extensions() => {
                let name = name.clone();
                self.advance();
                Ok(InsertSource::Placeholder { name, span: start })
            }
            _ => Err(self.stream.error_at("VALUES, SELECT or DEFAULT VALUES")),
        }
    }

    /// Parses `ON CONFLICT [(columns) [WHERE expr]] DO NOTHING | DO UPDATE ...`.
    fn parse_upsert_clause(&mut self) -> Result<UpsertClause, ParseError> {
        let start = self.start();
        self.require_feature(self.dialect.supports_upsert(), "ON CONFLICT clauses", start)?;
        self.expect_keyword(Keyword::On)?;
        self.expect_keyword(Keyword::Conflict)?;

        let target = if self.check(&TokenKind::LeftParen) {
            let target_start = self.advance().span;
            let columns = self.parse_indexed_columns()?;
            self.expect(&TokenKind::RightParen)?;
            let where_clause = if self.eat_keyword(Keyword::Where) {
                Some(self.parse_expr()?)
            } else {
                None
            };
            Some(ConflictTarget {
                columns,
                where_clause,
                span: self.span_from(target_start),
            })
        } else {
            None
        };

        self.expect_keyword(Keyword::Do)?;
        let action = if self.eat_keyword(Keyword::Nothing) {
            UpsertAction::Nothing
        } else {
            self.expect_keyword(Keyword::Update)?;
            self.expect_keyword(Keyword::Set)?;
            let assignments = self.parse_assignments()?;
            let where_clause = if self.eat_keyword(Keyword::Where) {
                Some(self.parse_expr()?)
            } else {
                None
            };
            UpsertAction::Update {
                assignments,
                where_clause,
            }
        };

        Ok(UpsertClause {
            target,
            action,
            span: self.span_from(start),
        })
    }

    /// Parses an UPDATE statement.
    pub(super) fn parse_update_statement(
        &mut self,
        with: Option<WithClause>,
        start: Span,
    ) -> Result<UpdateStatement, ParseError> {
        self.expect_keyword(Keyword::Update)?;
        let or_action = if self.eat_keyword(Keyword::Or) {
            Some(self.parse_conflict_resolution()?)
        } else {
            None
        };

        let (schema, table) = self.parse_qualified_name()?;
        let alias = if self.eat_keyword(Keyword::As) {
            Some(self.expect_identifier()?)
        } else {
            None
        };

        self.expect_keyword(Keyword::Set)?;
        let assignments = self.parse_assignments()?;

        let from = if self.eat_keyword(Keyword::From) {
            Some(self.parse_table_ref()?)
        } else {
            None
        };

        let where_clause = if self.eat_keyword(Keyword::Where) {
            Some(self.parse_expr()?)
        } else {
            None
        };

        let returning = self.parse_optional_returning()?;

        Ok(UpdateStatement {
            with,
            or_action,
            schema,
            table,
            alias,
            assignments,
            from,
            where_clause,
            returning,
            span: self.span_from(start),
        })
    }

    /// Parses a DELETE statement.
    pub(super) fn parse_delete_statement(
        &mut self,
        with: Option<WithClause>,
        start: Span,
    ) -> Result<DeleteStatement, ParseError> {
        self.expect_keyword(Keyword::Delete)?;
        self.expect_keyword(Keyword::From)?;

        let (schema, table) = self.parse_qualified_name()?;
        let alias = if self.eat_keyword(Keyword::As) {
            Some(self.expect_identifier()?)
        } else {
            None
        };

        let where_clause = if self.eat_keyword(Keyword::Where) {
            Some(self.parse_expr()?)
        } else {
            None
        };

        let returning = self.parse_optional_returning()?;

        Ok(DeleteStatement {
            with,
            schema,
            table,
            alias,
            where_clause,
            returning,
            span: self.span_from(start),
        })
    }

    /// Parses `ROLLBACK | ABORT | FAIL | IGNORE | REPLACE`.
    pub(super) fn parse_conflict_resolution(&mut self) -> Result<ConflictResolution, ParseError> {
        let resolution = match self.stream.current().as_keyword() {
            Some(Keyword::Rollback) => ConflictResolution::Rollback,
            Some(Keyword::Abort) => ConflictResolution::Abort,
            Some(Keyword::Fail) => ConflictResolution::Fail,
            Some(Keyword::Ignore) => ConflictResolution::Ignore,
            Some(Keyword::Replace) => ConflictResolution::Replace,
            _ => {
                return Err(self
                    .stream
                    .error_at("ROLLBACK, ABORT, FAIL, IGNORE or REPLACE"))
            }
        };
        self.advance();
        Ok(resolution)
    }

    /// Parses `col = expr` and `(a, b) = expr` assignments.
    fn parse_assignments(&mut self) -> Result<Vec<Assignment>, ParseError> {
        let mut assignments = vec![self.parse_assignment()?];
        while self.eat(&TokenKind::Comma) {
            assignments.push(self.parse_assignment()?);
        }
        Ok(assignments)
    }

    fn parse_assignment(&mut self) -> Result<Assignment, ParseError> {
        let start = self.start();
        let columns = if self.check(&TokenKind::LeftParen) {
            self.parse_parenthesized_identifiers()?
        } else {
            vec![self.expect_identifier()?]
        };
        self.expect(&TokenKind::Eq)?;
        let value = self.parse_expr()?;
        Ok(Assignment {
            columns,
            value,
            span: self.span_from(start),
        })
    }

    /// Parses a comma-separated list of indexed columns.
    pub(super) fn parse_indexed_columns(&mut self) -> Result<Vec<IndexedColumn>, ParseError> {
        let mut columns = vec![self.parse_indexed_column()?];
        while self.eat(&TokenKind::Comma) {
            columns.push(self.parse_indexed_column()?);
        }
        Ok(columns)
    }

    fn parse_indexed_column(&mut self) -> Result<IndexedColumn, ParseError> {
        let expr = self.parse_expr()?;
        let start = expr.span();
        let direction = self.parse_optional_direction();
        Ok(IndexedColumn {
            expr,
            direction,
            span: self.span_from(start),
        })
    }

    fn parse_optional_returning(&mut self) -> Result<Option<ReturningClause>, ParseError> {
        if !self.check_keyword(Keyword::Returning) {
            return Ok(None);
        }
        let start = self.start();
        self.require_feature(self.dialect.supports_returning(), "RETURNING clauses", start)?;
        self.advance();
        let columns = self.parse_result_columns()?;
        Ok(Some(ReturningClause {
            columns,
            span: self.span_from(start),
        }))
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{
        ConflictResolution, InsertMode, InsertSource, Statement, UpsertAction,
    };
    use crate::dialect::DriftDialect;
    use crate::parser::{ParseError, Parser};

    fn parse(sql: &str) -> Result<Statement, ParseError> {
        Parser::new(sql).parse_statement()
    }

    #[test]
    fn test_insert_forms() {
        let Statement::Insert(insert) =
            parse("INSERT OR IGNORE INTO main.t (a, b) VALUES (1, 2), (3, 4)").unwrap()
        else {
            panic!("expected INSERT");
        };
        assert_eq!(insert.mode, InsertMode::InsertOr(ConflictResolution::Ignore));
        assert_eq!(insert.schema.as_deref(), Some("main"));
        assert_eq!(insert.columns, vec!["a".to_string(), "b".to_string()]);
        assert!(matches!(insert.source, InsertSource::Values(ref v) if v.rows.len() == 2));

        let Statement::Insert(insert) = parse("INSERT INTO t DEFAULT VALUES").unwrap() else {
            panic!("expected INSERT");
        };
        assert!(matches!(insert.source, InsertSource::DefaultValues { .. }));

        let Statement::Insert(insert) = parse("REPLACE INTO t SELECT * FROM u").unwrap() else {
            panic!("expected INSERT");
        };
        assert_eq!(insert.mode, InsertMode::Replace);
        assert!(matches!(insert.source, InsertSource::Query(_)));
    }

    #[test]
    fn test_upsert() {
        let Statement::Insert(insert) = parse(
            "INSERT INTO t (id, n) VALUES (1, 1) \
             ON CONFLICT (id) WHERE id > 0 DO UPDATE SET n = n + 1 WHERE n < 10 \
             ON CONFLICT DO NOTHING",
        )
        .unwrap() else {
            panic!("expected INSERT");
        };
        assert_eq!(insert.upserts.len(), 2);
        let target = insert.upserts[0].target.as_ref().unwrap();
        assert!(target.where_clause.is_some());
        assert!(matches!(
            insert.upserts[0].action,
            UpsertAction::Update { ref where_clause, .. } if where_clause.is_some()
        ));
        assert!(insert.upserts[1].target.is_none());
        assert_eq!(insert.upserts[1].action, UpsertAction::Nothing);
    }

    #[test]
    fn test_insert_placeholder() {
        let dialect = DriftDialect::new();
        let stmt = Parser::with_dialect("INSERT INTO t $row", &dialect)
            .parse_statement()
            .unwrap();
        let Statement::Insert(insert) = stmt else {
            panic!("expected INSERT");
        };
        assert!(matches!(insert.source, InsertSource::Placeholder { ref name, .. } if name == "row"));
        assert!(parse("INSERT INTO t $row").is_err());
    }

    #[test]
    fn test_update() {
        let Statement::Update(update) = parse(
            "UPDATE OR REPLACE t AS x SET a = 1, (b, c) = (2, 3) FROM u WHERE x.id = u.id \
             RETURNING *",
        )
        .unwrap() else {
            panic!("expected UPDATE");
        };
        assert_eq!(update.or_action, Some(ConflictResolution::Replace));
        assert_eq!(update.alias.as_deref(), Some("x"));
        assert_eq!(update.assignments[1].columns.len(), 2);
        assert!(update.from.is_some());
        assert!(update.returning.is_some());
    }

    #[test]
    fn test_delete() {
        let Statement::Delete(delete) = parse("DELETE FROM t WHERE a = 1 RETURNING a, b AS c")
            .unwrap()
        else {
            panic!("expected DELETE");
        };
        assert!(delete.where_clause.is_some());
        assert_eq!(delete.returning.unwrap().columns.len(), 2);
        assert!(parse("DELETE t").is_err());
    }
}

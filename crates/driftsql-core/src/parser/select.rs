//! Query parsing: `WITH`, `SELECT` and `VALUES` cores, compound
//! operators, result columns and `FROM` clauses.

use super::error::ParseError;
use super::parser::Parser;
use crate::ast::{
    CommonTableExpression, CompoundOperator, CompoundPart, JoinClause, JoinConstraint, JoinType,
    LimitClause, LimitKind, NamedWindow, ResultColumn, SelectClause, SelectCore,
    SelectStatement, TableIndexing, TableRef, ValuesClause, WithClause,
};
use crate::lexer::{Keyword, Span, TokenKind};

impl Parser<'_> {
    /// Parses a SELECT statement, including an optional `WITH` prefix.
    pub(super) fn parse_select_statement(&mut self) -> Result<SelectStatement, ParseError> {
        let start = self.start();
        let with = if self.check_keyword(Keyword::With) {
            Some(self.parse_with_clause()?)
        } else {
            None
        };
        self.parse_select_after_with(with, start)
    }

    /// Parses the rest of a SELECT statement once its `WITH` clause, if
    /// any, has been read. `start` is where the statement began.
    pub(super) fn parse_select_after_with(
        &mut self,
        with: Option<WithClause>,
        start: Span,
    ) -> Result<SelectStatement, ParseError> {
        let core = self.parse_select_core()?;

        let mut compounds = Vec::new();
        loop {
            let part_start = self.start();
            let operator = match self.stream.current().as_keyword() {
                Some(Keyword::Union) => {
                    self.advance();
                    if self.eat_keyword(Keyword::All) {
                        CompoundOperator::UnionAll
                    } else {
                        CompoundOperator::Union
                    }
                }
                Some(Keyword::Intersect) => {
                    self.advance();
                    CompoundOperator::Intersect
                }
                Some(Keyword::Except) => {
                    self.advance();
                    CompoundOperator::Except
                }
                _ => break,
            };
            let core = self.parse_select_core()?;
            compounds.push(CompoundPart {
                operator,
                core,
                span: self.span_from(part_start),
            });
        }

        let order_by = if self.check_keyword(Keyword::Order) {
            Some(self.parse_order_by_clause()?)
        } else {
            None
        };

        let limit = if self.check_keyword(Keyword::Limit) {
            Some(self.parse_limit_clause()?)
        } else {
            None
        };

        Ok(SelectStatement {
            with,
            core,
            compounds,
            order_by,
            limit,
            span: self.span_from(start),
        })
    }

    /// Parses `WITH [RECURSIVE] cte, ...`.
    pub(super) fn parse_with_clause(&mut self) -> Result<WithClause, ParseError> {
        let start = self.expect_keyword(Keyword::With)?;
        let recursive = self.eat_keyword(Keyword::Recursive);
        let mut ctes = vec![self.parse_common_table_expression()?];
        while self.eat(&TokenKind::Comma) {
            ctes.push(self.parse_common_table_expression()?);
        }
        Ok(WithClause {
            recursive,
            ctes,
            span: self.span_from(start),
        })
    }

    fn parse_common_table_expression(&mut self) -> Result<CommonTableExpression, ParseError> {
        let start = self.start();
        let name = self.expect_identifier()?;
        let columns = if self.check(&TokenKind::LeftParen) {
            self.parse_parenthesized_identifiers()?
        } else {
            Vec::new()
        };
        self.expect_keyword(Keyword::As)?;

        let hint_start = self.start();
        let materialized = if self.check_keyword(Keyword::Not)
            && self.stream.check_keyword_at(1, Keyword::Materialized)
        {
            self.advance();
            self.advance();
            Some(false)
        } else if self.eat_keyword(Keyword::Materialized) {
            Some(true)
        } else {
            None
        };
        if materialized.is_some() {
            self.require_feature(
                self.dialect.supports_materialized_ctes(),
                "MATERIALIZED hints",
                self.span_from(hint_start),
            )?;
        }

        self.expect(&TokenKind::LeftParen)?;
        let query = self.parse_select_statement()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(CommonTableExpression {
            name,
            columns,
            materialized,
            query: Box::new(query),
            span: self.span_from(start),
        })
    }

    fn parse_select_core(&mut self) -> Result<SelectCore, ParseError> {
        match self.stream.current().as_keyword() {
            Some(Keyword::Select) => Ok(SelectCore::Select(self.parse_select_clause()?)),
            Some(Keyword::Values) => Ok(SelectCore::Values(self.parse_values_clause()?)),
            _ => Err(self.stream.error_at("SELECT or VALUES")),
        }
    }

    fn parse_select_clause(&mut self) -> Result<SelectClause, ParseError> {
        let start = self.expect_keyword(Keyword::Select)?;

        let distinct = if self.eat_keyword(Keyword::Distinct) {
            true
        } else {
            self.eat_keyword(Keyword::All);
            false
        };

        let columns = self.parse_result_columns()?;

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

        let group_by = if self.eat_keyword(Keyword::Group) {
            self.expect_keyword(Keyword::By)?;
            self.parse_expression_list()?
        } else {
            Vec::new()
        };

        let having = if self.eat_keyword(Keyword::Having) {
            Some(self.parse_expr()?)
        } else {
            None
        };

        let mut windows = Vec::new();
        if self.check_keyword(Keyword::Window) {
            self.require_feature(
                self.dialect.supports_window_functions(),
                "WINDOW clauses",
                self.start(),
            )?;
            self.advance();
            windows.push(self.parse_named_window()?);
            while self.eat(&TokenKind::Comma) {
                windows.push(self.parse_named_window()?);
            }
        }

        Ok(SelectClause {
            distinct,
            columns,
            from,
            where_clause,
            group_by,
            having,
            windows,
            span: self.span_from(start),
        })
    }

    fn parse_named_window(&mut self) -> Result<NamedWindow, ParseError> {
        let start = self.start();
        let name = self.expect_identifier()?;
        self.expect_keyword(Keyword::As)?;
        let definition = self.parse_window_definition()?;
        Ok(NamedWindow {
            name,
            definition,
            span: self.span_from(start),
        })
    }

    /// Parses `VALUES (...), (...)`.
    pub(super) fn parse_values_clause(&mut self) -> Result<ValuesClause, ParseError> {
        let start = self.expect_keyword(Keyword::Values)?;
        let mut rows = Vec::new();
        loop {
            self.expect(&TokenKind::LeftParen)?;
            rows.push(self.parse_expression_list()?);
            self.expect(&TokenKind::RightParen)?;
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        Ok(ValuesClause {
            rows,
            span: self.span_from(start),
        })
    }

    /// Parses a comma-separated list of result columns.
    pub(super) fn parse_result_columns(&mut self) -> Result<Vec<ResultColumn>, ParseError> {
        let mut columns = vec![self.parse_result_column()?];
        while self.eat(&TokenKind::Comma) {
            columns.push(self.parse_result_column()?);
        }
        Ok(columns)
    }

    fn parse_result_column(&mut self) -> Result<ResultColumn, ParseError> {
        let start = self.start();

        if self.eat(&TokenKind::Star) {
            return Ok(ResultColumn::Star { span: start });
        }

        if self.check_identifier() && self.stream.peek(1).kind == TokenKind::Dot {
            let star = &self.stream.peek(2).kind;
            if matches!(star, TokenKind::Star | TokenKind::DoubleStar) {
                let nested = *star == TokenKind::DoubleStar;
                let table = self.expect_identifier()?;
                self.advance();
                self.advance();
                let span = self.span_from(start);
                return Ok(if nested {
                    ResultColumn::NestedStar { table, span }
                } else {
                    ResultColumn::TableStar { table, span }
                });
            }
        }

        if self.at_nested_query() {
            self.advance();
            self.expect(&TokenKind::LeftParen)?;
            let query = self.parse_select_statement()?;
            self.expect(&TokenKind::RightParen)?;
            let alias = self.parse_optional_alias()?;
            return Ok(ResultColumn::NestedQuery {
                query: Box::new(query),
                alias,
                span: self.span_from(start),
            });
        }

        let expr = self.parse_expr()?;
        let mut mapped_by = self.parse_optional_mapped_by()?;
        let alias = self.parse_optional_alias()?;
        if mapped_by.is_none() {
            mapped_by = self.parse_optional_mapped_by()?;
        }
        Ok(ResultColumn::Expression {
            expr,
            alias,
            mapped_by,
            span: self.span_from(start),
        })
    }

    /// Returns true at drift's `LIST(SELECT ...)` result column.
    fn at_nested_query(&self) -> bool {
        let is_list = matches!(
            self.stream.current_kind(),
            TokenKind::Identifier(name) if name.eq_ignore_ascii_case("list")
        );
        is_list
            && self.dialect.drift_extensions()
            && self.stream.peek(1).kind == TokenKind::LeftParen
            && matches!(
                self.stream.peek(2).as_keyword(),
                Some(Keyword::Select | Keyword::With)
            )
    }

    /// Parses an optional drift ``MAPPED BY `converter` `` annotation.
    pub(super) fn parse_optional_mapped_by(&mut self) -> Result<Option<String>, ParseError> {
        if !(self.check_keyword(Keyword::Mapped) && self.stream.check_keyword_at(1, Keyword::By)) {
            return Ok(None);
        }
        self.require_drift("MAPPED BY", self.start())?;
        self.advance();
        self.advance();
        self.expect_inline_dart().map(Some)
    }

    /// Expects a backtick-quoted Dart snippet.
    pub(super) fn expect_inline_dart(&mut self) -> Result<String, ParseError> {
        if let TokenKind::InlineDart(code) = self.stream.current_kind() {
            let code = code.clone();
            self.advance();
            Ok(code)
        } else {
            Err(self.stream.error_at("Dart code in backticks"))
        }
    }

    /// Parses a FROM clause: table references folded left to right into
    /// joins.
    pub(super) fn parse_table_ref(&mut self) -> Result<TableRef, ParseError> {
        let mut left = self.parse_table_or_subquery()?;

        loop {
            let join_start = self.start();
            let (natural, join_type) = if self.eat(&TokenKind::Comma) {
                (false, JoinType::Comma)
            } else if self.is_join_keyword() {
                self.parse_join_type()?
            } else {
                break;
            };

            let table = self.parse_table_or_subquery()?;
            let constraint = if self.eat_keyword(Keyword::On) {
                Some(JoinConstraint::On(self.parse_expr()?))
            } else if self.eat_keyword(Keyword::Using) {
                Some(JoinConstraint::Using(self.parse_parenthesized_identifiers()?))
            } else {
                None
            };

            let join = JoinClause {
                natural,
                join_type,
                table,
                constraint,
                span: self.span_from(join_start),
            };
            let span = left.span().merge(join.span);
            left = TableRef::Join {
                left: Box::new(left),
                join: Box::new(join),
                span,
            };
        }

        Ok(left)
    }

    fn is_join_keyword(&self) -> bool {
        matches!(
            self.stream.current().as_keyword(),
            Some(
                Keyword::Join
                    | Keyword::Inner
                    | Keyword::Left
                    | Keyword::Right
                    | Keyword::Full
                    | Keyword::Cross
                    | Keyword::Natural
            )
        )
    }

    /// Parses `[NATURAL] [LEFT|RIGHT|FULL [OUTER]|INNER|CROSS] JOIN`.
    fn parse_join_type(&mut self) -> Result<(bool, JoinType), ParseError> {
        let natural = self.eat_keyword(Keyword::Natural);
        let join_type = match self.stream.current().as_keyword() {
            Some(Keyword::Join) => JoinType::Inner,
            Some(Keyword::Inner) => {
                self.advance();
                JoinType::Inner
            }
            Some(Keyword::Cross) => {
                self.advance();
                JoinType::Cross
            }
            Some(Keyword::Left) => {
                self.advance();
                self.eat_keyword(Keyword::Outer);
                JoinType::Left
            }
            Some(keyword @ (Keyword::Right | Keyword::Full)) => {
                self.require_feature(
                    self.dialect.supports_right_full_join(),
                    "RIGHT and FULL joins",
                    self.start(),
                )?;
                self.advance();
                self.eat_keyword(Keyword::Outer);
                if keyword == Keyword::Right {
                    JoinType::Right
                } else {
                    JoinType::Full
                }
            }
            _ => return Err(self.stream.error_at("JOIN")),
        };
        self.expect_keyword(Keyword::Join)?;
        Ok((natural, join_type))
    }

    fn parse_table_or_subquery(&mut self) -> Result<TableRef, ParseError> {
        let start = self.start();

        if self.eat(&TokenKind::LeftParen) {
            if self.starts_select() {
                let query = self.parse_select_statement()?;
                self.expect(&TokenKind::RightParen)?;
                let alias = self.parse_optional_alias()?;
                return Ok(TableRef::Subquery {
                    query: Box::new(query),
                    alias,
                    span: self.span_from(start),
                });
            }
            let inner = self.parse_table_ref()?;
            self.expect(&TokenKind::RightParen)?;
            return Ok(TableRef::Parenthesized {
                inner: Box::new(inner),
                span: self.span_from(start),
            });
        }

        let (schema, name) = self.parse_qualified_name()?;

        if self.eat(&TokenKind::LeftParen) {
            let args = if self.check(&TokenKind::RightParen) {
                Vec::new()
            } else {
                self.parse_expression_list()?
            };
            self.expect(&TokenKind::RightParen)?;
            let alias = self.parse_optional_alias()?;
            return Ok(TableRef::TableFunction {
                schema,
                name,
                args,
                alias,
                span: self.span_from(start),
            });
        }

        let alias = self.parse_optional_alias()?;
        let indexing = if self.eat_keyword(Keyword::Indexed) {
            self.expect_keyword(Keyword::By)?;
            Some(TableIndexing::IndexedBy(self.expect_identifier()?))
        } else if self.check_keyword(Keyword::Not)
            && self.stream.check_keyword_at(1, Keyword::Indexed)
        {
            self.advance();
            self.advance();
            Some(TableIndexing::NotIndexed)
        } else {
            None
        };

        Ok(TableRef::Table {
            schema,
            name,
            alias,
            indexing,
            span: self.span_from(start),
        })
    }

    fn parse_limit_clause(&mut self) -> Result<LimitClause, ParseError> {
        let start = self.expect_keyword(Keyword::Limit)?;

        if self.dialect.drift_extensions() && self.check(&TokenKind::DollarParameter(String::new()))
        {
            if let Some((name, _)) = self.speculate(|p| p.parse_standalone_placeholder(true)) {
                return Ok(LimitClause {
                    kind: LimitKind::Placeholder(name),
                    span: self.span_from(start),
                });
            }
        }

        let first = self.parse_expr()?;
        let kind = if self.eat_keyword(Keyword::Offset) {
            LimitKind::Expressions {
                limit: first,
                offset: Some(self.parse_expr()?),
            }
        } else if self.eat(&TokenKind::Comma) {
            // `LIMIT offset, count`
            LimitKind::Expressions {
                limit: self.parse_expr()?,
                offset: Some(first),
            }
        } else {
            LimitKind::Expressions {
                limit: first,
                offset: None,
            }
        };

        Ok(LimitClause {
            kind,
            span: self.span_from(start),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{
        CompoundOperator, JoinType, LimitKind, ResultColumn, SelectCore, SelectStatement,
        Statement, TableRef,
    };
    use crate::dialect::DriftDialect;
    use crate::parser::{ParseError, ParseErrorKind, Parser};

    fn parse(sql: &str) -> Result<SelectStatement, ParseError> {
        match Parser::new(sql).parse_statement()? {
            Statement::Select(select) => Ok(select),
            other => panic!("expected SELECT, got {other:?}"),
        }
    }

    fn parse_drift(sql: &str) -> Result<SelectStatement, ParseError> {
        let dialect = DriftDialect::new();
        match Parser::with_dialect(sql, &dialect).parse_statement()? {
            Statement::Select(select) => Ok(select),
            other => panic!("expected SELECT, got {other:?}"),
        }
    }

    #[test]
    fn test_select_clauses() {
        let select = parse(
            "SELECT DISTINCT a, count(*) AS n FROM t WHERE a > 1 GROUP BY a HAVING n > 2 \
             ORDER BY n DESC LIMIT 10 OFFSET 5",
        )
        .unwrap();
        let clause = select.select_clause().unwrap();
        assert!(clause.distinct);
        assert_eq!(clause.columns.len(), 2);
        assert!(clause.where_clause.is_some());
        assert_eq!(clause.group_by.len(), 1);
        assert!(clause.having.is_some());
        assert!(select.order_by.is_some());
        assert!(matches!(
            select.limit.unwrap().kind,
            LimitKind::Expressions {
                offset: Some(_),
                ..
            }
        ));
    }

    #[test]
    fn test_limit_comma_form() {
        let select = parse("SELECT a FROM t LIMIT 5, 10").unwrap();
        assert_eq!(select.limit.unwrap().to_string(), "LIMIT 10 OFFSET 5");
    }

    #[test]
    fn test_compound_is_left_associative() {
        let select = parse("SELECT 1 UNION ALL SELECT 2 EXCEPT SELECT 3 ORDER BY 1").unwrap();
        let operators: Vec<_> = select.compounds.iter().map(|c| c.operator).collect();
        assert_eq!(
            operators,
            vec![CompoundOperator::UnionAll, CompoundOperator::Except]
        );
        assert!(select.order_by.is_some());
    }

    #[test]
    fn test_join_fold() {
        let select =
            parse("SELECT * FROM a, b LEFT OUTER JOIN c USING (id) NATURAL JOIN d").unwrap();
        let Some(TableRef::Join { left, join, .. }) = &select.select_clause().unwrap().from
        else {
            panic!("expected join");
        };
        assert!(join.natural);
        assert_eq!(join.join_type, JoinType::Inner);
        let TableRef::Join { left, join, .. } = left.as_ref() else {
            panic!("expected nested join");
        };
        assert_eq!(join.join_type, JoinType::Left);
        assert!(matches!(
            left.as_ref(),
            TableRef::Join { join, .. } if join.join_type == JoinType::Comma
        ));
    }

    #[test]
    fn test_table_forms() {
        let sql = "SELECT * FROM main.t AS x INDEXED BY i JOIN (SELECT 1) s \
                   JOIN json_each(x.data) j JOIN (b CROSS JOIN c)";
        let select = parse(sql).unwrap();
        assert_eq!(
            select.to_string(),
            "SELECT * FROM main.t AS x INDEXED BY i JOIN (SELECT 1) AS s \
             JOIN json_each(x.data) AS j JOIN (b CROSS JOIN c)"
        );
    }

    #[test]
    fn test_result_columns() {
        let select = parse("SELECT *, t.*, a b FROM t").unwrap();
        let columns = &select.select_clause().unwrap().columns;
        assert!(matches!(columns[0], ResultColumn::Star { .. }));
        assert!(matches!(&columns[1], ResultColumn::TableStar { table, .. } if table == "t"));
        assert!(matches!(
            &columns[2],
            ResultColumn::Expression { alias: Some(alias), .. } if alias == "b"
        ));
    }

    #[test]
    fn test_drift_result_columns() {
        let select = parse_drift(
            "SELECT t.**, LIST(SELECT * FROM u) AS us, a MAPPED BY `const C()` AS b FROM t",
        )
        .unwrap();
        let columns = &select.select_clause().unwrap().columns;
        assert!(matches!(&columns[0], ResultColumn::NestedStar { table, .. } if table == "t"));
        assert!(matches!(&columns[1], ResultColumn::NestedQuery { .. }));
        assert!(matches!(
            &columns[2],
            ResultColumn::Expression { mapped_by: Some(dart), .. } if dart == "const C()"
        ));
    }

    #[test]
    fn test_drift_syntax_rejected_in_plain_mode() {
        let err = Parser::new("SELECT a MAPPED BY x FROM t")
            .parse_statement()
            .unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Unsupported);
    }

    #[test]
    fn test_drift_limit_placeholder() {
        let select = parse_drift("SELECT * FROM t LIMIT $limit").unwrap();
        assert!(matches!(
            select.limit.unwrap().kind,
            LimitKind::Placeholder(name) if name == "limit"
        ));
        let select = parse_drift("SELECT * FROM t LIMIT $a + 1").unwrap();
        assert!(matches!(
            select.limit.unwrap().kind,
            LimitKind::Expressions { .. }
        ));
    }

    #[test]
    fn test_values_core() {
        let select = parse("VALUES (1, 2), (3, 4)").unwrap();
        assert!(matches!(&select.core, SelectCore::Values(values) if values.rows.len() == 2));
    }

    #[test]
    fn test_with_clause() {
        let select = parse(
            "WITH RECURSIVE cnt(x) AS NOT MATERIALIZED (SELECT 1 UNION ALL SELECT x + 1 FROM cnt) \
             SELECT x FROM cnt",
        )
        .unwrap();
        let with = select.with.unwrap();
        assert!(with.recursive);
        assert_eq!(with.ctes[0].columns, vec!["x".to_string()]);
        assert_eq!(with.ctes[0].materialized, Some(false));
    }

    #[test]
    fn test_window_clause() {
        let select =
            parse("SELECT sum(x) OVER w FROM t WINDOW w AS (PARTITION BY y)").unwrap();
        assert_eq!(select.select_clause().unwrap().windows.len(), 1);
    }

    #[test]
    fn test_select_from_without_columns() {
        let err = parse("SELECT FROM").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
        assert_eq!((err.span.start, err.span.end), (7, 11));
    }
}

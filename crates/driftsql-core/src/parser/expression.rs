//! Expression parsing: the Pratt loop, primary expressions, function
//! calls and window definitions.

use super::error::ParseError;
use super::parser::Parser;
use super::pratt::{
    infix_binding_power, prefix_binding_power, token_to_binary_op, token_to_unary_op, UNARY_BP,
};
use crate::ast::{
    BinaryOp, ExcludeMode, Expr, FrameBoundary, FrameSpec, FrameType, FunctionParameters,
    InSource, LikeOp, Literal, NullOrdering, OrderByClause, OrderDirection, OrderingItem,
    OrderingTerm, Over, RaiseAction, VariableKind, WhenClause, WindowDefinition,
};
use crate::lexer::{Keyword, Span, TokenKind};

/// Maps a variable token to the variable it names.
pub(super) fn variable_kind(kind: &TokenKind) -> Option<VariableKind> {
    match kind {
        TokenKind::Question => Some(VariableKind::Anonymous),
        TokenKind::NumberedParameter(index) => Some(VariableKind::Numbered(*index)),
        TokenKind::ColonParameter(name) => Some(VariableKind::Named {
            prefix: ':',
            name: name.clone(),
        }),
        TokenKind::AtParameter(name) => Some(VariableKind::Named {
            prefix: '@',
            name: name.clone(),
        }),
        TokenKind::DollarParameter(name) => Some(VariableKind::Named {
            prefix: '$',
            name: name.clone(),
        }),
        _ => None,
    }
}

impl Parser<'_> {
    /// Parses a full expression.
    pub(super) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_expression_bp(0)
    }

    /// Parses an expression using Pratt parsing.
    ///
    /// Operators whose left binding power is below `min_bp` end the
    /// expression and are left for the caller.
    pub(super) fn parse_expression_bp(&mut self, min_bp: u8) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_prefix()?;

        while let Some((l_bp, r_bp)) = infix_binding_power(self.stream.current_kind()) {
            if l_bp < min_bp {
                break;
            }
            // A NOT that does not begin NOT IN / NOT LIKE / ... belongs to
            // the enclosing construct, e.g. a column constraint.
            if self.check_keyword(Keyword::Not) && !self.not_starts_postfix() {
                break;
            }
            lhs = self.parse_infix(lhs, r_bp)?;
        }

        Ok(lhs)
    }

    fn not_starts_postfix(&self) -> bool {
        matches!(
            self.stream.peek(1).as_keyword(),
            Some(
                Keyword::In
                    | Keyword::Like
                    | Keyword::Glob
                    | Keyword::Match
                    | Keyword::Regexp
                    | Keyword::Between
                    | Keyword::Null
            )
        )
    }

    /// Parses the operator at the current position with `lhs` as its left
    /// operand.
    fn parse_infix(&mut self, lhs: Expr, r_bp: u8) -> Result<Expr, ParseError> {
        let start = lhs.span();
        match self.stream.current().as_keyword() {
            Some(Keyword::Collate) => {
                self.advance();
                let collation = self.expect_identifier()?;
                Ok(Expr::Collate {
                    expr: Box::new(lhs),
                    collation,
                    span: self.span_from(start),
                })
            }
            Some(Keyword::Isnull | Keyword::Notnull) => {
                let negated = self.check_keyword(Keyword::Notnull);
                self.advance();
                Ok(Expr::IsNull {
                    expr: Box::new(lhs),
                    negated,
                    span: self.span_from(start),
                })
            }
            Some(Keyword::Is) => {
                self.advance();
                let mut negated = self.eat_keyword(Keyword::Not);
                if self.eat_keyword(Keyword::Null) {
                    return Ok(Expr::IsNull {
                        expr: Box::new(lhs),
                        negated,
                        span: self.span_from(start),
                    });
                }
                // `IS DISTINCT FROM` is `IS NOT`, `IS NOT DISTINCT FROM` is `IS`.
                if self.check_keyword(Keyword::Distinct) {
                    self.require_feature(
                        self.dialect.supports_is_distinct_from(),
                        "IS DISTINCT FROM",
                        self.start(),
                    )?;
                    self.advance();
                    self.expect_keyword(Keyword::From)?;
                    negated = !negated;
                }
                let right = self.parse_expression_bp(r_bp)?;
                let span = start.merge(right.span());
                Ok(Expr::Binary {
                    left: Box::new(lhs),
                    op: if negated { BinaryOp::IsNot } else { BinaryOp::Is },
                    right: Box::new(right),
                    span,
                })
            }
            Some(Keyword::Not) => {
                self.advance();
                if self.eat_keyword(Keyword::Null) {
                    return Ok(Expr::IsNull {
                        expr: Box::new(lhs),
                        negated: true,
                        span: self.span_from(start),
                    });
                }
                self.parse_negatable(lhs, true, r_bp)
            }
            Some(
                Keyword::In
                | Keyword::Like
                | Keyword::Glob
                | Keyword::Match
                | Keyword::Regexp
                | Keyword::Between,
            ) => self.parse_negatable(lhs, false, r_bp),
            _ => {
                let Some(op) = token_to_binary_op(self.stream.current_kind()) else {
                    return Err(self.stream.error_at("operator"));
                };
                if matches!(op, BinaryOp::JsonExtract | BinaryOp::JsonExtractText) {
                    self.require_feature(
                        self.dialect.supports_json_arrows(),
                        "JSON operators",
                        self.start(),
                    )?;
                }
                self.advance();
                let right = self.parse_expression_bp(r_bp)?;
                let span = start.merge(right.span());
                Ok(Expr::Binary {
                    left: Box::new(lhs),
                    op,
                    right: Box::new(right),
                    span,
                })
            }
        }
    }

    /// Parses `IN`, `LIKE`-style and `BETWEEN` operators, after an optional
    /// `NOT` has been consumed.
    fn parse_negatable(&mut self, lhs: Expr, negated: bool, r_bp: u8) -> Result<Expr, ParseError> {
        let start = lhs.span();
        let like_op = match self.stream.current().as_keyword() {
            Some(Keyword::Between) => {
                self.advance();
                let low = self.parse_expression_bp(r_bp)?;
                self.expect_keyword(Keyword::And)?;
                let high = self.parse_expression_bp(r_bp)?;
                return Ok(Expr::Between {
                    expr: Box::new(lhs),
                    low: Box::new(low),
                    high: Box::new(high),
                    negated,
                    span: self.span_from(start),
                });
            }
            Some(Keyword::In) => {
                self.advance();
                let source = self.parse_in_source()?;
                return Ok(Expr::In {
                    expr: Box::new(lhs),
                    source,
                    negated,
                    span: self.span_from(start),
                });
            }
            Some(Keyword::Like) => LikeOp::Like,
            Some(Keyword::Glob) => LikeOp::Glob,
            Some(Keyword::Match) => LikeOp::Match,
            Some(Keyword::Regexp) => LikeOp::Regexp,
            _ => return Err(self.stream.error_at("IN, LIKE, GLOB, MATCH, REGEXP or BETWEEN")),
        };
        self.advance();
        let pattern = self.parse_expression_bp(r_bp)?;
        let escape = if self.eat_keyword(Keyword::Escape) {
            Some(Box::new(self.parse_expression_bp(r_bp)?))
        } else {
            None
        };
        Ok(Expr::Like {
            expr: Box::new(lhs),
            op: like_op,
            pattern: Box::new(pattern),
            escape,
            negated,
            span: self.span_from(start),
        })
    }

    fn parse_in_source(&mut self) -> Result<InSource, ParseError> {
        if self.eat(&TokenKind::LeftParen) {
            let source = if self.check(&TokenKind::RightParen) {
                InSource::List(Vec::new())
            } else if self.starts_select() {
                InSource::Subquery(Box::new(self.parse_select_statement()?))
            } else {
                InSource::List(self.parse_expression_list()?)
            };
            self.expect(&TokenKind::RightParen)?;
            return Ok(source);
        }
        if variable_kind(self.stream.current_kind()).is_some() {
            return Ok(InSource::Variable(Box::new(self.parse_primary()?)));
        }
        if self.check_identifier() {
            let start = self.start();
            let (schema, name) = self.parse_qualified_name()?;
            return Ok(InSource::Table {
                schema,
                name,
                span: self.span_from(start),
            });
        }
        Err(self.stream.error_at("'(' or table name"))
    }

    /// Parses a prefix expression.
    fn parse_prefix(&mut self) -> Result<Expr, ParseError> {
        if self.check_keyword(Keyword::Not) && self.stream.check_keyword_at(1, Keyword::Exists) {
            return self.parse_exists();
        }

        // Check for unary operators
        let kind = self.stream.current_kind();
        if let Some(op) = token_to_unary_op(kind) {
            let bp = prefix_binding_power(kind).unwrap_or(UNARY_BP);
            let start = self.advance().span;
            let operand = self.parse_expression_bp(bp)?;
            return Ok(Expr::Unary {
                op,
                operand: Box::new(operand),
                span: self.span_from(start),
            });
        }

        self.parse_primary()
    }

    /// Parses a primary expression.
    pub(super) fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.stream.current().clone();
        let span = token.span;

        let literal = match &token.kind {
            TokenKind::Integer(value) => Some(Literal::Integer(*value)),
            TokenKind::Float(value) => Some(Literal::Float(*value)),
            TokenKind::String(value) => Some(Literal::String(value.clone())),
            TokenKind::Blob(bytes) => Some(Literal::Blob(bytes.clone())),
            TokenKind::Keyword(Keyword::Null) => Some(Literal::Null),
            TokenKind::Keyword(Keyword::True) => Some(Literal::Boolean(true)),
            TokenKind::Keyword(Keyword::False) => Some(Literal::Boolean(false)),
            TokenKind::Keyword(Keyword::CurrentTime) => Some(Literal::CurrentTime),
            TokenKind::Keyword(Keyword::CurrentDate) => Some(Literal::CurrentDate),
            TokenKind::Keyword(Keyword::CurrentTimestamp) => Some(Literal::CurrentTimestamp),
            _ => None,
        };
        if let Some(value) = literal {
            self.advance();
            return Ok(Expr::Literal { value, span });
        }

        match &token.kind {
            TokenKind::DollarParameter(name) if self.dialect.drift_extensions() => {
                self.advance();
                Ok(Expr::Placeholder {
                    name: name.clone(),
                    span,
                })
            }
            TokenKind::LeftParen => self.parse_parenthesized(),
            TokenKind::Keyword(Keyword::Case) => self.parse_case_expression(),
            TokenKind::Keyword(Keyword::Cast) => self.parse_cast_expression(),
            TokenKind::Keyword(Keyword::Exists) => self.parse_exists(),
            TokenKind::Keyword(Keyword::Raise)
                if self.stream.peek(1).kind == TokenKind::LeftParen =>
            {
                self.parse_raise()
            }
            _ if self.at_function_call() => self.parse_function_call(),
            kind if kind.is_identifier_like() => self.parse_reference(),
            kind => match variable_kind(kind) {
                Some(kind) => {
                    self.advance();
                    Ok(Expr::Variable { kind, span })
                }
                None => Err(self.stream.error_at("expression")),
            },
        }
    }

    /// Returns true if the current token starts a query.
    pub(super) fn starts_select(&self) -> bool {
        matches!(
            self.stream.current().as_keyword(),
            Some(Keyword::Select | Keyword::With | Keyword::Values)
        )
    }

    fn at_function_call(&self) -> bool {
        let named = match self.stream.current_kind() {
            TokenKind::Identifier(_) => true,
            TokenKind::Keyword(kw) => kw.can_name_function(),
            _ => false,
        };
        named && self.stream.peek(1).kind == TokenKind::LeftParen
    }

    /// Parses `(select)`, `(a, b, ...)` or `(expr)`.
    fn parse_parenthesized(&mut self) -> Result<Expr, ParseError> {
        let start = self.expect(&TokenKind::LeftParen)?;
        if self.starts_select() {
            let query = self.parse_select_statement()?;
            self.expect(&TokenKind::RightParen)?;
            return Ok(Expr::Subquery {
                query: Box::new(query),
                span: self.span_from(start),
            });
        }

        let first = self.parse_expr()?;
        if self.eat(&TokenKind::Comma) {
            let mut items = vec![first];
            items.extend(self.parse_expression_list()?);
            self.expect(&TokenKind::RightParen)?;
            return Ok(Expr::Tuple {
                items,
                span: self.span_from(start),
            });
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(Expr::Parentheses {
            expr: Box::new(first),
            span: self.span_from(start),
        })
    }

    /// Parses `a`, `t.a` or `s.t.a`.
    fn parse_reference(&mut self) -> Result<Expr, ParseError> {
        let start = self.start();
        let first = self.expect_identifier()?;
        if !self.eat(&TokenKind::Dot) {
            return Ok(Expr::Reference {
                schema: None,
                table: None,
                column: first,
                span: self.span_from(start),
            });
        }
        let second = self.expect_identifier()?;
        if !self.eat(&TokenKind::Dot) {
            return Ok(Expr::Reference {
                schema: None,
                table: Some(first),
                column: second,
                span: self.span_from(start),
            });
        }
        let third = self.expect_identifier()?;
        Ok(Expr::Reference {
            schema: Some(first),
            table: Some(second),
            column: third,
            span: self.span_from(start),
        })
    }

    /// Parses a function call with its optional `FILTER` and `OVER` clauses.
    fn parse_function_call(&mut self) -> Result<Expr, ParseError> {
        let name_token = self.advance();
        let start = name_token.span;
        let name = match name_token.kind {
            TokenKind::Identifier(name) => name,
            _ => name_token.lexeme.to_string(),
        };
        self.expect(&TokenKind::LeftParen)?;

        let mut order_by = None;
        let parameters = if self.check(&TokenKind::RightParen) {
            FunctionParameters::None
        } else if self.eat(&TokenKind::Star) {
            FunctionParameters::Star
        } else {
            let distinct = self.eat_keyword(Keyword::Distinct);
            let args = self.parse_expression_list()?;
            if self.check_keyword(Keyword::Order) {
                order_by = Some(self.parse_order_by_clause()?);
            }
            FunctionParameters::List { distinct, args }
        };
        self.expect(&TokenKind::RightParen)?;

        let filter = if self.check_keyword(Keyword::Filter)
            && self.stream.peek(1).kind == TokenKind::LeftParen
        {
            self.require_feature(
                self.dialect.supports_window_functions(),
                "FILTER clauses",
                self.start(),
            )?;
            self.advance();
            self.expect(&TokenKind::LeftParen)?;
            self.expect_keyword(Keyword::Where)?;
            let filter = self.parse_expr()?;
            self.expect(&TokenKind::RightParen)?;
            Some(Box::new(filter))
        } else {
            None
        };

        let next = &self.stream.peek(1).kind;
        let has_over = self.check_keyword(Keyword::Over)
            && (*next == TokenKind::LeftParen || next.is_identifier_like());
        if has_over {
            self.require_feature(
                self.dialect.supports_window_functions(),
                "window functions",
                self.start(),
            )?;
            if let Some(order_by) = &order_by {
                return Err(ParseError::invalid(
                    "ORDER BY is not allowed in the arguments of a window function",
                    order_by.span,
                ));
            }
            self.advance();
            let over = if self.check(&TokenKind::LeftParen) {
                Over::Window(self.parse_window_definition()?)
            } else {
                let name_start = self.start();
                let name = self.expect_identifier()?;
                Over::Named {
                    name,
                    span: self.span_from(name_start),
                }
            };
            return Ok(Expr::WindowFunction {
                name,
                parameters,
                filter,
                over,
                span: self.span_from(start),
            });
        }

        if order_by.is_some() || filter.is_some() {
            return Ok(Expr::AggregateFunction {
                name,
                parameters,
                order_by,
                filter,
                span: self.span_from(start),
            });
        }

        Ok(Expr::Function {
            name,
            parameters,
            span: self.span_from(start),
        })
    }

    /// Parses a parenthesized window definition.
    pub(super) fn parse_window_definition(&mut self) -> Result<WindowDefinition, ParseError> {
        let start = self.expect(&TokenKind::LeftParen)?;

        let starts_clause = matches!(
            self.stream.current().as_keyword(),
            Some(Keyword::Partition | Keyword::Order | Keyword::Rows | Keyword::Range | Keyword::Groups)
        );
        let base_window_name = if self.check_identifier() && !starts_clause {
            Some(self.expect_identifier()?)
        } else {
            None
        };

        let partition_by = if self.eat_keyword(Keyword::Partition) {
            self.expect_keyword(Keyword::By)?;
            self.parse_expression_list()?
        } else {
            Vec::new()
        };

        let order_by = if self.check_keyword(Keyword::Order) {
            Some(self.parse_order_by_clause()?)
        } else {
            None
        };

        let frame = if matches!(
            self.stream.current().as_keyword(),
            Some(Keyword::Rows | Keyword::Range | Keyword::Groups)
        ) {
            Some(self.parse_frame_spec()?)
        } else {
            None
        };

        self.expect(&TokenKind::RightParen)?;
        Ok(WindowDefinition {
            base_window_name,
            partition_by,
            order_by,
            frame,
            span: self.span_from(start),
        })
    }

    fn parse_frame_spec(&mut self) -> Result<FrameSpec, ParseError> {
        let start = self.start();
        let frame_type = match self.stream.current().as_keyword() {
            Some(Keyword::Rows) => FrameType::Rows,
            Some(Keyword::Range) => FrameType::Range,
            Some(Keyword::Groups) => FrameType::Groups,
            _ => return Err(self.stream.error_at("ROWS, RANGE or GROUPS")),
        };
        self.advance();

        let (frame_start, frame_end) = if self.eat_keyword(Keyword::Between) {
            let start_span = self.start();
            let frame_start = self.parse_frame_boundary()?;
            if matches!(frame_start, FrameBoundary::UnboundedFollowing) {
                return Err(ParseError::invalid(
                    "a window frame cannot start with UNBOUNDED FOLLOWING",
                    self.span_from(start_span),
                ));
            }
            self.expect_keyword(Keyword::And)?;
            let end_span = self.start();
            let frame_end = self.parse_frame_boundary()?;
            let message = match (&frame_start, &frame_end) {
                (_, FrameBoundary::UnboundedPreceding) => {
                    Some("a window frame cannot end with UNBOUNDED PRECEDING")
                }
                (FrameBoundary::CurrentRow, FrameBoundary::Preceding(_)) => {
                    Some("a window frame starting at CURRENT ROW cannot end with PRECEDING")
                }
                (
                    FrameBoundary::Following(_),
                    FrameBoundary::Preceding(_) | FrameBoundary::CurrentRow,
                ) => Some("a window frame starting with FOLLOWING must end with FOLLOWING"),
                _ => None,
            };
            if let Some(message) = message {
                return Err(ParseError::invalid(message, self.span_from(end_span)));
            }
            (frame_start, frame_end)
        } else {
            let bound_span = self.start();
            let frame_start = self.parse_frame_boundary()?;
            if matches!(
                frame_start,
                FrameBoundary::Following(_) | FrameBoundary::UnboundedFollowing
            ) {
                return Err(ParseError::invalid(
                    "a window frame without BETWEEN cannot start with FOLLOWING",
                    self.span_from(bound_span),
                ));
            }
            (frame_start, FrameBoundary::CurrentRow)
        };

        let exclude = if self.eat_keyword(Keyword::Exclude) {
            if self.eat_keyword(Keyword::No) {
                self.expect_keyword(Keyword::Others)?;
                ExcludeMode::NoOthers
            } else if self.eat_keyword(Keyword::Current) {
                self.expect_keyword(Keyword::Row)?;
                ExcludeMode::CurrentRow
            } else if self.eat_keyword(Keyword::Group) {
                ExcludeMode::Group
            } else if self.eat_keyword(Keyword::Ties) {
                ExcludeMode::Ties
            } else {
                return Err(self.stream.error_at("NO OTHERS, CURRENT ROW, GROUP or TIES"));
            }
        } else {
            ExcludeMode::NoOthers
        };

        Ok(FrameSpec {
            frame_type,
            start: frame_start,
            end: frame_end,
            exclude,
            span: self.span_from(start),
        })
    }

    fn parse_frame_boundary(&mut self) -> Result<FrameBoundary, ParseError> {
        if self.check_keyword(Keyword::Unbounded)
            && matches!(
                self.stream.peek(1).as_keyword(),
                Some(Keyword::Preceding | Keyword::Following)
            )
        {
            self.advance();
            return Ok(if self.eat_keyword(Keyword::Preceding) {
                FrameBoundary::UnboundedPreceding
            } else {
                self.advance();
                FrameBoundary::UnboundedFollowing
            });
        }
        if self.check_keyword(Keyword::Current) && self.stream.check_keyword_at(1, Keyword::Row) {
            self.advance();
            self.advance();
            return Ok(FrameBoundary::CurrentRow);
        }

        let offset = Box::new(self.parse_expr()?);
        if self.eat_keyword(Keyword::Preceding) {
            Ok(FrameBoundary::Preceding(offset))
        } else if self.eat_keyword(Keyword::Following) {
            Ok(FrameBoundary::Following(offset))
        } else {
            Err(self.stream.error_at("PRECEDING or FOLLOWING"))
        }
    }

    /// Parses `ORDER BY term, ...`.
    pub(super) fn parse_order_by_clause(&mut self) -> Result<OrderByClause, ParseError> {
        let start = self.expect_keyword(Keyword::Order)?;
        self.expect_keyword(Keyword::By)?;
        let mut items = vec![self.parse_ordering_item()?];
        while self.eat(&TokenKind::Comma) {
            items.push(self.parse_ordering_item()?);
        }
        Ok(OrderByClause {
            items,
            span: self.span_from(start),
        })
    }

    fn parse_ordering_item(&mut self) -> Result<OrderingItem, ParseError> {
        if self.dialect.drift_extensions() {
            if let Some(placeholder) = self.speculate(|p| {
                let (name, span) = p.parse_standalone_placeholder(false)?;
                Ok(OrderingItem::Placeholder { name, span })
            }) {
                return Ok(placeholder);
            }
        }
        Ok(OrderingItem::Term(self.parse_ordering_term()?))
    }

    /// Parses a drift `$name` that stands alone as a whole clause item.
    ///
    /// Fails without consuming anything meaningful when an operator or a
    /// modifier follows; callers speculate and fall back to a full
    /// expression. Inside `LIMIT`, `OFFSET` and `,` also extend the clause.
    pub(super) fn parse_standalone_placeholder(
        &mut self,
        in_limit: bool,
    ) -> Result<(String, Span), ParseError> {
        let token = self.advance();
        let TokenKind::DollarParameter(name) = token.kind else {
            return Err(ParseError::unexpected("placeholder", &token));
        };
        let modifier = if in_limit {
            self.check_keyword(Keyword::Offset) || self.check(&TokenKind::Comma)
        } else {
            matches!(
                self.stream.current().as_keyword(),
                Some(Keyword::Asc | Keyword::Desc | Keyword::Nulls)
            )
        };
        if modifier || infix_binding_power(self.stream.current_kind()).is_some() {
            return Err(self.stream.error_at("end of placeholder"));
        }
        Ok((name, token.span))
    }

    pub(super) fn parse_optional_direction(&mut self) -> Option<OrderDirection> {
        if self.eat_keyword(Keyword::Asc) {
            Some(OrderDirection::Asc)
        } else if self.eat_keyword(Keyword::Desc) {
            Some(OrderDirection::Desc)
        } else {
            None
        }
    }

    /// Parses `expr [ASC|DESC] [NULLS FIRST|LAST]`.
    pub(super) fn parse_ordering_term(&mut self) -> Result<OrderingTerm, ParseError> {
        let expr = self.parse_expr()?;
        let start = expr.span();
        let direction = self.parse_optional_direction();
        let nulls = if self.check_keyword(Keyword::Nulls) {
            self.require_feature(
                self.dialect.supports_nulls_ordering(),
                "NULLS FIRST and NULLS LAST",
                self.start(),
            )?;
            self.advance();
            if self.eat_keyword(Keyword::First) {
                Some(NullOrdering::First)
            } else if self.eat_keyword(Keyword::Last) {
                Some(NullOrdering::Last)
            } else {
                return Err(self.stream.error_at("FIRST or LAST"));
            }
        } else {
            None
        };
        Ok(OrderingTerm {
            expr,
            direction,
            nulls,
            span: self.span_from(start),
        })
    }

    /// Parses a CASE expression.
    fn parse_case_expression(&mut self) -> Result<Expr, ParseError> {
        let start = self.expect_keyword(Keyword::Case)?;

        let operand = if self.check_keyword(Keyword::When) {
            None
        } else {
            Some(Box::new(self.parse_expr()?))
        };

        let mut whens = Vec::new();
        while self.check_keyword(Keyword::When) {
            let when_start = self.advance().span;
            let when = self.parse_expr()?;
            self.expect_keyword(Keyword::Then)?;
            let then = self.parse_expr()?;
            whens.push(WhenClause {
                when,
                then,
                span: self.span_from(when_start),
            });
        }
        if whens.is_empty() {
            return Err(self.stream.error_at("WHEN"));
        }

        let else_clause = if self.eat_keyword(Keyword::Else) {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };

        self.expect_keyword(Keyword::End)?;
        Ok(Expr::Case {
            operand,
            whens,
            else_clause,
            span: self.span_from(start),
        })
    }

    /// Parses a CAST expression.
    fn parse_cast_expression(&mut self) -> Result<Expr, ParseError> {
        let start = self.expect_keyword(Keyword::Cast)?;
        self.expect(&TokenKind::LeftParen)?;
        let expr = self.parse_expr()?;
        self.expect_keyword(Keyword::As)?;
        let type_name = self.parse_type_name()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(Expr::Cast {
            expr: Box::new(expr),
            type_name,
            span: self.span_from(start),
        })
    }

    /// Parses `[NOT] EXISTS (select)`.
    fn parse_exists(&mut self) -> Result<Expr, ParseError> {
        let start = self.start();
        let negated = self.eat_keyword(Keyword::Not);
        self.expect_keyword(Keyword::Exists)?;
        self.expect(&TokenKind::LeftParen)?;
        let query = self.parse_select_statement()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(Expr::Exists {
            query: Box::new(query),
            negated,
            span: self.span_from(start),
        })
    }

    /// Parses `RAISE(IGNORE)` or `RAISE(action, message)`.
    fn parse_raise(&mut self) -> Result<Expr, ParseError> {
        let start = self.expect_keyword(Keyword::Raise)?;
        self.expect(&TokenKind::LeftParen)?;
        let action = match self.stream.current().as_keyword() {
            Some(Keyword::Ignore) => RaiseAction::Ignore,
            Some(Keyword::Rollback) => RaiseAction::Rollback,
            Some(Keyword::Abort) => RaiseAction::Abort,
            Some(Keyword::Fail) => RaiseAction::Fail,
            _ => return Err(self.stream.error_at("IGNORE, ROLLBACK, ABORT or FAIL")),
        };
        self.advance();
        let message = if action == RaiseAction::Ignore {
            None
        } else {
            self.expect(&TokenKind::Comma)?;
            Some(Box::new(self.parse_expr()?))
        };
        self.expect(&TokenKind::RightParen)?;
        Ok(Expr::Raise {
            action,
            message,
            span: self.span_from(start),
        })
    }
}

//! CREATE statement parsing.

use super::error::ParseError;
use super::parser::Parser;
use super::pratt::COLLATE_BP;
use crate::ast::{
    ColumnConstraint, ColumnConstraintKind, ColumnDefinition, ConflictResolution,
    CreateIndexStatement, CreateTableStatement, CreateTriggerStatement, CreateViewStatement,
    CreateVirtualTableStatement, Deferrable, Expr, ForeignKeyClause, Fts5Column, GeneratedStorage,
    ReferentialAction, ReferentialEvent, RowClassAnnotation, Statement, TableConstraint,
    TableConstraintKind, TriggerEvent, TriggerTiming, TypeName, VirtualTableModule,
};
use crate::lexer::{Keyword, Span, TokenKind};

impl Parser<'_> {
    /// Parses a CREATE statement.
    pub(super) fn parse_create_statement(&mut self) -> Result<Statement, ParseError> {
        let start = self.expect_keyword(Keyword::Create)?;
        let temp_span = self.start();
        let temporary = self.eat_keyword(Keyword::Temp) || self.eat_keyword(Keyword::Temporary);

        match self.stream.current().as_keyword() {
            Some(Keyword::Table) => Ok(Statement::CreateTable(
                self.parse_create_table(start, temporary)?,
            )),
            Some(Keyword::View) => Ok(Statement::CreateView(
                self.parse_create_view(start, temporary)?,
            )),
            Some(Keyword::Trigger) => Ok(Statement::CreateTrigger(
                self.parse_create_trigger(start, temporary)?,
            )),
            Some(Keyword::Virtual) if temporary => Err(ParseError::invalid(
                "virtual tables cannot be temporary",
                temp_span,
            )),
            Some(Keyword::Virtual) => Ok(Statement::CreateVirtualTable(
                self.parse_create_virtual_table(start)?,
            )),
            Some(Keyword::Unique | Keyword::Index) if temporary => Err(ParseError::invalid(
                "indexes cannot be temporary",
                temp_span,
            )),
            Some(Keyword::Unique | Keyword::Index) => Ok(Statement::CreateIndex(
                self.parse_create_index(start)?,
            )),
            _ => Err(self
                .stream
                .error_at("TABLE, VIRTUAL TABLE, VIEW, TRIGGER or INDEX")),
        }
    }

    fn parse_if_not_exists(&mut self) -> Result<bool, ParseError> {
        if self.eat_keyword(Keyword::If) {
            self.expect_keyword(Keyword::Not)?;
            self.expect_keyword(Keyword::Exists)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn parse_create_table(
        &mut self,
        start: Span,
        temporary: bool,
    ) -> Result<CreateTableStatement, ParseError> {
        self.expect_keyword(Keyword::Table)?;
        let if_not_exists = self.parse_if_not_exists()?;
        let (schema, name) = self.parse_qualified_name()?;

        if self.eat_keyword(Keyword::As) {
            let query = self.parse_select_statement()?;
            return Ok(CreateTableStatement {
                temporary,
                if_not_exists,
                schema,
                name,
                columns: Vec::new(),
                constraints: Vec::new(),
                without_rowid: false,
                strict: false,
                as_select: Some(Box::new(query)),
                row_class: None,
                span: self.span_from(start),
            });
        }

        self.expect(&TokenKind::LeftParen)?;
        let mut columns = Vec::new();
        let mut constraints = Vec::new();
        loop {
            if self.at_table_constraint() {
                constraints.push(self.parse_table_constraint()?);
            } else if constraints.is_empty() {
                columns.push(self.parse_column_definition()?);
            } else {
                return Err(self.stream.error_at("table constraint"));
            }
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RightParen)?;
        if columns.is_empty() {
            return Err(self.stream.error_at("column definition"));
        }

        let mut without_rowid = false;
        let mut strict = false;
        if self.check_keyword(Keyword::Without) || self.check_keyword(Keyword::Strict) {
            loop {
                if self.eat_keyword(Keyword::Without) {
                    let rowid = matches!(
                        self.stream.current_kind(),
                        TokenKind::Identifier(word) if word.eq_ignore_ascii_case("rowid")
                    );
                    if !rowid {
                        return Err(self.stream.error_at("ROWID"));
                    }
                    self.advance();
                    without_rowid = true;
                } else if self.check_keyword(Keyword::Strict) {
                    let span = self.start();
                    self.require_feature(
                        self.dialect.supports_strict_tables(),
                        "STRICT tables",
                        span,
                    )?;
                    self.advance();
                    strict = true;
                } else {
                    return Err(self.stream.error_at("WITHOUT ROWID or STRICT"));
                }
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }

        let row_class = if self.check_keyword(Keyword::As) || self.check_keyword(Keyword::With) {
            Some(self.parse_row_class()?)
        } else {
            None
        };

        Ok(CreateTableStatement {
            temporary,
            if_not_exists,
            schema,
            name,
            columns,
            constraints,
            without_rowid,
            strict,
            as_select: None,
            row_class,
            span: self.span_from(start),
        })
    }

    /// Parses `AS ClassName` or `WITH ClassName`.
    fn parse_row_class(&mut self) -> Result<RowClassAnnotation, ParseError> {
        let start = self.start();
        self.require_drift("row class annotations", start)?;
        let existing = self.check_keyword(Keyword::With);
        self.advance();
        let name = self.expect_identifier()?;
        Ok(RowClassAnnotation {
            name,
            existing,
            span: self.span_from(start),
        })
    }

    fn parse_column_definition(&mut self) -> Result<ColumnDefinition, ParseError> {
        let start = self.start();
        let name = self.expect_identifier()?;
        let type_name = if self.at_type_word() {
            Some(self.parse_type_name()?)
        } else {
            None
        };

        let mut constraints = Vec::new();
        while let Some(constraint) = self.parse_column_constraint()? {
            constraints.push(constraint);
        }

        Ok(ColumnDefinition {
            name,
            type_name,
            constraints,
            span: self.span_from(start),
        })
    }

    /// Parses a type name such as `INTEGER`, `VARCHAR(255)` or
    /// `UNSIGNED BIG INT`.
    ///
    /// Arguments are kept as their source text.
    pub(super) fn parse_type_name(&mut self) -> Result<TypeName, ParseError> {
        let start = self.start();
        let mut words = Vec::new();
        while self.at_type_word() {
            words.push(self.advance().lexeme);
        }
        if words.is_empty() {
            return Err(self.stream.error_at("type name"));
        }

        let arguments = if self.check(&TokenKind::LeftParen) {
            self.parse_raw_arguments()?
        } else {
            Vec::new()
        };

        Ok(TypeName {
            name: words.join(" "),
            arguments,
            span: self.span_from(start),
        })
    }

    /// Returns true if the current token continues a type name.
    ///
    /// Fallback keywords that open a column constraint end the type.
    fn at_type_word(&self) -> bool {
        let next_is = |keyword| self.stream.check_keyword_at(1, keyword);
        match self.stream.current().as_keyword() {
            Some(Keyword::Generated) => !next_is(Keyword::Always),
            Some(Keyword::Mapped) => !next_is(Keyword::By),
            Some(Keyword::Json) => !next_is(Keyword::Key),
            _ => self.check_identifier(),
        }
    }

    /// Reads a parenthesized argument list, splitting the source text on
    /// top-level commas.
    fn parse_raw_arguments(&mut self) -> Result<Vec<String>, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let mut arguments = Vec::new();
        let mut depth = 0usize;
        let mut argument_start = self.start().start;

        loop {
            match self.stream.current_kind() {
                TokenKind::Eof | TokenKind::Error(_) => return Err(self.stream.error_at("')'")),
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen if depth > 0 => depth -= 1,
                TokenKind::Comma if depth > 0 => {}
                TokenKind::RightParen | TokenKind::Comma => {
                    let end = self.stream.previous().span.end.max(argument_start);
                    let text = self.stream.slice(argument_start, end).trim();
                    if !text.is_empty() {
                        arguments.push(text.to_string());
                    }
                    if self.advance().kind == TokenKind::RightParen {
                        return Ok(arguments);
                    }
                    argument_start = self.start().start;
                    continue;
                }
                _ => {}
            }
            self.advance();
        }
    }

    /// Parses one column constraint, or returns `None` when the column
    /// definition ends.
    fn parse_column_constraint(&mut self) -> Result<Option<ColumnConstraint>, ParseError> {
        let start = self.start();
        let name = if self.eat_keyword(Keyword::Constraint) {
            Some(self.expect_identifier()?)
        } else {
            None
        };

        let next_is = |parser: &Self, keyword| parser.stream.check_keyword_at(1, keyword);
        let kind = match self.stream.current().as_keyword() {
            Some(Keyword::Primary) => {
                self.advance();
                self.expect_keyword(Keyword::Key)?;
                let direction = self.parse_optional_direction();
                let on_conflict = self.parse_optional_on_conflict()?;
                let autoincrement = self.eat_keyword(Keyword::Autoincrement);
                ColumnConstraintKind::PrimaryKey {
                    direction,
                    on_conflict,
                    autoincrement,
                }
            }
            Some(Keyword::Not) => {
                self.advance();
                self.expect_keyword(Keyword::Null)?;
                ColumnConstraintKind::NotNull {
                    on_conflict: self.parse_optional_on_conflict()?,
                }
            }
            Some(Keyword::Null) => {
                self.advance();
                ColumnConstraintKind::Null
            }
            Some(Keyword::Unique) => {
                self.advance();
                ColumnConstraintKind::Unique {
                    on_conflict: self.parse_optional_on_conflict()?,
                }
            }
            Some(Keyword::Check) => {
                self.advance();
                ColumnConstraintKind::Check(self.parse_parenthesized_expr()?)
            }
            Some(Keyword::Default) => {
                self.advance();
                ColumnConstraintKind::Default(self.parse_expression_bp(COLLATE_BP + 1)?)
            }
            Some(Keyword::Collate) => {
                self.advance();
                ColumnConstraintKind::Collate(self.expect_identifier()?)
            }
            Some(Keyword::References) => {
                ColumnConstraintKind::ForeignKey(self.parse_foreign_key_clause()?)
            }
            Some(Keyword::Generated) if next_is(self, Keyword::Always) => {
                self.advance();
                self.advance();
                self.expect_keyword(Keyword::As)?;
                self.parse_generated_column(start, true)?
            }
            Some(Keyword::As) if self.stream.peek(1).kind == TokenKind::LeftParen => {
                self.advance();
                self.parse_generated_column(start, false)?
            }
            Some(Keyword::As) => {
                self.require_drift("Dart column names", self.start())?;
                self.advance();
                ColumnConstraintKind::DartName(self.expect_identifier()?)
            }
            Some(Keyword::Mapped) if next_is(self, Keyword::By) => {
                self.require_drift("MAPPED BY", self.start())?;
                self.advance();
                self.advance();
                ColumnConstraintKind::MappedBy(self.expect_inline_dart()?)
            }
            Some(Keyword::Json) if next_is(self, Keyword::Key) => {
                self.require_drift("JSON KEY", self.start())?;
                self.advance();
                self.advance();
                ColumnConstraintKind::JsonKey(self.expect_identifier()?)
            }
            _ if name.is_some() => return Err(self.stream.error_at("column constraint")),
            _ => return Ok(None),
        };

        Ok(Some(ColumnConstraint {
            name,
            kind,
            span: self.span_from(start),
        }))
    }

    /// Parses `(expr) [STORED|VIRTUAL]` after `[GENERATED ALWAYS] AS`.
    fn parse_generated_column(
        &mut self,
        start: Span,
        always: bool,
    ) -> Result<ColumnConstraintKind, ParseError> {
        self.require_feature(
            self.dialect.supports_generated_columns(),
            "generated columns",
            start,
        )?;
        let expr = self.parse_parenthesized_expr()?;
        let storage = if self.eat_keyword(Keyword::Stored) {
            Some(GeneratedStorage::Stored)
        } else if self.eat_keyword(Keyword::Virtual) {
            Some(GeneratedStorage::Virtual)
        } else {
            None
        };
        Ok(ColumnConstraintKind::Generated {
            expr,
            storage,
            always,
        })
    }

    fn parse_parenthesized_expr(&mut self) -> Result<Expr, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let expr = self.parse_expr()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(expr)
    }

    fn parse_optional_on_conflict(&mut self) -> Result<Option<ConflictResolution>, ParseError> {
        if self.check_keyword(Keyword::On) && self.stream.check_keyword_at(1, Keyword::Conflict) {
            self.advance();
            self.advance();
            Ok(Some(self.parse_conflict_resolution()?))
        } else {
            Ok(None)
        }
    }

    /// Parses `REFERENCES table [(cols)] [ON DELETE|UPDATE action]* [deferrable]`.
    fn parse_foreign_key_clause(&mut self) -> Result<ForeignKeyClause, ParseError> {
        let start = self.expect_keyword(Keyword::References)?;
        let table = self.expect_identifier()?;
        let columns = if self.check(&TokenKind::LeftParen) {
            self.parse_parenthesized_identifiers()?
        } else {
            Vec::new()
        };

        let mut actions = Vec::new();
        while self.check_keyword(Keyword::On)
            && !self.stream.check_keyword_at(1, Keyword::Conflict)
        {
            self.advance();
            let event = if self.eat_keyword(Keyword::Delete) {
                ReferentialEvent::Delete
            } else {
                self.expect_keyword(Keyword::Update)?;
                ReferentialEvent::Update
            };
            actions.push((event, self.parse_referential_action()?));
        }

        let deferrable = if self.check_keyword(Keyword::Deferrable)
            || (self.check_keyword(Keyword::Not)
                && self.stream.check_keyword_at(1, Keyword::Deferrable))
        {
            let negated = self.eat_keyword(Keyword::Not);
            self.expect_keyword(Keyword::Deferrable)?;
            let initially_deferred = if self.eat_keyword(Keyword::Initially) {
                if self.eat_keyword(Keyword::Deferred) {
                    Some(true)
                } else {
                    self.expect_keyword(Keyword::Immediate)?;
                    Some(false)
                }
            } else {
                None
            };
            Some(Deferrable {
                negated,
                initially_deferred,
            })
        } else {
            None
        };

        Ok(ForeignKeyClause {
            table,
            columns,
            actions,
            deferrable,
            span: self.span_from(start),
        })
    }

    fn parse_referential_action(&mut self) -> Result<ReferentialAction, ParseError> {
        let action = match self.stream.current().as_keyword() {
            Some(Keyword::Set) => {
                self.advance();
                if self.eat_keyword(Keyword::Null) {
                    ReferentialAction::SetNull
                } else {
                    self.expect_keyword(Keyword::Default)?;
                    ReferentialAction::SetDefault
                }
            }
            Some(Keyword::Cascade) => {
                self.advance();
                ReferentialAction::Cascade
            }
            Some(Keyword::Restrict) => {
                self.advance();
                ReferentialAction::Restrict
            }
            Some(Keyword::No) => {
                self.advance();
                self.expect_keyword(Keyword::Action)?;
                ReferentialAction::NoAction
            }
            _ => {
                return Err(self
                    .stream
                    .error_at("SET NULL, SET DEFAULT, CASCADE, RESTRICT or NO ACTION"))
            }
        };
        Ok(action)
    }

    fn at_table_constraint(&self) -> bool {
        matches!(
            self.stream.current().as_keyword(),
            Some(
                Keyword::Constraint
                    | Keyword::Primary
                    | Keyword::Unique
                    | Keyword::Check
                    | Keyword::Foreign
            )
        )
    }

    fn parse_table_constraint(&mut self) -> Result<TableConstraint, ParseError> {
        let start = self.start();
        let name = if self.eat_keyword(Keyword::Constraint) {
            Some(self.expect_identifier()?)
        } else {
            None
        };

        let kind = match self.stream.current().as_keyword() {
            Some(Keyword::Primary) => {
                self.advance();
                self.expect_keyword(Keyword::Key)?;
                self.expect(&TokenKind::LeftParen)?;
                let columns = self.parse_indexed_columns()?;
                self.expect(&TokenKind::RightParen)?;
                TableConstraintKind::PrimaryKey {
                    columns,
                    on_conflict: self.parse_optional_on_conflict()?,
                }
            }
            Some(Keyword::Unique) => {
                self.advance();
                self.expect(&TokenKind::LeftParen)?;
                let columns = self.parse_indexed_columns()?;
                self.expect(&TokenKind::RightParen)?;
                TableConstraintKind::Unique {
                    columns,
                    on_conflict: self.parse_optional_on_conflict()?,
                }
            }
            Some(Keyword::Check) => {
                self.advance();
                TableConstraintKind::Check(self.parse_parenthesized_expr()?)
            }
            Some(Keyword::Foreign) => {
                self.advance();
                self.expect_keyword(Keyword::Key)?;
                let columns = self.parse_parenthesized_identifiers()?;
                let clause = self.parse_foreign_key_clause()?;
                TableConstraintKind::ForeignKey { columns, clause }
            }
            _ => return Err(self.stream.error_at("table constraint")),
        };

        Ok(TableConstraint {
            name,
            kind,
            span: self.span_from(start),
        })
    }

    fn parse_create_virtual_table(
        &mut self,
        start: Span,
    ) -> Result<CreateVirtualTableStatement, ParseError> {
        self.expect_keyword(Keyword::Virtual)?;
        self.expect_keyword(Keyword::Table)?;
        let if_not_exists = self.parse_if_not_exists()?;
        let (schema, name) = self.parse_qualified_name()?;
        self.expect_keyword(Keyword::Using)?;
        let module = self.expect_identifier()?;
        let arguments = if self.check(&TokenKind::LeftParen) {
            self.parse_raw_arguments()?
        } else {
            Vec::new()
        };
        let recognized = recognize_module(&module, &arguments);
        tracing::trace!(module = %module, arguments = arguments.len(), "parsed virtual table");

        Ok(CreateVirtualTableStatement {
            if_not_exists,
            schema,
            name,
            module,
            arguments,
            recognized,
            span: self.span_from(start),
        })
    }

    fn parse_create_view(
        &mut self,
        start: Span,
        temporary: bool,
    ) -> Result<CreateViewStatement, ParseError> {
        self.expect_keyword(Keyword::View)?;
        let if_not_exists = self.parse_if_not_exists()?;
        let (schema, name) = self.parse_qualified_name()?;
        let columns = if self.check(&TokenKind::LeftParen) {
            self.parse_parenthesized_identifiers()?
        } else {
            Vec::new()
        };

        let generated_class = self.check_keyword(Keyword::As)
            && self.stream.peek(1).kind.is_identifier_like()
            && self.stream.check_keyword_at(2, Keyword::As);
        let row_class = if self.check_keyword(Keyword::With) || generated_class {
            Some(self.parse_row_class()?)
        } else {
            None
        };

        self.expect_keyword(Keyword::As)?;
        let query = self.parse_select_statement()?;

        Ok(CreateViewStatement {
            temporary,
            if_not_exists,
            schema,
            name,
            columns,
            row_class,
            query: Box::new(query),
            span: self.span_from(start),
        })
    }

    fn parse_create_trigger(
        &mut self,
        start: Span,
        temporary: bool,
    ) -> Result<CreateTriggerStatement, ParseError> {
        self.expect_keyword(Keyword::Trigger)?;
        let if_not_exists = self.parse_if_not_exists()?;
        let (schema, name) = self.parse_qualified_name()?;

        let timing = if self.eat_keyword(Keyword::Before) {
            Some(TriggerTiming::Before)
        } else if self.eat_keyword(Keyword::After) {
            Some(TriggerTiming::After)
        } else if self.eat_keyword(Keyword::Instead) {
            self.expect_keyword(Keyword::Of)?;
            Some(TriggerTiming::InsteadOf)
        } else {
            None
        };

        let event = match self.stream.current().as_keyword() {
            Some(Keyword::Delete) => {
                self.advance();
                TriggerEvent::Delete
            }
            Some(Keyword::Insert) => {
                self.advance();
                TriggerEvent::Insert
            }
            Some(Keyword::Update) => {
                self.advance();
                let columns = if self.eat_keyword(Keyword::Of) {
                    self.parse_identifier_list()?
                } else {
                    Vec::new()
                };
                TriggerEvent::Update { columns }
            }
            _ => return Err(self.stream.error_at("DELETE, INSERT or UPDATE")),
        };

        self.expect_keyword(Keyword::On)?;
        let table = self.expect_identifier()?;

        let for_each_row = if self.eat_keyword(Keyword::For) {
            self.expect_keyword(Keyword::Each)?;
            self.expect_keyword(Keyword::Row)?;
            true
        } else {
            false
        };

        let when = if self.eat_keyword(Keyword::When) {
            Some(self.parse_expr()?)
        } else {
            None
        };

        self.expect_keyword(Keyword::Begin)?;
        let mut body = Vec::new();
        loop {
            body.push(self.parse_trigger_body_statement()?);
            self.expect(&TokenKind::Semicolon)?;
            if self.eat_keyword(Keyword::End) {
                break;
            }
        }

        Ok(CreateTriggerStatement {
            temporary,
            if_not_exists,
            schema,
            name,
            timing,
            event,
            table,
            for_each_row,
            when,
            body,
            span: self.span_from(start),
        })
    }

    fn parse_trigger_body_statement(&mut self) -> Result<Statement, ParseError> {
        match self.stream.current().as_keyword() {
            Some(
                Keyword::Select
                | Keyword::Values
                | Keyword::With
                | Keyword::Insert
                | Keyword::Replace
                | Keyword::Update
                | Keyword::Delete,
            ) => self.parse_statement_body(),
            _ => Err(self.stream.error_at("SELECT, INSERT, UPDATE or DELETE")),
        }
    }

    fn parse_create_index(&mut self, start: Span) -> Result<CreateIndexStatement, ParseError> {
        let unique = self.eat_keyword(Keyword::Unique);
        self.expect_keyword(Keyword::Index)?;
        let if_not_exists = self.parse_if_not_exists()?;
        let (schema, name) = self.parse_qualified_name()?;
        self.expect_keyword(Keyword::On)?;
        let table = self.expect_identifier()?;
        self.expect(&TokenKind::LeftParen)?;
        let columns = self.parse_indexed_columns()?;
        self.expect(&TokenKind::RightParen)?;
        let where_clause = if self.eat_keyword(Keyword::Where) {
            Some(self.parse_expr()?)
        } else {
            None
        };

        Ok(CreateIndexStatement {
            unique,
            if_not_exists,
            schema,
            name,
            table,
            columns,
            where_clause,
            span: self.span_from(start),
        })
    }
}

/// Reads the arguments of the fts5 and rtree modules.
fn recognize_module(module: &str, arguments: &[String]) -> VirtualTableModule {
    if module.eq_ignore_ascii_case("fts5") {
        let mut columns = Vec::new();
        let mut options = Vec::new();
        for argument in arguments {
            if let Some((key, value)) = argument.split_once('=') {
                options.push((key.trim().to_string(), unquote(value.trim())));
            } else {
                let mut words = argument.split_whitespace();
                let name = words.next().map(unquote).unwrap_or_default();
                let unindexed = words.any(|w| w.eq_ignore_ascii_case("unindexed"));
                columns.push(Fts5Column { name, unindexed });
            }
        }
        return VirtualTableModule::Fts5 { columns, options };
    }

    let integer = module.eq_ignore_ascii_case("rtree_i32");
    if integer || module.eq_ignore_ascii_case("rtree") {
        if let Some((id, rest)) = arguments.split_first() {
            let (auxiliary, coordinates): (Vec<&String>, Vec<&String>) =
                rest.iter().partition(|a| a.starts_with('+'));
            return VirtualTableModule::Rtree {
                integer,
                id: unquote(id),
                coordinates: coordinates.into_iter().map(|c| unquote(c)).collect(),
                auxiliary: auxiliary
                    .into_iter()
                    .map(|a| unquote(a.trim_start_matches('+').trim()))
                    .collect(),
            };
        }
    }

    VirtualTableModule::Unknown
}

/// Strips SQL quoting from a module argument.
fn unquote(text: &str) -> String {
    let quoted = |open: char, close: char| {
        text.len() >= 2 && text.starts_with(open) && text.ends_with(close)
    };
    if quoted('\'', '\'') {
        text[1..text.len() - 1].replace("''", "'")
    } else if quoted('"', '"') {
        text[1..text.len() - 1].replace("\"\"", "\"")
    } else if quoted('[', ']') || quoted('`', '`') {
        text[1..text.len() - 1].to_string()
    } else {
        text.to_string()
    }
}

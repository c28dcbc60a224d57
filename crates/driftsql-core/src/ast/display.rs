//! Canonical SQL rendering of AST nodes.
//!
//! Rendering never adds parentheses: a parsed tree keeps its source
//! parentheses as [`Expr::Parentheses`] nodes, so the output reparses to
//! the same structure.

use core::fmt::{self, Display, Formatter};

use super::{
    Assignment, ColumnConstraint, ColumnConstraintKind, ColumnDefinition, CommonTableExpression,
    CompoundPart, ConflictTarget, CreateIndexStatement, CreateTableStatement,
    CreateTriggerStatement, CreateViewStatement, CreateVirtualTableStatement, DeclaredStatement,
    Deferrable, DeleteStatement, DriftFile, DriftStatement, Expr, ForeignKeyClause, FrameBoundary,
    FrameSpec, FunctionParameters, GeneratedStorage, ImportStatement, InSource, IndexedColumn,
    InsertMode, InsertSource, InsertStatement, JoinClause, JoinConstraint, JoinType, LimitClause,
    LimitKind, Literal, NamedWindow, OrderByClause, OrderingItem, OrderingTerm, Over,
    ReferentialEvent, ResultColumn, ReturningClause, RowClassAnnotation, SelectClause, SelectCore,
    SelectStatement, Statement, StatementParameter, TableConstraint, TableConstraintKind,
    TableIndexing, TableRef, TriggerEvent, TypeName, UnaryOp, UpdateStatement, UpsertAction,
    UpsertClause, ValuesClause, VariableKind, WhenClause, WindowDefinition, WithClause,
};
use crate::lexer::Keyword;

/// Renders an identifier, quoting it when it would not relex as itself.
pub struct Ident<'a>(pub &'a str);

impl Ident<'_> {
    fn is_plain(name: &str) -> bool {
        let mut chars = name.chars();
        chars
            .next()
            .is_some_and(|c| c.is_alphabetic() || c == '_')
            && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
            && Keyword::from_str(name).is_none()
    }
}

impl Display for Ident<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if Self::is_plain(self.0) {
            f.write_str(self.0)
        } else {
            write!(f, "\"{}\"", self.0.replace('"', "\"\""))
        }
    }
}

/// Renders a function name; keywords that may name functions stay bare.
struct FunctionName<'a>(&'a str);

impl Display for FunctionName<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let keyword_ok = Keyword::from_str(self.0).is_some_and(|kw| kw.can_name_function());
        if keyword_ok {
            f.write_str(self.0)
        } else {
            Ident(self.0).fmt(f)
        }
    }
}

/// Renders items separated by `", "`.
struct Commas<'a, T>(&'a [T]);

impl<T: Display> Display for Commas<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            item.fmt(f)?;
        }
        Ok(())
    }
}

/// Renders identifiers separated by `", "`.
struct Idents<'a>(&'a [String]);

impl Display for Idents<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, name) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            Ident(name).fmt(f)?;
        }
        Ok(())
    }
}

fn write_qualified(f: &mut Formatter<'_>, schema: Option<&str>, name: &str) -> fmt::Result {
    if let Some(schema) = schema {
        write!(f, "{}.", Ident(schema))?;
    }
    Ident(name).fmt(f)
}

fn write_alias(f: &mut Formatter<'_>, alias: Option<&str>) -> fmt::Result {
    match alias {
        Some(alias) => write!(f, " AS {}", Ident(alias)),
        None => Ok(()),
    }
}

fn write_string(f: &mut Formatter<'_>, value: &str) -> fmt::Result {
    write!(f, "'{}'", value.replace('\'', "''"))
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            // Only hex literals produce negative values; keep them in hex.
            Self::Integer(i) if *i < 0 => {
                #[allow(clippy::cast_sign_loss)]
                let bits = *i as u64;
                write!(f, "0x{bits:X}")
            }
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(v) if v.is_infinite() => f.write_str("9e999"),
            Self::Float(v) => write!(f, "{v:?}"),
            Self::String(s) => write_string(f, s),
            Self::Blob(bytes) => {
                f.write_str("X'")?;
                for byte in bytes {
                    write!(f, "{byte:02X}")?;
                }
                f.write_str("'")
            }
            Self::Boolean(true) => f.write_str("TRUE"),
            Self::Boolean(false) => f.write_str("FALSE"),
            Self::Null => f.write_str("NULL"),
            Self::CurrentTime => f.write_str("CURRENT_TIME"),
            Self::CurrentDate => f.write_str("CURRENT_DATE"),
            Self::CurrentTimestamp => f.write_str("CURRENT_TIMESTAMP"),
        }
    }
}

impl Display for VariableKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anonymous => f.write_str("?"),
            Self::Numbered(index) => write!(f, "?{index}"),
            Self::Named { prefix, name } => write!(f, "{prefix}{name}"),
        }
    }
}

impl Display for FunctionParameters {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Star => f.write_str("*"),
            Self::List { distinct, args } => {
                if *distinct {
                    f.write_str("DISTINCT ")?;
                }
                Commas(args).fmt(f)
            }
        }
    }
}

fn write_filter(f: &mut Formatter<'_>, filter: Option<&Expr>) -> fmt::Result {
    match filter {
        Some(filter) => write!(f, " FILTER (WHERE {filter})"),
        None => Ok(()),
    }
}

impl Display for WhenClause {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "WHEN {} THEN {}", self.when, self.then)
    }
}

impl Display for Over {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Window(window) => window.fmt(f),
            Self::Named { name, .. } => Ident(name).fmt(f),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal { value, .. } => value.fmt(f),
            Self::Reference {
                schema,
                table,
                column,
                ..
            } => {
                if let Some(schema) = schema {
                    write!(f, "{}.", Ident(schema))?;
                }
                if let Some(table) = table {
                    write!(f, "{}.", Ident(table))?;
                }
                Ident(column).fmt(f)
            }
            Self::Variable { kind, .. } => kind.fmt(f),
            Self::Placeholder { name, .. } => write!(f, "${name}"),
            Self::Unary { op, operand, .. } => {
                if *op == UnaryOp::Not {
                    return write!(f, "NOT {operand}");
                }
                let operand = operand.to_string();
                // `- -x` must not become a `--` comment.
                if *op == UnaryOp::Neg && operand.starts_with('-') {
                    write!(f, "- {operand}")
                } else {
                    write!(f, "{}{operand}", op.as_str())
                }
            }
            Self::Binary {
                left, op, right, ..
            } => write!(f, "{left} {} {right}", op.as_str()),
            Self::Collate {
                expr, collation, ..
            } => write!(f, "{expr} COLLATE {}", Ident(collation)),
            Self::IsNull { expr, negated, .. } => {
                if *negated {
                    write!(f, "{expr} IS NOT NULL")
                } else {
                    write!(f, "{expr} IS NULL")
                }
            }
            Self::Like {
                expr,
                op,
                pattern,
                escape,
                negated,
                ..
            } => {
                let not = if *negated { "NOT " } else { "" };
                write!(f, "{expr} {not}{} {pattern}", op.as_str())?;
                if let Some(escape) = escape {
                    write!(f, " ESCAPE {escape}")?;
                }
                Ok(())
            }
            Self::In {
                expr,
                source,
                negated,
                ..
            } => {
                let not = if *negated { "NOT " } else { "" };
                write!(f, "{expr} {not}IN ")?;
                match source {
                    InSource::List(items) => write!(f, "({})", Commas(items)),
                    InSource::Subquery(query) => write!(f, "({query})"),
                    InSource::Table { schema, name, .. } => {
                        write_qualified(f, schema.as_deref(), name)
                    }
                    InSource::Variable(variable) => variable.fmt(f),
                }
            }
            Self::Between {
                expr,
                low,
                high,
                negated,
                ..
            } => {
                let not = if *negated { "NOT " } else { "" };
                write!(f, "{expr} {not}BETWEEN {low} AND {high}")
            }
            Self::Case {
                operand,
                whens,
                else_clause,
                ..
            } => {
                f.write_str("CASE")?;
                if let Some(operand) = operand {
                    write!(f, " {operand}")?;
                }
                for when in whens {
                    write!(f, " {when}")?;
                }
                if let Some(else_clause) = else_clause {
                    write!(f, " ELSE {else_clause}")?;
                }
                f.write_str(" END")
            }
            Self::Cast {
                expr, type_name, ..
            } => write!(f, "CAST({expr} AS {type_name})"),
            Self::Exists { query, negated, .. } => {
                let not = if *negated { "NOT " } else { "" };
                write!(f, "{not}EXISTS ({query})")
            }
            Self::Subquery { query, .. } => write!(f, "({query})"),
            Self::Tuple { items, .. } => write!(f, "({})", Commas(items)),
            Self::Parentheses { expr, .. } => write!(f, "({expr})"),
            Self::Function {
                name, parameters, ..
            } => write!(f, "{}({parameters})", FunctionName(name)),
            Self::AggregateFunction {
                name,
                parameters,
                order_by,
                filter,
                ..
            } => {
                write!(f, "{}({parameters}", FunctionName(name))?;
                if let Some(order_by) = order_by {
                    write!(f, " {order_by}")?;
                }
                f.write_str(")")?;
                write_filter(f, filter.as_deref())
            }
            Self::WindowFunction {
                name,
                parameters,
                filter,
                over,
                ..
            } => {
                write!(f, "{}({parameters})", FunctionName(name))?;
                write_filter(f, filter.as_deref())?;
                write!(f, " OVER {over}")
            }
            Self::Raise {
                action, message, ..
            } => match message {
                Some(message) => write!(f, "RAISE({}, {message})", action.as_str()),
                None => write!(f, "RAISE({})", action.as_str()),
            },
        }
    }
}

impl Display for TypeName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.arguments.is_empty() {
            write!(f, "({})", self.arguments.join(", "))?;
        }
        Ok(())
    }
}

impl Display for OrderingTerm {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.expr.fmt(f)?;
        if let Some(direction) = self.direction {
            write!(f, " {}", direction.as_str())?;
        }
        if let Some(nulls) = self.nulls {
            write!(f, " {}", nulls.as_str())?;
        }
        Ok(())
    }
}

impl Display for OrderingItem {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Term(term) => term.fmt(f),
            Self::Placeholder { name, .. } => write!(f, "${name}"),
        }
    }
}

impl Display for OrderByClause {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ORDER BY {}", Commas(&self.items))
    }
}

impl Display for FrameBoundary {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnboundedPreceding => f.write_str("UNBOUNDED PRECEDING"),
            Self::Preceding(expr) => write!(f, "{expr} PRECEDING"),
            Self::CurrentRow => f.write_str("CURRENT ROW"),
            Self::Following(expr) => write!(f, "{expr} FOLLOWING"),
            Self::UnboundedFollowing => f.write_str("UNBOUNDED FOLLOWING"),
        }
    }
}

impl Display for FrameSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} BETWEEN {} AND {}",
            self.frame_type.as_str(),
            self.start,
            self.end
        )?;
        if self.exclude != super::ExcludeMode::NoOthers {
            write!(f, " {}", self.exclude.as_str())?;
        }
        Ok(())
    }
}

impl Display for WindowDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if let Some(base) = &self.base_window_name {
            parts.push(Ident(base).to_string());
        }
        if !self.partition_by.is_empty() {
            parts.push(format!("PARTITION BY {}", Commas(&self.partition_by)));
        }
        if let Some(order_by) = &self.order_by {
            parts.push(order_by.to_string());
        }
        if let Some(frame) = &self.frame {
            parts.push(frame.to_string());
        }
        write!(f, "({})", parts.join(" "))
    }
}

impl Display for NamedWindow {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} AS {}", Ident(&self.name), self.definition)
    }
}

impl Display for ResultColumn {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Star { .. } => f.write_str("*"),
            Self::TableStar { table, .. } => write!(f, "{}.*", Ident(table)),
            Self::NestedStar { table, .. } => write!(f, "{}.**", Ident(table)),
            Self::Expression {
                expr,
                alias,
                mapped_by,
                ..
            } => {
                expr.fmt(f)?;
                write_alias(f, alias.as_deref())?;
                if let Some(dart) = mapped_by {
                    write!(f, " MAPPED BY `{dart}`")?;
                }
                Ok(())
            }
            Self::NestedQuery { query, alias, .. } => {
                write!(f, "LIST({query})")?;
                write_alias(f, alias.as_deref())
            }
        }
    }
}

impl Display for JoinClause {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.join_type == JoinType::Comma {
            write!(f, ", {}", self.table)?;
        } else {
            f.write_str(" ")?;
            if self.natural {
                f.write_str("NATURAL ")?;
            }
            write!(f, "{} {}", self.join_type.as_str(), self.table)?;
        }
        match &self.constraint {
            Some(JoinConstraint::On(expr)) => write!(f, " ON {expr}"),
            Some(JoinConstraint::Using(columns)) => write!(f, " USING ({})", Idents(columns)),
            None => Ok(()),
        }
    }
}

impl Display for TableRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table {
                schema,
                name,
                alias,
                indexing,
                ..
            } => {
                write_qualified(f, schema.as_deref(), name)?;
                write_alias(f, alias.as_deref())?;
                match indexing {
                    Some(TableIndexing::IndexedBy(index)) => {
                        write!(f, " INDEXED BY {}", Ident(index))
                    }
                    Some(TableIndexing::NotIndexed) => f.write_str(" NOT INDEXED"),
                    None => Ok(()),
                }
            }
            Self::Subquery { query, alias, .. } => {
                write!(f, "({query})")?;
                write_alias(f, alias.as_deref())
            }
            Self::TableFunction {
                schema,
                name,
                args,
                alias,
                ..
            } => {
                if let Some(schema) = schema {
                    write!(f, "{}.", Ident(schema))?;
                }
                write!(f, "{}({})", FunctionName(name), Commas(args))?;
                write_alias(f, alias.as_deref())
            }
            Self::Parenthesized { inner, .. } => write!(f, "({inner})"),
            Self::Join { left, join, .. } => write!(f, "{left}{join}"),
        }
    }
}

impl Display for CommonTableExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Ident(&self.name).fmt(f)?;
        if !self.columns.is_empty() {
            write!(f, "({})", Idents(&self.columns))?;
        }
        f.write_str(" AS ")?;
        match self.materialized {
            Some(true) => f.write_str("MATERIALIZED ")?,
            Some(false) => f.write_str("NOT MATERIALIZED ")?,
            None => {}
        }
        write!(f, "({})", self.query)
    }
}

impl Display for WithClause {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("WITH ")?;
        if self.recursive {
            f.write_str("RECURSIVE ")?;
        }
        Commas(&self.ctes).fmt(f)
    }
}

impl Display for SelectClause {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT ")?;
        if self.distinct {
            f.write_str("DISTINCT ")?;
        }
        Commas(&self.columns).fmt(f)?;
        if let Some(from) = &self.from {
            write!(f, " FROM {from}")?;
        }
        if let Some(where_clause) = &self.where_clause {
            write!(f, " WHERE {where_clause}")?;
        }
        if !self.group_by.is_empty() {
            write!(f, " GROUP BY {}", Commas(&self.group_by))?;
        }
        if let Some(having) = &self.having {
            write!(f, " HAVING {having}")?;
        }
        if !self.windows.is_empty() {
            write!(f, " WINDOW {}", Commas(&self.windows))?;
        }
        Ok(())
    }
}

impl Display for ValuesClause {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("VALUES ")?;
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "({})", Commas(row))?;
        }
        Ok(())
    }
}

impl Display for SelectCore {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select(select) => select.fmt(f),
            Self::Values(values) => values.fmt(f),
        }
    }
}

impl Display for CompoundPart {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.operator.as_str(), self.core)
    }
}

impl Display for LimitClause {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LimitKind::Expressions { limit, offset } => {
                write!(f, "LIMIT {limit}")?;
                if let Some(offset) = offset {
                    write!(f, " OFFSET {offset}")?;
                }
                Ok(())
            }
            LimitKind::Placeholder(name) => write!(f, "LIMIT ${name}"),
        }
    }
}

impl Display for SelectStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(with) = &self.with {
            write!(f, "{with} ")?;
        }
        self.core.fmt(f)?;
        for compound in &self.compounds {
            write!(f, " {compound}")?;
        }
        if let Some(order_by) = &self.order_by {
            write!(f, " {order_by}")?;
        }
        if let Some(limit) = &self.limit {
            write!(f, " {limit}")?;
        }
        Ok(())
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let [column] = self.columns.as_slice() {
            write!(f, "{} = {}", Ident(column), self.value)
        } else {
            write!(f, "({}) = {}", Idents(&self.columns), self.value)
        }
    }
}

impl Display for ReturningClause {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "RETURNING {}", Commas(&self.columns))
    }
}

impl Display for ConflictTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({})", Commas(&self.columns))?;
        if let Some(where_clause) = &self.where_clause {
            write!(f, " WHERE {where_clause}")?;
        }
        Ok(())
    }
}

impl Display for UpsertClause {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("ON CONFLICT")?;
        if let Some(target) = &self.target {
            write!(f, " {target}")?;
        }
        match &self.action {
            UpsertAction::Nothing => f.write_str(" DO NOTHING"),
            UpsertAction::Update {
                assignments,
                where_clause,
            } => {
                write!(f, " DO UPDATE SET {}", Commas(assignments))?;
                if let Some(where_clause) = where_clause {
                    write!(f, " WHERE {where_clause}")?;
                }
                Ok(())
            }
        }
    }
}

impl Display for InsertSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Values(values) => values.fmt(f),
            Self::Query(query) => query.fmt(f),
            Self::DefaultValues { .. } => f.write_str("DEFAULT VALUES"),
            Self::Placeholder { name, .. } => write!(f, "${name}"),
        }
    }
}

impl Display for InsertStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(with) = &self.with {
            write!(f, "{with} ")?;
        }
        match self.mode {
            InsertMode::Insert => f.write_str("INSERT")?,
            InsertMode::Replace => f.write_str("REPLACE")?,
            InsertMode::InsertOr(action) => write!(f, "INSERT OR {}", action.as_str())?,
        }
        f.write_str(" INTO ")?;
        write_qualified(f, self.schema.as_deref(), &self.table)?;
        write_alias(f, self.alias.as_deref())?;
        if !self.columns.is_empty() {
            write!(f, " ({})", Idents(&self.columns))?;
        }
        write!(f, " {}", self.source)?;
        for upsert in &self.upserts {
            write!(f, " {upsert}")?;
        }
        if let Some(returning) = &self.returning {
            write!(f, " {returning}")?;
        }
        Ok(())
    }
}

impl Display for UpdateStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(with) = &self.with {
            write!(f, "{with} ")?;
        }
        f.write_str("UPDATE ")?;
        if let Some(action) = self.or_action {
            write!(f, "OR {} ", action.as_str())?;
        }
        write_qualified(f, self.schema.as_deref(), &self.table)?;
        write_alias(f, self.alias.as_deref())?;
        write!(f, " SET {}", Commas(&self.assignments))?;
        if let Some(from) = &self.from {
            write!(f, " FROM {from}")?;
        }
        if let Some(where_clause) = &self.where_clause {
            write!(f, " WHERE {where_clause}")?;
        }
        if let Some(returning) = &self.returning {
            write!(f, " {returning}")?;
        }
        Ok(())
    }
}

impl Display for DeleteStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(with) = &self.with {
            write!(f, "{with} ")?;
        }
        f.write_str("DELETE FROM ")?;
        write_qualified(f, self.schema.as_deref(), &self.table)?;
        write_alias(f, self.alias.as_deref())?;
        if let Some(where_clause) = &self.where_clause {
            write!(f, " WHERE {where_clause}")?;
        }
        if let Some(returning) = &self.returning {
            write!(f, " {returning}")?;
        }
        Ok(())
    }
}

impl Display for IndexedColumn {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.expr.fmt(f)?;
        if let Some(direction) = self.direction {
            write!(f, " {}", direction.as_str())?;
        }
        Ok(())
    }
}

impl Display for Deferrable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.negated {
            f.write_str("NOT ")?;
        }
        f.write_str("DEFERRABLE")?;
        match self.initially_deferred {
            Some(true) => f.write_str(" INITIALLY DEFERRED"),
            Some(false) => f.write_str(" INITIALLY IMMEDIATE"),
            None => Ok(()),
        }
    }
}

impl Display for ForeignKeyClause {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "REFERENCES {}", Ident(&self.table))?;
        if !self.columns.is_empty() {
            write!(f, " ({})", Idents(&self.columns))?;
        }
        for (event, action) in &self.actions {
            let event = match event {
                ReferentialEvent::Delete => "DELETE",
                ReferentialEvent::Update => "UPDATE",
            };
            write!(f, " ON {event} {}", action.as_str())?;
        }
        if let Some(deferrable) = &self.deferrable {
            write!(f, " {deferrable}")?;
        }
        Ok(())
    }
}

fn write_on_conflict(
    f: &mut Formatter<'_>,
    on_conflict: Option<super::ConflictResolution>,
) -> fmt::Result {
    match on_conflict {
        Some(action) => write!(f, " ON CONFLICT {}", action.as_str()),
        None => Ok(()),
    }
}

impl Display for ColumnConstraint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "CONSTRAINT {} ", Ident(name))?;
        }
        match &self.kind {
            ColumnConstraintKind::PrimaryKey {
                direction,
                on_conflict,
                autoincrement,
            } => {
                f.write_str("PRIMARY KEY")?;
                if let Some(direction) = direction {
                    write!(f, " {}", direction.as_str())?;
                }
                write_on_conflict(f, *on_conflict)?;
                if *autoincrement {
                    f.write_str(" AUTOINCREMENT")?;
                }
                Ok(())
            }
            ColumnConstraintKind::NotNull { on_conflict } => {
                f.write_str("NOT NULL")?;
                write_on_conflict(f, *on_conflict)
            }
            ColumnConstraintKind::Null => f.write_str("NULL"),
            ColumnConstraintKind::Unique { on_conflict } => {
                f.write_str("UNIQUE")?;
                write_on_conflict(f, *on_conflict)
            }
            ColumnConstraintKind::Check(expr) => write!(f, "CHECK ({expr})"),
            ColumnConstraintKind::Default(expr) => write!(f, "DEFAULT {expr}"),
            ColumnConstraintKind::Collate(collation) => {
                write!(f, "COLLATE {}", Ident(collation))
            }
            ColumnConstraintKind::ForeignKey(clause) => clause.fmt(f),
            ColumnConstraintKind::Generated {
                expr,
                storage,
                always,
            } => {
                if *always {
                    f.write_str("GENERATED ALWAYS ")?;
                }
                write!(f, "AS ({expr})")?;
                match storage {
                    Some(GeneratedStorage::Stored) => f.write_str(" STORED"),
                    Some(GeneratedStorage::Virtual) => f.write_str(" VIRTUAL"),
                    None => Ok(()),
                }
            }
            ColumnConstraintKind::MappedBy(dart) => write!(f, "MAPPED BY `{dart}`"),
            ColumnConstraintKind::JsonKey(key) => write!(f, "JSON KEY {}", Ident(key)),
            ColumnConstraintKind::DartName(name) => write!(f, "AS {}", Ident(name)),
        }
    }
}

impl Display for ColumnDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Ident(&self.name).fmt(f)?;
        if let Some(type_name) = &self.type_name {
            write!(f, " {type_name}")?;
        }
        for constraint in &self.constraints {
            write!(f, " {constraint}")?;
        }
        Ok(())
    }
}

impl Display for TableConstraint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "CONSTRAINT {} ", Ident(name))?;
        }
        match &self.kind {
            TableConstraintKind::PrimaryKey {
                columns,
                on_conflict,
            } => {
                write!(f, "PRIMARY KEY ({})", Commas(columns))?;
                write_on_conflict(f, *on_conflict)
            }
            TableConstraintKind::Unique {
                columns,
                on_conflict,
            } => {
                write!(f, "UNIQUE ({})", Commas(columns))?;
                write_on_conflict(f, *on_conflict)
            }
            TableConstraintKind::Check(expr) => write!(f, "CHECK ({expr})"),
            TableConstraintKind::ForeignKey { columns, clause } => {
                write!(f, "FOREIGN KEY ({}) {clause}", Idents(columns))
            }
        }
    }
}

impl Display for RowClassAnnotation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let keyword = if self.existing { "WITH" } else { "AS" };
        write!(f, "{keyword} {}", Ident(&self.name))
    }
}

fn write_create_prefix(
    f: &mut Formatter<'_>,
    temporary: bool,
    object: &str,
    if_not_exists: bool,
) -> fmt::Result {
    f.write_str("CREATE ")?;
    if temporary {
        f.write_str("TEMP ")?;
    }
    write!(f, "{object} ")?;
    if if_not_exists {
        f.write_str("IF NOT EXISTS ")?;
    }
    Ok(())
}

impl Display for CreateTableStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_create_prefix(f, self.temporary, "TABLE", self.if_not_exists)?;
        write_qualified(f, self.schema.as_deref(), &self.name)?;
        if let Some(query) = &self.as_select {
            return write!(f, " AS {query}");
        }
        write!(f, " ({}", Commas(&self.columns))?;
        for constraint in &self.constraints {
            write!(f, ", {constraint}")?;
        }
        f.write_str(")")?;
        let mut options = Vec::new();
        if self.without_rowid {
            options.push("WITHOUT ROWID");
        }
        if self.strict {
            options.push("STRICT");
        }
        if !options.is_empty() {
            write!(f, " {}", options.join(", "))?;
        }
        if let Some(row_class) = &self.row_class {
            write!(f, " {row_class}")?;
        }
        Ok(())
    }
}

impl Display for CreateVirtualTableStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE VIRTUAL TABLE ")?;
        if self.if_not_exists {
            f.write_str("IF NOT EXISTS ")?;
        }
        write_qualified(f, self.schema.as_deref(), &self.name)?;
        write!(f, " USING {}", Ident(&self.module))?;
        if !self.arguments.is_empty() {
            write!(f, "({})", self.arguments.join(", "))?;
        }
        Ok(())
    }
}

impl Display for CreateViewStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_create_prefix(f, self.temporary, "VIEW", self.if_not_exists)?;
        write_qualified(f, self.schema.as_deref(), &self.name)?;
        if !self.columns.is_empty() {
            write!(f, " ({})", Idents(&self.columns))?;
        }
        if let Some(row_class) = &self.row_class {
            write!(f, " {row_class}")?;
        }
        write!(f, " AS {}", self.query)
    }
}

impl Display for TriggerEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delete => f.write_str("DELETE"),
            Self::Insert => f.write_str("INSERT"),
            Self::Update { columns } if columns.is_empty() => f.write_str("UPDATE"),
            Self::Update { columns } => write!(f, "UPDATE OF {}", Idents(columns)),
        }
    }
}

impl Display for CreateTriggerStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_create_prefix(f, self.temporary, "TRIGGER", self.if_not_exists)?;
        write_qualified(f, self.schema.as_deref(), &self.name)?;
        if let Some(timing) = self.timing {
            write!(f, " {}", timing.as_str())?;
        }
        write!(f, " {} ON {}", self.event, Ident(&self.table))?;
        if self.for_each_row {
            f.write_str(" FOR EACH ROW")?;
        }
        if let Some(when) = &self.when {
            write!(f, " WHEN {when}")?;
        }
        f.write_str(" BEGIN")?;
        for statement in &self.body {
            write!(f, " {statement};")?;
        }
        f.write_str(" END")
    }
}

impl Display for CreateIndexStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let object = if self.unique { "UNIQUE INDEX" } else { "INDEX" };
        write_create_prefix(f, false, object, self.if_not_exists)?;
        write_qualified(f, self.schema.as_deref(), &self.name)?;
        write!(f, " ON {} ({})", Ident(&self.table), Commas(&self.columns))?;
        if let Some(where_clause) = &self.where_clause {
            write!(f, " WHERE {where_clause}")?;
        }
        Ok(())
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select(s) => s.fmt(f),
            Self::Insert(s) => s.fmt(f),
            Self::Update(s) => s.fmt(f),
            Self::Delete(s) => s.fmt(f),
            Self::CreateTable(s) => s.fmt(f),
            Self::CreateVirtualTable(s) => s.fmt(f),
            Self::CreateView(s) => s.fmt(f),
            Self::CreateTrigger(s) => s.fmt(f),
            Self::CreateIndex(s) => s.fmt(f),
        }
    }
}

impl Display for ImportStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("import ")?;
        write_string(f, &self.uri)
    }
}

impl Display for StatementParameter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::VariableType {
                variable,
                required,
                type_name,
                or_null,
                ..
            } => {
                if *required {
                    f.write_str("REQUIRED ")?;
                }
                variable.fmt(f)?;
                if let Some(type_name) = type_name {
                    write!(f, " AS {type_name}")?;
                    if *or_null {
                        f.write_str(" OR NULL")?;
                    }
                }
                Ok(())
            }
            Self::DefaultValue { name, default, .. } => write!(f, "${name} = {default}"),
        }
    }
}

impl Display for DeclaredStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Ident(&self.name).fmt(f)?;
        if !self.parameters.is_empty() {
            write!(f, "({})", Commas(&self.parameters))?;
        }
        if let Some(class) = &self.result_class {
            write!(f, " AS {}", Ident(class))?;
        }
        write!(f, ": {}", self.statement)
    }
}

impl Display for DriftStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Import(import) => import.fmt(f),
            Self::Declared(declared) => declared.fmt(f),
            Self::OnCreate { statement, .. } => write!(f, "@create: {statement}"),
            Self::Plain(statement) => statement.fmt(f),
        }
    }
}

impl Display for DriftFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            writeln!(f, "{statement};")?;
        }
        Ok(())
    }
}

//! SQL statement AST types.

use super::{
    CreateIndexStatement, CreateTableStatement, CreateTriggerStatement, CreateViewStatement,
    CreateVirtualTableStatement, Expr, IndexedColumn, NamedWindow, OrderByClause,
};
use crate::lexer::Span;

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    /// `,` between two tables.
    Comma,
    /// `JOIN` or `INNER JOIN`.
    Inner,
    /// `LEFT [OUTER] JOIN`.
    Left,
    /// `RIGHT [OUTER] JOIN`.
    Right,
    /// `FULL [OUTER] JOIN`.
    Full,
    /// `CROSS JOIN`.
    Cross,
}

impl JoinType {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Comma => ",",
            Self::Inner => "JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Full => "FULL JOIN",
            Self::Cross => "CROSS JOIN",
        }
    }
}

/// The condition attached to a join.
#[derive(Debug, Clone, PartialEq)]
pub enum JoinConstraint {
    /// `ON expr`
    On(Expr),
    /// `USING (a, b)`
    Using(Vec<String>),
}

/// A JOIN clause.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinClause {
    /// Whether `NATURAL` precedes the join.
    pub natural: bool,
    /// The type of join.
    pub join_type: JoinType,
    /// The table to join.
    pub table: TableRef,
    /// The join condition.
    pub constraint: Option<JoinConstraint>,
    /// Source span, from the join operator to the end of the constraint.
    pub span: Span,
}

/// `INDEXED BY name` / `NOT INDEXED` after a table name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableIndexing {
    /// `INDEXED BY name`
    IndexedBy(String),
    /// `NOT INDEXED`
    NotIndexed,
}

/// A table reference in FROM clause.
#[derive(Debug, Clone, PartialEq)]
pub enum TableRef {
    /// A simple table name.
    Table {
        /// Schema name (optional).
        schema: Option<String>,
        /// Table name.
        name: String,
        /// Alias.
        alias: Option<String>,
        /// Index hint.
        indexing: Option<TableIndexing>,
        /// Source span.
        span: Span,
    },
    /// A subquery.
    Subquery {
        /// The subquery.
        query: Box<SelectStatement>,
        /// Alias.
        alias: Option<String>,
        /// Source span.
        span: Span,
    },
    /// A table-valued function such as `json_each(x)`.
    TableFunction {
        /// Schema name (optional).
        schema: Option<String>,
        /// Function name.
        name: String,
        /// Arguments.
        args: Vec<Expr>,
        /// Alias.
        alias: Option<String>,
        /// Source span.
        span: Span,
    },
    /// A parenthesized join, e.g. `(a JOIN b ON ...)`.
    Parenthesized {
        /// The inner table reference.
        inner: Box<TableRef>,
        /// Source span, including the parentheses.
        span: Span,
    },
    /// A joined table.
    Join {
        /// Left side of the join.
        left: Box<TableRef>,
        /// The join clause.
        join: Box<JoinClause>,
        /// Source span.
        span: Span,
    },
}

impl TableRef {
    /// Returns the source span of this table reference.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Table { span, .. }
            | Self::Subquery { span, .. }
            | Self::TableFunction { span, .. }
            | Self::Parenthesized { span, .. }
            | Self::Join { span, .. } => *span,
        }
    }

    /// Returns the alias, if the reference has one.
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        match self {
            Self::Table { alias, .. }
            | Self::Subquery { alias, .. }
            | Self::TableFunction { alias, .. } => alias.as_deref(),
            Self::Parenthesized { .. } | Self::Join { .. } => None,
        }
    }
}

/// A column in a result column list.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultColumn {
    /// `*`
    Star {
        /// Source span.
        span: Span,
    },
    /// `table.*`
    TableStar {
        /// The table name or alias.
        table: String,
        /// Source span.
        span: Span,
    },
    /// drift `table.**`: all columns of `table` as one nested result.
    NestedStar {
        /// The table name or alias.
        table: String,
        /// Source span.
        span: Span,
    },
    /// `expr [AS alias] [MAPPED BY `converter`]`
    Expression {
        /// The expression.
        expr: Expr,
        /// Column alias.
        alias: Option<String>,
        /// drift type converter, as inline Dart code.
        mapped_by: Option<String>,
        /// Source span.
        span: Span,
    },
    /// drift `LIST(select) [AS name]`: a nested list query.
    NestedQuery {
        /// The nested query.
        query: Box<SelectStatement>,
        /// Name of the resulting field.
        alias: Option<String>,
        /// Source span.
        span: Span,
    },
}

impl ResultColumn {
    /// Returns the source span of this column.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Star { span }
            | Self::TableStar { span, .. }
            | Self::NestedStar { span, .. }
            | Self::Expression { span, .. }
            | Self::NestedQuery { span, .. } => *span,
        }
    }
}

/// A common table expression: `name [(cols)] AS [[NOT] MATERIALIZED] (select)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CommonTableExpression {
    /// The CTE name.
    pub name: String,
    /// Explicit column names.
    pub columns: Vec<String>,
    /// `Some(true)` for MATERIALIZED, `Some(false)` for NOT MATERIALIZED.
    pub materialized: Option<bool>,
    /// The query.
    pub query: Box<SelectStatement>,
    /// Source span.
    pub span: Span,
}

/// A `WITH [RECURSIVE] ...` prefix.
#[derive(Debug, Clone, PartialEq)]
pub struct WithClause {
    /// Whether RECURSIVE was specified.
    pub recursive: bool,
    /// The common table expressions, at least one.
    pub ctes: Vec<CommonTableExpression>,
    /// Source span.
    pub span: Span,
}

/// A `SELECT ...` core without ORDER BY/LIMIT.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectClause {
    /// Whether to select DISTINCT values.
    pub distinct: bool,
    /// The result columns.
    pub columns: Vec<ResultColumn>,
    /// The FROM clause.
    pub from: Option<TableRef>,
    /// The WHERE clause.
    pub where_clause: Option<Expr>,
    /// GROUP BY expressions.
    pub group_by: Vec<Expr>,
    /// HAVING clause.
    pub having: Option<Expr>,
    /// WINDOW clause.
    pub windows: Vec<NamedWindow>,
    /// Source span.
    pub span: Span,
}

/// A `VALUES (...), (...)` core.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuesClause {
    /// The rows, all of the same width.
    pub rows: Vec<Vec<Expr>>,
    /// Source span.
    pub span: Span,
}

/// One operand of a compound select.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectCore {
    /// `SELECT ...`
    Select(SelectClause),
    /// `VALUES ...`
    Values(ValuesClause),
}

impl SelectCore {
    /// Returns the source span of this core.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Select(select) => select.span,
            Self::Values(values) => values.span,
        }
    }
}

/// Compound select operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompoundOperator {
    Union,
    UnionAll,
    Intersect,
    Except,
}

impl CompoundOperator {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Union => "UNION",
            Self::UnionAll => "UNION ALL",
            Self::Intersect => "INTERSECT",
            Self::Except => "EXCEPT",
        }
    }
}

/// An `operator core` continuation of a compound select.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundPart {
    /// The operator joining this core to everything before it.
    pub operator: CompoundOperator,
    /// The right-hand core.
    pub core: SelectCore,
    /// Source span, starting at the operator.
    pub span: Span,
}

/// The contents of a LIMIT clause.
#[derive(Debug, Clone, PartialEq)]
pub enum LimitKind {
    /// `LIMIT n [OFFSET m]`; `LIMIT m, n` is normalized to this form.
    Expressions {
        /// Row count.
        limit: Expr,
        /// Rows to skip.
        offset: Option<Expr>,
    },
    /// drift `LIMIT $name`: the whole clause is supplied at runtime.
    Placeholder(String),
}

/// A `LIMIT` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct LimitClause {
    /// The limit contents.
    pub kind: LimitKind,
    /// Source span, starting at `LIMIT`.
    pub span: Span,
}

/// A SELECT statement: optional CTEs, compound cores, ORDER BY and LIMIT.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectStatement {
    /// The WITH prefix.
    pub with: Option<WithClause>,
    /// The first core.
    pub core: SelectCore,
    /// Further cores, folded left to right.
    pub compounds: Vec<CompoundPart>,
    /// ORDER BY clause.
    pub order_by: Option<OrderByClause>,
    /// LIMIT clause.
    pub limit: Option<LimitClause>,
    /// Source span.
    pub span: Span,
}

impl SelectStatement {
    /// Returns the first core if it is a `SELECT` (not `VALUES`) clause.
    #[must_use]
    pub const fn select_clause(&self) -> Option<&SelectClause> {
        match &self.core {
            SelectCore::Select(select) => Some(select),
            SelectCore::Values(_) => None,
        }
    }

    /// Returns true if the statement combines several cores.
    #[must_use]
    pub fn is_compound(&self) -> bool {
        !self.compounds.is_empty()
    }
}

/// Conflict resolution algorithm (`OR ROLLBACK`, `ON CONFLICT ABORT`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictResolution {
    Rollback,
    Abort,
    Fail,
    Ignore,
    Replace,
}

impl ConflictResolution {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rollback => "ROLLBACK",
            Self::Abort => "ABORT",
            Self::Fail => "FAIL",
            Self::Ignore => "IGNORE",
            Self::Replace => "REPLACE",
        }
    }
}

/// How an INSERT statement starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertMode {
    /// `INSERT`
    Insert,
    /// `REPLACE`
    Replace,
    /// `INSERT OR action`
    InsertOr(ConflictResolution),
}

/// An assignment in UPDATE SET or DO UPDATE SET.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Target columns; more than one for `(a, b) = ...`.
    pub columns: Vec<String>,
    /// Value expression.
    pub value: Expr,
    /// Source span.
    pub span: Span,
}

/// Source of data for INSERT.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertSource {
    /// VALUES (...), (...), ...
    Values(ValuesClause),
    /// SELECT ...
    Query(Box<SelectStatement>),
    /// DEFAULT VALUES
    DefaultValues {
        /// Source span.
        span: Span,
    },
    /// drift `INSERT INTO t $row`: an insertable supplied at runtime.
    Placeholder {
        /// The name without `$`.
        name: String,
        /// Source span.
        span: Span,
    },
}

impl InsertSource {
    /// Returns the source span of this insert source.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Values(values) => values.span,
            Self::Query(query) => query.span,
            Self::DefaultValues { span } | Self::Placeholder { span, .. } => *span,
        }
    }
}

/// The target of an upsert clause: `(cols) [WHERE expr]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConflictTarget {
    /// Indexed columns.
    pub columns: Vec<IndexedColumn>,
    /// Partial index condition.
    pub where_clause: Option<Expr>,
    /// Source span.
    pub span: Span,
}

/// What an upsert does on conflict.
#[derive(Debug, Clone, PartialEq)]
pub enum UpsertAction {
    /// `DO NOTHING`
    Nothing,
    /// `DO UPDATE SET ... [WHERE ...]`
    Update {
        /// SET assignments.
        assignments: Vec<Assignment>,
        /// WHERE clause.
        where_clause: Option<Expr>,
    },
}

/// An `ON CONFLICT ... DO ...` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct UpsertClause {
    /// Conflict target (required on all but the last clause).
    pub target: Option<ConflictTarget>,
    /// Action to take on conflict.
    pub action: UpsertAction,
    /// Source span.
    pub span: Span,
}

/// A `RETURNING` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturningClause {
    /// The returned columns.
    pub columns: Vec<ResultColumn>,
    /// Source span.
    pub span: Span,
}

/// An INSERT statement.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    /// The WITH prefix.
    pub with: Option<WithClause>,
    /// INSERT / REPLACE / INSERT OR ...
    pub mode: InsertMode,
    /// Schema name.
    pub schema: Option<String>,
    /// Table name.
    pub table: String,
    /// Alias.
    pub alias: Option<String>,
    /// Column names (optional).
    pub columns: Vec<String>,
    /// Values to insert.
    pub source: InsertSource,
    /// ON CONFLICT clauses.
    pub upserts: Vec<UpsertClause>,
    /// RETURNING clause.
    pub returning: Option<ReturningClause>,
    /// Source span.
    pub span: Span,
}

/// An UPDATE statement.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    /// The WITH prefix.
    pub with: Option<WithClause>,
    /// `UPDATE OR action`
    pub or_action: Option<ConflictResolution>,
    /// Schema name.
    pub schema: Option<String>,
    /// Table name.
    pub table: String,
    /// Alias.
    pub alias: Option<String>,
    /// SET assignments.
    pub assignments: Vec<Assignment>,
    /// FROM clause (for joins in UPDATE).
    pub from: Option<TableRef>,
    /// WHERE clause.
    pub where_clause: Option<Expr>,
    /// RETURNING clause.
    pub returning: Option<ReturningClause>,
    /// Source span.
    pub span: Span,
}

/// A DELETE statement.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteStatement {
    /// The WITH prefix.
    pub with: Option<WithClause>,
    /// Schema name.
    pub schema: Option<String>,
    /// Table name.
    pub table: String,
    /// Alias.
    pub alias: Option<String>,
    /// WHERE clause.
    pub where_clause: Option<Expr>,
    /// RETURNING clause.
    pub returning: Option<ReturningClause>,
    /// Source span.
    pub span: Span,
}

/// A SQL statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// SELECT statement.
    Select(SelectStatement),
    /// INSERT statement.
    Insert(InsertStatement),
    /// UPDATE statement.
    Update(UpdateStatement),
    /// DELETE statement.
    Delete(DeleteStatement),
    /// CREATE TABLE statement.
    CreateTable(CreateTableStatement),
    /// CREATE VIRTUAL TABLE statement.
    CreateVirtualTable(CreateVirtualTableStatement),
    /// CREATE VIEW statement.
    CreateView(CreateViewStatement),
    /// CREATE TRIGGER statement.
    CreateTrigger(CreateTriggerStatement),
    /// CREATE INDEX statement.
    CreateIndex(CreateIndexStatement),
}

impl Statement {
    /// Returns the source span of this statement.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Select(s) => s.span,
            Self::Insert(s) => s.span,
            Self::Update(s) => s.span,
            Self::Delete(s) => s.span,
            Self::CreateTable(s) => s.span,
            Self::CreateVirtualTable(s) => s.span,
            Self::CreateView(s) => s.span,
            Self::CreateTrigger(s) => s.span,
            Self::CreateIndex(s) => s.span,
        }
    }

    /// Returns true for statements that only read data.
    #[must_use]
    pub const fn is_query(&self) -> bool {
        matches!(self, Self::Select(_))
    }

    /// Returns true for CREATE statements.
    #[must_use]
    pub const fn is_schema_statement(&self) -> bool {
        matches!(
            self,
            Self::CreateTable(_)
                | Self::CreateVirtualTable(_)
                | Self::CreateView(_)
                | Self::CreateTrigger(_)
                | Self::CreateIndex(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_type() {
        assert_eq!(JoinType::Inner.as_str(), "JOIN");
        assert_eq!(JoinType::Left.as_str(), "LEFT JOIN");
        assert_eq!(JoinType::Comma.as_str(), ",");
    }

    #[test]
    fn test_compound_operator() {
        assert_eq!(CompoundOperator::UnionAll.as_str(), "UNION ALL");
        assert_eq!(CompoundOperator::Except.as_str(), "EXCEPT");
    }

    #[test]
    fn test_table_ref_alias() {
        let table = TableRef::Table {
            schema: None,
            name: String::from("users"),
            alias: Some(String::from("u")),
            indexing: None,
            span: Span::new(0, 7),
        };
        assert_eq!(table.alias(), Some("u"));
        assert_eq!(table.span(), Span::new(0, 7));
    }

    #[test]
    fn test_conflict_resolution() {
        assert_eq!(ConflictResolution::Ignore.as_str(), "IGNORE");
        assert_eq!(ConflictResolution::Replace.as_str(), "REPLACE");
    }
}

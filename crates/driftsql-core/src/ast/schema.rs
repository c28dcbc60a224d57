//! AST types for CREATE statements.

use super::{
    ConflictResolution, Expr, OrderDirection, SelectStatement, Statement, TypeName,
};
use crate::lexer::Span;

/// An indexed column: `expr [COLLATE name] [ASC|DESC]`.
///
/// A collation is kept inside `expr` as an [`Expr::Collate`].
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedColumn {
    /// The column expression.
    pub expr: Expr,
    /// Sort direction as written.
    pub direction: Option<OrderDirection>,
    /// Source span.
    pub span: Span,
}

/// Action of an `ON DELETE` / `ON UPDATE` foreign key clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferentialAction {
    SetNull,
    SetDefault,
    Cascade,
    Restrict,
    NoAction,
}

impl ReferentialAction {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
            Self::Cascade => "CASCADE",
            Self::Restrict => "RESTRICT",
            Self::NoAction => "NO ACTION",
        }
    }
}

/// The event a referential action reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferentialEvent {
    Delete,
    Update,
}

/// `[NOT] DEFERRABLE [INITIALLY DEFERRED|IMMEDIATE]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deferrable {
    /// Whether NOT precedes DEFERRABLE.
    pub negated: bool,
    /// `Some(true)` for INITIALLY DEFERRED, `Some(false)` for IMMEDIATE.
    pub initially_deferred: Option<bool>,
}

/// `REFERENCES table [(cols)] [ON ... action]* [deferrable]`
#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKeyClause {
    /// Referenced table.
    pub table: String,
    /// Referenced columns.
    pub columns: Vec<String>,
    /// Referential actions in source order.
    pub actions: Vec<(ReferentialEvent, ReferentialAction)>,
    /// Deferral behavior.
    pub deferrable: Option<Deferrable>,
    /// Source span, starting at `REFERENCES`.
    pub span: Span,
}

impl ForeignKeyClause {
    /// Returns the action registered for `event`, if any.
    #[must_use]
    pub fn action_for(&self, event: ReferentialEvent) -> Option<ReferentialAction> {
        self.actions
            .iter()
            .rev()
            .find(|(e, _)| *e == event)
            .map(|(_, action)| *action)
    }
}

/// Storage of a generated column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratedStorage {
    Stored,
    Virtual,
}

/// The kind of a column constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnConstraintKind {
    /// `PRIMARY KEY [ASC|DESC] [ON CONFLICT ...] [AUTOINCREMENT]`
    PrimaryKey {
        /// Sort direction.
        direction: Option<OrderDirection>,
        /// Conflict resolution.
        on_conflict: Option<ConflictResolution>,
        /// Whether AUTOINCREMENT was specified.
        autoincrement: bool,
    },
    /// `NOT NULL [ON CONFLICT ...]`
    NotNull {
        /// Conflict resolution.
        on_conflict: Option<ConflictResolution>,
    },
    /// `NULL`
    Null,
    /// `UNIQUE [ON CONFLICT ...]`
    Unique {
        /// Conflict resolution.
        on_conflict: Option<ConflictResolution>,
    },
    /// `CHECK (expr)`
    Check(Expr),
    /// `DEFAULT value`
    Default(Expr),
    /// `COLLATE name`
    Collate(String),
    /// `REFERENCES ...`
    ForeignKey(ForeignKeyClause),
    /// `[GENERATED ALWAYS] AS (expr) [STORED|VIRTUAL]`
    Generated {
        /// The generating expression.
        expr: Expr,
        /// Explicit storage.
        storage: Option<GeneratedStorage>,
        /// Whether `GENERATED ALWAYS` was written.
        always: bool,
    },
    /// drift `MAPPED BY `converter``
    MappedBy(String),
    /// drift `JSON KEY name`
    JsonKey(String),
    /// drift `AS name`: the Dart getter name of the column.
    DartName(String),
}

/// A column constraint, optionally named.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnConstraint {
    /// `CONSTRAINT name`
    pub name: Option<String>,
    /// The constraint.
    pub kind: ColumnConstraintKind,
    /// Source span.
    pub span: Span,
}

/// A column definition for CREATE TABLE.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    /// Column name.
    pub name: String,
    /// Declared type; SQLite allows omitting it.
    pub type_name: Option<TypeName>,
    /// Constraints in source order.
    pub constraints: Vec<ColumnConstraint>,
    /// Source span.
    pub span: Span,
}

impl ColumnDefinition {
    /// Returns true if the column is declared NOT NULL or PRIMARY KEY.
    #[must_use]
    pub fn is_non_nullable(&self) -> bool {
        self.constraints.iter().any(|c| {
            matches!(
                c.kind,
                ColumnConstraintKind::NotNull { .. } | ColumnConstraintKind::PrimaryKey { .. }
            )
        })
    }

    /// Returns the drift type converter, if any.
    #[must_use]
    pub fn mapped_by(&self) -> Option<&str> {
        self.constraints.iter().find_map(|c| match &c.kind {
            ColumnConstraintKind::MappedBy(dart) => Some(dart.as_str()),
            _ => None,
        })
    }
}

/// The kind of a table constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum TableConstraintKind {
    /// `PRIMARY KEY (cols) [ON CONFLICT ...]`
    PrimaryKey {
        /// Key columns.
        columns: Vec<IndexedColumn>,
        /// Conflict resolution.
        on_conflict: Option<ConflictResolution>,
    },
    /// `UNIQUE (cols) [ON CONFLICT ...]`
    Unique {
        /// Unique columns.
        columns: Vec<IndexedColumn>,
        /// Conflict resolution.
        on_conflict: Option<ConflictResolution>,
    },
    /// `CHECK (expr)`
    Check(Expr),
    /// `FOREIGN KEY (cols) REFERENCES ...`
    ForeignKey {
        /// Referencing columns.
        columns: Vec<String>,
        /// The referenced table and actions.
        clause: ForeignKeyClause,
    },
}

/// A table constraint, optionally named.
#[derive(Debug, Clone, PartialEq)]
pub struct TableConstraint {
    /// `CONSTRAINT name`
    pub name: Option<String>,
    /// The constraint.
    pub kind: TableConstraintKind,
    /// Source span.
    pub span: Span,
}

/// drift row class annotation after a CREATE TABLE or in a CREATE VIEW.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowClassAnnotation {
    /// Dart class name.
    pub name: String,
    /// `WITH Class` (an existing class) as opposed to `AS Class`
    /// (a generated one).
    pub existing: bool,
    /// Source span.
    pub span: Span,
}

/// A CREATE TABLE statement.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTableStatement {
    /// TEMP / TEMPORARY
    pub temporary: bool,
    /// IF NOT EXISTS
    pub if_not_exists: bool,
    /// Schema name.
    pub schema: Option<String>,
    /// Table name.
    pub name: String,
    /// Column definitions (empty for `AS select`).
    pub columns: Vec<ColumnDefinition>,
    /// Table constraints.
    pub constraints: Vec<TableConstraint>,
    /// `WITHOUT ROWID`
    pub without_rowid: bool,
    /// `STRICT`
    pub strict: bool,
    /// `CREATE TABLE name AS select`
    pub as_select: Option<Box<SelectStatement>>,
    /// drift row class annotation.
    pub row_class: Option<RowClassAnnotation>,
    /// Source span.
    pub span: Span,
}

impl CreateTableStatement {
    /// Looks up a column by name (case-insensitive, like SQLite).
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }
}

/// An fts5 column: `name [UNINDEXED]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fts5Column {
    /// Column name.
    pub name: String,
    /// Whether the column is excluded from the full-text index.
    pub unindexed: bool,
}

/// Structured reading of the arguments of a known virtual table module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VirtualTableModule {
    /// `fts5(col [UNINDEXED], ..., option = value)`
    Fts5 {
        /// Columns.
        columns: Vec<Fts5Column>,
        /// `key = value` options (e.g. `tokenize`, `content`).
        options: Vec<(String, String)>,
    },
    /// `rtree(id, min1, max1, ..., +aux)` / `rtree_i32(...)`.
    Rtree {
        /// Whether the module is `rtree_i32`.
        integer: bool,
        /// The id column.
        id: String,
        /// Coordinate columns, in min/max pairs.
        coordinates: Vec<String>,
        /// Auxiliary columns (written with a `+` prefix).
        auxiliary: Vec<String>,
    },
    /// Any other module; only the raw arguments are available.
    Unknown,
}

/// A CREATE VIRTUAL TABLE statement.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateVirtualTableStatement {
    /// IF NOT EXISTS
    pub if_not_exists: bool,
    /// Schema name.
    pub schema: Option<String>,
    /// Table name.
    pub name: String,
    /// Module name as written.
    pub module: String,
    /// Module arguments, each the verbatim trimmed source text.
    pub arguments: Vec<String>,
    /// Structured reading of the arguments.
    pub recognized: VirtualTableModule,
    /// Source span.
    pub span: Span,
}

/// A CREATE VIEW statement.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateViewStatement {
    /// TEMP / TEMPORARY
    pub temporary: bool,
    /// IF NOT EXISTS
    pub if_not_exists: bool,
    /// Schema name.
    pub schema: Option<String>,
    /// View name.
    pub name: String,
    /// Explicit column names.
    pub columns: Vec<String>,
    /// drift `WITH ExistingClass`.
    pub row_class: Option<RowClassAnnotation>,
    /// The view query.
    pub query: Box<SelectStatement>,
    /// Source span.
    pub span: Span,
}

/// When a trigger fires relative to its event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerTiming {
    Before,
    After,
    InsteadOf,
}

impl TriggerTiming {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Before => "BEFORE",
            Self::After => "AFTER",
            Self::InsteadOf => "INSTEAD OF",
        }
    }
}

/// The event a trigger reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerEvent {
    /// `DELETE`
    Delete,
    /// `INSERT`
    Insert,
    /// `UPDATE [OF cols]`
    Update {
        /// Columns after `OF`.
        columns: Vec<String>,
    },
}

/// A CREATE TRIGGER statement.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTriggerStatement {
    /// TEMP / TEMPORARY
    pub temporary: bool,
    /// IF NOT EXISTS
    pub if_not_exists: bool,
    /// Schema name.
    pub schema: Option<String>,
    /// Trigger name.
    pub name: String,
    /// BEFORE / AFTER / INSTEAD OF
    pub timing: Option<TriggerTiming>,
    /// The event.
    pub event: TriggerEvent,
    /// Table the trigger is attached to.
    pub table: String,
    /// `FOR EACH ROW`
    pub for_each_row: bool,
    /// `WHEN expr`
    pub when: Option<Expr>,
    /// Body statements, at least one.
    pub body: Vec<Statement>,
    /// Source span.
    pub span: Span,
}

/// A CREATE INDEX statement.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateIndexStatement {
    /// UNIQUE
    pub unique: bool,
    /// IF NOT EXISTS
    pub if_not_exists: bool,
    /// Schema name.
    pub schema: Option<String>,
    /// Index name.
    pub name: String,
    /// Indexed table.
    pub table: String,
    /// Indexed columns.
    pub columns: Vec<IndexedColumn>,
    /// Partial index condition.
    pub where_clause: Option<Expr>,
    /// Source span.
    pub span: Span,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constraint(kind: ColumnConstraintKind) -> ColumnConstraint {
        ColumnConstraint {
            name: None,
            kind,
            span: Span::default(),
        }
    }

    #[test]
    fn test_column_nullability() {
        let mut column = ColumnDefinition {
            name: String::from("id"),
            type_name: None,
            constraints: vec![constraint(ColumnConstraintKind::Null)],
            span: Span::default(),
        };
        assert!(!column.is_non_nullable());

        column.constraints.push(constraint(ColumnConstraintKind::PrimaryKey {
            direction: None,
            on_conflict: None,
            autoincrement: true,
        }));
        assert!(column.is_non_nullable());
    }

    #[test]
    fn test_column_mapped_by() {
        let column = ColumnDefinition {
            name: String::from("tags"),
            type_name: None,
            constraints: vec![constraint(ColumnConstraintKind::MappedBy(String::from(
                "const TagsConverter()",
            )))],
            span: Span::default(),
        };
        assert_eq!(column.mapped_by(), Some("const TagsConverter()"));
    }

    #[test]
    fn test_foreign_key_action_lookup() {
        let clause = ForeignKeyClause {
            table: String::from("users"),
            columns: vec![String::from("id")],
            actions: vec![
                (ReferentialEvent::Delete, ReferentialAction::Cascade),
                (ReferentialEvent::Update, ReferentialAction::SetNull),
            ],
            deferrable: None,
            span: Span::default(),
        };
        assert_eq!(
            clause.action_for(ReferentialEvent::Delete),
            Some(ReferentialAction::Cascade)
        );
        assert_eq!(ReferentialAction::NoAction.as_str(), "NO ACTION");
        assert_eq!(TriggerTiming::InsteadOf.as_str(), "INSTEAD OF");
    }
}

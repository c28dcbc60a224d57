//! Abstract Syntax Tree (AST) types for SQL statements.
//!
//! Every node carries the [`Span`](crate::lexer::Span) of the source text
//! it was parsed from. Nodes render back to SQL through `Display` and can
//! be traversed uniformly through [`Node`].

mod display;
mod drift;
mod expression;
mod node;
mod schema;
mod statement;
mod types;
mod window;

pub use display::Ident;
pub use drift::{
    DeclaredStatement, DriftFile, DriftStatement, ImportStatement, StatementParameter,
};
pub use expression::{
    BinaryOp, Expr, FunctionParameters, InSource, LikeOp, Literal, Over, RaiseAction, UnaryOp,
    VariableKind, WhenClause,
};
pub use node::Node;
pub use schema::{
    ColumnConstraint, ColumnConstraintKind, ColumnDefinition, CreateIndexStatement,
    CreateTableStatement, CreateTriggerStatement, CreateViewStatement,
    CreateVirtualTableStatement, Deferrable, ForeignKeyClause, Fts5Column, GeneratedStorage,
    IndexedColumn, ReferentialAction, ReferentialEvent, RowClassAnnotation, TableConstraint,
    TableConstraintKind, TriggerEvent, TriggerTiming, VirtualTableModule,
};
pub use statement::{
    Assignment, CommonTableExpression, CompoundOperator, CompoundPart, ConflictResolution,
    ConflictTarget, DeleteStatement, InsertMode, InsertSource, InsertStatement, JoinClause,
    JoinConstraint, JoinType, LimitClause, LimitKind, ResultColumn, ReturningClause,
    SelectClause, SelectCore, SelectStatement, Statement, TableIndexing, TableRef,
    UpdateStatement, UpsertAction, UpsertClause, ValuesClause, WithClause,
};
pub use types::{Affinity, EnumMapping, EnumStorage, TypeName};
pub use window::{
    ExcludeMode, FrameBoundary, FrameSpec, FrameType, NamedWindow, NullOrdering,
    OrderByClause, OrderDirection, OrderingItem, OrderingTerm, WindowDefinition,
};

//! AST types for drift files.

use super::{Expr, Statement, TypeName, VariableKind};
use crate::lexer::Span;

/// `import 'uri';`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportStatement {
    /// The imported URI, unquoted.
    pub uri: String,
    /// Source span.
    pub span: Span,
}

/// A type hint for a statement parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum StatementParameter {
    /// `[REQUIRED] :var [AS type [OR NULL]]`
    VariableType {
        /// The hinted variable.
        variable: VariableKind,
        /// Whether REQUIRED was specified.
        required: bool,
        /// The declared type.
        type_name: Option<TypeName>,
        /// Whether `OR NULL` was specified.
        or_null: bool,
        /// Source span.
        span: Span,
    },
    /// `$placeholder = default_expr`
    DefaultValue {
        /// The placeholder name without `$`.
        name: String,
        /// The default expression.
        default: Expr,
        /// Source span.
        span: Span,
    },
}

impl StatementParameter {
    /// Returns the source span of this hint.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::VariableType { span, .. } | Self::DefaultValue { span, .. } => *span,
        }
    }
}

/// `name[(hints)] [AS ResultClass]: statement;`
#[derive(Debug, Clone, PartialEq)]
pub struct DeclaredStatement {
    /// The query name.
    pub name: String,
    /// Parameter hints.
    pub parameters: Vec<StatementParameter>,
    /// Name of the Dart result class.
    pub result_class: Option<String>,
    /// The statement.
    pub statement: Statement,
    /// Source span, excluding the terminating `;`.
    pub span: Span,
}

/// One top-level entry of a drift file.
#[derive(Debug, Clone, PartialEq)]
pub enum DriftStatement {
    /// `import 'uri';`
    Import(ImportStatement),
    /// A named query.
    Declared(DeclaredStatement),
    /// `@create: statement;`: runs when the database is created.
    OnCreate {
        /// The statement.
        statement: Statement,
        /// Source span.
        span: Span,
    },
    /// A plain SQL statement (usually a CREATE).
    Plain(Statement),
}

impl DriftStatement {
    /// Returns the source span of this entry.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Import(import) => import.span,
            Self::Declared(declared) => declared.span,
            Self::OnCreate { span, .. } => *span,
            Self::Plain(statement) => statement.span(),
        }
    }
}

/// A parsed drift file.
#[derive(Debug, Clone, PartialEq)]
pub struct DriftFile {
    /// The entries in source order.
    pub statements: Vec<DriftStatement>,
    /// Source span of all entries; empty for an empty file.
    pub span: Span,
}

impl DriftFile {
    /// Returns the imports of this file.
    pub fn imports(&self) -> impl Iterator<Item = &ImportStatement> {
        self.statements.iter().filter_map(|s| match s {
            DriftStatement::Import(import) => Some(import),
            _ => None,
        })
    }

    /// Returns the named queries of this file.
    pub fn declared_statements(&self) -> impl Iterator<Item = &DeclaredStatement> {
        self.statements.iter().filter_map(|s| match s {
            DriftStatement::Declared(declared) => Some(declared),
            _ => None,
        })
    }
}

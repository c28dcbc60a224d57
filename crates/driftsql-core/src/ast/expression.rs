//! Expression AST types.

use super::{OrderByClause, SelectStatement, TypeName, WindowDefinition};
use crate::lexer::Span;

/// A literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Integer literal.
    Integer(i64),
    /// Float literal.
    Float(f64),
    /// String literal.
    String(String),
    /// Blob literal.
    Blob(Vec<u8>),
    /// Boolean literal (`TRUE` / `FALSE`).
    Boolean(bool),
    /// NULL literal.
    Null,
    /// `CURRENT_TIME`
    CurrentTime,
    /// `CURRENT_DATE`
    CurrentDate,
    /// `CURRENT_TIMESTAMP`
    CurrentTimestamp,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Is,
    IsNot,

    // Logical
    And,
    Or,

    // String and JSON
    Concat,
    JsonExtract,
    JsonExtractText,

    // Bitwise
    BitAnd,
    BitOr,
    LeftShift,
    RightShift,
}

impl BinaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Is => "IS",
            Self::IsNot => "IS NOT",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Concat => "||",
            Self::JsonExtract => "->",
            Self::JsonExtractText => "->>",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Negation (-)
    Neg,
    /// Identity (+)
    Plus,
    /// Logical NOT
    Not,
    /// Bitwise NOT (~)
    BitNot,
}

impl UnaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Plus => "+",
            Self::Not => "NOT",
            Self::BitNot => "~",
        }
    }
}

/// Pattern-matching operators sharing the `[NOT] op pattern [ESCAPE e]` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeOp {
    Like,
    Glob,
    Match,
    Regexp,
}

impl LikeOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "LIKE",
            Self::Glob => "GLOB",
            Self::Match => "MATCH",
            Self::Regexp => "REGEXP",
        }
    }
}

/// A bound variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariableKind {
    /// `?`
    Anonymous,
    /// `?NNN`
    Numbered(u32),
    /// `:name`, `@name` or `$name`.
    Named {
        /// The prefix character.
        prefix: char,
        /// The name without its prefix.
        name: String,
    },
}

/// The right-hand side of an `IN` expression.
#[derive(Debug, Clone, PartialEq)]
pub enum InSource {
    /// `IN (a, b, c)`, possibly empty.
    List(Vec<Expr>),
    /// `IN (SELECT ...)`
    Subquery(Box<SelectStatement>),
    /// `IN table_name` or `IN schema.table_name`.
    Table {
        /// Schema name (optional).
        schema: Option<String>,
        /// Table name.
        name: String,
        /// Source span.
        span: Span,
    },
    /// `IN :array`: a single variable expanded to a list at runtime.
    Variable(Box<Expr>),
}

/// One `WHEN ... THEN ...` branch of a CASE expression.
#[derive(Debug, Clone, PartialEq)]
pub struct WhenClause {
    /// The WHEN condition.
    pub when: Expr,
    /// The THEN result.
    pub then: Expr,
    /// Source span.
    pub span: Span,
}

/// The parameter list of a function invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionParameters {
    /// `f()`
    None,
    /// `f(*)`
    Star,
    /// `f([DISTINCT] a, b, ...)`
    List {
        /// Whether `DISTINCT` precedes the arguments.
        distinct: bool,
        /// The arguments.
        args: Vec<Expr>,
    },
}

impl FunctionParameters {
    /// Returns the argument expressions (empty for `()` and `(*)`).
    #[must_use]
    pub fn args(&self) -> &[Expr] {
        match self {
            Self::List { args, .. } => args,
            Self::None | Self::Star => &[],
        }
    }
}

/// The `OVER` part of a window function invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Over {
    /// `OVER (...)`
    Window(WindowDefinition),
    /// `OVER window_name`
    Named {
        /// Name of a window declared in the `WINDOW` clause.
        name: String,
        /// Source span of the name.
        span: Span,
    },
}

/// The action of a `RAISE(...)` expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaiseAction {
    Ignore,
    Rollback,
    Abort,
    Fail,
}

impl RaiseAction {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ignore => "IGNORE",
            Self::Rollback => "ROLLBACK",
            Self::Abort => "ABORT",
            Self::Fail => "FAIL",
        }
    }
}

/// An SQL expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value.
    Literal {
        /// The value.
        value: Literal,
        /// Source span.
        span: Span,
    },

    /// A column reference, optionally qualified with table and schema.
    Reference {
        /// Schema name (optional).
        schema: Option<String>,
        /// Table name or alias (optional).
        table: Option<String>,
        /// Column name.
        column: String,
        /// Source span.
        span: Span,
    },

    /// A bound variable.
    Variable {
        /// The variable form.
        kind: VariableKind,
        /// Source span.
        span: Span,
    },

    /// A drift `$name` placeholder replaced by a whole expression at runtime.
    Placeholder {
        /// The name without `$`.
        name: String,
        /// Source span.
        span: Span,
    },

    /// A unary expression.
    Unary {
        /// Operator.
        op: UnaryOp,
        /// Operand.
        operand: Box<Expr>,
        /// Source span.
        span: Span,
    },

    /// A binary expression.
    Binary {
        /// Left operand.
        left: Box<Expr>,
        /// Operator.
        op: BinaryOp,
        /// Right operand.
        right: Box<Expr>,
        /// Source span.
        span: Span,
    },

    /// `expr COLLATE name`
    Collate {
        /// The collated expression.
        expr: Box<Expr>,
        /// Collation name.
        collation: String,
        /// Source span.
        span: Span,
    },

    /// `IS [NOT] NULL`, `ISNULL`, `NOTNULL` and `NOT NULL`.
    IsNull {
        /// The expression to check.
        expr: Box<Expr>,
        /// Whether this is the NOT NULL form.
        negated: bool,
        /// Source span.
        span: Span,
    },

    /// `[NOT] LIKE | GLOB | MATCH | REGEXP`
    Like {
        /// The matched expression.
        expr: Box<Expr>,
        /// The operator.
        op: LikeOp,
        /// The pattern.
        pattern: Box<Expr>,
        /// The ESCAPE character expression.
        escape: Option<Box<Expr>>,
        /// Whether NOT precedes the operator.
        negated: bool,
        /// Source span.
        span: Span,
    },

    /// `[NOT] IN`
    In {
        /// The expression to check.
        expr: Box<Expr>,
        /// The values to check against.
        source: InSource,
        /// Whether this is NOT IN.
        negated: bool,
        /// Source span.
        span: Span,
    },

    /// `[NOT] BETWEEN low AND high`
    Between {
        /// The expression to check.
        expr: Box<Expr>,
        /// Lower bound.
        low: Box<Expr>,
        /// Upper bound.
        high: Box<Expr>,
        /// Whether this is NOT BETWEEN.
        negated: bool,
        /// Source span.
        span: Span,
    },

    /// CASE expression.
    Case {
        /// The operand (if any).
        operand: Option<Box<Expr>>,
        /// WHEN/THEN clauses, at least one.
        whens: Vec<WhenClause>,
        /// ELSE clause.
        else_clause: Option<Box<Expr>>,
        /// Source span.
        span: Span,
    },

    /// `CAST(expr AS type)`
    Cast {
        /// Expression to cast.
        expr: Box<Expr>,
        /// Target type.
        type_name: TypeName,
        /// Source span.
        span: Span,
    },

    /// `[NOT] EXISTS (select)`
    Exists {
        /// The subquery.
        query: Box<SelectStatement>,
        /// Whether NOT precedes EXISTS.
        negated: bool,
        /// Source span.
        span: Span,
    },

    /// A scalar subquery `(select)`.
    Subquery {
        /// The subquery.
        query: Box<SelectStatement>,
        /// Source span, including the parentheses.
        span: Span,
    },

    /// A row value `(a, b, ...)` with at least two items.
    Tuple {
        /// The items.
        items: Vec<Expr>,
        /// Source span, including the parentheses.
        span: Span,
    },

    /// A parenthesized expression.
    Parentheses {
        /// The inner expression.
        expr: Box<Expr>,
        /// Source span, including the parentheses.
        span: Span,
    },

    /// A plain function call.
    Function {
        /// The function name.
        name: String,
        /// The parameter list.
        parameters: FunctionParameters,
        /// Source span.
        span: Span,
    },

    /// A function call with an aggregate-only clause: `FILTER` or an
    /// `ORDER BY` inside the argument list.
    AggregateFunction {
        /// The function name.
        name: String,
        /// The parameter list.
        parameters: FunctionParameters,
        /// `ORDER BY` inside the argument list.
        order_by: Option<OrderByClause>,
        /// `FILTER (WHERE ...)` condition.
        filter: Option<Box<Expr>>,
        /// Source span.
        span: Span,
    },

    /// A function call with an `OVER` clause.
    WindowFunction {
        /// The function name.
        name: String,
        /// The parameter list.
        parameters: FunctionParameters,
        /// `FILTER (WHERE ...)` condition.
        filter: Option<Box<Expr>>,
        /// The window.
        over: Over,
        /// Source span.
        span: Span,
    },

    /// `RAISE(IGNORE)` or `RAISE(action, message)`, only valid in triggers.
    Raise {
        /// The action.
        action: RaiseAction,
        /// The error message, absent for IGNORE.
        message: Option<Box<Expr>>,
        /// Source span.
        span: Span,
    },
}

impl Expr {
    /// Returns the source span of this expression.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Literal { span, .. }
            | Self::Reference { span, .. }
            | Self::Variable { span, .. }
            | Self::Placeholder { span, .. }
            | Self::Unary { span, .. }
            | Self::Binary { span, .. }
            | Self::Collate { span, .. }
            | Self::IsNull { span, .. }
            | Self::Like { span, .. }
            | Self::In { span, .. }
            | Self::Between { span, .. }
            | Self::Case { span, .. }
            | Self::Cast { span, .. }
            | Self::Exists { span, .. }
            | Self::Subquery { span, .. }
            | Self::Tuple { span, .. }
            | Self::Parentheses { span, .. }
            | Self::Function { span, .. }
            | Self::AggregateFunction { span, .. }
            | Self::WindowFunction { span, .. }
            | Self::Raise { span, .. } => *span,
        }
    }

    /// Returns the function name if this is any kind of function invocation.
    #[must_use]
    pub fn function_name(&self) -> Option<&str> {
        match self {
            Self::Function { name, .. }
            | Self::AggregateFunction { name, .. }
            | Self::WindowFunction { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Returns the parameter list if this is any kind of function invocation.
    #[must_use]
    pub const fn function_parameters(&self) -> Option<&FunctionParameters> {
        match self {
            Self::Function { parameters, .. }
            | Self::AggregateFunction { parameters, .. }
            | Self::WindowFunction { parameters, .. } => Some(parameters),
            _ => None,
        }
    }

    /// Removes any number of enclosing parentheses.
    #[must_use]
    pub fn unparenthesized(&self) -> &Self {
        let mut expr = self;
        while let Self::Parentheses { expr: inner, .. } = expr {
            expr = inner;
        }
        expr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(name: &str, span: Span) -> Expr {
        Expr::Reference {
            schema: None,
            table: None,
            column: String::from(name),
            span,
        }
    }

    #[test]
    fn test_operator_strings() {
        assert_eq!(BinaryOp::IsNot.as_str(), "IS NOT");
        assert_eq!(BinaryOp::JsonExtractText.as_str(), "->>");
        assert_eq!(UnaryOp::BitNot.as_str(), "~");
        assert_eq!(LikeOp::Regexp.as_str(), "REGEXP");
        assert_eq!(RaiseAction::Abort.as_str(), "ABORT");
    }

    #[test]
    fn test_expr_span() {
        let left = reference("a", Span::new(0, 1));
        let right = reference("b", Span::new(4, 5));
        let expr = Expr::Binary {
            left: Box::new(left),
            op: BinaryOp::Add,
            right: Box::new(right),
            span: Span::new(0, 5),
        };
        assert_eq!(expr.span(), Span::new(0, 5));
    }

    #[test]
    fn test_function_accessors() {
        let call = Expr::Function {
            name: String::from("max"),
            parameters: FunctionParameters::List {
                distinct: false,
                args: vec![reference("x", Span::new(4, 5))],
            },
            span: Span::new(0, 6),
        };
        assert_eq!(call.function_name(), Some("max"));
        assert_eq!(call.function_parameters().map(|p| p.args().len()), Some(1));
        assert!(FunctionParameters::Star.args().is_empty());
        assert_eq!(reference("x", Span::new(0, 1)).function_name(), None);
    }

    #[test]
    fn test_unparenthesized() {
        let inner = reference("x", Span::new(2, 3));
        let expr = Expr::Parentheses {
            expr: Box::new(Expr::Parentheses {
                expr: Box::new(inner.clone()),
                span: Span::new(1, 4),
            }),
            span: Span::new(0, 5),
        };
        assert_eq!(expr.unparenthesized(), &inner);
    }
}

//! Ordering terms and window definitions.

use super::Expr;
use crate::lexer::Span;

/// Order direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
    /// Ascending order (default).
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl OrderDirection {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Null ordering for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullOrdering {
    /// NULLs come first.
    First,
    /// NULLs come last.
    Last,
}

impl NullOrdering {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::First => "NULLS FIRST",
            Self::Last => "NULLS LAST",
        }
    }
}

/// An ORDER BY entry: `expr [ASC|DESC] [NULLS FIRST|LAST]`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderingTerm {
    /// The expression to order by.
    pub expr: Expr,
    /// The direction as written, `None` when omitted.
    pub direction: Option<OrderDirection>,
    /// Null ordering (optional).
    pub nulls: Option<NullOrdering>,
    /// Source span.
    pub span: Span,
}

impl OrderingTerm {
    /// Returns the effective direction (ascending when omitted).
    #[must_use]
    pub fn resolved_direction(&self) -> OrderDirection {
        self.direction.unwrap_or_default()
    }
}

/// An item of an ORDER BY list.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderingItem {
    /// A regular ordering term.
    Term(OrderingTerm),
    /// A drift `$name` placeholder standing for one or more terms.
    Placeholder {
        /// The name without `$`.
        name: String,
        /// Source span.
        span: Span,
    },
}

impl OrderingItem {
    /// Returns the source span of this item.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Term(term) => term.span,
            Self::Placeholder { span, .. } => *span,
        }
    }
}

/// An `ORDER BY` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderByClause {
    /// The items, at least one.
    pub items: Vec<OrderingItem>,
    /// Source span, starting at `ORDER`.
    pub span: Span,
}

impl OrderByClause {
    /// Returns the regular ordering terms, skipping placeholders.
    pub fn terms(&self) -> impl Iterator<Item = &OrderingTerm> {
        self.items.iter().filter_map(|item| match item {
            OrderingItem::Term(term) => Some(term),
            OrderingItem::Placeholder { .. } => None,
        })
    }
}

/// The unit of a window frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameType {
    /// Frame offsets count rows.
    Rows,
    /// Frame offsets compare ordering values.
    Range,
    /// Frame offsets count peer groups.
    Groups,
}

impl FrameType {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rows => "ROWS",
            Self::Range => "RANGE",
            Self::Groups => "GROUPS",
        }
    }
}

/// One end of a window frame.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameBoundary {
    /// `UNBOUNDED PRECEDING`
    UnboundedPreceding,
    /// `expr PRECEDING`
    Preceding(Box<Expr>),
    /// `CURRENT ROW`
    CurrentRow,
    /// `expr FOLLOWING`
    Following(Box<Expr>),
    /// `UNBOUNDED FOLLOWING`
    UnboundedFollowing,
}

impl FrameBoundary {
    /// Returns the offset expression of a `PRECEDING`/`FOLLOWING` boundary.
    #[must_use]
    pub fn offset(&self) -> Option<&Expr> {
        match self {
            Self::Preceding(expr) | Self::Following(expr) => Some(expr),
            _ => None,
        }
    }
}

/// Rows excluded from a window frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExcludeMode {
    /// `EXCLUDE NO OTHERS` (default).
    #[default]
    NoOthers,
    /// `EXCLUDE CURRENT ROW`
    CurrentRow,
    /// `EXCLUDE GROUP`
    Group,
    /// `EXCLUDE TIES`
    Ties,
}

impl ExcludeMode {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NoOthers => "EXCLUDE NO OTHERS",
            Self::CurrentRow => "EXCLUDE CURRENT ROW",
            Self::Group => "EXCLUDE GROUP",
            Self::Ties => "EXCLUDE TIES",
        }
    }
}

/// A window frame.
///
/// A frame written with a single boundary has `end == CurrentRow`.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSpec {
    /// The frame unit.
    pub frame_type: FrameType,
    /// The start boundary.
    pub start: FrameBoundary,
    /// The end boundary.
    pub end: FrameBoundary,
    /// The exclusion mode.
    pub exclude: ExcludeMode,
    /// Source span; empty for the implicit default frame.
    pub span: Span,
}

impl Default for FrameSpec {
    /// The frame SQLite applies when a window has no frame clause:
    /// `RANGE BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW EXCLUDE NO OTHERS`.
    fn default() -> Self {
        Self {
            frame_type: FrameType::Range,
            start: FrameBoundary::UnboundedPreceding,
            end: FrameBoundary::CurrentRow,
            exclude: ExcludeMode::NoOthers,
            span: Span::default(),
        }
    }
}

/// The body of an `OVER (...)` clause or of a `WINDOW name AS (...)` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowDefinition {
    /// The window this one extends.
    pub base_window_name: Option<String>,
    /// `PARTITION BY` expressions.
    pub partition_by: Vec<Expr>,
    /// `ORDER BY` terms.
    pub order_by: Option<OrderByClause>,
    /// The explicit frame clause, if any.
    pub frame: Option<FrameSpec>,
    /// Source span, including the parentheses.
    pub span: Span,
}

impl WindowDefinition {
    /// Returns the frame in effect: the explicit one or [`FrameSpec::default`].
    #[must_use]
    pub fn frame_spec(&self) -> FrameSpec {
        self.frame.clone().unwrap_or_default()
    }
}

/// A `name AS (window)` entry of a `WINDOW` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedWindow {
    /// The window name.
    pub name: String,
    /// The definition.
    pub definition: WindowDefinition,
    /// Source span.
    pub span: Span,
}

//! Source location tracking for tokens and AST nodes.

use core::fmt;

/// Represents a span in the source code.
///
/// `start..end` is a half-open byte range. `line` and `column` locate
/// `start` and are 1-based; a span that was not produced from source text
/// (see [`Span::default`]) reports line 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
    /// Line of `start` (1-based).
    pub line: u32,
    /// Column of `start`, counted in characters (1-based).
    pub column: u32,
}

impl Span {
    /// Creates a new span without position information.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            line: 0,
            column: 0,
        }
    }

    /// Creates a new span starting at the given line and column.
    #[must_use]
    pub const fn with_position(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// Returns the length of the span in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if the span is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Merges two spans into one that covers both.
    ///
    /// The position of the earlier span is kept.
    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        let (start, line, column) = if self.start <= other.start {
            (self.start, self.line, self.column)
        } else {
            (other.start, other.line, other.column)
        };
        let end = if self.end > other.end {
            self.end
        } else {
            other.end
        };
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// Returns true if `other` lies completely within this span.
    #[must_use]
    pub const fn contains(&self, other: &Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Returns the source text covered by this span.
    ///
    /// Returns an empty string if the span does not fit into `source`.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.start..self.end).unwrap_or("")
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_new() {
        let span = Span::new(5, 10);
        assert_eq!(span.start, 5);
        assert_eq!(span.end, 10);
        assert_eq!(span.line, 0);
    }

    #[test]
    fn test_span_len() {
        let span = Span::new(5, 10);
        assert_eq!(span.len(), 5);
    }

    #[test]
    fn test_span_is_empty() {
        let empty = Span::new(5, 5);
        let non_empty = Span::new(5, 10);
        assert!(empty.is_empty());
        assert!(!non_empty.is_empty());
    }

    #[test]
    fn test_span_merge_keeps_earliest_position() {
        let first = Span::with_position(5, 10, 2, 3);
        let second = Span::with_position(8, 15, 2, 6);
        let merged = second.merge(first);
        assert_eq!(merged.start, 5);
        assert_eq!(merged.end, 15);
        assert_eq!((merged.line, merged.column), (2, 3));
    }

    #[test]
    fn test_span_contains_and_text() {
        let outer = Span::new(0, 10);
        assert!(outer.contains(&Span::new(2, 10)));
        assert!(!outer.contains(&Span::new(2, 11)));
        assert_eq!(Span::new(7, 9).text("SELECT id"), "id");
        assert_eq!(Span::new(7, 90).text("SELECT id"), "");
    }
}

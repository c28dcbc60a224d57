//! Token types for the SQL lexer.

use super::Span;

macro_rules! keywords {
    ($($variant:ident => $text:literal),* $(,)?) => {
        /// SQL keywords, including the drift extensions.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Keyword {
            $(
                #[doc = concat!("`", $text, "`")]
                $variant,
            )*
        }

        impl Keyword {
            /// Every keyword, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// Attempts to parse a keyword from a string (case-insensitive).
            #[must_use]
            #[allow(clippy::should_implement_trait)]
            pub fn from_str(s: &str) -> Option<Self> {
                match s.to_ascii_uppercase().as_str() {
                    $($text => Some(Self::$variant),)*
                    _ => None,
                }
            }

            /// Returns the keyword as a string.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)*
                }
            }
        }
    };
}

keywords! {
    Abort => "ABORT",
    Action => "ACTION",
    After => "AFTER",
    All => "ALL",
    Always => "ALWAYS",
    And => "AND",
    As => "AS",
    Asc => "ASC",
    Autoincrement => "AUTOINCREMENT",
    Before => "BEFORE",
    Begin => "BEGIN",
    Between => "BETWEEN",
    By => "BY",
    Cascade => "CASCADE",
    Case => "CASE",
    Cast => "CAST",
    Check => "CHECK",
    Collate => "COLLATE",
    Conflict => "CONFLICT",
    Constraint => "CONSTRAINT",
    Create => "CREATE",
    Cross => "CROSS",
    Current => "CURRENT",
    CurrentDate => "CURRENT_DATE",
    CurrentTime => "CURRENT_TIME",
    CurrentTimestamp => "CURRENT_TIMESTAMP",
    Default => "DEFAULT",
    Deferrable => "DEFERRABLE",
    Deferred => "DEFERRED",
    Delete => "DELETE",
    Desc => "DESC",
    Distinct => "DISTINCT",
    Do => "DO",
    Each => "EACH",
    Else => "ELSE",
    End => "END",
    Escape => "ESCAPE",
    Except => "EXCEPT",
    Exclude => "EXCLUDE",
    Exists => "EXISTS",
    Fail => "FAIL",
    False => "FALSE",
    Filter => "FILTER",
    First => "FIRST",
    Following => "FOLLOWING",
    For => "FOR",
    Foreign => "FOREIGN",
    From => "FROM",
    Full => "FULL",
    Generated => "GENERATED",
    Glob => "GLOB",
    Group => "GROUP",
    Groups => "GROUPS",
    Having => "HAVING",
    If => "IF",
    Ignore => "IGNORE",
    Immediate => "IMMEDIATE",
    Import => "IMPORT",
    In => "IN",
    Index => "INDEX",
    Indexed => "INDEXED",
    Initially => "INITIALLY",
    Inner => "INNER",
    Insert => "INSERT",
    Instead => "INSTEAD",
    Intersect => "INTERSECT",
    Into => "INTO",
    Is => "IS",
    Isnull => "ISNULL",
    Join => "JOIN",
    Json => "JSON",
    Key => "KEY",
    Last => "LAST",
    Left => "LEFT",
    Like => "LIKE",
    Limit => "LIMIT",
    Mapped => "MAPPED",
    Match => "MATCH",
    Materialized => "MATERIALIZED",
    Natural => "NATURAL",
    No => "NO",
    Not => "NOT",
    Nothing => "NOTHING",
    Notnull => "NOTNULL",
    Null => "NULL",
    Nulls => "NULLS",
    Of => "OF",
    Offset => "OFFSET",
    On => "ON",
    Or => "OR",
    Order => "ORDER",
    Others => "OTHERS",
    Outer => "OUTER",
    Over => "OVER",
    Partition => "PARTITION",
    Preceding => "PRECEDING",
    Primary => "PRIMARY",
    Raise => "RAISE",
    Range => "RANGE",
    Recursive => "RECURSIVE",
    References => "REFERENCES",
    Regexp => "REGEXP",
    Replace => "REPLACE",
    Required => "REQUIRED",
    Restrict => "RESTRICT",
    Returning => "RETURNING",
    Right => "RIGHT",
    Rollback => "ROLLBACK",
    Row => "ROW",
    Rows => "ROWS",
    Select => "SELECT",
    Set => "SET",
    Stored => "STORED",
    Strict => "STRICT",
    Table => "TABLE",
    Temp => "TEMP",
    Temporary => "TEMPORARY",
    Then => "THEN",
    Ties => "TIES",
    Trigger => "TRIGGER",
    True => "TRUE",
    Unbounded => "UNBOUNDED",
    Union => "UNION",
    Unique => "UNIQUE",
    Update => "UPDATE",
    Using => "USING",
    Values => "VALUES",
    View => "VIEW",
    Virtual => "VIRTUAL",
    When => "WHEN",
    Where => "WHERE",
    Window => "WINDOW",
    With => "WITH",
    Without => "WITHOUT",
}

impl Keyword {
    /// Returns true if the keyword may also be used as an identifier.
    ///
    /// Mirrors SQLite's fallback list: these words only have a special
    /// meaning in specific grammar positions.
    #[must_use]
    pub const fn can_be_identifier(&self) -> bool {
        matches!(
            self,
            Self::Abort
                | Self::Action
                | Self::After
                | Self::Always
                | Self::Asc
                | Self::Before
                | Self::Begin
                | Self::By
                | Self::Cascade
                | Self::Conflict
                | Self::Current
                | Self::Deferred
                | Self::Desc
                | Self::Do
                | Self::Each
                | Self::End
                | Self::Exclude
                | Self::Fail
                | Self::Filter
                | Self::First
                | Self::Following
                | Self::For
                | Self::Generated
                | Self::Groups
                | Self::Ignore
                | Self::Immediate
                | Self::Import
                | Self::Initially
                | Self::Instead
                | Self::Json
                | Self::Key
                | Self::Last
                | Self::Mapped
                | Self::Materialized
                | Self::No
                | Self::Nothing
                | Self::Nulls
                | Self::Of
                | Self::Offset
                | Self::Others
                | Self::Over
                | Self::Partition
                | Self::Preceding
                | Self::Raise
                | Self::Range
                | Self::Recursive
                | Self::Replace
                | Self::Required
                | Self::Restrict
                | Self::Returning
                | Self::Rollback
                | Self::Row
                | Self::Rows
                | Self::Stored
                | Self::Strict
                | Self::Temp
                | Self::Ties
                | Self::Trigger
                | Self::Unbounded
                | Self::View
                | Self::Virtual
                | Self::Window
                | Self::Without
        )
    }
}

impl Keyword {
    /// Returns true if the keyword can name a function when followed by `(`,
    /// e.g. `replace(x, 'a', 'b')` or `like(pattern, x)`.
    #[must_use]
    pub const fn can_name_function(&self) -> bool {
        self.can_be_identifier()
            || matches!(self, Self::Like | Self::Glob | Self::Match | Self::Regexp)
    }
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    /// Integer literal (e.g., 42, 0x2A)
    Integer(i64),
    /// Float literal (e.g., 3.14, 1e10)
    Float(f64),
    /// String literal (e.g., 'hello'), unescaped
    String(String),
    /// Blob literal (e.g., X'1234')
    Blob(Vec<u8>),

    // Identifiers and keywords
    /// Identifier (e.g., column_name, "quoted", [quoted], `quoted`)
    Identifier(String),
    /// SQL keyword
    Keyword(Keyword),

    // Variables
    /// ?
    Question,
    /// ?NNN
    NumberedParameter(u32),
    /// :name
    ColonParameter(String),
    /// @name
    AtParameter(String),
    /// $name
    DollarParameter(String),
    /// `dart code` (drift mode only)
    InlineDart(String),

    // Operators
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// ** (drift mode only)
    DoubleStar,
    /// /
    Slash,
    /// %
    Percent,
    /// =
    Eq,
    /// ==
    DoubleEq,
    /// !=
    NotEq,
    /// <>
    LtGt,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,
    /// ||
    Concat,
    /// ->
    Arrow,
    /// ->>
    DoubleArrow,
    /// &
    BitAnd,
    /// |
    BitOr,
    /// ~
    BitNot,
    /// <<
    LeftShift,
    /// >>
    RightShift,

    // Delimiters
    /// (
    LeftParen,
    /// )
    RightParen,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// .
    Dot,
    /// :
    Colon,

    // Special
    /// End of input
    Eof,
    /// Invalid/unknown token
    Error(String),
}

impl TokenKind {
    /// Returns true if the token can name something: identifiers and
    /// keywords that fall back to identifiers.
    #[must_use]
    pub const fn is_identifier_like(&self) -> bool {
        match self {
            Self::Identifier(_) => true,
            Self::Keyword(kw) => kw.can_be_identifier(),
            _ => false,
        }
    }
}

/// A token with its span in the source code.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    /// The kind of token.
    pub kind: TokenKind,
    /// The source text of the token, verbatim.
    pub lexeme: &'a str,
    /// The location in the source code.
    pub span: Span,
}

impl<'a> Token<'a> {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, lexeme: &'a str, span: Span) -> Self {
        Self { kind, lexeme, span }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns true if this is a keyword.
    #[must_use]
    pub const fn is_keyword(&self) -> bool {
        matches!(self.kind, TokenKind::Keyword(_))
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_from_str() {
        assert_eq!(Keyword::from_str("SELECT"), Some(Keyword::Select));
        assert_eq!(Keyword::from_str("select"), Some(Keyword::Select));
        assert_eq!(Keyword::from_str("SeLeCt"), Some(Keyword::Select));
        assert_eq!(
            Keyword::from_str("current_timestamp"),
            Some(Keyword::CurrentTimestamp)
        );
        assert_eq!(Keyword::from_str("not_a_keyword"), None);
        assert_eq!(Keyword::from_str("rowid"), None);
    }

    #[test]
    fn test_keyword_as_str_round_trips() {
        for kw in Keyword::ALL {
            assert_eq!(Keyword::from_str(kw.as_str()), Some(*kw));
        }
    }

    #[test]
    fn test_fallback_keywords() {
        assert!(Keyword::Key.can_be_identifier());
        assert!(Keyword::Row.can_be_identifier());
        assert!(!Keyword::Select.can_be_identifier());
        assert!(!Keyword::From.can_be_identifier());
        assert!(TokenKind::Keyword(Keyword::Filter).is_identifier_like());
        assert!(!TokenKind::Comma.is_identifier_like());
    }

    #[test]
    fn test_token_is_eof() {
        let eof = Token::new(TokenKind::Eof, "", Span::new(0, 0));
        let select = Token::new(TokenKind::Keyword(Keyword::Select), "SELECT", Span::new(0, 6));
        assert!(eof.is_eof());
        assert!(!select.is_eof());
        assert!(select.is_keyword());
    }

    #[test]
    fn test_token_as_keyword() {
        let select = Token::new(TokenKind::Keyword(Keyword::Select), "select", Span::new(0, 6));
        let plus = Token::new(TokenKind::Plus, "+", Span::new(0, 1));
        assert_eq!(select.as_keyword(), Some(Keyword::Select));
        assert_eq!(plus.as_keyword(), None);
    }
}

//! Parser error types.

use crate::lexer::{Span, Token, TokenKind};

/// The category of a parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The lexer produced an error token (unterminated literal, stray
    /// character, malformed number).
    Lex,
    /// A token that is not valid at this position.
    UnexpectedToken,
    /// The input ended in the middle of a construct.
    UnexpectedEnd,
    /// Valid syntax that the active dialect does not support.
    Unsupported,
    /// A recognized construct with an illegal shape, such as a window
    /// frame starting at `UNBOUNDED FOLLOWING`.
    Invalid,
}

/// A parse error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message} at {span}")]
pub struct ParseError {
    /// The error category.
    pub kind: ParseErrorKind,
    /// The error message.
    pub message: String,
    /// The location of the error.
    pub span: Span,
    /// Expected tokens (if applicable).
    pub expected: Option<String>,
    /// The actual token found.
    pub found: Option<TokenKind>,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(kind: ParseErrorKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            message: message.into(),
            span,
            expected: None,
            found: None,
        }
    }

    /// Creates an error for `found` appearing where `expected` was required.
    ///
    /// An EOF token yields [`ParseErrorKind::UnexpectedEnd`] and an error
    /// token yields [`ParseErrorKind::Lex`] carrying the lexer's message.
    #[must_use]
    pub fn unexpected(expected: impl Into<String>, found: &Token<'_>) -> Self {
        let expected: String = expected.into();
        let (kind, message) = match &found.kind {
            TokenKind::Eof => (
                ParseErrorKind::UnexpectedEnd,
                format!("Unexpected end of input: expected {expected}"),
            ),
            TokenKind::Error(message) => (ParseErrorKind::Lex, message.clone()),
            _ => (
                ParseErrorKind::UnexpectedToken,
                format!(
                    "Unexpected token: expected {expected}, found '{}'",
                    found.lexeme
                ),
            ),
        };
        Self {
            kind,
            message,
            span: found.span,
            expected: Some(expected),
            found: Some(found.kind.clone()),
        }
    }

    /// Creates an error for syntax the active dialect does not support.
    #[must_use]
    pub fn unsupported(feature: &str, dialect: &str, span: Span) -> Self {
        Self::new(
            ParseErrorKind::Unsupported,
            format!("{feature} is not supported by the {dialect} dialect"),
            span,
        )
    }

    /// Creates an error for an illegal construct.
    #[must_use]
    pub fn invalid(message: impl Into<String>, span: Span) -> Self {
        Self::new(ParseErrorKind::Invalid, message, span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Keyword;

    #[test]
    fn test_unexpected_token() {
        let from = Token::new(
            TokenKind::Keyword(Keyword::From),
            "FROM",
            Span::with_position(7, 11, 1, 8),
        );
        let err = ParseError::unexpected("expression", &from);
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
        assert_eq!(err.span, Span::with_position(7, 11, 1, 8));
        assert_eq!(err.expected.as_deref(), Some("expression"));
        assert_eq!(err.found, Some(TokenKind::Keyword(Keyword::From)));
        assert_eq!(
            err.to_string(),
            "Unexpected token: expected expression, found 'FROM' at 1:8"
        );
    }

    #[test]
    fn test_unexpected_eof_and_lex_errors() {
        let eof = Token::new(TokenKind::Eof, "", Span::new(3, 3));
        assert_eq!(
            ParseError::unexpected(")", &eof).kind,
            ParseErrorKind::UnexpectedEnd
        );

        let bad = Token::new(
            TokenKind::Error(String::from("Unterminated string literal")),
            "'abc",
            Span::new(0, 4),
        );
        let err = ParseError::unexpected("expression", &bad);
        assert_eq!(err.kind, ParseErrorKind::Lex);
        assert_eq!(err.message, "Unterminated string literal");
    }

    #[test]
    fn test_unsupported() {
        let err = ParseError::unsupported("RETURNING", "sqlite 3.31.0", Span::new(0, 9));
        assert_eq!(err.kind, ParseErrorKind::Unsupported);
        assert_eq!(
            err.message,
            "RETURNING is not supported by the sqlite 3.31.0 dialect"
        );
    }
}

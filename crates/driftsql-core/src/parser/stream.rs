//! Index-based cursor over a token sequence.

use super::ParseError;
use crate::lexer::{Keyword, Lexer, Span, Token, TokenKind};

/// A saved stream position, restorable with [`TokenStream::restore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

/// A cursor over the tokens of one source text.
///
/// The token vector is never modified; the cursor is a plain index, so
/// checkpoints are copies of that index.
pub struct TokenStream<'a> {
    source: &'a str,
    tokens: Vec<Token<'a>>,
    pos: usize,
}

impl<'a> TokenStream<'a> {
    /// Tokenizes `source` and positions the cursor at the first token.
    #[must_use]
    pub fn new(source: &'a str, drift_extensions: bool) -> Self {
        let tokens = Lexer::new(source)
            .with_drift_extensions(drift_extensions)
            .tokenize();
        Self::from_tokens(source, tokens)
    }

    /// Creates a stream over already scanned tokens.
    ///
    /// An EOF token is appended if `tokens` does not end with one.
    #[must_use]
    pub fn from_tokens(source: &'a str, mut tokens: Vec<Token<'a>>) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            let end = Span::new(source.len(), source.len());
            tokens.push(Token::new(TokenKind::Eof, "", end));
        }
        Self {
            source,
            tokens,
            pos: 0,
        }
    }

    /// Returns the source text.
    #[must_use]
    pub const fn source(&self) -> &'a str {
        self.source
    }

    /// Returns the token `offset` positions ahead; past the end, the EOF token.
    #[must_use]
    pub fn peek(&self, offset: usize) -> &Token<'a> {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + offset).min(last)]
    }

    /// Returns the current token.
    #[must_use]
    pub fn current(&self) -> &Token<'a> {
        self.peek(0)
    }

    /// Returns the kind of the current token.
    #[must_use]
    pub fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    /// Returns the most recently consumed token.
    ///
    /// Before anything was consumed, this is the first token.
    #[must_use]
    pub fn previous(&self) -> &Token<'a> {
        &self.tokens[self.pos.saturating_sub(1)]
    }

    /// Returns true once the cursor has reached EOF.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.current().is_eof()
    }

    /// Consumes the current token and returns it. EOF is never consumed.
    pub fn advance(&mut self) -> Token<'a> {
        let token = self.current().clone();
        if !token.is_eof() {
            self.pos += 1;
        }
        token
    }

    /// Returns true if the current token is `keyword`.
    #[must_use]
    pub fn check_keyword(&self, keyword: Keyword) -> bool {
        self.current().as_keyword() == Some(keyword)
    }

    /// Returns true if the token `offset` ahead is `keyword`.
    #[must_use]
    pub fn check_keyword_at(&self, offset: usize, keyword: Keyword) -> bool {
        self.peek(offset).as_keyword() == Some(keyword)
    }

    /// Returns true if the current token has the same variant as `kind`.
    #[must_use]
    pub fn check(&self, kind: &TokenKind) -> bool {
        core::mem::discriminant(self.current_kind()) == core::mem::discriminant(kind)
    }

    /// Saves the current position.
    #[must_use]
    pub const fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.pos)
    }

    /// Rewinds to a saved position.
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        tracing::trace!(from = self.pos, to = checkpoint.0, "restoring token stream");
        self.pos = checkpoint.0;
    }

    /// Creates an error describing the current token as unexpected.
    #[must_use]
    pub fn error_at(&self, expected: &str) -> ParseError {
        ParseError::unexpected(expected, self.current())
    }

    /// Returns the span from `start` to the end of the last consumed token.
    #[must_use]
    pub fn span_from(&self, start: Span) -> Span {
        let end = self.previous().span.end.max(start.start);
        Span::with_position(start.start, end, start.line, start.column)
    }

    /// Returns the source text between two byte offsets.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        self.source.get(start..end).unwrap_or("")
    }
}

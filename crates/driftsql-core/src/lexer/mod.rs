//! SQL Lexer/Tokenizer
//!
//! This module provides a hand-written lexer for SQL that produces a stream of tokens.

mod span;
mod token;
mod tokenizer;

pub use span::Span;
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::Lexer;

/// Tokenizes `input` as plain SQL, without drift extensions.
///
/// The returned vector always ends with a [`TokenKind::Eof`] token.
#[must_use]
pub fn scan(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).tokenize()
}

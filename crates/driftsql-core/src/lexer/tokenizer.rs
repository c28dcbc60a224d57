//! SQL Tokenizer implementation.

use super::{Keyword, Span, Token, TokenKind};

/// A lexer that tokenizes SQL input.
///
/// Lexing never fails: characters that cannot start a token, unterminated
/// literals and malformed numbers produce [`TokenKind::Error`] tokens and
/// scanning continues after them. Every token's lexeme is exactly the
/// source text of its span; only whitespace and comments are skipped.
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
    /// The current line (1-based).
    line: u32,
    /// The current column (1-based, in characters).
    column: u32,
    /// Line and column of the start of the current token.
    start_position: (u32, u32),
    /// Whether drift-only tokens (inline Dart, `**`) are recognized.
    drift_extensions: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
            line: 1,
            column: 1,
            start_position: (1, 1),
            drift_extensions: false,
        }
    }

    /// Enables or disables drift-only tokens.
    ///
    /// With drift extensions, backtick-quoted text is inline Dart code
    /// instead of a quoted identifier and `**` is a single token.
    #[must_use]
    pub const fn with_drift_extensions(mut self, enabled: bool) -> Self {
        self.drift_extensions = enabled;
        self
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column = self.column.saturating_add(1);
        }
        Some(c)
    }

    /// Advances while `predicate` holds.
    fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&predicate) {
            self.advance();
        }
    }

    /// Skips whitespace and comments.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            self.advance_while(char::is_whitespace);

            // Single-line comments (-- ...)
            if self.peek() == Some('-') && self.peek_next() == Some('-') {
                self.advance_while(|c| c != '\n');
                continue;
            }

            // Multi-line comments (/* ... */), unterminated ones run to the end
            if self.peek() == Some('/') && self.peek_next() == Some('*') {
                self.advance(); // /
                self.advance(); // *
                loop {
                    match self.advance() {
                        Some('*') if self.peek() == Some('/') => {
                            self.advance();
                            break;
                        }
                        None => break,
                        _ => {}
                    }
                }
                continue;
            }

            break;
        }
    }

    /// Marks the current position as the start of a token.
    fn begin_token(&mut self) {
        self.start = self.pos;
        self.start_position = (self.line, self.column);
    }

    /// Moves back to the start of the current token.
    fn rewind(&mut self) {
        self.pos = self.start;
        self.column = self.start_position.1;
    }

    /// Creates a span from start to current position.
    const fn make_span(&self) -> Span {
        Span::with_position(
            self.start,
            self.pos,
            self.start_position.0,
            self.start_position.1,
        )
    }

    /// Creates a token with the current span.
    fn make_token(&self, kind: TokenKind) -> Token<'a> {
        Token::new(kind, &self.input[self.start..self.pos], self.make_span())
    }

    /// Creates an error token with the current span.
    fn error(&self, message: impl Into<String>) -> Token<'a> {
        self.make_token(TokenKind::Error(message.into()))
    }

    /// Scans an identifier or keyword.
    fn scan_identifier(&mut self) -> Token<'a> {
        self.advance_while(is_identifier_char);

        let text = &self.input[self.start..self.pos];
        Keyword::from_str(text).map_or_else(
            || self.make_token(TokenKind::Identifier(String::from(text))),
            |keyword| self.make_token(TokenKind::Keyword(keyword)),
        )
    }

    /// Scans a quoted identifier (`"name"`, `` `name` `` or `[name]`).
    ///
    /// The opening quote has already been consumed. Doubling the closing
    /// quote escapes it, except for brackets.
    fn scan_quoted_identifier(&mut self, close: char) -> Token<'a> {
        let mut value = String::new();

        loop {
            match self.advance() {
                Some(c) if c == close => {
                    if close != ']' && self.peek() == Some(close) {
                        self.advance();
                        value.push(close);
                    } else {
                        break;
                    }
                }
                Some(c) => value.push(c),
                None => return self.error("Unterminated quoted identifier"),
            }
        }

        self.make_token(TokenKind::Identifier(value))
    }

    /// Scans inline Dart code between backticks (drift mode).
    fn scan_inline_dart(&mut self) -> Token<'a> {
        let content_start = self.pos;
        loop {
            match self.advance() {
                Some('`') => break,
                Some(_) => {}
                None => return self.error("Unterminated inline Dart code"),
            }
        }
        let content = &self.input[content_start..self.pos - 1];
        self.make_token(TokenKind::InlineDart(String::from(content)))
    }

    /// Scans a number: integer, decimal, exponent or hex form.
    fn scan_number(&mut self) -> Token<'a> {
        if self.peek() == Some('0') && matches!(self.peek_next(), Some('x' | 'X')) {
            return self.scan_hex_number();
        }

        let mut is_float = false;
        self.advance_while(|c| c.is_ascii_digit());

        // Decimal point, digits after it are optional (`1.` is valid)
        if self.peek() == Some('.') {
            is_float = true;
            self.advance();
            self.advance_while(|c| c.is_ascii_digit());
        }

        // Exponent
        if self.peek().is_some_and(|c| c == 'e' || c == 'E') {
            is_float = true;
            self.advance();
            if self.peek().is_some_and(|c| c == '+' || c == '-') {
                self.advance();
            }
            if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance_while(is_identifier_char);
                return self.error("Malformed exponent in numeric literal");
            }
            self.advance_while(|c| c.is_ascii_digit());
        }

        if self.peek().is_some_and(is_identifier_start) {
            self.advance_while(is_identifier_char);
            return self.error("Unrecognized token: identifier directly after number");
        }

        let text = &self.input[self.start..self.pos];
        if !is_float {
            if let Ok(i) = text.parse::<i64>() {
                return self.make_token(TokenKind::Integer(i));
            }
        }
        // Integers too large for i64 become floats, as in SQLite.
        match text.parse::<f64>() {
            Ok(f) => self.make_token(TokenKind::Float(f)),
            Err(e) => self.error(format!("Invalid number: {e}")),
        }
    }

    /// Scans a hex integer (`0x...`), reinterpreting it as two's complement.
    fn scan_hex_number(&mut self) -> Token<'a> {
        self.advance(); // 0
        self.advance(); // x
        let digits_start = self.pos;
        self.advance_while(|c| c.is_ascii_hexdigit());
        let digits = &self.input[digits_start..self.pos];

        if self.peek().is_some_and(is_identifier_char) {
            self.advance_while(is_identifier_char);
            return self.error("Invalid hex literal");
        }
        if digits.is_empty() {
            return self.error("Hex literal without digits");
        }

        match u64::from_str_radix(digits, 16) {
            #[allow(clippy::cast_possible_wrap)]
            Ok(value) => self.make_token(TokenKind::Integer(value as i64)),
            Err(_) => self.error("Hex literal too big"),
        }
    }

    /// Scans a string literal. The opening quote has already been consumed.
    fn scan_string(&mut self) -> Token<'a> {
        let mut value = String::new();

        loop {
            match self.advance() {
                Some('\'') => {
                    // Doubled quote is an escaped quote
                    if self.peek() == Some('\'') {
                        self.advance();
                        value.push('\'');
                    } else {
                        break;
                    }
                }
                Some(c) => value.push(c),
                None => return self.error("Unterminated string literal"),
            }
        }

        self.make_token(TokenKind::String(value))
    }

    /// Scans a blob literal (X'...' or x'...'). The `X` has been consumed.
    fn scan_blob(&mut self) -> Token<'a> {
        self.advance(); // consume opening quote

        let content_start = self.pos;
        loop {
            match self.advance() {
                Some('\'') => break,
                Some(_) => {}
                None => return self.error("Unterminated blob literal"),
            }
        }
        let content = &self.input[content_start..self.pos - 1];

        if !content.chars().all(|c| c.is_ascii_hexdigit()) {
            return self.error("Invalid character in blob literal");
        }
        if content.len() % 2 != 0 {
            return self.error("Odd number of hex digits in blob literal");
        }

        let bytes = content
            .as_bytes()
            .chunks(2)
            .filter_map(|pair| {
                core::str::from_utf8(pair)
                    .ok()
                    .and_then(|hex| u8::from_str_radix(hex, 16).ok())
            })
            .collect();
        self.make_token(TokenKind::Blob(bytes))
    }

    /// Scans a variable name after a `:`, `@` or `$` prefix.
    fn scan_variable_name(&mut self) -> String {
        let name_start = self.pos;
        self.advance_while(is_identifier_char);
        String::from(&self.input[name_start..self.pos])
    }

    /// Scans a `?` or `?NNN` variable. The `?` has been consumed.
    fn scan_question(&mut self) -> Token<'a> {
        if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
            return self.make_token(TokenKind::Question);
        }
        let digits_start = self.pos;
        self.advance_while(|c| c.is_ascii_digit());
        match self.input[digits_start..self.pos].parse::<u32>() {
            Ok(index) if index > 0 => self.make_token(TokenKind::NumberedParameter(index)),
            _ => self.error("Variable number must be between ?1 and ?4294967295"),
        }
    }

    /// Consumes `next` if it is the current character.
    fn eat(&mut self, next: char) -> bool {
        if self.peek() == Some(next) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Scans the next token.
    #[must_use]
    pub fn next_token(&mut self) -> Token<'a> {
        self.skip_whitespace_and_comments();
        self.begin_token();

        let Some(c) = self.advance() else {
            return self.make_token(TokenKind::Eof);
        };

        match c {
            // Single-character tokens
            '(' => self.make_token(TokenKind::LeftParen),
            ')' => self.make_token(TokenKind::RightParen),
            ',' => self.make_token(TokenKind::Comma),
            ';' => self.make_token(TokenKind::Semicolon),
            '+' => self.make_token(TokenKind::Plus),
            '/' => self.make_token(TokenKind::Slash),
            '%' => self.make_token(TokenKind::Percent),
            '~' => self.make_token(TokenKind::BitNot),
            '&' => self.make_token(TokenKind::BitAnd),

            // Potentially multi-character tokens
            '*' => {
                if self.drift_extensions && self.eat('*') {
                    self.make_token(TokenKind::DoubleStar)
                } else {
                    self.make_token(TokenKind::Star)
                }
            }
            '-' => {
                if self.eat('>') {
                    if self.eat('>') {
                        self.make_token(TokenKind::DoubleArrow)
                    } else {
                        self.make_token(TokenKind::Arrow)
                    }
                } else {
                    self.make_token(TokenKind::Minus)
                }
            }
            '=' => {
                if self.eat('=') {
                    self.make_token(TokenKind::DoubleEq)
                } else {
                    self.make_token(TokenKind::Eq)
                }
            }
            '<' => {
                if self.eat('=') {
                    self.make_token(TokenKind::LtEq)
                } else if self.eat('>') {
                    self.make_token(TokenKind::LtGt)
                } else if self.eat('<') {
                    self.make_token(TokenKind::LeftShift)
                } else {
                    self.make_token(TokenKind::Lt)
                }
            }
            '>' => {
                if self.eat('=') {
                    self.make_token(TokenKind::GtEq)
                } else if self.eat('>') {
                    self.make_token(TokenKind::RightShift)
                } else {
                    self.make_token(TokenKind::Gt)
                }
            }
            '!' => {
                if self.eat('=') {
                    self.make_token(TokenKind::NotEq)
                } else {
                    self.error("Unexpected character: !")
                }
            }
            '|' => {
                if self.eat('|') {
                    self.make_token(TokenKind::Concat)
                } else {
                    self.make_token(TokenKind::BitOr)
                }
            }
            '.' => {
                if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.rewind();
                    self.scan_number()
                } else {
                    self.make_token(TokenKind::Dot)
                }
            }

            // Variables
            '?' => self.scan_question(),
            ':' => {
                if self.peek().is_some_and(is_identifier_char) {
                    let name = self.scan_variable_name();
                    self.make_token(TokenKind::ColonParameter(name))
                } else {
                    self.make_token(TokenKind::Colon)
                }
            }
            '@' | '$' => {
                if self.peek().is_some_and(is_identifier_char) {
                    let name = self.scan_variable_name();
                    if c == '@' {
                        self.make_token(TokenKind::AtParameter(name))
                    } else {
                        self.make_token(TokenKind::DollarParameter(name))
                    }
                } else {
                    self.error(format!("Unexpected character: {c}"))
                }
            }

            // String literals
            '\'' => self.scan_string(),

            // Quoted identifiers
            '"' => self.scan_quoted_identifier('"'),
            '[' => self.scan_quoted_identifier(']'),
            '`' => {
                if self.drift_extensions {
                    self.scan_inline_dart()
                } else {
                    self.scan_quoted_identifier('`')
                }
            }

            // Blob literals
            'X' | 'x' if self.peek() == Some('\'') => self.scan_blob(),

            // Numbers
            c if c.is_ascii_digit() => {
                self.rewind();
                self.scan_number()
            }

            // Identifiers and keywords
            c if is_identifier_start(c) => self.scan_identifier(),

            _ => self.error(format!("Unexpected character: {c}")),
        }
    }

    /// Tokenizes the entire input and returns all tokens.
    ///
    /// The last token is always [`TokenKind::Eof`].
    #[must_use]
    pub fn tokenize(&mut self) -> Vec<Token<'a>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }
}

/// Returns true if `c` can start an unquoted identifier.
fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

/// Returns true if `c` can continue an unquoted identifier.
fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

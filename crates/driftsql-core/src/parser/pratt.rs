//! Binding powers for Pratt expression parsing.
//!
//! Levels follow SQLite's operator precedence, lowest first: `OR`, `AND`,
//! prefix `NOT`, equality and pattern operators, relational comparisons,
//! bitwise operators, additive, multiplicative, concatenation and JSON
//! arrows, postfix `COLLATE`, and finally unary prefix operators.

use crate::ast::{BinaryOp, UnaryOp};
use crate::lexer::{Keyword, TokenKind};

/// Binding power of the operand of prefix `NOT`.
pub const NOT_PREFIX_BP: u8 = 5;

/// Left binding power of the equality level: `=`, `IS`, `IN`, `LIKE`,
/// `BETWEEN`, `ISNULL`, `NOT NULL`, ...
pub const EQUALITY_BP: u8 = 7;

/// Left binding power of postfix `COLLATE`.
pub const COLLATE_BP: u8 = 19;

/// Binding power of the operand of unary `-`, `+` and `~`.
pub const UNARY_BP: u8 = 21;

/// Returns the prefix binding power for a unary operator token.
///
/// Returns `None` if the token is not a prefix operator.
#[must_use]
pub const fn prefix_binding_power(kind: &TokenKind) -> Option<u8> {
    match kind {
        TokenKind::Minus | TokenKind::Plus | TokenKind::BitNot => Some(UNARY_BP),
        TokenKind::Keyword(Keyword::Not) => Some(NOT_PREFIX_BP),
        _ => None,
    }
}

/// Returns the infix binding power for a token.
///
/// Returns `(left_bp, right_bp)` where:
/// - Higher binding power = binds tighter
/// - Left associative: left_bp < right_bp
///
/// Keywords that start a multi-token operator (`NOT IN`, `IS NOT`, ...)
/// report the power of the whole operator. Returns `None` if the token is
/// not an infix or postfix operator.
#[must_use]
pub const fn infix_binding_power(kind: &TokenKind) -> Option<(u8, u8)> {
    match kind {
        // Logical OR (lowest precedence)
        TokenKind::Keyword(Keyword::Or) => Some((1, 2)),

        // Logical AND
        TokenKind::Keyword(Keyword::And) => Some((3, 4)),

        // Equality, pattern matching and null checks
        TokenKind::Eq
        | TokenKind::DoubleEq
        | TokenKind::NotEq
        | TokenKind::LtGt
        | TokenKind::Keyword(
            Keyword::Is
            | Keyword::In
            | Keyword::Like
            | Keyword::Glob
            | Keyword::Match
            | Keyword::Regexp
            | Keyword::Between
            | Keyword::Isnull
            | Keyword::Notnull
            | Keyword::Not,
        ) => Some((EQUALITY_BP, EQUALITY_BP + 1)),

        // Relational comparison
        TokenKind::Lt | TokenKind::LtEq | TokenKind::Gt | TokenKind::GtEq => Some((9, 10)),

        // Bitwise
        TokenKind::BitAnd | TokenKind::BitOr | TokenKind::LeftShift | TokenKind::RightShift => {
            Some((11, 12))
        }

        // Additive
        TokenKind::Plus | TokenKind::Minus => Some((13, 14)),

        // Multiplicative
        TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Some((15, 16)),

        // Concatenation and JSON extraction
        TokenKind::Concat | TokenKind::Arrow | TokenKind::DoubleArrow => Some((17, 18)),

        // Postfix COLLATE
        TokenKind::Keyword(Keyword::Collate) => Some((COLLATE_BP, COLLATE_BP + 1)),

        _ => None,
    }
}

/// Converts a token to a binary operator.
///
/// Only single-token operators are covered; `IS [NOT]` is assembled by the
/// parser.
#[must_use]
pub const fn token_to_binary_op(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Plus => Some(BinaryOp::Add),
        TokenKind::Minus => Some(BinaryOp::Sub),
        TokenKind::Star => Some(BinaryOp::Mul),
        TokenKind::Slash => Some(BinaryOp::Div),
        TokenKind::Percent => Some(BinaryOp::Mod),
        TokenKind::Eq | TokenKind::DoubleEq => Some(BinaryOp::Eq),
        TokenKind::NotEq | TokenKind::LtGt => Some(BinaryOp::NotEq),
        TokenKind::Lt => Some(BinaryOp::Lt),
        TokenKind::LtEq => Some(BinaryOp::LtEq),
        TokenKind::Gt => Some(BinaryOp::Gt),
        TokenKind::GtEq => Some(BinaryOp::GtEq),
        TokenKind::Keyword(Keyword::And) => Some(BinaryOp::And),
        TokenKind::Keyword(Keyword::Or) => Some(BinaryOp::Or),
        TokenKind::Concat => Some(BinaryOp::Concat),
        TokenKind::Arrow => Some(BinaryOp::JsonExtract),
        TokenKind::DoubleArrow => Some(BinaryOp::JsonExtractText),
        TokenKind::BitAnd => Some(BinaryOp::BitAnd),
        TokenKind::BitOr => Some(BinaryOp::BitOr),
        TokenKind::LeftShift => Some(BinaryOp::LeftShift),
        TokenKind::RightShift => Some(BinaryOp::RightShift),
        _ => None,
    }
}

/// Converts a token to a unary operator.
#[must_use]
pub const fn token_to_unary_op(kind: &TokenKind) -> Option<UnaryOp> {
    match kind {
        TokenKind::Minus => Some(UnaryOp::Neg),
        TokenKind::Plus => Some(UnaryOp::Plus),
        TokenKind::Keyword(Keyword::Not) => Some(UnaryOp::Not),
        TokenKind::BitNot => Some(UnaryOp::BitNot),
        _ => None,
    }
}

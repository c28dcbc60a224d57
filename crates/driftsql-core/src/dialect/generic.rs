//! Generic SQL dialect.

use super::Dialect;

/// The full SQLite grammar without drift extensions.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericDialect;

impl GenericDialect {
    /// Creates a new generic dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for GenericDialect {
    fn name(&self) -> &str {
        "generic"
    }
}

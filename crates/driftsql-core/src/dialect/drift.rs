//! drift dialect: SQLite plus drift's query-template extensions.

use super::Dialect;

/// The full SQLite grammar with drift extensions enabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct DriftDialect;

impl DriftDialect {
    /// Creates a new drift dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for DriftDialect {
    fn name(&self) -> &str {
        "drift"
    }

    fn drift_extensions(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drift_dialect() {
        let dialect = DriftDialect::new();
        assert_eq!(dialect.name(), "drift");
        assert!(dialect.drift_extensions());
        assert!(dialect.supports_json_arrows());
    }
}

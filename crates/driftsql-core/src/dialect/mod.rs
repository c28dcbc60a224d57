//! SQL Dialect support.
//!
//! SQLite grew its grammar over many releases and drift adds its own
//! template syntax on top. A [`Dialect`] tells the parser which of these
//! features to accept; disabled features fail with
//! [`ParseErrorKind::Unsupported`](crate::parser::ParseErrorKind::Unsupported).

mod drift;
mod generic;

pub use drift::DriftDialect;
pub use generic::GenericDialect;

/// Trait for SQL dialect-specific behavior.
///
/// Every feature is enabled by default except the drift extensions.
pub trait Dialect: Send + Sync {
    /// Returns the name of the dialect.
    fn name(&self) -> &str;

    /// Returns whether drift template syntax is accepted: `$placeholders`,
    /// `table.**`, `LIST(...)`, `MAPPED BY`, inline Dart, row class
    /// annotations and drift files.
    fn drift_extensions(&self) -> bool {
        false
    }

    /// Returns whether the dialect supports RETURNING clause.
    fn supports_returning(&self) -> bool {
        true
    }

    /// Returns whether the dialect supports UPSERT (ON CONFLICT).
    fn supports_upsert(&self) -> bool {
        true
    }

    /// Returns whether window functions (`OVER`, `FILTER`, `WINDOW`) parse.
    fn supports_window_functions(&self) -> bool {
        true
    }

    /// Returns whether `STRICT` tables are accepted.
    fn supports_strict_tables(&self) -> bool {
        true
    }

    /// Returns whether the `->` and `->>` operators are accepted.
    fn supports_json_arrows(&self) -> bool {
        true
    }

    /// Returns whether generated columns are accepted.
    fn supports_generated_columns(&self) -> bool {
        true
    }

    /// Returns whether `NULLS FIRST` / `NULLS LAST` are accepted.
    fn supports_nulls_ordering(&self) -> bool {
        true
    }

    /// Returns whether `[NOT] MATERIALIZED` CTE hints are accepted.
    fn supports_materialized_ctes(&self) -> bool {
        true
    }

    /// Returns whether `RIGHT` and `FULL` joins are accepted.
    fn supports_right_full_join(&self) -> bool {
        true
    }

    /// Returns whether `IS [NOT] DISTINCT FROM` is accepted.
    fn supports_is_distinct_from(&self) -> bool {
        true
    }
}

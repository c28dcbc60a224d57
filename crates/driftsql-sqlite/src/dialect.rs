//! SQLite dialect implementation.

use core::fmt;
use core::str::FromStr;

use driftsql_core::dialect::Dialect;

/// A SQLite library version such as `3.35.5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SqliteVersion {
    /// Major version, always 3 for supported releases.
    pub major: u16,
    /// Minor version.
    pub minor: u16,
    /// Patch version.
    pub patch: u16,
}

impl SqliteVersion {
    /// The newest release whose grammar this crate knows about.
    pub const LATEST: Self = Self::new(3, 46, 0);

    /// Creates a version.
    #[must_use]
    pub const fn new(major: u16, minor: u16, patch: u16) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Returns true if this version is `major.minor` or newer.
    #[must_use]
    pub const fn at_least(self, major: u16, minor: u16) -> bool {
        self.major > major || (self.major == major && self.minor >= minor)
    }
}

impl Default for SqliteVersion {
    fn default() -> Self {
        Self::LATEST
    }
}

impl fmt::Display for SqliteVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Error returned when a version string cannot be read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid SQLite version '{0}': expected MAJOR.MINOR[.PATCH]")]
pub struct VersionError(pub String);

impl FromStr for SqliteVersion {
    type Err = VersionError;

    /// Parses `3.35` or `3.35.5`, as returned by `sqlite_version()`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || VersionError(s.to_string());
        let mut parts = s.trim().split('.');
        let mut next = |required: bool| -> Result<u16, VersionError> {
            match parts.next() {
                Some(part) => part.parse().map_err(|_| invalid()),
                None if required => Err(invalid()),
                None => Ok(0),
            }
        };
        let version = Self::new(next(true)?, next(true)?, next(false)?);
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(version)
    }
}

/// SQLite dialect.
///
/// Syntax introduced after `version` fails to parse with
/// [`ParseErrorKind::Unsupported`](driftsql_core::ParseErrorKind::Unsupported).
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteDialect {
    version: SqliteVersion,
    drift: bool,
}

impl SqliteDialect {
    /// Creates a dialect for the latest known SQLite release.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_version(SqliteVersion::LATEST)
    }

    /// Creates a dialect for a specific SQLite release.
    #[must_use]
    pub const fn with_version(version: SqliteVersion) -> Self {
        Self {
            version,
            drift: false,
        }
    }

    /// Enables drift template syntax on top of this SQLite release.
    #[must_use]
    pub const fn with_drift_extensions(mut self) -> Self {
        self.drift = true;
        self
    }

    /// Returns the targeted SQLite version.
    #[must_use]
    pub const fn version(&self) -> SqliteVersion {
        self.version
    }

    const fn since(&self, minor: u16) -> bool {
        self.version.at_least(3, minor)
    }
}

impl Dialect for SqliteDialect {
    fn name(&self) -> &str {
        if self.drift {
            "sqlite+drift"
        } else {
            "sqlite"
        }
    }

    fn drift_extensions(&self) -> bool {
        self.drift
    }

    fn supports_upsert(&self) -> bool {
        self.since(24)
    }

    fn supports_window_functions(&self) -> bool {
        self.since(25)
    }

    fn supports_nulls_ordering(&self) -> bool {
        self.since(30)
    }

    fn supports_generated_columns(&self) -> bool {
        self.since(31)
    }

    fn supports_returning(&self) -> bool {
        self.since(35)
    }

    fn supports_materialized_ctes(&self) -> bool {
        self.since(35)
    }

    fn supports_strict_tables(&self) -> bool {
        self.since(37)
    }

    fn supports_json_arrows(&self) -> bool {
        self.since(38)
    }

    fn supports_right_full_join(&self) -> bool {
        self.since(39)
    }

    fn supports_is_distinct_from(&self) -> bool {
        self.since(39)
    }
}

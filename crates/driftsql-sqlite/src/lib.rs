//! # driftsql-sqlite
//!
//! A version-aware SQLite dialect for `driftsql-core`.
//!
//! # Version-dependent syntax
//!
//! SQLite's grammar grew over time. [`SqliteDialect`] targets one
//! [`SqliteVersion`] and rejects anything newer:
//!
//! | Syntax | Since |
//! |---|---|
//! | [UPSERT] (`ON CONFLICT ... DO`) | 3.24.0 |
//! | [Window functions] | 3.25.0 |
//! | `NULLS FIRST` / `NULLS LAST` | 3.30.0 |
//! | [Generated columns] | 3.31.0 |
//! | [RETURNING] | 3.35.0 |
//! | `[NOT] MATERIALIZED` CTE hints | 3.35.0 |
//! | [`STRICT` tables] | 3.37.0 |
//! | `->` and `->>` | 3.38.0 |
//! | `RIGHT` and `FULL` joins | 3.39.0 |
//! | `IS [NOT] DISTINCT FROM` | 3.39.0 |
//!
//! [UPSERT]: https://www.sqlite.org/lang_upsert.html
//! [Window functions]: https://www.sqlite.org/windowfunctions.html
//! [Generated columns]: https://www.sqlite.org/gencol.html
//! [RETURNING]: https://www.sqlite.org/lang_returning.html
//! [`STRICT` tables]: https://www.sqlite.org/stricttables.html
//!
//! ## Example
//!
//! ```rust
//! use driftsql_core::{ParseErrorKind, Parser};
//! use driftsql_sqlite::{SqliteDialect, SqliteVersion};
//!
//! let version: SqliteVersion = "3.31.1".parse().unwrap();
//! let dialect = SqliteDialect::with_version(version);
//!
//! let sql = "INSERT INTO users (id) VALUES (1) RETURNING id";
//! let err = Parser::with_dialect(sql, &dialect).parse_statement().unwrap_err();
//! assert_eq!(err.kind, ParseErrorKind::Unsupported);
//!
//! let sql = "INSERT INTO users (id) VALUES (1) ON CONFLICT DO NOTHING";
//! assert!(Parser::with_dialect(sql, &dialect).parse_statement().is_ok());
//! ```

mod dialect;

pub use dialect::{SqliteDialect, SqliteVersion, VersionError};

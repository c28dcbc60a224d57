//! Statements accepted or rejected depending on the targeted SQLite version.

use driftsql_core::{ParseErrorKind, Parser, Statement};
use driftsql_sqlite::{SqliteDialect, SqliteVersion};

fn parse(sql: &str, version: SqliteVersion) -> Result<Statement, driftsql_core::ParseError> {
    let dialect = SqliteDialect::with_version(version);
    Parser::with_dialect(sql, &dialect).parse_statement()
}

/// Each statement with the first version that accepts it.
const GATED: &[(&str, SqliteVersion)] = &[
    (
        "INSERT INTO t (a) VALUES (1) ON CONFLICT (a) DO UPDATE SET a = excluded.a",
        SqliteVersion::new(3, 24, 0),
    ),
    (
        "SELECT sum(a) OVER (ORDER BY b) FROM t",
        SqliteVersion::new(3, 25, 0),
    ),
    (
        "SELECT count(*) FILTER (WHERE a > 1) FROM t",
        SqliteVersion::new(3, 25, 0),
    ),
    (
        "SELECT a FROM t ORDER BY a NULLS LAST",
        SqliteVersion::new(3, 30, 0),
    ),
    (
        "CREATE TABLE t (a INT, b INT AS (a * 2))",
        SqliteVersion::new(3, 31, 0),
    ),
    (
        "DELETE FROM t WHERE a = 1 RETURNING *",
        SqliteVersion::new(3, 35, 0),
    ),
    (
        "WITH c AS MATERIALIZED (SELECT 1) SELECT * FROM c",
        SqliteVersion::new(3, 35, 0),
    ),
    ("CREATE TABLE t (a INT) STRICT", SqliteVersion::new(3, 37, 0)),
    ("SELECT data -> '$.a' FROM t", SqliteVersion::new(3, 38, 0)),
    (
        "SELECT * FROM a FULL OUTER JOIN b ON a.id = b.id",
        SqliteVersion::new(3, 39, 0),
    ),
    (
        "SELECT * FROM t WHERE a IS NOT DISTINCT FROM b",
        SqliteVersion::new(3, 39, 0),
    ),
];

#[test]
fn test_gated_syntax() {
    for (sql, since) in GATED {
        assert!(
            parse(sql, *since).is_ok(),
            "{sql} should parse with SQLite {since}"
        );

        let before = SqliteVersion::new(since.major, since.minor - 1, 0);
        let err = parse(sql, before).expect_err(sql);
        assert_eq!(
            err.kind,
            ParseErrorKind::Unsupported,
            "{sql} should be rejected by SQLite {before}: {err}"
        );
    }
}

#[test]
fn test_baseline_syntax() {
    let oldest = SqliteVersion::new(3, 8, 3);
    for sql in [
        "WITH RECURSIVE c(x) AS (SELECT 1 UNION ALL SELECT x + 1 FROM c) SELECT x FROM c",
        "INSERT OR REPLACE INTO t (a, b) VALUES (1, 2)",
        "CREATE TABLE t (id INTEGER PRIMARY KEY AUTOINCREMENT) WITHOUT ROWID",
        "CREATE VIRTUAL TABLE f USING fts5(body)",
        "CREATE TRIGGER tr AFTER INSERT ON t BEGIN SELECT 1; END",
        "SELECT * FROM a LEFT JOIN b USING (id)",
    ] {
        assert!(parse(sql, oldest).is_ok(), "{sql}");
    }
}

#[test]
fn test_error_names_dialect() {
    let err = parse(
        "UPDATE t SET a = 1 RETURNING a",
        SqliteVersion::new(3, 34, 1),
    )
    .unwrap_err();
    assert!(err.message.contains("RETURNING"), "{}", err.message);
    assert!(err.message.contains("sqlite"), "{}", err.message);
}

#[test]
fn test_drift_on_sqlite() {
    let dialect = SqliteDialect::new().with_drift_extensions();
    let statement = Parser::with_dialect("SELECT * FROM t WHERE $filter LIMIT $limit", &dialect)
        .parse_statement()
        .unwrap();
    assert!(matches!(statement, Statement::Select(_)));

    let plain = SqliteDialect::new();
    let err = Parser::with_dialect("SELECT t.** FROM t", &plain)
        .parse_statement()
        .unwrap_err();
    assert_ne!(err.kind, ParseErrorKind::Invalid);
}

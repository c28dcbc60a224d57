//! Renders parsed statements back to SQL and runs them on an in-memory
//! SQLite database, so the AST printer only emits SQL the engine accepts.

mod common;
use common::*;

use driftsql_core::parse_script;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::Row;

async fn create_test_pool() -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory SQLite pool")
}

async fn execute_rendered(pool: &SqlitePool, sql: &str) {
    let rendered = parse(sql).to_string();
    sqlx::query(&rendered)
        .execute(pool)
        .await
        .unwrap_or_else(|e| panic!("SQLite rejected {rendered:?} (from {sql:?}): {e}"));
}

const SCHEMA: &str = "
CREATE TABLE users (
  id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
  name TEXT NOT NULL COLLATE NOCASE UNIQUE,
  score REAL DEFAULT 0.0 CHECK (score >= 0),
  doubled REAL GENERATED ALWAYS AS (score * 2) VIRTUAL
);
CREATE TABLE posts (
  id INTEGER PRIMARY KEY,
  author INTEGER NOT NULL REFERENCES users (id) ON DELETE CASCADE,
  body BLOB,
  UNIQUE (author, id)
) STRICT;
CREATE INDEX posts_by_author ON posts (author DESC) WHERE author > 0;
CREATE VIEW named AS SELECT id, upper(name) AS shout FROM users;
CREATE TRIGGER users_cleanup AFTER DELETE ON users FOR EACH ROW BEGIN
  DELETE FROM posts WHERE author = old.id;
END;
CREATE VIRTUAL TABLE documents USING fts5(title, body, tokenize = 'porter');
";

#[tokio::test]
async fn rendered_schema_is_accepted() {
    let pool = create_test_pool().await;
    for statement in parse_script(SCHEMA).unwrap() {
        let rendered = statement.to_string();
        sqlx::query(&rendered)
            .execute(&pool)
            .await
            .unwrap_or_else(|e| panic!("SQLite rejected {rendered:?}: {e}"));
    }

    let tables: Vec<String> =
        sqlx::query_scalar("SELECT name FROM sqlite_schema WHERE type = 'table' ORDER BY name")
            .fetch_all(&pool)
            .await
            .unwrap();
    assert!(tables.contains(&"users".to_string()));
    assert!(tables.contains(&"posts".to_string()));
    assert!(tables.contains(&"documents".to_string()));
}

#[tokio::test]
async fn rendered_dml_is_accepted() {
    let pool = create_test_pool().await;
    execute_rendered(&pool, "CREATE TABLE kv (k TEXT PRIMARY KEY, v INTEGER NOT NULL)").await;

    for sql in [
        "INSERT INTO kv (k, v) VALUES ('a', 1), ('b', 2), ('c', 3)",
        "INSERT INTO kv (k, v) VALUES ('a', 10) ON CONFLICT (k) DO UPDATE SET v = v + excluded.v",
        "INSERT OR IGNORE INTO kv VALUES ('b', 99)",
        "REPLACE INTO kv (k, v) SELECT 'd', max(v) + 1 FROM kv",
        "UPDATE kv SET v = -v WHERE k IN ('c') AND v BETWEEN 0 AND 5",
        "DELETE FROM kv WHERE k LIKE 'z%' ESCAPE '\\'",
        "WITH doubled AS (SELECT k, v * 2 AS w FROM kv) UPDATE kv SET v = \
         (SELECT w FROM doubled WHERE doubled.k = kv.k) WHERE k = 'b'",
    ] {
        execute_rendered(&pool, sql).await;
    }

    let sql = "SELECT k, v, sum(v) OVER (ORDER BY k ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW) \
               AS running FROM kv ORDER BY k";
    let rendered = parse(sql).to_string();
    let rows = sqlx::query(&rendered).fetch_all(&pool).await.unwrap();
    let values: Vec<(String, i64)> = rows
        .iter()
        .map(|row| (row.get::<String, _>("k"), row.get::<i64, _>("v")))
        .collect();
    assert_eq!(
        values,
        [
            ("a".to_string(), 11),
            ("b".to_string(), 4),
            ("c".to_string(), -3),
            ("d".to_string(), 12),
        ]
    );
}

#[tokio::test]
async fn rendered_returning_round_trips() {
    let pool = create_test_pool().await;
    execute_rendered(&pool, "CREATE TABLE t (id INTEGER PRIMARY KEY, label TEXT)").await;

    let rendered = parse("INSERT INTO t (label) VALUES ('x') RETURNING id, upper(label) AS l")
        .to_string();
    let row = sqlx::query(&rendered).fetch_one(&pool).await.unwrap();
    assert_eq!(row.get::<i64, _>("id"), 1);
    assert_eq!(row.get::<String, _>("l"), "X");
}

//! Tests for CREATE TABLE, VIRTUAL TABLE, VIEW, TRIGGER and INDEX.

mod common;
use common::*;

use driftsql_core::ast::{
    Affinity, ColumnConstraintKind, EnumStorage, GeneratedStorage, Statement, TriggerEvent,
    TriggerTiming,
};
use driftsql_core::ParseErrorKind;

fn create_table(sql: &str) -> driftsql_core::ast::CreateTableStatement {
    match parse(sql) {
        Statement::CreateTable(table) => table,
        other => panic!("Expected CREATE TABLE, got {other:?}"),
    }
}

// ===================================================================
// CREATE TABLE
// ===================================================================

#[test]
fn column_affinities() {
    let table = create_table(
        "CREATE TABLE t (a INT, b NVARCHAR(10), c BLOB, d FLOAT, e DECIMAL(10, 2), f)",
    );
    let affinities: Vec<_> = table
        .columns
        .iter()
        .map(|c| c.type_name.as_ref().map(|t| t.affinity()))
        .collect();
    assert_eq!(
        affinities,
        [
            Some(Affinity::Integer),
            Some(Affinity::Text),
            Some(Affinity::Blob),
            Some(Affinity::Real),
            Some(Affinity::Numeric),
            None,
        ]
    );
    assert_eq!(table.columns[4].type_name.as_ref().unwrap().arguments, ["10", "2"]);
}

#[test]
fn keyword_column_names() {
    let table = create_table("CREATE TABLE t (key TEXT, replace INT, \"select\" TEXT, [group] TEXT)");
    let names: Vec<_> = table.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["key", "replace", "select", "group"]);
}

#[test]
fn generated_columns() {
    let table = create_table(
        "CREATE TABLE t (a INT, b INT AS (a * 2), c INT GENERATED ALWAYS AS (a + 1) VIRTUAL)",
    );
    assert!(matches!(
        table.columns[1].constraints[0].kind,
        ColumnConstraintKind::Generated { always: false, storage: None, .. }
    ));
    assert!(matches!(
        table.columns[2].constraints[0].kind,
        ColumnConstraintKind::Generated {
            always: true,
            storage: Some(GeneratedStorage::Virtual),
            ..
        }
    ));
}

#[test]
fn named_constraints() {
    let table = create_table(
        "CREATE TABLE t (a INT CONSTRAINT nn NOT NULL CONSTRAINT chk CHECK (a > 0) UNIQUE)",
    );
    let names: Vec<_> = table.columns[0]
        .constraints
        .iter()
        .map(|c| c.name.as_deref())
        .collect();
    assert_eq!(names, [Some("nn"), Some("chk"), None]);

    assert_eq!(
        parse_err("CREATE TABLE t (a INT CONSTRAINT c)").kind,
        ParseErrorKind::UnexpectedToken
    );
}

#[test]
fn table_requires_columns() {
    assert!(matches!(
        parse_err("CREATE TABLE t ()").kind,
        ParseErrorKind::UnexpectedToken
    ));
    assert!(matches!(
        parse_err("CREATE TABLE t (a INT").kind,
        ParseErrorKind::UnexpectedEnd
    ));
}

#[test]
fn drift_enum_columns() {
    let Statement::CreateTable(table) = parse_drift(
        "CREATE TABLE tasks (state ENUMNAME(TaskState) NOT NULL, prio ENUM(Priority)) WITH Task",
    ) else {
        panic!("Expected CREATE TABLE");
    };
    let state = table.column("state").unwrap().type_name.as_ref().unwrap();
    let mapping = state.enum_mapping().unwrap();
    assert_eq!(mapping.storage, EnumStorage::Name);
    assert_eq!(mapping.dart_type, "TaskState");
    assert_eq!(state.affinity(), Affinity::Text);
    assert!(table.row_class.unwrap().existing);
}

// ===================================================================
// Views, triggers and indexes
// ===================================================================

#[test]
fn drift_view_row_class() {
    let Statement::CreateView(view) =
        parse_drift("CREATE VIEW active AS ActiveUser AS SELECT * FROM users WHERE active")
    else {
        panic!("Expected CREATE VIEW");
    };
    let row_class = view.row_class.unwrap();
    assert_eq!(row_class.name, "ActiveUser");
    assert!(!row_class.existing);
}

#[test]
fn trigger_forms() {
    let Statement::CreateTrigger(trigger) = parse(
        "CREATE TEMP TRIGGER tr INSTEAD OF INSERT ON v BEGIN \
         INSERT INTO t SELECT new.a; END",
    ) else {
        panic!("Expected CREATE TRIGGER");
    };
    assert!(trigger.temporary);
    assert_eq!(trigger.timing, Some(TriggerTiming::InsteadOf));
    assert_eq!(trigger.event, TriggerEvent::Insert);
    assert!(!trigger.for_each_row);

    let Statement::CreateTrigger(trigger) =
        parse("CREATE TRIGGER tr DELETE ON t BEGIN DELETE FROM u; UPDATE v SET a = 1; END")
    else {
        panic!("Expected CREATE TRIGGER");
    };
    assert_eq!(trigger.timing, None);
    assert_eq!(trigger.body.len(), 2);
}

#[test]
fn index_forms() {
    let Statement::CreateIndex(index) =
        parse("CREATE INDEX IF NOT EXISTS main.by_name ON users (lower(name), id)")
    else {
        panic!("Expected CREATE INDEX");
    };
    assert!(index.if_not_exists);
    assert!(!index.unique);
    assert_eq!(index.schema.as_deref(), Some("main"));
    assert_eq!(index.table, "users");
    assert_eq!(index.columns[0].expr.to_string(), "lower(name)");
}

#[test]
fn unknown_create_target() {
    let err = parse_err("CREATE SEQUENCE s");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    assert!(err.message.contains("TABLE"), "{}", err.message);
}

#[test]
fn ddl_round_trips() {
    for sql in [
        "CREATE TABLE IF NOT EXISTS t (a INTEGER PRIMARY KEY AUTOINCREMENT, b TEXT COLLATE NOCASE)",
        "CREATE TABLE t (a INT REFERENCES u (id) ON DELETE CASCADE DEFERRABLE INITIALLY IMMEDIATE)",
        "CREATE TABLE t (a INT, b INT, PRIMARY KEY (a, b), FOREIGN KEY (b) REFERENCES u) STRICT",
        "CREATE TABLE t (a INT DEFAULT (1 + 2), b TEXT DEFAULT 'x', c INT AS (a * 2) STORED)",
        "CREATE TEMP TABLE t AS SELECT 1 AS a",
        "CREATE VIRTUAL TABLE IF NOT EXISTS r USING rtree(id, x1, x2)",
        "CREATE VIEW v (a) AS SELECT 1",
        "CREATE TRIGGER t AFTER UPDATE OF a ON x FOR EACH ROW WHEN new.a > 1 BEGIN \
         UPDATE y SET b = new.a; END",
        "CREATE UNIQUE INDEX i ON t (a DESC, b COLLATE NOCASE) WHERE a > 0",
    ] {
        round_trip(sql);
    }
    round_trip_drift(
        "CREATE TABLE t (a TEXT MAPPED BY `const C()` JSON KEY b AS c, s ENUM(S)) AS Row",
    );
    round_trip_drift("CREATE VIEW v WITH Existing AS SELECT 1");
}

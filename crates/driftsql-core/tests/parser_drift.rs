//! Tests for drift template syntax and `.drift` files.

mod common;
use common::*;

use driftsql_core::ast::{
    DriftStatement, Expr, InSource, InsertSource, LimitKind, OrderingItem, ResultColumn,
    Statement, StatementParameter, VariableKind,
};
use driftsql_core::dialect::DriftDialect;
use driftsql_core::{ParseErrorKind, Parser};

fn drift_select(sql: &str) -> driftsql_core::ast::SelectStatement {
    match parse_drift(sql) {
        Statement::Select(select) => select,
        other => panic!("Expected SELECT, got {other:?}"),
    }
}

// ===================================================================
// Placeholders
// ===================================================================

#[test]
fn placeholder_expressions() {
    let select = drift_select("SELECT * FROM t WHERE $predicate AND a = $value");
    let Some(Expr::Binary { left, right, .. }) = &select.select_clause().unwrap().where_clause
    else {
        panic!("Expected AND");
    };
    assert!(matches!(left.as_ref(), Expr::Placeholder { name, .. } if name == "predicate"));
    assert!(matches!(
        right.as_ref(),
        Expr::Binary { right, .. } if matches!(right.as_ref(), Expr::Placeholder { .. })
    ));
}

#[test]
fn dollar_is_a_variable_without_drift() {
    let Some(Expr::Binary { right, .. }) = parse_select("SELECT * FROM t WHERE a = $value")
        .select_clause()
        .unwrap()
        .where_clause
        .clone()
    else {
        panic!("Expected comparison");
    };
    assert_eq!(
        *right,
        Expr::Variable {
            kind: VariableKind::Named {
                prefix: '$',
                name: "value".to_string()
            },
            span: right.span(),
        }
    );
}

#[test]
fn ordering_placeholders() {
    let select = drift_select("SELECT * FROM t ORDER BY $order");
    let items = &select.order_by.unwrap().items;
    assert!(matches!(&items[0], OrderingItem::Placeholder { name, .. } if name == "order"));

    let select = drift_select("SELECT * FROM t ORDER BY $order DESC, a");
    let order_by = select.order_by.unwrap();
    assert!(matches!(
        &order_by.items[0],
        OrderingItem::Term(term) if matches!(term.expr, Expr::Placeholder { .. })
    ));
    assert_eq!(order_by.terms().count(), 2);
}

#[test]
fn limit_placeholder() {
    let select = drift_select("SELECT * FROM t LIMIT $limit");
    assert!(matches!(
        select.limit.unwrap().kind,
        LimitKind::Placeholder(name) if name == "limit"
    ));

    let select = drift_select("SELECT * FROM t LIMIT $count OFFSET 3");
    assert!(matches!(select.limit.unwrap().kind, LimitKind::Expressions { .. }));
}

#[test]
fn insert_placeholder() {
    let Statement::Insert(insert) = parse_drift("INSERT INTO todos $row") else {
        panic!("Expected INSERT");
    };
    assert!(matches!(insert.source, InsertSource::Placeholder { name, .. } if name == "row"));
    assert_eq!(parse_err("INSERT INTO todos $row").kind, ParseErrorKind::UnexpectedToken);
}

#[test]
fn array_variables() {
    let select = drift_select("SELECT * FROM t WHERE id IN :ids");
    assert!(matches!(
        select.select_clause().unwrap().where_clause,
        Some(Expr::In { source: InSource::Variable(_), .. })
    ));
}

// ===================================================================
// Result columns
// ===================================================================

#[test]
fn nested_results() {
    let select = drift_select(
        "SELECT u.**, LIST(SELECT * FROM posts p WHERE p.author = u.id) AS posts FROM users u",
    );
    let columns = &select.select_clause().unwrap().columns;
    assert!(matches!(&columns[0], ResultColumn::NestedStar { table, .. } if table == "u"));
    let ResultColumn::NestedQuery { query, alias, .. } = &columns[1] else {
        panic!("Expected LIST");
    };
    assert_eq!(alias.as_deref(), Some("posts"));
    assert!(query.select_clause().unwrap().where_clause.is_some());

    // Without the subquery, `list` is an ordinary function.
    let select = drift_select("SELECT list(a) FROM t");
    assert!(matches!(
        &select.select_clause().unwrap().columns[0],
        ResultColumn::Expression { expr: Expr::Function { .. }, .. }
    ));
}

#[test]
fn mapped_by_columns() {
    let select = drift_select(
        "SELECT a MAPPED BY `const A()` AS x, b AS y MAPPED BY `const B()` FROM t",
    );
    let converters: Vec<_> = select
        .select_clause()
        .unwrap()
        .columns
        .iter()
        .map(|c| match c {
            ResultColumn::Expression { mapped_by, .. } => mapped_by.as_deref(),
            _ => None,
        })
        .collect();
    assert_eq!(converters, [Some("const A()"), Some("const B()")]);
}

#[test]
fn drift_syntax_requires_dialect() {
    for sql in [
        "SELECT a MAPPED BY `const A()` FROM t",
        "CREATE TABLE t (a TEXT) AS Row",
        "CREATE TABLE t (a TEXT JSON KEY b)",
    ] {
        assert_eq!(parse_err(sql).kind, ParseErrorKind::Unsupported, "{sql}");
    }
    // Backticks quote identifiers in plain SQL.
    let select = parse_select("SELECT `weird col` FROM t");
    assert!(matches!(
        &select.select_clause().unwrap().columns[0],
        ResultColumn::Expression { expr: Expr::Reference { column, .. }, .. } if column == "weird col"
    ));
}

// ===================================================================
// drift files
// ===================================================================

const QUERIES: &str = "\
import 'users.drift';

-- named queries
usersById(:ids AS INTEGER): SELECT * FROM users WHERE id IN :ids;
filtered($pred = TRUE) AS FilteredUser: SELECT u.** FROM users u WHERE $pred;
@create: INSERT INTO users (name) VALUES ('admin');
DELETE FROM users WHERE name IS NULL;
";

#[test]
fn drift_file_entries() {
    let file = parse_drift_file(QUERIES);
    assert_eq!(file.statements.len(), 5);
    assert!(matches!(
        &file.statements[0],
        DriftStatement::Import(import) if import.uri == "users.drift"
    ));
    assert!(matches!(
        file.statements[4],
        DriftStatement::Plain(Statement::Delete(_))
    ));

    let declared: Vec<_> = file.declared_statements().collect();
    assert_eq!(declared[0].name, "usersById");
    assert!(matches!(
        &declared[0].parameters[0],
        StatementParameter::VariableType { required: false, or_null: false, type_name: Some(t), .. }
            if t.name == "INTEGER"
    ));
    assert_eq!(declared[1].result_class.as_deref(), Some("FilteredUser"));
    assert!(matches!(
        &declared[1].parameters[0],
        StatementParameter::DefaultValue { name, default: Expr::Literal { .. }, .. } if name == "pred"
    ));
}

#[test]
fn drift_file_spans() {
    let file = parse_drift_file(QUERIES);
    let lines: Vec<_> = file.statements.iter().map(|s| s.span().line).collect();
    assert_eq!(lines, [1, 4, 5, 6, 7]);
    assert_eq!(file.statements[0].span().text(QUERIES), "import 'users.drift'");
}

#[test]
fn drift_file_errors() {
    let dialect = DriftDialect::new();
    let err = Parser::with_dialect("q(:a AS): SELECT 1;", &dialect)
        .parse_drift_file()
        .unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);

    let err = Parser::with_dialect("q: SELECT", &dialect)
        .parse_drift_file()
        .unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnexpectedEnd);
}

#[test]
fn drift_round_trips() {
    for sql in [
        "SELECT t.**, LIST(SELECT * FROM u WHERE u.t = t.id) AS us FROM t WHERE $where",
        "SELECT a MAPPED BY `const C()` AS b FROM t ORDER BY $order LIMIT $limit",
        "INSERT INTO t $insertable",
        "UPDATE t SET a = $value WHERE $predicate",
    ] {
        round_trip_drift(sql);
    }
}

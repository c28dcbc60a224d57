#![allow(dead_code)]

use driftsql_core::ast::{
    DeleteStatement, DriftFile, Expr, InsertStatement, Node, SelectStatement, Statement,
    UpdateStatement,
};
use driftsql_core::dialect::{Dialect, DriftDialect};
use driftsql_core::{ParseError, Parser};

pub fn parse(sql: &str) -> Statement {
    Parser::new(sql)
        .parse_statement()
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn parse_drift(sql: &str) -> Statement {
    let dialect = DriftDialect::new();
    Parser::with_dialect(sql, &dialect)
        .parse_statement()
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn parse_drift_file(source: &str) -> DriftFile {
    let dialect = DriftDialect::new();
    Parser::with_dialect(source, &dialect)
        .parse_drift_file()
        .unwrap_or_else(|e| panic!("Failed to parse drift file:\n{source}\nError: {e:?}"))
}

pub fn parse_err(sql: &str) -> ParseError {
    Parser::new(sql)
        .parse_statement()
        .expect_err(&format!("Expected parse error for: {sql}"))
}

pub fn parse_expr(sql: &str) -> Expr {
    Parser::new(sql)
        .parse_expression()
        .unwrap_or_else(|e| panic!("Failed to parse expression: {sql}\nError: {e:?}"))
}

pub fn parse_select(sql: &str) -> SelectStatement {
    match parse(sql) {
        Statement::Select(s) => s,
        other => panic!("Expected SELECT, got {other:?}"),
    }
}

pub fn parse_insert(sql: &str) -> InsertStatement {
    match parse(sql) {
        Statement::Insert(i) => i,
        other => panic!("Expected INSERT, got {other:?}"),
    }
}

pub fn parse_update(sql: &str) -> UpdateStatement {
    match parse(sql) {
        Statement::Update(u) => u,
        other => panic!("Expected UPDATE, got {other:?}"),
    }
}

pub fn parse_delete(sql: &str) -> DeleteStatement {
    match parse(sql) {
        Statement::Delete(d) => d,
        other => panic!("Expected DELETE, got {other:?}"),
    }
}

/// Returns the single result expression of `SELECT expr`.
pub fn select_expr(sql: &str) -> Expr {
    let select = parse_select(sql);
    let clause = select.select_clause().expect("SELECT core");
    match &clause.columns[..] {
        [driftsql_core::ast::ResultColumn::Expression { expr, .. }] => expr.clone(),
        other => panic!("Expected one result expression, got {other:?}"),
    }
}

/// Verifies that `to_string()` produces a fixed point:
/// parse(sql).to_string() can be re-parsed and yields the same
/// string again.
pub fn round_trip(sql: &str) {
    round_trip_with(sql, &driftsql_core::GenericDialect::new());
}

pub fn round_trip_drift(sql: &str) {
    round_trip_with(sql, &DriftDialect::new());
}

fn round_trip_with(sql: &str, dialect: &dyn Dialect) {
    let parse = |sql: &str| {
        Parser::with_dialect(sql, dialect)
            .parse_statement()
            .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
    };
    let rendered1 = parse(sql).to_string();
    let rendered2 = parse(&rendered1).to_string();
    assert_eq!(
        rendered1, rendered2,
        "Round-trip failed.\n  Input:    {sql}\n  First:    {rendered1}\n  Second:   {rendered2}"
    );
}

/// Checks the span invariants of every node in `sql`:
/// children lie inside their parent, and the source text of every
/// expression reparses to an expression that renders the same.
pub fn check_spans(sql: &str) {
    check_spans_with(sql, &driftsql_core::GenericDialect::new());
}

pub fn check_drift_spans(sql: &str) {
    check_spans_with(sql, &DriftDialect::new());
}

fn check_spans_with(sql: &str, dialect: &dyn Dialect) {
    let statement = Parser::with_dialect(sql, dialect)
        .parse_statement()
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"));
    let root = Node::from(&statement);
    assert_eq!(
        root.span().text(sql).trim_end_matches(';').trim(),
        sql.trim().trim_end_matches(';').trim(),
        "statement span must cover the statement"
    );
    check_node(sql, dialect, root);
}

fn check_node(sql: &str, dialect: &dyn Dialect, node: Node<'_>) {
    let span = node.span();
    for child in node.children() {
        let child_span = child.span();
        if !child_span.is_empty() {
            assert!(
                span.contains(&child_span),
                "{child_span} ({:?}) escapes parent {span} ({:?}) in {sql}",
                child_span.text(sql),
                span.text(sql),
            );
        }
        check_node(sql, dialect, child);
    }

    if let Node::Expr(expr) = node {
        let text = span.text(sql).trim();
        let reparsed = Parser::with_dialect(text, dialect)
            .parse_expression()
            .unwrap_or_else(|e| panic!("Span text {text:?} of {expr} does not reparse: {e}"));
        assert_eq!(reparsed.to_string(), expr.to_string(), "span text {text:?}");
    }
}

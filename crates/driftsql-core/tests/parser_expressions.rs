//! Tests for operator precedence and the special expression forms.

mod common;
use common::*;

use driftsql_core::ast::{BinaryOp, Expr, InSource, LikeOp, Literal, UnaryOp, VariableKind};

/// Renders an expression with every binary operation parenthesized.
fn shape(expr: &Expr) -> String {
    match expr {
        Expr::Binary {
            left, op, right, ..
        } => format!("({} {} {})", shape(left), op.as_str(), shape(right)),
        Expr::Unary { op, operand, .. } => format!("({} {})", op.as_str(), shape(operand)),
        other => other.to_string(),
    }
}

// ===================================================================
// Precedence
// ===================================================================

#[test]
fn precedence_table() {
    for (sql, expected) in [
        ("a OR b AND c", "(a OR (b AND c))"),
        ("a - b - c", "((a - b) - c)"),
        ("a + b * c", "(a + (b * c))"),
        ("a || b + c", "((a || b) + c)"),
        ("a + b || c", "(a + (b || c))"),
        ("a = b = c", "((a = b) = c)"),
        ("a < b = c", "((a < b) = c)"),
        ("a & b << c", "((a & b) << c)"),
        ("NOT a = b", "(NOT (a = b))"),
        ("NOT a AND b", "((NOT a) AND b)"),
        ("-a * b", "((- a) * b)"),
        ("a -> '$.x' || b", "((a -> '$.x') || b)"),
    ] {
        assert_eq!(shape(&parse_expr(sql)), expected, "{sql}");
    }
}

#[test]
fn unary_operators() {
    assert!(matches!(
        parse_expr("~a"),
        Expr::Unary {
            op: UnaryOp::BitNot,
            ..
        }
    ));
    assert!(matches!(
        parse_expr("+a"),
        Expr::Unary {
            op: UnaryOp::Plus,
            ..
        }
    ));
}

// ===================================================================
// Postfix and special forms
// ===================================================================

#[test]
fn null_tests() {
    for (sql, negated) in [
        ("x IS NULL", false),
        ("x ISNULL", false),
        ("x IS NOT NULL", true),
        ("x NOTNULL", true),
        ("x NOT NULL", true),
    ] {
        assert!(
            matches!(parse_expr(sql), Expr::IsNull { negated: n, .. } if n == negated),
            "{sql}"
        );
    }
    assert!(matches!(
        parse_expr("a IS NOT b"),
        Expr::Binary {
            op: BinaryOp::IsNot,
            ..
        }
    ));
}

#[test]
fn is_distinct_from() {
    for (sql, expected) in [
        ("a IS DISTINCT FROM b", "(a IS NOT b)"),
        ("a IS NOT DISTINCT FROM b", "(a IS b)"),
        ("a IS DISTINCT FROM b + 1 AND c", "((a IS NOT (b + 1)) AND c)"),
    ] {
        assert_eq!(shape(&parse_expr(sql)), expected, "{sql}");
    }

    let expr = parse_expr("a IS NOT DISTINCT FROM b");
    assert_eq!(expr.span().end, "a IS NOT DISTINCT FROM b".len());

    parse_err("SELECT a IS DISTINCT b");
}

#[test]
fn between() {
    let Expr::Between {
        negated, low, high, ..
    } = parse_expr("x NOT BETWEEN 1 + 1 AND 5 * 2")
    else {
        panic!("Expected BETWEEN");
    };
    assert!(negated);
    assert_eq!(low.to_string(), "1 + 1");
    assert_eq!(high.to_string(), "5 * 2");
    round_trip("SELECT * FROM t WHERE x BETWEEN a AND b AND c");
}

#[test]
fn in_sources() {
    assert!(matches!(
        parse_expr("x IN ()"),
        Expr::In { source: InSource::List(items), .. } if items.is_empty()
    ));
    assert!(matches!(
        parse_expr("x NOT IN (1, 2, 3)"),
        Expr::In { source: InSource::List(ref items), negated: true, .. } if items.len() == 3
    ));
    assert!(matches!(
        parse_expr("x IN (SELECT id FROM t)"),
        Expr::In {
            source: InSource::Subquery(_),
            ..
        }
    ));
    assert!(matches!(
        parse_expr("x IN main.ids"),
        Expr::In { source: InSource::Table { ref schema, .. }, .. } if schema.as_deref() == Some("main")
    ));
    assert!(matches!(
        parse_expr("x IN :ids"),
        Expr::In {
            source: InSource::Variable(_),
            ..
        }
    ));
}

#[test]
fn like_family() {
    let Expr::Like {
        op,
        escape,
        negated,
        ..
    } = parse_expr("name NOT LIKE 'a\\%' ESCAPE '\\'")
    else {
        panic!("Expected LIKE");
    };
    assert_eq!(op, LikeOp::Like);
    assert!(negated);
    assert!(escape.is_some());

    for (sql, expected) in [
        ("a GLOB 'x*'", LikeOp::Glob),
        ("a MATCH 'x'", LikeOp::Match),
        ("a REGEXP 'x'", LikeOp::Regexp),
    ] {
        assert!(
            matches!(parse_expr(sql), Expr::Like { op, .. } if op == expected),
            "{sql}"
        );
    }
}

#[test]
fn case_cast_exists() {
    let Expr::Case {
        operand,
        whens,
        else_clause,
        ..
    } = parse_expr("CASE x WHEN 1 THEN 'a' WHEN 2 THEN 'b' ELSE 'c' END")
    else {
        panic!("Expected CASE");
    };
    assert!(operand.is_some());
    assert_eq!(whens.len(), 2);
    assert!(else_clause.is_some());

    let Expr::Cast { type_name, .. } = parse_expr("CAST(x AS VARCHAR(10))") else {
        panic!("Expected CAST");
    };
    assert_eq!(type_name.name, "VARCHAR");
    assert_eq!(type_name.arguments, ["10"]);

    assert!(matches!(
        parse_expr("NOT EXISTS (SELECT 1)"),
        Expr::Exists { negated: true, .. }
    ));
}

#[test]
fn parenthesized_forms() {
    assert!(matches!(parse_expr("(1)"), Expr::Parentheses { .. }));
    assert!(matches!(parse_expr("(1, 2)"), Expr::Tuple { ref items, .. } if items.len() == 2));
    assert!(matches!(parse_expr("(SELECT 1)"), Expr::Subquery { .. }));
}

#[test]
fn collate_binds_tighter_than_comparison() {
    let Expr::Binary { left, .. } = parse_expr("a COLLATE NOCASE = b") else {
        panic!("Expected comparison");
    };
    assert!(matches!(*left, Expr::Collate { ref collation, .. } if collation == "NOCASE"));
}

#[test]
fn unary_binds_tighter_than_collate() {
    let Expr::Collate {
        expr, collation, ..
    } = parse_expr("-a COLLATE nocase")
    else {
        panic!("Expected COLLATE");
    };
    assert_eq!(collation, "nocase");
    assert!(matches!(
        *expr,
        Expr::Unary {
            op: UnaryOp::Neg,
            ..
        }
    ));

    let Expr::Binary { op, right, .. } = parse_expr("a || b COLLATE nocase") else {
        panic!("Expected concatenation");
    };
    assert_eq!(op, BinaryOp::Concat);
    assert!(matches!(*right, Expr::Collate { .. }));
}

// ===================================================================
// Literals and variables
// ===================================================================

#[test]
fn literals() {
    for (sql, expected) in [
        ("42", Literal::Integer(42)),
        ("0x2A", Literal::Integer(42)),
        ("'it''s'", Literal::String("it's".to_string())),
        ("X'CAFE'", Literal::Blob(vec![0xCA, 0xFE])),
        ("TRUE", Literal::Boolean(true)),
        ("NULL", Literal::Null),
        ("CURRENT_TIMESTAMP", Literal::CurrentTimestamp),
    ] {
        assert!(
            matches!(parse_expr(sql), Expr::Literal { ref value, .. } if *value == expected),
            "{sql}"
        );
    }
}

#[test]
fn variables() {
    for (sql, expected) in [
        ("?", VariableKind::Anonymous),
        ("?3", VariableKind::Numbered(3)),
        (
            ":name",
            VariableKind::Named {
                prefix: ':',
                name: "name".to_string(),
            },
        ),
        (
            "@name",
            VariableKind::Named {
                prefix: '@',
                name: "name".to_string(),
            },
        ),
        (
            "$name",
            VariableKind::Named {
                prefix: '$',
                name: "name".to_string(),
            },
        ),
    ] {
        assert!(
            matches!(parse_expr(sql), Expr::Variable { ref kind, .. } if *kind == expected),
            "{sql}"
        );
    }
}

#[test]
fn qualified_references() {
    assert!(matches!(
        parse_expr("main.users.id"),
        Expr::Reference { ref schema, ref table, ref column, .. }
            if schema.as_deref() == Some("main")
                && table.as_deref() == Some("users")
                && column == "id"
    ));
}

#[test]
fn raise() {
    round_trip("CREATE TRIGGER t BEFORE INSERT ON x BEGIN SELECT RAISE(FAIL, 'nope'); END");
    round_trip("CREATE TRIGGER t BEFORE INSERT ON x BEGIN SELECT RAISE(IGNORE); END");
}

#[test]
fn expression_round_trips() {
    for sql in [
        "SELECT a OR b AND NOT c FROM t",
        "SELECT (a OR b) AND c FROM t",
        "SELECT -(-a), a - -b FROM t",
        "SELECT a NOT LIKE 'x%' ESCAPE '!' FROM t",
        "SELECT CASE WHEN a THEN 1 END, CAST(a AS INTEGER) FROM t",
        "SELECT x'00ff', 1.5e3, 'a''b' FROM t",
        "SELECT \"select\", [weird name] FROM t",
    ] {
        round_trip(sql);
    }
}

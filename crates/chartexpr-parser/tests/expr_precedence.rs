//! Expression precedence and associativity tests.
//!
//! Logical operators are keywords (`and`, `or`, `not`); `!` is an alias
//! for `not`. Comparisons sit between `and` and `+`/`-` and never chain.

use chartexpr_ast::{BinaryOp, Expr, ExprKind, Literal, UnaryOp};
use chartexpr_parser::parse_expr;

/// Helper to parse an expression from source.
fn parse(source: &str) -> Expr {
    parse_expr(source).expect("Parse failed")
}

/// Helper to get the operator and operands of a binary expression.
fn binary(expr: &Expr) -> (BinaryOp, &Expr, &Expr) {
    match &expr.kind {
        ExprKind::Binary { op, left, right } => (*op, left.as_ref(), right.as_ref()),
        other => panic!("expected binary expression, got {:?}", other),
    }
}

fn is_number(expr: &Expr, value: f64) -> bool {
    matches!(&expr.kind, ExprKind::Literal(Literal::Number(n)) if *n == value)
}

fn is_ident(expr: &Expr, name: &str) -> bool {
    matches!(&expr.kind, ExprKind::Identifier(n) if n == name)
}

#[test]
fn test_mul_binds_tighter_than_add() {
    // 1 + 2 * 3 should parse as: 1 + (2 * 3)
    let expr = parse("1 + 2 * 3");
    let (op, left, right) = binary(&expr);
    assert_eq!(op, BinaryOp::Add);
    assert!(is_number(left, 1.0));

    let (op, left, right) = binary(right);
    assert_eq!(op, BinaryOp::Mul);
    assert!(is_number(left, 2.0));
    assert!(is_number(right, 3.0));
}

#[test]
fn test_sub_left_associative() {
    // a - b - c should parse as: (a - b) - c
    let expr = parse("a - b - c");
    let (op, left, right) = binary(&expr);
    assert_eq!(op, BinaryOp::Sub);
    assert!(is_ident(right, "c"));
    let (op, _, _) = binary(left);
    assert_eq!(op, BinaryOp::Sub);
}

#[test]
fn test_div_left_associative() {
    let expr = parse("a / b / c");
    let (_, left, right) = binary(&expr);
    assert!(is_ident(right, "c"));
    assert_eq!(binary(left).0, BinaryOp::Div);
}

#[test]
fn test_or_vs_and() {
    // a or b and c should parse as: a or (b and c)
    let expr = parse("a or b and c");
    let (op, left, right) = binary(&expr);
    assert_eq!(op, BinaryOp::Or);
    assert!(is_ident(left, "a"));
    assert_eq!(binary(right).0, BinaryOp::And);
}

#[test]
fn test_comparison_vs_and() {
    // A > 1 and B < 2 should parse as: (A > 1) and (B < 2)
    let expr = parse("A > 1 and B < 2");
    let (op, left, right) = binary(&expr);
    assert_eq!(op, BinaryOp::And);
    assert_eq!(binary(left).0, BinaryOp::Gt);
    assert_eq!(binary(right).0, BinaryOp::Lt);
}

#[test]
fn test_arithmetic_inside_comparison() {
    // A + 1 >= B * 2 should parse as: (A + 1) >= (B * 2)
    let expr = parse("A + 1 >= B * 2");
    let (op, left, right) = binary(&expr);
    assert_eq!(op, BinaryOp::GtEq);
    assert_eq!(binary(left).0, BinaryOp::Add);
    assert_eq!(binary(right).0, BinaryOp::Mul);
}

#[test]
fn test_parentheses_override_precedence() {
    // (1 + 2) * 3
    let expr = parse("(1 + 2) * 3");
    let (op, left, right) = binary(&expr);
    assert_eq!(op, BinaryOp::Mul);
    assert_eq!(binary(left).0, BinaryOp::Add);
    assert!(is_number(right, 3.0));
}

#[test]
fn test_unary_binds_tighter_than_binary() {
    // -A * 2 should parse as: (-A) * 2
    let expr = parse("-A * 2");
    let (op, left, _) = binary(&expr);
    assert_eq!(op, BinaryOp::Mul);
    assert!(matches!(
        &left.kind,
        ExprKind::Unary { op: UnaryOp::Neg, .. }
    ));
}

#[test]
fn test_bang_and_not_are_the_same_operator() {
    for source in ["!flag", "not flag"] {
        let expr = parse(source);
        match &expr.kind {
            ExprKind::Unary { op, operand } => {
                assert_eq!(*op, UnaryOp::Not);
                assert!(is_ident(operand, "flag"));
            }
            other => panic!("expected unary for {source}, got {:?}", other),
        }
    }
}

#[test]
fn test_nested_unary() {
    let expr = parse("!!x");
    let ExprKind::Unary { operand, .. } = &expr.kind else {
        panic!("expected unary");
    };
    assert!(matches!(&operand.kind, ExprKind::Unary { op: UnaryOp::Not, .. }));
}

#[test]
fn test_spans_cover_operands() {
    let expr = parse("1 + 2 * 3");
    assert_eq!(expr.span.start, 0);
    assert_eq!(expr.span.end, 9);
    let (_, _, right) = binary(&expr);
    assert_eq!((right.span.start, right.span.end), (4, 9));
    assert_eq!(right.span.column, 5);
}

#[test]
fn test_parsing_is_deterministic() {
    let source = "moving_avg(A, 7d) * 2 > B or !flag";
    assert_eq!(parse(source), parse(source));
}

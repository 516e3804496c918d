//! Program-level parsing: statements, separators and call arguments.

use chartexpr_ast::{
    DurationLiteral, DurationUnit, Expr, ExprKind, Literal, Program, StatementKind,
};
use chartexpr_parser::parse_program;

fn parse_ok(source: &str) -> Program {
    parse_program(source).expect("Parse should succeed")
}

fn single_assignment(program: &Program) -> (&str, &Expr) {
    assert_eq!(program.statements.len(), 1);
    match &program.statements[0].kind {
        StatementKind::Assignment { name, expr } => (name.as_str(), expr),
        other => panic!("expected assignment, got {:?}", other),
    }
}

#[test]
fn test_assignment() {
    let program = parse_ok("A = 1 + 2 * 3;");
    let (name, expr) = single_assignment(&program);
    assert_eq!(name, "A");
    assert!(matches!(expr.kind, ExprKind::Binary { .. }));
    assert_eq!(program.statements[0].span.start, 0);
    assert_eq!(program.statements[0].span.end, 13);
}

#[test]
fn test_expression_statement() {
    let program = parse_ok("Revenue - Costs");
    assert!(matches!(
        program.statements[0].kind,
        StatementKind::Expression(_)
    ));
}

#[test]
fn test_multiple_statements_and_trailing_semicolon() {
    let program = parse_ok("A = Revenue; B = moving_avg(A, 2m);");
    assert_eq!(program.statements.len(), 2);
    assert_eq!(program.statements[1].target(), Some("B"));
    assert_eq!(program.span.start, 0);
    assert_eq!(program.span.end, 34);
}

#[test]
fn test_newlines_are_whitespace() {
    let program = parse_ok("A =\n  1\n  + 2;\nB = A;");
    assert_eq!(program.statements.len(), 2);
    assert_eq!(program.statements[1].span.line, 4);
}

#[test]
fn test_named_arguments() {
    let program = parse_ok(r#"X = align(A, to=Revenue, method="linear");"#);
    let (_, expr) = single_assignment(&program);
    let ExprKind::Call { name, args } = &expr.kind else {
        panic!("expected call");
    };
    assert_eq!(name, "align");
    assert_eq!(args.len(), 3);
    assert!(matches!(&args[0].kind, ExprKind::Identifier(n) if n == "A"));
    match &args[1].kind {
        ExprKind::NamedArgument { name, value } => {
            assert_eq!(name, "to");
            assert!(matches!(&value.kind, ExprKind::Identifier(n) if n == "Revenue"));
        }
        other => panic!("expected named argument, got {:?}", other),
    }
    match &args[2].kind {
        ExprKind::NamedArgument { name, value } => {
            assert_eq!(name, "method");
            assert_eq!(value.kind, ExprKind::Literal(Literal::String("linear".into())));
        }
        other => panic!("expected named argument, got {:?}", other),
    }
}

#[test]
fn test_equality_argument_is_not_named() {
    let program = parse_ok("filter(A, value == 3)");
    let ExprKind::Call { args, .. } = &program.statements[0].expr().kind else {
        panic!("expected call");
    };
    assert!(matches!(args[1].kind, ExprKind::Binary { .. }));
}

#[test]
fn test_durations() {
    let program = parse_ok("A = 1h; B = 30m; C = 500ms; D = 2w;");
    let expected = [
        DurationLiteral::new(1, DurationUnit::Hours),
        DurationLiteral::new(30, DurationUnit::Minutes),
        DurationLiteral::new(500, DurationUnit::Milliseconds),
        DurationLiteral::new(2, DurationUnit::Weeks),
    ];
    for (statement, expected) in program.statements.iter().zip(expected) {
        assert_eq!(
            statement.expr().kind,
            ExprKind::Literal(Literal::Duration(expected))
        );
    }
}

#[test]
fn test_call_without_arguments() {
    let program = parse_ok("T = now();");
    let (_, expr) = single_assignment(&program);
    assert_eq!(
        expr.kind,
        ExprKind::Call {
            name: "now".into(),
            args: vec![]
        }
    );
    assert_eq!((expr.span.start, expr.span.end), (4, 9));
}

#[test]
fn test_identifier_with_digits() {
    let program = parse_ok("Revenue_2024");
    assert!(matches!(
        &program.statements[0].expr().kind,
        ExprKind::Identifier(n) if n == "Revenue_2024"
    ));
}

#[test]
fn test_string_literal_is_decoded() {
    let program = parse_ok(r#"S = "a\nb";"#);
    let (_, expr) = single_assignment(&program);
    assert_eq!(expr.kind, ExprKind::Literal(Literal::String("a\nb".into())));
}

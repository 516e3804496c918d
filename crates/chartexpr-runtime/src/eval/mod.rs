//! Tree-walking evaluator.

pub mod context;
mod ops;
mod program;

pub use context::EvalContext;
pub use program::{execute_program, Execution};

use crate::error::EvaluationError;
use crate::registry;
use crate::value::RuntimeValue;
use chartexpr_ast::{Expr, ExprKind, Literal};

/// Evaluate a well-typed expression.
pub fn evaluate(expr: &Expr, ctx: &EvalContext) -> Result<RuntimeValue, EvaluationError> {
    match &expr.kind {
        ExprKind::Literal(literal) => Ok(match literal {
            Literal::Number(n) => RuntimeValue::Number(*n),
            Literal::Boolean(b) => RuntimeValue::Boolean(*b),
            Literal::String(s) => RuntimeValue::String(s.clone()),
            Literal::Duration(d) => RuntimeValue::Duration(d.to_millis()),
        }),

        ExprKind::Identifier(name) => Ok(ctx
            .lookup(name)
            .unwrap_or_else(|| bug!("type checker admitted unknown identifier '{}'", name))),

        ExprKind::Unary { op, operand } => {
            let operand = evaluate(operand, ctx)?;
            Ok(ops::unary(*op, operand))
        }

        ExprKind::Binary { op, left, right } => {
            let left = evaluate(left, ctx)?;
            let right = evaluate(right, ctx)?;
            ops::binary(*op, left, right, expr.span)
        }

        ExprKind::Call { name, args } => match registry::lookup(name) {
            Some(function) => function.call(args, ctx, expr.span),
            None => Err(EvaluationError::unknown_function(name, expr.span)),
        },

        ExprKind::NamedArgument { name, .. } => {
            bug!("named argument '{}' evaluated outside a call", name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartexpr_ast::{ChartMap, Timestamp};
    use chartexpr_parser::parse_expr;
    use chrono::{TimeZone, Utc};

    fn fixed_now() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn eval(source: &str) -> RuntimeValue {
        let charts = ChartMap::new();
        let ctx = EvalContext::new(&charts, &fixed_now);
        evaluate(&parse_expr(source).unwrap(), &ctx).unwrap()
    }

    #[test]
    fn test_arithmetic_precedence() {
        assert_eq!(eval("1 + 2 * 3"), RuntimeValue::Number(7.0));
        assert_eq!(eval("(1 + 2) * 3"), RuntimeValue::Number(9.0));
        assert_eq!(eval("10 - 4 - 3"), RuntimeValue::Number(3.0));
        assert_eq!(eval("-2 * 3"), RuntimeValue::Number(-6.0));
        assert_eq!(eval("7 / 2"), RuntimeValue::Number(3.5));
    }

    #[test]
    fn test_boolean_logic() {
        assert_eq!(eval("true and not false"), RuntimeValue::Boolean(true));
        assert_eq!(eval("!(1 > 2) or false"), RuntimeValue::Boolean(true));
        assert_eq!(eval("2 >= 2 and 1 < 1"), RuntimeValue::Boolean(false));
        assert_eq!(eval("true == false"), RuntimeValue::Boolean(false));
    }

    #[test]
    fn test_duration_literals() {
        assert_eq!(eval("1500ms"), RuntimeValue::Duration(1500));
        assert_eq!(eval("2m"), RuntimeValue::Duration(120_000));
        assert_eq!(eval("1w"), RuntimeValue::Duration(604_800_000));
    }

    #[test]
    fn test_time_arithmetic() {
        let day_before = fixed_now() - chrono::TimeDelta::days(1);
        assert_eq!(eval("now() - 1d"), RuntimeValue::Time(day_before));
        assert_eq!(
            eval("1h + now()"),
            RuntimeValue::Time(fixed_now() + chrono::TimeDelta::hours(1))
        );
        assert_eq!(eval("now() - 1d < now()"), RuntimeValue::Boolean(true));
    }

    #[test]
    fn test_time_comparison_uses_whole_milliseconds() {
        let charts = ChartMap::new();
        let now = || fixed_now() + chrono::TimeDelta::microseconds(300);
        let mut ctx = EvalContext::new(&charts, &now);
        ctx.bind("T", RuntimeValue::Time(fixed_now() + chrono::TimeDelta::microseconds(100)));

        let compare = |source: &str| evaluate(&parse_expr(source).unwrap(), &ctx).unwrap();
        assert_eq!(compare("T == now()"), RuntimeValue::Boolean(true));
        assert_eq!(compare("T < now()"), RuntimeValue::Boolean(false));
        assert_eq!(compare("T < now() + 1ms"), RuntimeValue::Boolean(true));
    }

    #[test]
    fn test_strings() {
        assert_eq!(eval("\"a\\tb\""), RuntimeValue::String("a\tb".to_string()));
    }

    #[test]
    fn test_unknown_function_is_an_error() {
        let charts = ChartMap::new();
        let ctx = EvalContext::new(&charts, &fixed_now);
        let err = evaluate(&parse_expr("median(1)").unwrap(), &ctx).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Evaluation for function 'median' is not implemented yet"
        );
    }

    #[test]
    #[should_panic(expected = "BUG:")]
    fn test_ill_typed_operands_panic() {
        eval("true + 1");
    }

    #[test]
    #[should_panic(expected = "BUG:")]
    fn test_unknown_identifier_panics() {
        eval("Missing");
    }
}

//! Expression typing and the operator table.

use super::arguments;
use super::context::TypingContext;
use crate::error::TypeCheckError;
use chartexpr_ast::ast::function;
use chartexpr_ast::foundation::Span;
use chartexpr_ast::{BinaryOp, Expr, ExprKind, Literal, UnaryOp, ValueType};

/// Infer the type of `expr`, returning the first error found inside it.
pub fn type_expression(expr: &Expr, ctx: &TypingContext) -> Result<ValueType, TypeCheckError> {
    match &expr.kind {
        ExprKind::Literal(literal) => Ok(match literal {
            Literal::Number(_) => ValueType::Number,
            Literal::Boolean(_) => ValueType::Boolean,
            Literal::String(_) => ValueType::String,
            Literal::Duration(_) => ValueType::Duration,
        }),

        ExprKind::Identifier(name) => ctx
            .lookup(name)
            .ok_or_else(|| TypeCheckError::unknown_identifier(name, expr.span)),

        ExprKind::Unary { op, operand } => {
            let operand_type = type_expression(operand, ctx)?;
            unary_result(*op, operand_type, expr.span)
        }

        ExprKind::Binary { op, left, right } => {
            let left_type = type_expression(left, ctx)?;
            let right_type = type_expression(right, ctx)?;
            binary_result(*op, left_type, right_type)
                .ok_or_else(|| TypeCheckError::binary_operator(*op, left_type, right_type, expr.span))
        }

        ExprKind::Call { name, args } => {
            let signature = function::lookup(name)
                .ok_or_else(|| TypeCheckError::unknown_function(name, expr.span))?;
            let resolved = arguments::resolve_arguments(signature, args)?;
            let arg_types = arguments::argument_types(signature, &resolved, expr.span, ctx)?;
            Ok(signature.return_type(&arg_types))
        }

        // Only meaningful inside a call, where resolution unwraps it.
        ExprKind::NamedArgument { value, .. } => type_expression(value, ctx),
    }
}

fn unary_result(op: UnaryOp, operand: ValueType, span: Span) -> Result<ValueType, TypeCheckError> {
    match (op, operand) {
        (UnaryOp::Not, ValueType::Boolean) => Ok(ValueType::Boolean),
        (UnaryOp::Neg, ValueType::Number) => Ok(ValueType::Number),
        _ => Err(TypeCheckError::unary_operator(op, operand, span)),
    }
}

/// Result type of `left op right`, `None` if the combination is not allowed.
pub(crate) fn binary_result(op: BinaryOp, left: ValueType, right: ValueType) -> Option<ValueType> {
    use ValueType::*;

    if op.is_arithmetic() {
        return match (left, right) {
            (Number, Number) => Some(Number),
            (Chart(l), Chart(r)) if l == r => Some(Chart(l)),
            (Chart(d), Number) | (Number, Chart(d)) => Some(Chart(d)),
            (Time, Duration) if matches!(op, BinaryOp::Add | BinaryOp::Sub) => Some(Time),
            (Duration, Time) if op == BinaryOp::Add => Some(Time),
            _ => None,
        };
    }

    if op.is_comparison() {
        return match (left, right) {
            (Number, Number) | (Time, Time) => Some(Boolean),
            (Boolean, Boolean) if op == BinaryOp::Eq => Some(Boolean),
            _ => None,
        };
    }

    match (left, right) {
        (Boolean, Boolean) => Some(Boolean),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartexpr_ast::DomainType;

    const TIME_CHART: ValueType = ValueType::Chart(DomainType::Time);
    const NUMERIC_CHART: ValueType = ValueType::Chart(DomainType::Numeric);

    #[test]
    fn test_arithmetic_table() {
        for op in [BinaryOp::Add, BinaryOp::Sub, BinaryOp::Mul, BinaryOp::Div] {
            assert_eq!(binary_result(op, ValueType::Number, ValueType::Number), Some(ValueType::Number));
            assert_eq!(binary_result(op, TIME_CHART, TIME_CHART), Some(TIME_CHART));
            assert_eq!(binary_result(op, TIME_CHART, ValueType::Number), Some(TIME_CHART));
            assert_eq!(binary_result(op, ValueType::Number, NUMERIC_CHART), Some(NUMERIC_CHART));
            assert_eq!(binary_result(op, TIME_CHART, NUMERIC_CHART), None);
            assert_eq!(binary_result(op, ValueType::Boolean, ValueType::Number), None);
        }
    }

    #[test]
    fn test_time_arithmetic() {
        use ValueType::{Duration, Time};
        assert_eq!(binary_result(BinaryOp::Add, Time, Duration), Some(Time));
        assert_eq!(binary_result(BinaryOp::Sub, Time, Duration), Some(Time));
        assert_eq!(binary_result(BinaryOp::Add, Duration, Time), Some(Time));
        assert_eq!(binary_result(BinaryOp::Sub, Duration, Time), None);
        assert_eq!(binary_result(BinaryOp::Mul, Time, Duration), None);
        assert_eq!(binary_result(BinaryOp::Add, Time, Time), None);
        assert_eq!(binary_result(BinaryOp::Add, Duration, Duration), None);
    }

    #[test]
    fn test_comparison_table() {
        use ValueType::{Boolean, Number, Time};
        assert_eq!(binary_result(BinaryOp::Gt, Number, Number), Some(Boolean));
        assert_eq!(binary_result(BinaryOp::LtEq, Time, Time), Some(Boolean));
        assert_eq!(binary_result(BinaryOp::Eq, Boolean, Boolean), Some(Boolean));
        assert_eq!(binary_result(BinaryOp::Gt, Boolean, Boolean), None);
        assert_eq!(binary_result(BinaryOp::Eq, TIME_CHART, TIME_CHART), None);
        assert_eq!(binary_result(BinaryOp::Eq, ValueType::String, ValueType::String), None);
    }

    #[test]
    fn test_logical_table() {
        use ValueType::{Boolean, Number};
        assert_eq!(binary_result(BinaryOp::And, Boolean, Boolean), Some(Boolean));
        assert_eq!(binary_result(BinaryOp::Or, Boolean, Number), None);
    }

    #[test]
    fn test_unary() {
        let span = Span::zero();
        assert_eq!(unary_result(UnaryOp::Not, ValueType::Boolean, span).unwrap(), ValueType::Boolean);
        assert_eq!(unary_result(UnaryOp::Neg, ValueType::Number, span).unwrap(), ValueType::Number);
        let err = unary_result(UnaryOp::Neg, TIME_CHART, span).unwrap_err();
        assert_eq!(
            err.message,
            "Operator '-' cannot be applied to types chart<time> and chart<time>"
        );
        assert!(unary_result(UnaryOp::Not, ValueType::Number, span).is_err());
    }
}

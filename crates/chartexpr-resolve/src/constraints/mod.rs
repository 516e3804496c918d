//! Function constraint validation.
//!
//! Runs after type checking on a well-typed program. Walks each statement's
//! expression tree top-down; a call's own rules are checked before its
//! arguments are visited. Returns the first violation found.

mod rules;

use crate::error::FunctionError;
use chartexpr_ast::{Expr, ExprKind, Program};
use tracing::debug;

/// Check every call in `program` against its function's rules.
pub fn check_function_constraints(program: &Program) -> Result<(), FunctionError> {
    let result = program
        .statements
        .iter()
        .try_for_each(|statement| check_expr(statement.expr()));

    match &result {
        Ok(()) => debug!(statements = program.statements.len(), "function constraints satisfied"),
        Err(e) => debug!(function = %e.function, argument = %e.argument, "function constraint violated"),
    }
    result
}

fn check_expr(expr: &Expr) -> Result<(), FunctionError> {
    match &expr.kind {
        ExprKind::Literal(_) | ExprKind::Identifier(_) => Ok(()),
        ExprKind::Unary { operand, .. } => check_expr(operand),
        ExprKind::Binary { left, right, .. } => {
            check_expr(left)?;
            check_expr(right)
        }
        ExprKind::NamedArgument { value, .. } => check_expr(value),
        ExprKind::Call { name, args } => {
            rules::check_call(name, args, expr.span)?;
            args.iter().try_for_each(check_expr)
        }
    }
}

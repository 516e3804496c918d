//! Per-function argument rules.

use crate::error::FunctionError;
use chartexpr_ast::ast::function::{AlignMethod, ResampleMethod, UnknownMethod};
use chartexpr_ast::foundation::Span;
use chartexpr_ast::{DurationLiteral, Expr, ExprKind, Literal};
use std::fmt::Display;
use std::str::FromStr;

pub(super) fn check_call(name: &str, args: &[Expr], span: Span) -> Result<(), FunctionError> {
    match name {
        "moving_avg" => {
            check_window(name, args.get(1), "missing duration argument", span)?;
        }
        "resample" => {
            check_window(
                name,
                find_argument(args, "window", 1),
                "missing window duration",
                span,
            )?;
            check_method(name, find_argument(args, "method", 2), ResampleMethod::ALL)?;
        }
        "align" => {
            check_method(name, find_argument(args, "method", 2), AlignMethod::ALL)?;
        }
        _ => {}
    }
    Ok(())
}

/// The argument passed as `name = ...`, else the one at `position`.
fn find_argument<'e>(args: &'e [Expr], name: &str, position: usize) -> Option<&'e Expr> {
    args.iter()
        .find(|arg| matches!(&arg.kind, ExprKind::NamedArgument { name: n, .. } if n == name))
        .or_else(|| args.get(position))
}

/// Window must be a duration literal strictly greater than zero.
fn check_window(
    function: &str,
    arg: Option<&Expr>,
    missing: &str,
    call_span: Span,
) -> Result<DurationLiteral, FunctionError> {
    let arg = arg
        .map(Expr::argument_value)
        .ok_or_else(|| FunctionError::invalid_argument(function, "window", missing, call_span))?;

    let ExprKind::Literal(Literal::Duration(duration)) = &arg.kind else {
        return Err(FunctionError::invalid_argument(
            function,
            "window",
            "must be a duration literal like '7d' or '1h'",
            arg.span,
        ));
    };

    if duration.value == 0 {
        return Err(FunctionError::invalid_argument(
            function,
            "window",
            "must be greater than zero",
            arg.span,
        ));
    }

    Ok(*duration)
}

/// Optional method must be a string literal from the function's enumeration.
fn check_method<M>(function: &str, arg: Option<&Expr>, allowed: &[M]) -> Result<(), FunctionError>
where
    M: FromStr<Err = UnknownMethod> + Display,
{
    let Some(arg) = arg.map(Expr::argument_value) else {
        return Ok(());
    };

    let ExprKind::Literal(Literal::String(method)) = &arg.kind else {
        return Err(FunctionError::invalid_argument(
            function,
            "method",
            "must be a string literal",
            arg.span,
        ));
    };

    method.parse::<M>().map(|_| ()).map_err(|e| {
        let allowed: Vec<String> = allowed.iter().map(ToString::to_string).collect();
        FunctionError::invalid_argument(
            function,
            "method",
            format!("must be one of: {}", allowed.join(", ")),
            arg.span,
        )
        .with_source(e)
    })
}

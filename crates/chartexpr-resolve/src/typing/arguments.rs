//! Call argument resolution against a function signature.
//!
//! Named arguments fill the parameter with that name. Positional arguments
//! fill the left-most unfilled parameter, which must not be name-only, and
//! may not follow a named argument.

use super::context::TypingContext;
use super::expr::type_expression;
use crate::error::TypeCheckError;
use chartexpr_ast::ast::function::FunctionSignature;
use chartexpr_ast::foundation::{Expected, Span};
use chartexpr_ast::{Expr, ExprKind, ValueType};

/// Argument expression per parameter slot, `None` where nothing was passed.
pub(super) fn resolve_arguments<'e>(
    signature: &FunctionSignature,
    args: &'e [Expr],
) -> Result<Vec<Option<&'e Expr>>, TypeCheckError> {
    let name = signature.name;
    let mut resolved: Vec<Option<&Expr>> = vec![None; signature.params.len()];
    let mut seen_named = false;

    for (call_index, arg) in args.iter().enumerate() {
        if let ExprKind::NamedArgument {
            name: param_name,
            value,
        } = &arg.kind
        {
            seen_named = true;
            let (index, _) = signature
                .param_named(param_name)
                .ok_or_else(|| TypeCheckError::unknown_parameter(name, param_name, arg.span))?;
            if resolved[index].is_some() {
                return Err(TypeCheckError::duplicate_parameter(name, param_name, arg.span));
            }
            resolved[index] = Some(value.as_ref());
            continue;
        }

        if seen_named {
            return Err(TypeCheckError::positional_after_named(
                name,
                expected_params(signature),
                arg.span,
            ));
        }

        match resolved.iter().position(Option::is_none) {
            Some(index) if signature.params[index].name.is_none() => resolved[index] = Some(arg),
            Some(_) => {
                return Err(TypeCheckError::positional_for_named(
                    name,
                    call_index,
                    expected_params(signature),
                    arg.span,
                ));
            }
            None => {
                return Err(TypeCheckError::too_many_arguments(
                    name,
                    expected_params(signature),
                    args.len(),
                    arg.span,
                ));
            }
        }
    }

    Ok(resolved)
}

/// Type every resolved argument and check it against its parameter.
///
/// Missing optional parameters are reported as [`ValueType::Unknown`].
pub(super) fn argument_types(
    signature: &FunctionSignature,
    resolved: &[Option<&Expr>],
    call_span: Span,
    ctx: &TypingContext,
) -> Result<Vec<ValueType>, TypeCheckError> {
    let mut types = Vec::with_capacity(signature.params.len());

    for (index, (param, arg)) in signature.params.iter().zip(resolved).enumerate() {
        let Some(arg) = arg else {
            if param.optional {
                types.push(ValueType::Unknown);
                continue;
            }
            return Err(TypeCheckError::argument(
                signature.name,
                index,
                Expected::Kind(param.kind),
                ValueType::Unknown,
                call_span,
            ));
        };

        let scoped;
        let arg_ctx = match signature.arg_scope(index) {
            Some(bindings) => {
                scoped = ctx.with_bindings(bindings);
                &scoped
            }
            None => ctx,
        };

        let ty = type_expression(arg, arg_ctx)?;
        if ty.kind() != Some(param.kind) {
            return Err(TypeCheckError::argument(
                signature.name,
                index,
                Expected::Kind(param.kind),
                ty,
                arg.span,
            ));
        }
        if let Some(domain) = ty.chart_domain() {
            if !param.accepts_domain(domain) {
                return Err(TypeCheckError::argument(
                    signature.name,
                    index,
                    param.expected(),
                    ty,
                    arg.span,
                ));
            }
        }

        types.push(ty);
    }

    Ok(types)
}

fn expected_params(signature: &FunctionSignature) -> Vec<Expected> {
    signature.params.iter().map(|p| p.expected()).collect()
}

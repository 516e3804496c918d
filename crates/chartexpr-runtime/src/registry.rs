//! Runtime function registry.
//!
//! One entry per built-in, looked up by name when a call is evaluated.
//!
//! # Calling Conventions
//!
//! - **Eager** ([`FunctionImpl::Eager`]): every argument is evaluated in
//!   source order and placed in its parameter slot before the function runs.
//!   Named arguments fill the slot with their name.
//! - **Custom** ([`FunctionImpl::Custom`]): the function receives the
//!   unevaluated argument expressions and decides what to evaluate, e.g.
//!   `filter` evaluates its predicate once per point.

use crate::error::EvaluationError;
use crate::eval::{evaluate, EvalContext};
use crate::series;
use crate::value::RuntimeValue;
use chartexpr_ast::ast::function::{self as signatures, AlignMethod, ResampleMethod};
use chartexpr_ast::chart::TimeSeries;
use chartexpr_ast::foundation::Span;
use chartexpr_ast::{Chart, Expr, ExprKind};
use std::str::FromStr;

/// Evaluated arguments of one call, indexed by parameter position.
#[derive(Debug)]
pub struct Arguments {
    function: &'static str,
    slots: Vec<Option<RuntimeValue>>,
}

impl Arguments {
    pub fn get(&self, index: usize) -> Option<&RuntimeValue> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    fn required(&self, index: usize) -> &RuntimeValue {
        self.get(index).unwrap_or_else(|| {
            bug!("type checker admitted '{}' without argument {}", self.function, index + 1)
        })
    }

    fn time_series(&self, index: usize) -> &TimeSeries {
        let value = self.required(index);
        match value.as_chart().map(|chart| chart.as_ref()) {
            Some(Chart::Time(series)) => series,
            Some(other) => bug!(
                "type checker admitted chart<{}> for '{}'",
                other.domain_type(),
                self.function
            ),
            None => self.mistyped(index, value),
        }
    }

    fn duration(&self, index: usize) -> i64 {
        let value = self.required(index);
        value
            .as_duration()
            .unwrap_or_else(|| self.mistyped(index, value))
    }

    /// Optional method argument, falling back to the method's default.
    fn method<M>(&self, index: usize) -> M
    where
        M: FromStr + Default,
        M::Err: std::fmt::Display,
    {
        let Some(value) = self.get(index) else {
            return M::default();
        };
        match value.as_str() {
            Some(s) => s.parse().unwrap_or_else(|e| {
                bug!("constraint checker admitted method for '{}': {}", self.function, e)
            }),
            None => self.mistyped(index, value),
        }
    }

    fn mistyped(&self, index: usize, value: &RuntimeValue) -> ! {
        bug!(
            "type checker admitted {} as argument {} of '{}'",
            value.value_type(),
            index + 1,
            self.function
        )
    }
}

pub type EagerFn = fn(&Arguments, &EvalContext<'_>, Span) -> Result<RuntimeValue, EvaluationError>;

pub type CustomFn = fn(&[Expr], &EvalContext<'_>, Span) -> Result<RuntimeValue, EvaluationError>;

#[derive(Clone, Copy)]
pub enum FunctionImpl {
    Eager(EagerFn),
    Custom(CustomFn),
}

/// Runtime entry for a built-in function.
pub struct RuntimeFunction {
    pub name: &'static str,
    pub implementation: FunctionImpl,
}

impl RuntimeFunction {
    /// Evaluate a call to this function.
    pub fn call(
        &self,
        args: &[Expr],
        ctx: &EvalContext,
        span: Span,
    ) -> Result<RuntimeValue, EvaluationError> {
        match self.implementation {
            FunctionImpl::Eager(f) => {
                let arguments = self.evaluate_arguments(args, ctx)?;
                f(&arguments, ctx, span)
            }
            FunctionImpl::Custom(f) => f(args, ctx, span),
        }
    }

    fn evaluate_arguments(&self, args: &[Expr], ctx: &EvalContext) -> Result<Arguments, EvaluationError> {
        let Some(signature) = signatures::lookup(self.name) else {
            bug!("runtime function '{}' has no signature", self.name)
        };
        let mut slots = vec![None; signature.params.len()];

        for (position, arg) in args.iter().enumerate() {
            let slot = match &arg.kind {
                ExprKind::NamedArgument { name, .. } => match signature.param_named(name) {
                    Some((index, _)) => index,
                    None => bug!("type checker admitted '{}' for '{}'", name, self.name),
                },
                _ => position,
            };
            if slot >= slots.len() {
                bug!("type checker admitted {} arguments for '{}'", args.len(), self.name);
            }
            slots[slot] = Some(evaluate(arg.argument_value(), ctx)?);
        }

        Ok(Arguments {
            function: self.name,
            slots,
        })
    }
}

fn chart(series: TimeSeries) -> RuntimeValue {
    RuntimeValue::from(Chart::Time(series))
}

fn moving_avg(args: &Arguments, _: &EvalContext, _: Span) -> Result<RuntimeValue, EvaluationError> {
    Ok(chart(series::moving_avg(args.time_series(0), args.duration(1))))
}

fn shift(args: &Arguments, _: &EvalContext, span: Span) -> Result<RuntimeValue, EvaluationError> {
    series::shift(args.time_series(0), args.duration(1))
        .map(chart)
        .ok_or(EvaluationError::TimeOutOfRange { span })
}

fn normalize(args: &Arguments, _: &EvalContext, _: Span) -> Result<RuntimeValue, EvaluationError> {
    Ok(chart(series::normalize(args.time_series(0))))
}

fn align(args: &Arguments, _: &EvalContext, _: Span) -> Result<RuntimeValue, EvaluationError> {
    let method: AlignMethod = args.method(2);
    Ok(chart(series::align(args.time_series(0), args.time_series(1), method)))
}

fn resample(args: &Arguments, _: &EvalContext, _: Span) -> Result<RuntimeValue, EvaluationError> {
    let method: ResampleMethod = args.method(2);
    Ok(chart(series::resample(args.time_series(0), args.duration(1), method)))
}

fn now(_: &Arguments, ctx: &EvalContext, _: Span) -> Result<RuntimeValue, EvaluationError> {
    Ok(RuntimeValue::Time(ctx.now()))
}

/// Evaluates only the chart eagerly; the predicate runs once per point with
/// `time` and `value` bound. After the first predicate error every remaining
/// point is rejected and the error is returned.
fn filter(args: &[Expr], ctx: &EvalContext, _: Span) -> Result<RuntimeValue, EvaluationError> {
    let (Some(chart_arg), Some(predicate)) = (args.first(), args.get(1)) else {
        bug!("type checker admitted filter with {} arguments", args.len())
    };
    let source = evaluate(chart_arg.argument_value(), ctx)?;
    let arguments = Arguments {
        function: "filter",
        slots: vec![Some(source)],
    };
    let predicate = predicate.argument_value();

    let mut failure = None;
    let kept = series::filter(arguments.time_series(0), |point| {
        if failure.is_some() {
            return false;
        }
        let scope = ctx.with_bindings([
            ("time", RuntimeValue::Time(point.x)),
            ("value", RuntimeValue::Number(point.y)),
        ]);
        match evaluate(predicate, &scope) {
            Ok(value) => value.as_boolean().unwrap_or_else(|| {
                bug!("type checker admitted {} as filter predicate", value.value_type())
            }),
            Err(e) => {
                failure = Some(e);
                false
            }
        }
    });

    match failure {
        Some(e) => Err(e),
        None => Ok(chart(kept)),
    }
}

/// Every built-in with a runtime implementation.
pub static FUNCTIONS: &[RuntimeFunction] = &[
    RuntimeFunction {
        name: "moving_avg",
        implementation: FunctionImpl::Eager(moving_avg),
    },
    RuntimeFunction {
        name: "shift",
        implementation: FunctionImpl::Eager(shift),
    },
    RuntimeFunction {
        name: "normalize",
        implementation: FunctionImpl::Eager(normalize),
    },
    RuntimeFunction {
        name: "align",
        implementation: FunctionImpl::Eager(align),
    },
    RuntimeFunction {
        name: "resample",
        implementation: FunctionImpl::Eager(resample),
    },
    RuntimeFunction {
        name: "filter",
        implementation: FunctionImpl::Custom(filter),
    },
    RuntimeFunction {
        name: "now",
        implementation: FunctionImpl::Eager(now),
    },
];

/// Look up a runtime implementation by name
pub fn lookup(name: &str) -> Option<&'static RuntimeFunction> {
    FUNCTIONS.iter().find(|f| f.name == name)
}

pub fn is_known(name: &str) -> bool {
    lookup(name).is_some()
}

/// Get all function names with a runtime implementation
pub fn all_names() -> impl Iterator<Item = &'static str> {
    FUNCTIONS.iter().map(|f| f.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_signature_has_runtime() {
        for name in signatures::all_names() {
            assert!(is_known(name), "no runtime implementation for {}", name);
        }
        assert_eq!(all_names().count(), signatures::SIGNATURES.len());
    }
}

//! Statement-by-statement program execution.

use super::{evaluate, EvalContext};
use crate::error::EvaluationError;
use crate::value::RuntimeValue;
use chartexpr_ast::{Chart, Program};
use indexmap::IndexMap;
use std::rc::Rc;
use tracing::trace;

/// Bindings produced by a completed run, in first-assignment order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Execution {
    /// Every assigned name and its final value
    pub variables: IndexMap<String, RuntimeValue>,
    /// Names whose assignment produced a chart
    pub derived_charts: IndexMap<String, Rc<Chart>>,
}

/// Evaluate every statement in order, stopping at the first error.
///
/// Expression statements are evaluated for their errors only. A chart
/// recorded in `derived_charts` stays there if its name is later reassigned
/// to a non-chart value.
pub fn execute_program(program: &Program, mut ctx: EvalContext) -> Result<Execution, EvaluationError> {
    let mut derived_charts = IndexMap::new();

    for statement in &program.statements {
        let value = evaluate(statement.expr(), &ctx)?;
        trace!(line = statement.span.line, value = %value, "evaluated statement");

        if let Some(name) = statement.target() {
            if let Some(chart) = value.as_chart() {
                derived_charts.insert(name.to_string(), chart.clone());
            }
            ctx.bind(name, value);
        }
    }

    Ok(Execution {
        variables: ctx.into_variables(),
        derived_charts,
    })
}

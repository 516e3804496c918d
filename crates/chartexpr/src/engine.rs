//! The four-phase program run.

use crate::failure::RunFailure;
use chartexpr_ast::{Chart, ChartMap, Program, Timestamp};
use chartexpr_parser::parse_program;
use chartexpr_resolve::{check_function_constraints, input_types, type_check_program};
use chartexpr_runtime::{execute_program, EvalContext, RuntimeValue};
use indexmap::IndexMap;
use std::rc::Rc;
use tracing::{debug, warn};

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSuccess {
    pub program: Program,
    /// Every assigned variable, in first-assignment order
    pub variables: IndexMap<String, RuntimeValue>,
    /// Chart-valued assignments, in first-assignment order
    pub derived_charts: IndexMap<String, Rc<Chart>>,
}

/// Run `source` against `input_charts`.
///
/// `now` backs the `now()` built-in; every call during the run asks it
/// again, so pass a fixed clock for reproducible results.
pub fn run(
    source: &str,
    input_charts: &ChartMap,
    now: &dyn Fn() -> Timestamp,
) -> Result<RunSuccess, RunFailure> {
    let program = parse_program(source).map_err(|errors| {
        warn!(errors = errors.len(), "parse failed");
        RunFailure::Parse(errors)
    })?;
    debug!(statements = program.statements.len(), "parsed program");

    let inputs = input_types(input_charts);
    let types = type_check_program(&program, &inputs).map_err(|errors| {
        warn!(errors = errors.len(), "type check failed");
        RunFailure::TypeCheck(errors)
    })?;
    debug!(variables = types.variables.len(), "type check passed");

    check_function_constraints(&program).map_err(|error| {
        warn!(%error, "function constraint violated");
        RunFailure::FunctionConstraints(error)
    })?;

    let execution = execute_program(&program, EvalContext::new(input_charts, now)).map_err(|error| {
        warn!(%error, "evaluation failed");
        RunFailure::Evaluation(error)
    })?;
    debug!(
        variables = execution.variables.len(),
        derived_charts = execution.derived_charts.len(),
        "evaluation complete"
    );

    Ok(RunSuccess {
        program,
        variables: execution.variables,
        derived_charts: execution.derived_charts,
    })
}

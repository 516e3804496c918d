//! Static type inference over a whole program.
//!
//! Statements are checked left to right. A statement that types cleanly and
//! assigns a name makes that name visible to every later statement; a
//! statement that fails does not bind its name, and checking carries on with
//! the next statement. Every error found is returned together.

mod arguments;
pub mod context;
mod expr;

pub use context::TypingContext;
pub use expr::type_expression;

use crate::error::TypeCheckError;
use chartexpr_ast::{ChartMap, DomainType, Program, ValueType};
use indexmap::IndexMap;
use tracing::debug;

/// Domain of every input chart, keyed by the name programs refer to it by.
pub type InputTypes = IndexMap<String, DomainType>;

/// Static view of a set of input charts.
pub fn input_types(charts: &ChartMap) -> InputTypes {
    charts
        .iter()
        .map(|(name, chart)| (name.clone(), chart.domain_type()))
        .collect()
}

/// Variables bound by a successfully checked program, in assignment order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TypeEnvironment {
    pub variables: IndexMap<String, ValueType>,
}

impl TypeEnvironment {
    pub fn get(&self, name: &str) -> Option<ValueType> {
        self.variables.get(name).copied()
    }
}

/// Type-check every statement of `program` against the given inputs.
pub fn type_check_program(
    program: &Program,
    inputs: &InputTypes,
) -> Result<TypeEnvironment, Vec<TypeCheckError>> {
    let mut ctx = TypingContext::new(inputs);
    let mut errors = Vec::new();

    for statement in &program.statements {
        match type_expression(statement.expr(), &ctx) {
            Ok(ty) => {
                if let Some(name) = statement.target() {
                    debug!(name, %ty, "bound variable type");
                    ctx.bind(name, ty);
                }
            }
            Err(e) => {
                debug!(error = %e, line = statement.span.line, "statement failed type check");
                errors.push(e);
            }
        }
    }

    if errors.is_empty() {
        Ok(TypeEnvironment {
            variables: ctx.into_variables(),
        })
    } else {
        Err(errors)
    }
}

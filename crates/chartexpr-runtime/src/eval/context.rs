//! Evaluation context.

use crate::value::RuntimeValue;
use chartexpr_ast::foundation::Scope;
use chartexpr_ast::{ChartMap, Timestamp};
use indexmap::IndexMap;
use std::fmt;

/// Everything an expression can observe while it is evaluated.
///
/// Input charts and the clock are borrowed from the caller for the length of
/// one run. Variables live in a copy-on-extend [`Scope`]: a context created
/// with [`with_bindings`](Self::with_bindings) sees the outer variables plus
/// its own, and the outer context never sees the additions.
#[derive(Clone)]
pub struct EvalContext<'a> {
    input_charts: &'a ChartMap,
    now: &'a dyn Fn() -> Timestamp,
    variables: Scope<RuntimeValue>,
}

impl<'a> EvalContext<'a> {
    pub fn new(input_charts: &'a ChartMap, now: &'a dyn Fn() -> Timestamp) -> Self {
        Self {
            input_charts,
            now,
            variables: Scope::new(),
        }
    }

    /// Value of `name`: a variable first, then an input chart.
    pub fn lookup(&self, name: &str) -> Option<RuntimeValue> {
        self.variables.get(name).cloned().or_else(|| {
            self.input_charts
                .get(name)
                .map(|chart| RuntimeValue::Chart(chart.clone()))
        })
    }

    pub fn now(&self) -> Timestamp {
        (self.now)()
    }

    pub fn bind(&mut self, name: &str, value: RuntimeValue) {
        self.variables.insert(name, value);
    }

    /// Context with extra variables visible only through the returned value.
    pub fn with_bindings<I>(&self, bindings: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, RuntimeValue)>,
    {
        Self {
            input_charts: self.input_charts,
            now: self.now,
            variables: self.variables.extend_many(bindings),
        }
    }

    pub fn variables(&self) -> &Scope<RuntimeValue> {
        &self.variables
    }

    pub fn input_charts(&self) -> &'a ChartMap {
        self.input_charts
    }

    pub fn into_variables(self) -> IndexMap<String, RuntimeValue> {
        self.variables.into_map()
    }
}

impl fmt::Debug for EvalContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvalContext")
            .field("input_charts", &self.input_charts.keys().collect::<Vec<_>>())
            .field("variables", &self.variables)
            .finish_non_exhaustive()
    }
}

//! Name lookup during type inference.

use super::InputTypes;
use chartexpr_ast::foundation::Scope;
use chartexpr_ast::ValueType;
use indexmap::IndexMap;

/// Names visible while typing an expression.
///
/// Variables shadow input charts of the same name.
#[derive(Debug, Clone)]
pub struct TypingContext<'a> {
    inputs: &'a InputTypes,
    variables: Scope<ValueType>,
}

impl<'a> TypingContext<'a> {
    pub fn new(inputs: &'a InputTypes) -> Self {
        Self {
            inputs,
            variables: Scope::new(),
        }
    }

    /// Type of `name`: a variable first, then an input chart.
    pub fn lookup(&self, name: &str) -> Option<ValueType> {
        self.variables
            .get(name)
            .copied()
            .or_else(|| self.inputs.get(name).map(|domain| ValueType::Chart(*domain)))
    }

    pub fn bind(&mut self, name: &str, ty: ValueType) {
        self.variables.insert(name, ty);
    }

    /// Context with extra variables visible only through the returned value.
    pub fn with_bindings(&self, bindings: &[(&str, ValueType)]) -> Self {
        Self {
            inputs: self.inputs,
            variables: self.variables.extend_many(bindings.iter().copied()),
        }
    }

    pub fn into_variables(self) -> IndexMap<String, ValueType> {
        self.variables.into_map()
    }
}

//! Type and function constraint errors.

use chartexpr_ast::ast::function::UnknownMethod;
use chartexpr_ast::foundation::{Diagnostic, ErrorCode, Expected, Span};
use chartexpr_ast::{BinaryOp, UnaryOp, ValueType};
use std::fmt;
use thiserror::Error;

/// Static typing failure with expected and actual types.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct TypeCheckError {
    /// Precise diagnostic message
    pub message: String,
    /// Short message for editor surfaces
    pub user_message: String,
    /// Types that would have been accepted
    pub expected: Vec<Expected>,
    /// Type that was found
    pub actual: ValueType,
    /// Source location of the offending expression
    pub span: Span,
    /// What was being checked, e.g. `operator '+'` or `shift argument 2`
    pub context: Option<String>,
}

struct ExpectedList<'a>(&'a [Expected]);

impl fmt::Display for ExpectedList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, expected) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" or ")?;
            }
            write!(f, "{}", expected)?;
        }
        Ok(())
    }
}

impl TypeCheckError {
    fn new(
        message: String,
        user_message: String,
        expected: Vec<Expected>,
        actual: ValueType,
        span: Span,
        context: String,
    ) -> Self {
        Self {
            message,
            user_message,
            expected,
            actual,
            span,
            context: Some(context),
        }
    }

    pub fn unknown_identifier(name: &str, span: Span) -> Self {
        Self::new(
            format!("Unknown identifier: {}", name),
            format!("Chart or variable '{}' not found", name),
            Vec::new(),
            ValueType::Unknown,
            span,
            format!("identifier '{}'", name),
        )
    }

    pub fn binary_operator(op: BinaryOp, left: ValueType, right: ValueType, span: Span) -> Self {
        Self::operator(op.symbol(), left, right, span)
    }

    pub fn unary_operator(op: UnaryOp, operand: ValueType, span: Span) -> Self {
        Self::operator(op.symbol(), operand, operand, span)
    }

    fn operator(symbol: &str, left: ValueType, right: ValueType, span: Span) -> Self {
        Self::new(
            format!(
                "Operator '{}' cannot be applied to types {} and {}",
                symbol, left, right
            ),
            format!("Cannot use '{}' with {} and {}", symbol, left, right),
            vec![ValueType::Number.into(), ValueType::Boolean.into()],
            left,
            span,
            format!("operator '{}'", symbol),
        )
    }

    pub fn unknown_function(name: &str, span: Span) -> Self {
        Self::new(
            format!("Unknown function: {}", name),
            format!("Function '{}' is not defined", name),
            Vec::new(),
            ValueType::Unknown,
            span,
            format!("function '{}'", name),
        )
    }

    /// Argument at `index` (0-based) has the wrong type or is missing.
    pub fn argument(
        function: &str,
        index: usize,
        expected: Expected,
        actual: ValueType,
        span: Span,
    ) -> Self {
        Self::new(
            format!(
                "Function '{}' argument {}: expected {}, got {}",
                function,
                index + 1,
                expected,
                actual
            ),
            format!(
                "Argument {} of function '{}' must be {}, got {}",
                index + 1,
                function,
                expected,
                actual
            ),
            vec![expected],
            actual,
            span,
            format!("{} argument {}", function, index + 1),
        )
    }

    pub fn unknown_parameter(function: &str, parameter: &str, span: Span) -> Self {
        Self::new(
            format!(
                "Function '{}' does not have a parameter named '{}'",
                function, parameter
            ),
            format!(
                "Unknown named argument '{}' for function '{}'",
                parameter, function
            ),
            Vec::new(),
            ValueType::Unknown,
            span,
            format!("{} argument '{}'", function, parameter),
        )
    }

    pub fn duplicate_parameter(function: &str, parameter: &str, span: Span) -> Self {
        Self::new(
            format!(
                "Function '{}' received multiple values for parameter '{}'",
                function, parameter
            ),
            format!(
                "Parameter '{}' for function '{}' was provided more than once",
                parameter, function
            ),
            Vec::new(),
            ValueType::Unknown,
            span,
            format!("{} argument '{}'", function, parameter),
        )
    }

    pub fn positional_after_named(function: &str, expected: Vec<Expected>, span: Span) -> Self {
        Self::new(
            format!(
                "Function '{}' cannot have positional arguments after named arguments",
                function
            ),
            format!(
                "Positional arguments must come before any named arguments for function '{}'",
                function
            ),
            expected,
            ValueType::Unknown,
            span,
            format!("{} arguments", function),
        )
    }

    /// Positional argument at `index` (0-based) would fill a name-only parameter.
    pub fn positional_for_named(
        function: &str,
        index: usize,
        expected: Vec<Expected>,
        span: Span,
    ) -> Self {
        Self::new(
            format!(
                "Function '{}' does not accept positional argument {} for a named parameter",
                function,
                index + 1
            ),
            format!(
                "Argument {} of function '{}' must be passed using 'name=value' syntax",
                index + 1,
                function
            ),
            expected,
            ValueType::Unknown,
            span,
            format!("{} arguments", function),
        )
    }

    pub fn too_many_arguments(function: &str, expected: Vec<Expected>, found: usize, span: Span) -> Self {
        let max = expected.len();
        Self::new(
            format!(
                "Function '{}' expects at most {} arguments, got {}",
                function, max, found
            ),
            format!(
                "'{}' accepts {} {}: {}",
                function,
                max,
                if max == 1 { "argument" } else { "arguments" },
                ExpectedList(&expected)
            ),
            expected,
            ValueType::Unknown,
            span,
            format!("{} arguments", function),
        )
    }
}

impl Diagnostic for TypeCheckError {
    fn code(&self) -> ErrorCode {
        ErrorCode::Type
    }

    fn user_message(&self) -> String {
        self.user_message.clone()
    }

    fn span(&self) -> Option<Span> {
        Some(self.span)
    }
}

/// Semantic rule violation in a call's arguments.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Function '{function}' received invalid {argument}: {reason}")]
pub struct FunctionError {
    pub function: String,
    pub argument: String,
    pub reason: String,
    /// The offending argument, or the whole call when the argument is missing
    pub span: Span,
    /// Method lookup failure behind an enumeration violation
    #[source]
    pub source: Option<UnknownMethod>,
}

impl FunctionError {
    pub fn invalid_argument(
        function: &str,
        argument: &str,
        reason: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            function: function.to_string(),
            argument: argument.to_string(),
            reason: reason.into(),
            span,
            source: None,
        }
    }

    pub fn with_source(mut self, source: UnknownMethod) -> Self {
        self.source = Some(source);
        self
    }
}

impl Diagnostic for FunctionError {
    fn code(&self) -> ErrorCode {
        ErrorCode::Function
    }

    fn user_message(&self) -> String {
        format!(
            "Invalid {} for '{}': {}",
            self.argument, self.function, self.reason
        )
    }

    fn span(&self) -> Option<Span> {
        Some(self.span)
    }
}

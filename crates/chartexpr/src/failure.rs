//! Phase-tagged run failures.

use chartexpr_ast::foundation::{Diagnostic, ErrorCode, Location};
use chartexpr_parser::ParseError;
use chartexpr_resolve::{FunctionError, TypeCheckError};
use chartexpr_runtime::EvaluationError;
use serde::Serialize;
use thiserror::Error;

/// Why a run stopped, tagged by the phase that failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RunFailure {
    #[error("parse failed with {} error(s)", .0.len())]
    Parse(Vec<ParseError>),

    #[error("type check failed with {} error(s)", .0.len())]
    TypeCheck(Vec<TypeCheckError>),

    #[error("function constraint violated: {0}")]
    FunctionConstraints(#[source] FunctionError),

    #[error("evaluation failed: {0}")]
    Evaluation(#[source] EvaluationError),
}

impl RunFailure {
    /// `parse`, `type-check`, `function-constraints` or `evaluation`.
    pub fn phase(&self) -> &'static str {
        match self {
            RunFailure::Parse(_) => "parse",
            RunFailure::TypeCheck(_) => "type-check",
            RunFailure::FunctionConstraints(_) => "function-constraints",
            RunFailure::Evaluation(_) => "evaluation",
        }
    }

    /// Every error in this failure, flattened for display.
    pub fn diagnostics(&self) -> Vec<DiagnosticReport> {
        match self {
            RunFailure::Parse(errors) => errors.iter().map(DiagnosticReport::from_diagnostic).collect(),
            RunFailure::TypeCheck(errors) => errors.iter().map(DiagnosticReport::from_type_error).collect(),
            RunFailure::FunctionConstraints(error) => vec![DiagnosticReport::from_diagnostic(error)],
            RunFailure::Evaluation(error) => vec![DiagnosticReport::from_diagnostic(error)],
        }
    }
}

/// Serializable view of one error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticReport {
    pub code: ErrorCode,
    pub message: String,
    pub user_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    /// Accepted types of a type error, e.g. `["chart<time>"]`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub expected: Vec<String>,
    /// Type a type error found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl DiagnosticReport {
    pub fn from_diagnostic<D: Diagnostic + ?Sized>(diagnostic: &D) -> Self {
        Self {
            code: diagnostic.code(),
            message: diagnostic.to_string(),
            user_message: diagnostic.user_message(),
            location: diagnostic.location(),
            expected: Vec::new(),
            actual: None,
            context: None,
        }
    }

    /// Report for a type error, keeping its expected and actual types.
    pub fn from_type_error(error: &TypeCheckError) -> Self {
        Self {
            expected: error.expected.iter().map(ToString::to_string).collect(),
            actual: Some(error.actual.to_string()),
            context: error.context.clone(),
            ..Self::from_diagnostic(error)
        }
    }
}

//! Evaluation errors.

use chartexpr_ast::foundation::{Diagnostic, ErrorCode, Span};
use chartexpr_ast::Domain;
use thiserror::Error;

/// Failure of a well-typed program at evaluation time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    #[error("Evaluation for function '{name}' is not implemented yet")]
    UnknownFunction { name: String, span: Span },

    #[error("Chart arithmetic requires aligned charts with identical domain points")]
    Misaligned {
        span: Span,
        #[source]
        source: MisalignmentReason,
    },

    #[error("Time arithmetic overflowed the representable range")]
    TimeOutOfRange { span: Span },
}

/// Why two charts cannot be combined pointwise.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MisalignmentReason {
    #[error("chart domains differ: {left:?} vs {right:?}")]
    DomainMismatch { left: Domain, right: Domain },

    #[error("point counts differ: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("x values differ at point {index}")]
    PointMismatch { index: usize },
}

impl EvaluationError {
    pub fn unknown_function(name: &str, span: Span) -> Self {
        EvaluationError::UnknownFunction {
            name: name.to_string(),
            span,
        }
    }

    pub fn misaligned(reason: MisalignmentReason, span: Span) -> Self {
        EvaluationError::Misaligned {
            span,
            source: reason,
        }
    }
}

impl Diagnostic for EvaluationError {
    fn code(&self) -> ErrorCode {
        ErrorCode::Evaluation
    }

    fn user_message(&self) -> String {
        match self {
            EvaluationError::UnknownFunction { name, .. } => {
                format!("Function '{}' is not implemented yet", name)
            }
            EvaluationError::Misaligned { .. } => {
                "Charts must be aligned before arithmetic; use align() or resample() first"
                    .to_string()
            }
            EvaluationError::TimeOutOfRange { .. } => {
                "Resulting time is too far in the past or future".to_string()
            }
        }
    }

    fn span(&self) -> Option<Span> {
        match self {
            EvaluationError::UnknownFunction { span, .. }
            | EvaluationError::Misaligned { span, .. }
            | EvaluationError::TimeOutOfRange { span } => Some(*span),
        }
    }
}

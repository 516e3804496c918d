//! Shared shape of user-facing errors.

use super::span::{Location, Span};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable machine-readable error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "PARSE_ERROR")]
    Parse,
    #[serde(rename = "TYPE_ERROR")]
    Type,
    #[serde(rename = "FUNCTION_ERROR")]
    Function,
    #[serde(rename = "EVALUATION_ERROR")]
    Evaluation,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Parse => "PARSE_ERROR",
            ErrorCode::Type => "TYPE_ERROR",
            ErrorCode::Function => "FUNCTION_ERROR",
            ErrorCode::Evaluation => "EVALUATION_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error that can be shown to a program author.
///
/// `Display` carries the precise diagnostic; `user_message` the friendlier
/// text an editor surface shows next to the program.
pub trait Diagnostic: std::error::Error {
    fn code(&self) -> ErrorCode;

    fn user_message(&self) -> String;

    /// Source span the error points at, if it has one.
    fn span(&self) -> Option<Span> {
        None
    }

    fn location(&self) -> Option<Location> {
        self.span().map(|span| span.location())
    }
}

//! Lexer errors.

use chartexpr_ast::foundation::{Diagnostic, ErrorCode, Span};
use thiserror::Error;

/// Failure at the first character that starts no valid token.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error(
        "Lexer error: unexpected character '{found}' at line {line}, column {column}",
        line = .span.line,
        column = .span.column
    )]
    UnexpectedCharacter { found: char, span: Span },

    #[error(
        "Lexer error: invalid {what} literal {text} at line {line}, column {column}",
        line = .span.line,
        column = .span.column
    )]
    InvalidLiteral {
        what: &'static str,
        text: String,
        span: Span,
    },
}

impl LexError {
    /// Classify the unmatched source slice starting at `span`.
    pub(crate) fn at(slice: &str, span: Span) -> Self {
        let mut chars = slice.chars();
        match chars.next() {
            Some('"') if slice.len() > 1 => LexError::InvalidLiteral {
                what: "string",
                text: slice.to_string(),
                span,
            },
            Some(c) if c.is_ascii_digit() => LexError::InvalidLiteral {
                what: if slice.ends_with(|c: char| c.is_ascii_alphabetic()) {
                    "duration"
                } else {
                    "number"
                },
                text: slice.to_string(),
                span,
            },
            Some(found) => LexError::UnexpectedCharacter {
                found,
                span: Span::new(span.start, span.start + found.len_utf8() as u32, span.line, span.column),
            },
            None => LexError::UnexpectedCharacter { found: '\0', span },
        }
    }

    /// The error text without its position.
    pub fn reason(&self) -> String {
        match self {
            LexError::UnexpectedCharacter { found, .. } => {
                format!("Lexer error: unexpected character '{}'", found)
            }
            LexError::InvalidLiteral { what, text, .. } => {
                format!("Lexer error: invalid {} literal {}", what, text)
            }
        }
    }

    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedCharacter { span, .. } | LexError::InvalidLiteral { span, .. } => *span,
        }
    }
}

impl Diagnostic for LexError {
    fn code(&self) -> ErrorCode {
        ErrorCode::Parse
    }

    fn user_message(&self) -> String {
        match self {
            LexError::UnexpectedCharacter { found, .. } => {
                format!("Unexpected character '{}'", found)
            }
            LexError::InvalidLiteral { what, text, .. } => format!("Invalid {} {}", what, text),
        }
    }

    fn span(&self) -> Option<Span> {
        Some(LexError::span(self))
    }
}

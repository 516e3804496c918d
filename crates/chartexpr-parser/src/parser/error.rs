//! Parse error types.

use chartexpr_ast::foundation::{Diagnostic, ErrorCode, Span};
use chartexpr_lexer::{LexError, Token};
use thiserror::Error;

/// Parse error with source location and context.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message} at line {line}, column {column}", line = .span.line, column = .span.column)]
pub struct ParseError {
    /// Kind of parse error
    pub kind: ParseErrorKind,
    /// Source location where error occurred
    pub span: Span,
    /// Precise diagnostic message
    pub message: String,
    /// Short message for editor surfaces
    pub user_message: String,
    /// Lexer failure this error was raised from
    #[source]
    pub source: Option<LexError>,
}

/// Category of parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A character that starts no token, or a malformed literal.
    Lex,

    /// A token other than the one the grammar requires at this point.
    ///
    /// Example: `A = 1 B = 2` where `;` was expected before `B`.
    UnexpectedToken,

    /// Input ended while a construct was still open.
    ///
    /// Example: `A =`, `moving_avg(A, 7d`.
    UnexpectedEof,

    /// Tokens are present but violate a grammar rule.
    ///
    /// Example: chained comparison `A > 1 > 2`.
    InvalidSyntax,
}

impl ParseError {
    fn new(kind: ParseErrorKind, span: Span, message: String, user_message: String) -> Self {
        Self {
            kind,
            span,
            message,
            user_message,
            source: None,
        }
    }

    /// Create an "expected X, found Y" error.
    pub fn expected(expected: &str, found: Option<&Token>, span: Span) -> Self {
        match found {
            Some(token) => Self::new(
                ParseErrorKind::UnexpectedToken,
                span,
                format!("expected {}, found {}", expected, token.describe()),
                format!("Expected {} before {}", expected, token.describe()),
            ),
            None => Self::new(
                ParseErrorKind::UnexpectedEof,
                span,
                format!("expected {}, found end of input", expected),
                format!("Expected {} but the program ended", expected),
            ),
        }
    }

    /// Create an "expected token" error.
    pub fn expected_token(expected: &Token, found: Option<&Token>, span: Span) -> Self {
        Self::expected(&format!("'{}'", expected), found, span)
    }

    /// Create an "unexpected token" error.
    pub fn unexpected_token(found: Option<&Token>, context: &str, span: Span) -> Self {
        match found {
            Some(token) => Self::new(
                ParseErrorKind::UnexpectedToken,
                span,
                format!("unexpected {} {}", token.describe(), context),
                format!("Unexpected {}", token.describe()),
            ),
            None => Self::new(
                ParseErrorKind::UnexpectedEof,
                span,
                format!("unexpected end of input {}", context),
                "The program ended unexpectedly".to_string(),
            ),
        }
    }

    /// Create an "invalid syntax" error.
    pub fn invalid_syntax(message: impl Into<String>, user_message: impl Into<String>, span: Span) -> Self {
        Self::new(
            ParseErrorKind::InvalidSyntax,
            span,
            message.into(),
            user_message.into(),
        )
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        Self {
            kind: ParseErrorKind::Lex,
            span: err.span(),
            message: err.reason(),
            user_message: err.user_message(),
            source: Some(err),
        }
    }
}

impl Diagnostic for ParseError {
    fn code(&self) -> ErrorCode {
        ErrorCode::Parse
    }

    fn user_message(&self) -> String {
        self.user_message.clone()
    }

    fn span(&self) -> Option<Span> {
        Some(self.span)
    }
}

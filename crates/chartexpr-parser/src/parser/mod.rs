//! Hand-written recursive descent parser.
//!
//! ## Architecture
//!
//! - `stream`: TokenStream wrapper with lookahead
//! - `error`: ParseError and its categories
//! - `program`: statement list, `;` separators and error recovery
//! - `expr`: expression parser using precedence climbing
//!
//! ## Public API
//!
//! ```rust,ignore
//! pub fn parse_program(source: &str) -> Result<Program, Vec<ParseError>>
//! pub fn parse_tokens(source: &str, tokens: &[(Token, Span)]) -> Result<Program, Vec<ParseError>>
//! pub fn parse_expr(source: &str) -> Result<Expr, Vec<ParseError>>
//! ```

mod error;
mod expr;
mod program;
mod stream;

pub use error::{ParseError, ParseErrorKind};
pub use stream::MAX_NESTING;
use stream::TokenStream;

use chartexpr_ast::foundation::Span;
use chartexpr_ast::{Expr, Program};
use chartexpr_lexer::Token;

/// Lex and parse a whole program.
///
/// A lexer failure is reported as a single parse error of kind
/// [`ParseErrorKind::Lex`]; grammar errors are collected across statements.
pub fn parse_program(source: &str) -> Result<Program, Vec<ParseError>> {
    let tokens = chartexpr_lexer::tokenize(source).map_err(|e| vec![ParseError::from(e)])?;
    tracing::trace!(tokens = tokens.len(), "lexed program");
    parse_tokens(source, &tokens)
}

/// Parse an already tokenized program.
///
/// `source` is the text `tokens` were lexed from; it positions errors at the
/// end of input.
pub fn parse_tokens(source: &str, tokens: &[(Token, Span)]) -> Result<Program, Vec<ParseError>> {
    let mut stream = TokenStream::new(source, tokens);
    program::parse_program(&mut stream)
}

/// Lex and parse a single expression; the whole input must be consumed.
pub fn parse_expr(source: &str) -> Result<Expr, Vec<ParseError>> {
    let tokens = chartexpr_lexer::tokenize(source).map_err(|e| vec![ParseError::from(e)])?;
    let mut stream = TokenStream::new(source, &tokens);
    let expr = expr::parse_expr(&mut stream).map_err(|e| vec![e])?;
    match stream.peek() {
        None => Ok(expr),
        Some(token) => Err(vec![ParseError::unexpected_token(
            Some(token),
            "after expression",
            stream.current_span(),
        )]),
    }
}

//! Hand-written recursive descent parser for the chart expression language.
//!
//! Source text goes through [`chartexpr_lexer::tokenize`] and the resulting
//! token stream is turned directly into the typed AST from `chartexpr-ast`.

pub mod parser;

pub use parser::{
    parse_expr, parse_program, parse_tokens, ParseError, ParseErrorKind, MAX_NESTING,
};

// Re-export lexer
pub use chartexpr_lexer::Token;

//! Statements and the program.
//!
//! ```text
//! Program   := (Statement (';' Statement)*)? ';'?
//! Statement := Identifier '=' Expression | Expression
//! ```
//!
//! A newline is not a separator and an empty statement between two `;` is
//! an error. After a failed statement the parser skips past the next `;`
//! and keeps going, so one run reports every broken statement.

use super::expr::parse_expr;
use super::{ParseError, TokenStream};
use chartexpr_ast::{Program, Statement};
use chartexpr_lexer::Token;

pub(super) fn parse_program(stream: &mut TokenStream) -> Result<Program, Vec<ParseError>> {
    if stream.at_end() {
        return Err(vec![ParseError::expected(
            "a statement",
            None,
            stream.current_span(),
        )]);
    }

    let mut statements = Vec::new();
    let mut errors = Vec::new();

    while !stream.at_end() {
        match parse_statement(stream) {
            Ok(statement) => {
                statements.push(statement);
                match stream.peek() {
                    None => break,
                    Some(Token::Semicolon) => {
                        stream.advance();
                    }
                    Some(token) => {
                        errors.push(ParseError::expected(
                            "';' between statements",
                            Some(token),
                            stream.current_span(),
                        ));
                        stream.synchronize();
                    }
                }
            }
            Err(e) => {
                errors.push(e);
                stream.synchronize();
            }
        }
    }

    if errors.is_empty() {
        Ok(Program::new(statements))
    } else {
        Err(errors)
    }
}

fn parse_statement(stream: &mut TokenStream) -> Result<Statement, ParseError> {
    if matches!(stream.peek(), Some(Token::Semicolon)) {
        return Err(ParseError::invalid_syntax(
            "empty statement between ';' separators",
            "Remove the extra ';'",
            stream.current_span(),
        ));
    }

    match (stream.peek(), stream.peek_nth(1)) {
        (Some(Token::Ident(name)), Some(Token::Eq)) => {
            let start = stream.current_pos();
            stream.advance();
            stream.advance();
            let expr = parse_expr(stream)?;
            Ok(Statement::assignment(name.to_string(), expr, stream.span_from(start)))
        }
        _ => Ok(Statement::expression(parse_expr(stream)?)),
    }
}

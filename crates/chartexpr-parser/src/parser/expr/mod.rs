//! Expression parser using precedence climbing.
//!
//! ## Precedence Levels (lowest to highest)
//!
//! 1. `or` - left associative
//! 2. `and` - left associative
//! 3. `>`, `>=`, `<`, `<=`, `==` - non-associative, at most one per level
//! 4. `+`, `-` - left associative
//! 5. `*`, `/` - left associative
//! 6. Unary `!`, `not`, `-` - prefix
//! 7. Atoms: literals, identifiers, calls, parenthesized expressions
//!
//! ## Module Organization
//!
//! - `atoms` - Literals, identifiers, calls and their arguments

mod atoms;

use super::{ParseError, TokenStream};
use chartexpr_ast::{BinaryOp, Expr, ExprKind, UnaryOp};
use chartexpr_lexer::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Or,
    And,
    Comparison,
    Additive,
    Multiplicative,
}

/// Binary operator a token denotes at a given precedence level.
fn binary_op(token: &Token, level: Level) -> Option<BinaryOp> {
    let op = match (level, token) {
        (Level::Or, Token::Or) => BinaryOp::Or,
        (Level::And, Token::And) => BinaryOp::And,
        (Level::Comparison, Token::Gt) => BinaryOp::Gt,
        (Level::Comparison, Token::GtEq) => BinaryOp::GtEq,
        (Level::Comparison, Token::Lt) => BinaryOp::Lt,
        (Level::Comparison, Token::LtEq) => BinaryOp::LtEq,
        (Level::Comparison, Token::EqEq) => BinaryOp::Eq,
        (Level::Additive, Token::Plus) => BinaryOp::Add,
        (Level::Additive, Token::Minus) => BinaryOp::Sub,
        (Level::Multiplicative, Token::Star) => BinaryOp::Mul,
        (Level::Multiplicative, Token::Slash) => BinaryOp::Div,
        _ => return None,
    };
    Some(op)
}

/// Parse an expression.
pub(super) fn parse_expr(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    parse_or(stream)
}

/// Parse one left-associative level on top of the next tighter level.
fn parse_left_assoc(
    stream: &mut TokenStream,
    level: Level,
    operand: fn(&mut TokenStream) -> Result<Expr, ParseError>,
) -> Result<Expr, ParseError> {
    let mut left = operand(stream)?;
    while let Some(op) = stream.peek().and_then(|t| binary_op(t, level)) {
        stream.advance();
        let right = operand(stream)?;
        left = Expr::binary(op, left, right);
    }
    Ok(left)
}

fn parse_or(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    parse_left_assoc(stream, Level::Or, parse_and)
}

fn parse_and(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    parse_left_assoc(stream, Level::And, parse_comparison)
}

/// Comparisons do not chain: `A > 1 > 2` is a syntax error.
fn parse_comparison(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let left = parse_additive(stream)?;
    let Some(op) = stream.peek().and_then(|t| binary_op(t, Level::Comparison)) else {
        return Ok(left);
    };
    stream.advance();
    let right = parse_additive(stream)?;

    if let Some(next) = stream.peek().filter(|t| binary_op(t, Level::Comparison).is_some()) {
        return Err(ParseError::invalid_syntax(
            format!(
                "comparison operators cannot be chained: '{}' follows '{}'",
                next, op
            ),
            "Comparisons cannot be chained; combine them with 'and'",
            stream.current_span(),
        ));
    }

    Ok(Expr::binary(op, left, right))
}

fn parse_additive(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    parse_left_assoc(stream, Level::Additive, parse_multiplicative)
}

fn parse_multiplicative(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    parse_left_assoc(stream, Level::Multiplicative, parse_unary)
}

/// Parse prefix operators, then an atom.
fn parse_unary(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let op = match stream.peek() {
        Some(Token::Bang) | Some(Token::Not) => UnaryOp::Not,
        Some(Token::Minus) => UnaryOp::Neg,
        _ => return atoms::parse_atom(stream),
    };

    let op_span = stream.current_span();
    stream.advance();
    let operand = stream.nested(parse_unary)?;
    let span = op_span.merge(&operand.span);

    Ok(Expr::new(
        ExprKind::Unary {
            op,
            operand: Box::new(operand),
        },
        span,
    ))
}

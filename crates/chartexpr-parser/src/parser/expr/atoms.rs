//! Atomic expressions - literals, identifiers, calls, parenthesized expressions.

use super::super::{ParseError, TokenStream};
use chartexpr_ast::{Expr, ExprKind, Literal};
use chartexpr_lexer::Token;

/// Parse atomic expressions.
pub(super) fn parse_atom(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let span = stream.current_span();

    let literal = match stream.peek() {
        Some(Token::Number(n)) => Literal::Number(*n),
        Some(Token::True) => Literal::Boolean(true),
        Some(Token::False) => Literal::Boolean(false),
        Some(Token::String(s)) => Literal::String(s.to_string()),
        Some(Token::Duration(d)) => Literal::Duration(*d),
        Some(Token::Ident(_)) if matches!(stream.peek_nth(1), Some(Token::LParen)) => {
            return stream.nested(parse_call);
        }
        Some(Token::Ident(name)) => {
            stream.advance();
            return Ok(Expr::identifier(name.to_string(), span));
        }
        Some(Token::LParen) => return parse_parenthesized(stream),
        other => {
            return Err(ParseError::unexpected_token(other, "in expression", span));
        }
    };

    stream.advance();
    Ok(Expr::literal(literal, span))
}

/// Parse parenthesized expression.
fn parse_parenthesized(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    stream.expect(Token::LParen)?;
    let expr = stream.nested(super::parse_expr)?;
    stream.expect(Token::RParen)?;
    Ok(expr)
}

/// Parse `name(arg, ...)`.
fn parse_call(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let start = stream.current_pos();
    let name = match stream.advance() {
        Some(Token::Ident(name)) => name.to_string(),
        other => {
            return Err(ParseError::unexpected_token(
                other,
                "as function name",
                stream.span_from(start),
            ));
        }
    };
    stream.expect(Token::LParen)?;

    let mut args = Vec::new();
    if !stream.check(&Token::RParen) {
        loop {
            args.push(parse_argument(stream)?);
            if stream.check(&Token::Comma) {
                stream.advance();
            } else {
                break;
            }
        }
    }

    if !stream.check(&Token::RParen) {
        return Err(ParseError::expected(
            &format!("',' or ')' in arguments of '{}'", name),
            stream.peek(),
            stream.current_span(),
        ));
    }
    stream.advance();

    Ok(Expr::new(
        ExprKind::Call { name, args },
        stream.span_from(start),
    ))
}

/// Parse one call argument.
///
/// `Identifier '=' Expression` is a named argument. Anything else, including
/// an identifier followed by `==`, falls back to a plain expression.
fn parse_argument(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let (Some(Token::Ident(name)), Some(Token::Eq)) = (stream.peek(), stream.peek_nth(1)) else {
        return super::parse_expr(stream);
    };

    let start = stream.current_pos();
    stream.advance();
    stream.advance();
    let value = super::parse_expr(stream)?;

    Ok(Expr::new(
        ExprKind::NamedArgument {
            name: name.to_string(),
            value: Box::new(value),
        },
        stream.span_from(start),
    ))
}
